use serde::{Deserialize, Serialize};
use std::fmt;

use crate::context::Context;
use crate::events::Event;
use crate::storage::keys;

/// Color scheme preference, stored as `"dark"` or `"light"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Dark,
    #[default]
    Light,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    /// Anything other than `"dark"` reads as light.
    pub fn load(ctx: &mut Context<'_>) -> Self {
        match ctx.load(keys::THEME).as_deref() {
            Some("dark") => Theme::Dark,
            _ => Theme::Light,
        }
    }

    pub fn toggle(&mut self, ctx: &mut Context<'_>) -> Theme {
        *self = self.toggled();
        ctx.save(keys::THEME, self.as_str());
        ctx.notify(Event::ThemeChanged { theme: *self });
        *self
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
