//! Session timer implementation.
//!
//! A countdown state machine driven by externally delivered ticks. The timer
//! never sleeps or spawns on its own: it asks a [`TickScheduler`] for a tick
//! source when started and the driver feeds each tick back through
//! [`SessionTimer::tick`].
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running -> (expired) -> Idle
//! ```
//!
//! `phase()` is `Running` exactly while a tick source is held, so the
//! "running implies a live source" rule holds by construction.

use serde::{Deserialize, Serialize};

use super::ticker::{TickHandle, TickScheduler};
use crate::error::ValidationError;
use crate::events::Event;

pub const DEFAULT_MINUTES: u32 = 25;

/// Total duration that counts as a work session when picking the expiry
/// message. Any other duration is reported as a break, including a custom
/// 25-minute break preset.
pub const WORK_SESSION_SECS: u32 = 25 * 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Idle,
    Running,
}

/// Plain-data view of the timer for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimerState {
    pub remaining_secs: u32,
    pub total_secs: u32,
    pub phase: Phase,
    /// `remaining_secs / total_secs`, 1.0 when freshly set.
    pub progress: f64,
}

/// What a delivered tick did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome {
    /// Not running, or the tick came from a cancelled source.
    Ignored,
    Ticked { remaining_secs: u32, progress: f64 },
    /// The countdown hit zero. The timer is already back to Idle at the
    /// default duration; the caller owns the completion side effects.
    Expired { total_secs: u32, total_minutes: u32 },
}

pub struct SessionTimer {
    default_secs: u32,
    remaining_secs: u32,
    total_secs: u32,
    /// Bumped for every run so ticks from older sources can be told apart.
    generation: u64,
    source: Option<Box<dyn TickHandle>>,
}

impl std::fmt::Debug for SessionTimer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionTimer")
            .field("remaining_secs", &self.remaining_secs)
            .field("total_secs", &self.total_secs)
            .field("generation", &self.generation)
            .field("phase", &self.phase())
            .finish()
    }
}

impl Default for SessionTimer {
    fn default() -> Self {
        Self::new(DEFAULT_MINUTES)
    }
}

impl SessionTimer {
    /// Create an idle timer whose default (and reset) duration is
    /// `default_minutes`. Zero falls back to [`DEFAULT_MINUTES`].
    pub fn new(default_minutes: u32) -> Self {
        let minutes = if default_minutes == 0 {
            DEFAULT_MINUTES
        } else {
            default_minutes
        };
        let default_secs = minutes.saturating_mul(60);
        Self {
            default_secs,
            remaining_secs: default_secs,
            total_secs: default_secs,
            generation: 0,
            source: None,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn phase(&self) -> Phase {
        if self.source.is_some() {
            Phase::Running
        } else {
            Phase::Idle
        }
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn total_secs(&self) -> u32 {
        self.total_secs
    }

    /// Generation of the live tick source, if running.
    pub fn generation(&self) -> Option<u64> {
        self.source.as_ref().map(|s| s.generation())
    }

    pub fn progress(&self) -> f64 {
        if self.total_secs == 0 {
            return 0.0;
        }
        self.remaining_secs as f64 / self.total_secs as f64
    }

    pub fn snapshot(&self) -> TimerState {
        TimerState {
            remaining_secs: self.remaining_secs,
            total_secs: self.total_secs,
            phase: self.phase(),
            progress: self.progress(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Start counting down. A no-op returning `None` when already running.
    pub fn start(&mut self, scheduler: &mut dyn TickScheduler) -> Option<Event> {
        if self.source.is_some() {
            return None;
        }
        self.generation += 1;
        self.source = Some(scheduler.schedule(self.generation));
        Some(Event::TimerStarted {
            total_secs: self.total_secs,
        })
    }

    /// Cancel any tick source and return to Idle at the default duration.
    pub fn reset(&mut self) -> Event {
        self.stop();
        self.remaining_secs = self.default_secs;
        self.total_secs = self.default_secs;
        Event::TimerReset {
            total_secs: self.total_secs,
        }
    }

    /// Reset, then load a `minutes`-long countdown. Stays Idle.
    pub fn set_preset(&mut self, minutes: u32) -> Result<Event, ValidationError> {
        let secs = minutes
            .checked_mul(60)
            .filter(|&s| s > 0)
            .ok_or_else(|| ValidationError::InvalidValue {
                field: "minutes".into(),
                message: format!("{minutes} is not a usable timer duration"),
            })?;
        self.reset();
        self.remaining_secs = secs;
        self.total_secs = secs;
        Ok(Event::TimerReset { total_secs: secs })
    }

    /// Apply one tick from the source tagged `generation`.
    pub fn tick(&mut self, generation: u64) -> TickOutcome {
        if self.generation() != Some(generation) {
            return TickOutcome::Ignored;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs > 0 {
            return TickOutcome::Ticked {
                remaining_secs: self.remaining_secs,
                progress: self.progress(),
            };
        }

        let total_secs = self.total_secs;
        self.reset();
        TickOutcome::Expired {
            total_secs,
            total_minutes: total_secs / 60,
        }
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn stop(&mut self) {
        if let Some(source) = self.source.take() {
            source.cancel();
        }
    }
}

/// Message shown when a countdown of `total_secs` expires.
pub fn expiry_message(total_secs: u32) -> &'static str {
    if total_secs == WORK_SESSION_SECS {
        "Time's up! Take a break."
    } else {
        "Break over! Back to work."
    }
}

/// `M:SS` clock text, e.g. `25:00` or `4:05`.
pub fn format_clock(secs: u32) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}
