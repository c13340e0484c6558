use clap::Subcommand;
use studyhub_core::Config;

use crate::console::open_hub;

#[derive(Subcommand)]
pub enum ThemeAction {
    /// Print the current theme
    Get,
    /// Switch between dark and light
    Toggle,
}

pub fn run(action: ThemeAction, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let mut hub = open_hub(config)?;

    match action {
        ThemeAction::Get => println!("{}", hub.theme()),
        ThemeAction::Toggle => println!("{}", hub.toggle_theme()),
    }
    Ok(())
}
