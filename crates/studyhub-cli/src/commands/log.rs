use std::path::PathBuf;

use clap::Subcommand;
use studyhub_core::Config;

use crate::console::open_hub;

#[derive(Subcommand)]
pub enum LogAction {
    /// Show completed sessions, oldest first
    Show {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Print the number of completed sessions
    Count,
    /// Write the log as plain text, one line per session
    Export {
        /// Output path (default: export.file_name in the current directory)
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

pub fn run(action: LogAction, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let hub = open_hub(config)?;

    match action {
        LogAction::Show { json } => {
            let records = hub.session_log().records();
            if json {
                println!("{}", serde_json::to_string_pretty(records)?);
            } else if records.is_empty() {
                println!("No sessions yet.");
            } else {
                println!("{}", hub.export_log());
            }
        }
        LogAction::Count => println!("{}", hub.session_count()),
        LogAction::Export { out } => {
            let path = out.unwrap_or_else(|| PathBuf::from(&config.export.file_name));
            let mut text = hub.export_log();
            if !text.is_empty() {
                text.push('\n');
            }
            std::fs::write(&path, text)?;
            tracing::info!(path = %path.display(), sessions = hub.session_log().len(), "exported session log");
            println!("Exported {} session(s) to {}", hub.session_log().len(), path.display());
        }
    }
    Ok(())
}
