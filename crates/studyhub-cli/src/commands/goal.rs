use clap::Subcommand;
use serde_json::json;
use studyhub_core::Config;

use crate::console::{index, open_hub};

#[derive(Subcommand)]
pub enum GoalAction {
    /// Add a goal
    Add {
        /// Goal text
        text: String,
    },
    /// List goals
    List {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Mark a goal done, removing it
    Done {
        /// Position (1-based)
        position: usize,
    },
    /// Delete every goal
    Clear {
        /// Confirm clearing the whole list
        #[arg(long)]
        yes: bool,
    },
}

pub fn run(action: GoalAction, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let mut hub = open_hub(config)?;

    match action {
        GoalAction::Add { text } => {
            hub.add_goal(&text)?;
        }
        GoalAction::List { json } => {
            let goals = hub.goals().goals();
            if json {
                let rows: Vec<_> = goals
                    .iter()
                    .enumerate()
                    .map(|(i, goal)| json!({ "position": i + 1, "text": goal.text }))
                    .collect();
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else if goals.is_empty() {
                println!("No goals.");
            } else {
                for (i, goal) in goals.iter().enumerate() {
                    println!("{:>3}. {}", i + 1, goal.text);
                }
            }
        }
        GoalAction::Done { position } => {
            let i = index(position, hub.goals().len(), "goal")?;
            hub.complete_goal(i)?;
        }
        GoalAction::Clear { yes } => {
            if !yes {
                return Err("refusing to clear all goals without --yes".into());
            }
            hub.clear_goals();
        }
    }
    Ok(())
}
