//! Task management commands for CLI.

use chrono::NaiveDate;
use clap::{Subcommand, ValueEnum};
use serde::Serialize;
use studyhub_core::task::parse_due_date;
use studyhub_core::{Category, Config, Direction, ReorderInput, Task, TaskFilter};

use crate::console::{index, open_hub};

#[derive(Subcommand)]
pub enum TaskAction {
    /// Add a task
    Add {
        /// Task text
        text: String,
        /// Category label, e.g. "Homework" or "exam-prep"
        #[arg(long, default_value = "Study")]
        category: Category,
        /// Due date (YYYY-MM-DD)
        #[arg(long, value_parser = parse_due_date)]
        due: Option<NaiveDate>,
    },
    /// List tasks
    List {
        #[arg(long, value_enum, default_value_t = ListFilter::All)]
        filter: ListFilter,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Replace a task's text
    Edit {
        /// Position (1-based)
        position: usize,
        /// New text
        text: String,
    },
    /// Flip a task between pending and completed
    Toggle {
        /// Position (1-based)
        position: usize,
    },
    /// Delete a task
    Delete {
        /// Position (1-based)
        position: usize,
    },
    /// Delete every task
    Clear {
        /// Confirm clearing the whole list
        #[arg(long)]
        yes: bool,
    },
    /// Sort by due date, undated tasks last
    Sort,
    /// Move a task to another position
    Move {
        /// Current position (1-based)
        from: usize,
        /// New position (1-based)
        to: usize,
    },
    /// Swap a task with its neighbor
    Nudge {
        /// Position (1-based)
        position: usize,
        #[arg(value_enum)]
        direction: NudgeDirection,
    },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ListFilter {
    All,
    Completed,
    Pending,
}

impl From<ListFilter> for TaskFilter {
    fn from(filter: ListFilter) -> Self {
        match filter {
            ListFilter::All => TaskFilter::All,
            ListFilter::Completed => TaskFilter::Completed,
            ListFilter::Pending => TaskFilter::Pending,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum NudgeDirection {
    Up,
    Down,
}

impl From<NudgeDirection> for Direction {
    fn from(direction: NudgeDirection) -> Self {
        match direction {
            NudgeDirection::Up => Direction::Up,
            NudgeDirection::Down => Direction::Down,
        }
    }
}

#[derive(Serialize)]
struct Row<'a> {
    position: usize,
    #[serde(flatten)]
    task: &'a Task,
}

fn render(position: usize, task: &Task) -> String {
    let mark = if task.completed { "x" } else { " " };
    let mut line = format!("{position:>3}. [{mark}] {}  ({}", task.text, task.category);
    if let Some(due) = task.due_date {
        line.push_str(&format!(", due {due}"));
    }
    line.push(')');
    line
}

pub fn run(action: TaskAction, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let mut hub = open_hub(config)?;

    match action {
        TaskAction::Add {
            text,
            category,
            due,
        } => {
            hub.add_task(&text, category, due)?;
        }
        TaskAction::List { filter, json } => {
            let rows: Vec<Row> = hub
                .tasks()
                .filter(filter.into())
                .map(|(i, task)| Row {
                    position: i + 1,
                    task,
                })
                .collect();
            if json {
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else if rows.is_empty() {
                println!("No tasks.");
            } else {
                for row in &rows {
                    println!("{}", render(row.position, row.task));
                }
            }
        }
        TaskAction::Edit { position, text } => {
            let i = index(position, hub.tasks().len(), "task")?;
            hub.edit_task(i, &text)?;
        }
        TaskAction::Toggle { position } => {
            let i = index(position, hub.tasks().len(), "task")?;
            hub.toggle_task(i)?;
        }
        TaskAction::Delete { position } => {
            let i = index(position, hub.tasks().len(), "task")?;
            hub.delete_task(i)?;
        }
        TaskAction::Clear { yes } => {
            if !yes {
                return Err("refusing to clear all tasks without --yes".into());
            }
            hub.clear_tasks();
        }
        TaskAction::Sort => hub.sort_tasks_by_due_date(),
        TaskAction::Move { from, to } => {
            let len = hub.tasks().len();
            let (from, to) = (index(from, len, "task")?, index(to, len, "task")?);
            if !hub.reorder_task(from, to)? {
                println!("Task is already at position {}.", to + 1);
            }
        }
        TaskAction::Nudge {
            position,
            direction,
        } => {
            let focused = index(position, hub.tasks().len(), "task")?;
            let outcome = hub.dispatch_reorder(ReorderInput::Key {
                focused,
                direction: direction.into(),
            })?;
            if let Some(focus) = outcome.focus {
                if outcome.moved {
                    println!("Task moved to position {}.", focus + 1);
                } else {
                    println!("Task is already at the edge of the list.");
                }
            }
        }
    }
    Ok(())
}
