use serde::{Deserialize, Serialize};

use crate::task::Category;
use crate::theme::Theme;

/// Every state change in the system produces an Event.
/// The UI layer decides how (or whether) to show them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    TaskAdded {
        position: usize,
        text: String,
        category: Category,
    },
    TaskEdited {
        position: usize,
    },
    TaskToggled {
        position: usize,
        completed: bool,
    },
    TaskDeleted {
        position: usize,
    },
    TasksCleared,
    TasksSorted,
    TaskMoved {
        from: usize,
        to: usize,
    },
    GoalAdded {
        position: usize,
    },
    GoalCompleted {
        position: usize,
    },
    GoalsCleared,
    TimerStarted {
        total_secs: u32,
    },
    TimerTick {
        remaining_secs: u32,
        total_secs: u32,
        progress: f64,
    },
    TimerReset {
        total_secs: u32,
    },
    /// Countdown reached zero; the session has been counted and logged.
    TimerExpired {
        total_minutes: u32,
        message: String,
        session_count: u64,
    },
    ThemeChanged {
        theme: Theme,
    },
    /// Persistence or rehydration degraded; the in-memory model is still valid.
    Warning {
        message: String,
    },
}

/// Receives events from the core. Toasts, audio cues and modals live
/// behind this trait.
pub trait Notifier {
    fn notify(&mut self, event: Event);
}

/// Records every event, mostly for tests and JSON output.
impl Notifier for Vec<Event> {
    fn notify(&mut self, event: Event) {
        self.push(event);
    }
}

/// Forwards events to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&mut self, event: Event) {
        match &event {
            Event::Warning { message } => tracing::warn!("{message}"),
            Event::TimerTick { .. } => tracing::trace!(?event, "tick"),
            _ => tracing::debug!(?event, "event"),
        }
    }
}

impl Event {
    pub fn warning(message: impl Into<String>) -> Self {
        Event::Warning {
            message: message.into(),
        }
    }

    /// Short user-facing text for the event, if it warrants one.
    pub fn message(&self) -> Option<String> {
        let text = match self {
            Event::TaskAdded { .. } => "Task added!".to_string(),
            Event::TaskEdited { .. } => "Task updated!".to_string(),
            Event::TaskToggled { completed: true, .. } => "Task completed!".to_string(),
            Event::TaskToggled { completed: false, .. } => "Task marked as pending.".to_string(),
            Event::TaskDeleted { .. } => "Task deleted.".to_string(),
            Event::TasksCleared => "All tasks cleared.".to_string(),
            Event::TasksSorted => "Tasks sorted by due date.".to_string(),
            Event::GoalAdded { .. } => "Goal added!".to_string(),
            Event::GoalCompleted { .. } => "Goal completed.".to_string(),
            Event::GoalsCleared => "All goals cleared.".to_string(),
            Event::TimerExpired { message, .. } => message.clone(),
            Event::Warning { message } => message.clone(),
            _ => return None,
        };
        Some(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_serialize_with_type_tag() {
        let json = serde_json::to_value(Event::TaskToggled {
            position: 0,
            completed: true,
        })
        .unwrap();
        assert_eq!(json["type"], "task_toggled");
        assert_eq!(json["completed"], true);
    }

    #[test]
    fn toggle_message_depends_on_state() {
        let done = Event::TaskToggled {
            position: 2,
            completed: true,
        };
        let pending = Event::TaskToggled {
            position: 2,
            completed: false,
        };
        assert_eq!(done.message().as_deref(), Some("Task completed!"));
        assert_eq!(pending.message().as_deref(), Some("Task marked as pending."));
        assert!(Event::TimerStarted { total_secs: 60 }.message().is_none());
    }
}
