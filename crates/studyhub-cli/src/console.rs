//! Terminal side of the core: the notifier that renders events, and the
//! helpers every command uses to open state and read positions.

use std::io::Write;

use studyhub_core::storage::NotificationsConfig;
use studyhub_core::timer::format_clock;
use studyhub_core::{Config, CoreError, Event, LogNotifier, Notifier, SqliteStore, StudyHub};

/// Prints toasts to stdout and warnings to stderr, and logs every event.
pub struct Console {
    log: LogNotifier,
    toasts: bool,
    sound: bool,
    clock: bool,
}

impl Console {
    pub fn new(notifications: &NotificationsConfig) -> Self {
        Self {
            log: LogNotifier,
            toasts: notifications.enabled,
            sound: notifications.sound,
            clock: false,
        }
    }

    /// Also redraw a live `M:SS` clock on every timer event.
    pub fn with_clock(mut self) -> Self {
        self.clock = true;
        self
    }

    fn draw_clock(&self, remaining_secs: u32) {
        let mut out = std::io::stdout();
        let _ = write!(out, "\r{} ", format_clock(remaining_secs));
        let _ = out.flush();
    }
}

impl Notifier for Console {
    fn notify(&mut self, event: Event) {
        match &event {
            Event::Warning { message } => eprintln!("warning: {message}"),
            Event::TimerStarted { total_secs } if self.clock => self.draw_clock(*total_secs),
            Event::TimerTick { remaining_secs, .. } if self.clock => {
                self.draw_clock(*remaining_secs)
            }
            Event::TimerExpired {
                message,
                session_count,
                ..
            } => {
                if self.clock {
                    println!();
                }
                if self.sound {
                    print!("\x07");
                }
                if self.toasts {
                    println!("{message} (sessions completed: {session_count})");
                }
            }
            _ => {
                if self.toasts {
                    if let Some(text) = event.message() {
                        println!("{text}");
                    }
                }
            }
        }
        self.log.notify(event);
    }
}

pub type Hub = StudyHub<SqliteStore, Console>;

pub fn open_hub(config: &Config) -> Result<Hub, CoreError> {
    StudyHub::open(Console::new(&config.notifications), config)
}

/// Convert a 1-based position typed by the user into an index into a
/// collection of `len` items.
pub fn index(position: usize, len: usize, what: &str) -> Result<usize, String> {
    if position == 0 || position > len {
        return Err(match len {
            0 => format!("no {what} at position {position} (the list is empty)"),
            _ => format!("no {what} at position {position} (expected 1 to {len})"),
        });
    }
    Ok(position - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_is_one_based() {
        assert_eq!(index(1, 3, "task"), Ok(0));
        assert_eq!(index(3, 3, "task"), Ok(2));
        assert!(index(0, 3, "task").is_err());
        assert_eq!(
            index(4, 3, "task").unwrap_err(),
            "no task at position 4 (expected 1 to 3)"
        );
        assert_eq!(
            index(1, 0, "goal").unwrap_err(),
            "no goal at position 1 (the list is empty)"
        );
    }
}
