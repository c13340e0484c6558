//! Per-operation access to storage and notifications.
//!
//! Every mutating model operation receives a [`Context`]. Persisting through
//! it never fails from the caller's point of view: a backend error is logged,
//! turned into an [`Event::Warning`], and the in-memory model stays
//! authoritative for the rest of the run. Nothing is retried.

use serde::Serialize;
use tracing::{debug, warn};

use crate::events::{Event, Notifier};
use crate::storage::PersistentStore;

pub struct Context<'a> {
    store: &'a mut dyn PersistentStore,
    notifier: &'a mut dyn Notifier,
}

impl<'a> Context<'a> {
    pub fn new(store: &'a mut dyn PersistentStore, notifier: &'a mut dyn Notifier) -> Self {
        Self { store, notifier }
    }

    pub fn notify(&mut self, event: Event) {
        self.notifier.notify(event);
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        self.notifier.notify(Event::warning(message));
    }

    /// Read a raw value. A backend failure reads as "missing" plus a warning.
    pub fn load(&mut self, key: &str) -> Option<String> {
        match self.store.get(key) {
            Ok(value) => {
                debug!(key, found = value.is_some(), "loaded value");
                value
            }
            Err(e) => {
                warn!(key, error = %e, "failed to read from storage");
                self.warn(format!("Error loading {key}. Using fallback."));
                None
            }
        }
    }

    /// Write a raw value. Returns whether the write landed.
    pub fn save(&mut self, key: &str, value: &str) -> bool {
        match self.store.set(key, value) {
            Ok(()) => true,
            Err(e) => {
                warn!(key, error = %e, "failed to persist");
                self.warn(format!("Error saving {key}."));
                false
            }
        }
    }

    /// Serialize and write `value` as JSON.
    pub fn save_json<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> bool {
        match serde_json::to_string(value) {
            Ok(json) => self.save(key, &json),
            Err(e) => {
                warn!(key, error = %e, "failed to serialize");
                self.warn(format!("Error saving {key}."));
                false
            }
        }
    }
}
