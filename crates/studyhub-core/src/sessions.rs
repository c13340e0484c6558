//! Completed-session bookkeeping: the session counter and the session log.

use chrono::{DateTime, Local, TimeZone};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::context::Context;
use crate::storage::keys;

/// File name used when exporting the log.
pub const EXPORT_FILE_NAME: &str = "study_sessions.txt";

/// One completed countdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    /// Display timestamp, e.g. `1/10/2025, 3:04:05 PM`.
    #[serde(rename = "date")]
    pub timestamp: String,
    #[serde(rename = "duration")]
    pub duration_minutes: u32,
}

impl SessionRecord {
    pub fn new<Tz>(at: &DateTime<Tz>, duration_minutes: u32) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        Self {
            timestamp: display_timestamp(at),
            duration_minutes,
        }
    }

    pub fn now(duration_minutes: u32) -> Self {
        Self::new(&Local::now(), duration_minutes)
    }
}

pub fn display_timestamp<Tz>(at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    at.format("%-m/%-d/%Y, %-I:%M:%S %p").to_string()
}

/// Append-only log of completed sessions, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionLog {
    records: Vec<SessionRecord>,
}

impl SessionLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[SessionRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn last(&self) -> Option<&SessionRecord> {
        self.records.last()
    }

    pub fn append(&mut self, ctx: &mut Context<'_>, record: SessionRecord) {
        self.records.push(record);
        ctx.save_json(keys::SESSION_LOG, &self.records);
    }

    /// One `<timestamp>: <duration> minutes` line per record.
    pub fn export_text(&self) -> String {
        self.records
            .iter()
            .map(|r| format!("{}: {} minutes", r.timestamp, r.duration_minutes))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Rehydrate from storage. Malformed records are skipped; anything that
    /// isn't a JSON array loads as an empty log with a warning.
    pub fn load(ctx: &mut Context<'_>) -> Self {
        let Some(raw) = ctx.load(keys::SESSION_LOG) else {
            return Self::new();
        };
        match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Array(entries)) => {
                let total = entries.len();
                let records: Vec<SessionRecord> = entries
                    .into_iter()
                    .filter_map(|e| serde_json::from_value(e).ok())
                    .filter(|r: &SessionRecord| r.duration_minutes > 0)
                    .collect();
                if records.len() < total {
                    debug!(skipped = total - records.len(), "dropped malformed session records");
                }
                Self { records }
            }
            Ok(_) => {
                warn!("stored session log is not a list");
                ctx.warn("Error loading session log.");
                Self::new()
            }
            Err(e) => {
                warn!(error = %e, "failed to parse stored session log");
                ctx.warn("Error loading session log.");
                Self::new()
            }
        }
    }
}

/// Number of completed sessions, stored as a decimal string.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SessionCounter(u64);

impl SessionCounter {
    pub fn value(&self) -> u64 {
        self.0
    }

    pub fn increment(&mut self, ctx: &mut Context<'_>) -> u64 {
        self.0 += 1;
        ctx.save(keys::SESSION_COUNT, &self.0.to_string());
        self.0
    }

    pub fn load(ctx: &mut Context<'_>) -> Self {
        let Some(raw) = ctx.load(keys::SESSION_COUNT) else {
            return Self::default();
        };
        match raw.trim().parse::<u64>() {
            Ok(n) => Self(n),
            Err(e) => {
                warn!(error = %e, raw = %raw, "stored session count is not a number");
                ctx.warn("Error loading session count.");
                Self::default()
            }
        }
    }
}
