//! # StudyHub Core Library
//!
//! Core logic for the StudyHub study dashboard: a categorized task list,
//! a goal list, a countdown session timer with a completed-session log,
//! and a theme preference. Everything is persisted through a small
//! key-value [`PersistentStore`] so that state survives restarts.
//!
//! The `studyhub` CLI binary is a thin layer over this crate.
//!
//! ## Architecture
//!
//! - **Timer**: a tick-driven state machine. A [`TickScheduler`] produces
//!   generation-tagged ticks and the caller feeds them to
//!   [`SessionTimer::tick`]; ticks from a cancelled source are ignored.
//! - **Storage**: SQLite key-value store and TOML configuration. Storage
//!   failures never abort an operation; they surface as warning events.
//! - **Events**: every model change is reported through a [`Notifier`].
//!
//! ## Key Components
//!
//! - [`StudyHub`]: owns the store, the notifier and all model state
//! - [`TaskList`]: ordered tasks with filtering, sorting and reordering
//! - [`GoalList`]: goals persisted as one snapshot
//! - [`SessionTimer`]: countdown engine
//! - [`Config`]: application configuration

pub mod app;
pub mod context;
pub mod error;
pub mod events;
pub mod goal;
pub mod reorder;
pub mod sessions;
pub mod storage;
pub mod task;
pub mod theme;
pub mod timer;

pub use app::StudyHub;
pub use context::Context;
pub use error::{ConfigError, CoreError, StorageError, ValidationError};
pub use events::{Event, LogNotifier, Notifier};
pub use goal::{Goal, GoalList};
pub use reorder::{Direction, ReorderController, ReorderInput, ReorderOutcome};
pub use sessions::{SessionCounter, SessionLog, SessionRecord};
pub use storage::{Config, MemoryStore, PersistentStore, SqliteStore};
pub use task::{Category, Task, TaskFilter, TaskList};
pub use theme::Theme;
pub use timer::{
    ManualScheduler, Phase, SessionTimer, TickOutcome, TickScheduler, TimerState, TokioScheduler,
};
