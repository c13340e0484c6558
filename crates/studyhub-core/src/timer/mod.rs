mod engine;
mod ticker;

pub use engine::{
    expiry_message, format_clock, Phase, SessionTimer, TickOutcome, TimerState, DEFAULT_MINUTES,
    WORK_SESSION_SECS,
};
pub use ticker::{ManualScheduler, TickHandle, TickScheduler, TokioScheduler, TICK_INTERVAL};
