//! Tick sources for the session timer.
//!
//! A scheduler hands out one [`TickHandle`] per timer run. Each handle is
//! tagged with the run's generation; the timer only honours ticks carrying
//! the generation it is currently running, so a tick that was already queued
//! when its source got cancelled is dropped instead of decrementing twice.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// A live recurring tick source. Dropping it without `cancel` must not leave
/// ticks running either.
pub trait TickHandle {
    fn generation(&self) -> u64;

    fn cancel(self: Box<Self>);
}

pub trait TickScheduler {
    /// Begin delivering ticks for `generation` once per [`TICK_INTERVAL`].
    fn schedule(&mut self, generation: u64) -> Box<dyn TickHandle>;
}

// ── Manual ───────────────────────────────────────────────────────────

/// Deterministic scheduler: nothing ticks on its own, the driver calls
/// `StudyHub::tick` itself. Tracks how many sources are alive.
#[derive(Debug, Default, Clone)]
pub struct ManualScheduler {
    active: Rc<Cell<usize>>,
    scheduled: Rc<Cell<usize>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sources scheduled and not yet cancelled.
    pub fn active(&self) -> usize {
        self.active.get()
    }

    /// Sources ever scheduled.
    pub fn scheduled(&self) -> usize {
        self.scheduled.get()
    }
}

impl TickScheduler for ManualScheduler {
    fn schedule(&mut self, generation: u64) -> Box<dyn TickHandle> {
        self.active.set(self.active.get() + 1);
        self.scheduled.set(self.scheduled.get() + 1);
        Box::new(ManualHandle {
            generation,
            active: Some(Rc::clone(&self.active)),
        })
    }
}

struct ManualHandle {
    generation: u64,
    active: Option<Rc<Cell<usize>>>,
}

impl ManualHandle {
    fn release(&mut self) {
        if let Some(active) = self.active.take() {
            active.set(active.get().saturating_sub(1));
        }
    }
}

impl TickHandle for ManualHandle {
    fn generation(&self) -> u64 {
        self.generation
    }

    fn cancel(mut self: Box<Self>) {
        self.release();
    }
}

impl Drop for ManualHandle {
    fn drop(&mut self) {
        self.release();
    }
}

// ── Tokio ────────────────────────────────────────────────────────────

/// Spawns a `tokio` interval task per run on the current runtime; ticks
/// arrive as generation numbers on the receiver returned by [`Self::new`].
pub struct TokioScheduler {
    tx: mpsc::UnboundedSender<u64>,
    period: Duration,
}

impl TokioScheduler {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<u64>) {
        Self::with_period(TICK_INTERVAL)
    }

    /// Custom cadence, for tests and demos.
    pub fn with_period(period: Duration) -> (Self, mpsc::UnboundedReceiver<u64>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx, period }, rx)
    }
}

impl TickScheduler for TokioScheduler {
    fn schedule(&mut self, generation: u64) -> Box<dyn TickHandle> {
        let tx = self.tx.clone();
        let period = self.period;
        let task = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick completes immediately; skip it so the first
            // decrement lands one full period after start.
            interval.tick().await;
            loop {
                interval.tick().await;
                if tx.send(generation).is_err() {
                    break;
                }
            }
        });
        Box::new(TokioHandle { generation, task })
    }
}

struct TokioHandle {
    generation: u64,
    task: JoinHandle<()>,
}

impl TickHandle for TokioHandle {
    fn generation(&self) -> u64 {
        self.generation
    }

    fn cancel(self: Box<Self>) {
        self.task.abort();
    }
}

impl Drop for TokioHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}
