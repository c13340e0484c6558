//! Application state.
//!
//! [`StudyHub`] owns the store, the notifier and every model component. The
//! UI layer holds one instance and calls its methods; each method builds a
//! [`Context`] from the owned store and notifier and hands it to the
//! component doing the work.

use chrono::NaiveDate;
use tracing::info;

use crate::context::Context;
use crate::error::{CoreError, ValidationError};
use crate::events::{Event, Notifier};
use crate::goal::{Goal, GoalList};
use crate::reorder::{ReorderController, ReorderInput, ReorderOutcome};
use crate::sessions::{SessionCounter, SessionLog, SessionRecord};
use crate::storage::{Config, PersistentStore, SqliteStore};
use crate::task::{Category, Task, TaskList};
use crate::theme::Theme;
use crate::timer::{expiry_message, SessionTimer, TickOutcome, TickScheduler};

pub struct StudyHub<S: PersistentStore, N: Notifier> {
    store: S,
    notifier: N,
    tasks: TaskList,
    goals: GoalList,
    reorder: ReorderController,
    timer: SessionTimer,
    counter: SessionCounter,
    log: SessionLog,
    theme: Theme,
}

impl<N: Notifier> StudyHub<SqliteStore, N> {
    /// Open the on-disk store and rehydrate from it.
    pub fn open(notifier: N, config: &Config) -> Result<Self, CoreError> {
        let store = SqliteStore::open()?;
        Ok(Self::load(store, notifier, config))
    }
}

impl<S: PersistentStore, N: Notifier> StudyHub<S, N> {
    /// Rehydrate every component from `store`. Never fails: unreadable
    /// pieces load empty and are reported through `notifier`.
    pub fn load(mut store: S, mut notifier: N, config: &Config) -> Self {
        let mut ctx = Context::new(&mut store, &mut notifier);
        let counter = SessionCounter::load(&mut ctx);
        let theme = Theme::load(&mut ctx);
        let tasks = TaskList::load(&mut ctx);
        let goals = GoalList::load(&mut ctx);
        let log = SessionLog::load(&mut ctx);
        info!(
            tasks = tasks.len(),
            goals = goals.len(),
            sessions = counter.value(),
            "state loaded"
        );
        Self {
            store,
            notifier,
            tasks,
            goals,
            reorder: ReorderController::new(),
            timer: SessionTimer::new(config.timer.default_minutes),
            counter,
            log,
            theme,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn tasks(&self) -> &TaskList {
        &self.tasks
    }

    pub fn goals(&self) -> &GoalList {
        &self.goals
    }

    pub fn timer(&self) -> &SessionTimer {
        &self.timer
    }

    pub fn session_count(&self) -> u64 {
        self.counter.value()
    }

    pub fn session_log(&self) -> &SessionLog {
        &self.log
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn notifier_mut(&mut self) -> &mut N {
        &mut self.notifier
    }

    /// Text for the session log export file.
    pub fn export_log(&self) -> String {
        self.log.export_text()
    }

    // ── Tasks ────────────────────────────────────────────────────────

    pub fn add_task(
        &mut self,
        text: &str,
        category: Category,
        due_date: Option<NaiveDate>,
    ) -> Result<Task, ValidationError> {
        let mut ctx = Context::new(&mut self.store, &mut self.notifier);
        self.tasks.add(&mut ctx, text, category, due_date)
    }

    pub fn edit_task(&mut self, position: usize, text: &str) -> Result<&Task, ValidationError> {
        let mut ctx = Context::new(&mut self.store, &mut self.notifier);
        self.tasks.edit(&mut ctx, position, text)
    }

    pub fn toggle_task(&mut self, position: usize) -> Result<&Task, ValidationError> {
        let mut ctx = Context::new(&mut self.store, &mut self.notifier);
        self.tasks.toggle_completed(&mut ctx, position)
    }

    pub fn delete_task(&mut self, position: usize) -> Result<Task, ValidationError> {
        let mut ctx = Context::new(&mut self.store, &mut self.notifier);
        self.tasks.delete(&mut ctx, position)
    }

    pub fn clear_tasks(&mut self) {
        let mut ctx = Context::new(&mut self.store, &mut self.notifier);
        self.tasks.clear_all(&mut ctx);
    }

    pub fn sort_tasks_by_due_date(&mut self) {
        let mut ctx = Context::new(&mut self.store, &mut self.notifier);
        self.tasks.sort_by_due_date(&mut ctx);
    }

    pub fn reorder_task(&mut self, from: usize, to: usize) -> Result<bool, ValidationError> {
        let mut ctx = Context::new(&mut self.store, &mut self.notifier);
        self.tasks.reorder(&mut ctx, from, to)
    }

    /// Feed one drag or keyboard command to the reorder controller.
    pub fn dispatch_reorder(
        &mut self,
        input: ReorderInput,
    ) -> Result<ReorderOutcome, ValidationError> {
        let mut ctx = Context::new(&mut self.store, &mut self.notifier);
        self.reorder.dispatch(&mut self.tasks, &mut ctx, input)
    }

    // ── Goals ────────────────────────────────────────────────────────

    pub fn add_goal(&mut self, text: &str) -> Result<&Goal, ValidationError> {
        let mut ctx = Context::new(&mut self.store, &mut self.notifier);
        self.goals.add(&mut ctx, text)
    }

    pub fn complete_goal(&mut self, position: usize) -> Result<Goal, ValidationError> {
        let mut ctx = Context::new(&mut self.store, &mut self.notifier);
        self.goals.complete(&mut ctx, position)
    }

    pub fn clear_goals(&mut self) {
        let mut ctx = Context::new(&mut self.store, &mut self.notifier);
        self.goals.clear_all(&mut ctx);
    }

    // ── Timer ────────────────────────────────────────────────────────

    /// Start the countdown. Returns `false` when it was already running.
    pub fn start_timer(&mut self, scheduler: &mut dyn TickScheduler) -> bool {
        match self.timer.start(scheduler) {
            Some(event) => {
                self.notifier.notify(event);
                true
            }
            None => false,
        }
    }

    pub fn reset_timer(&mut self) {
        let event = self.timer.reset();
        self.notifier.notify(event);
    }

    pub fn set_preset(&mut self, minutes: u32) -> Result<(), ValidationError> {
        let event = self.timer.set_preset(minutes)?;
        self.notifier.notify(event);
        Ok(())
    }

    /// Deliver one tick from the source tagged `generation`.
    ///
    /// On expiry the session is counted and logged before this returns.
    pub fn tick(&mut self, generation: u64) -> TickOutcome {
        let outcome = self.timer.tick(generation);
        match outcome {
            TickOutcome::Ignored => {}
            TickOutcome::Ticked {
                remaining_secs,
                progress,
            } => self.notifier.notify(Event::TimerTick {
                remaining_secs,
                total_secs: self.timer.total_secs(),
                progress,
            }),
            TickOutcome::Expired {
                total_secs,
                total_minutes,
            } => {
                self.notifier.notify(Event::TimerTick {
                    remaining_secs: 0,
                    total_secs,
                    progress: 0.0,
                });
                self.complete_session(total_secs, total_minutes);
            }
        }
        outcome
    }

    fn complete_session(&mut self, total_secs: u32, total_minutes: u32) {
        let mut ctx = Context::new(&mut self.store, &mut self.notifier);
        let session_count = self.counter.increment(&mut ctx);
        self.log.append(&mut ctx, SessionRecord::now(total_minutes));
        info!(total_minutes, session_count, "session completed");
        ctx.notify(Event::TimerExpired {
            total_minutes,
            message: expiry_message(total_secs).to_string(),
            session_count,
        });
    }

    // ── Theme ────────────────────────────────────────────────────────

    pub fn toggle_theme(&mut self) -> Theme {
        let mut ctx = Context::new(&mut self.store, &mut self.notifier);
        self.theme.toggle(&mut ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{keys, MemoryStore};
    use crate::timer::{ManualScheduler, Phase};

    fn hub() -> StudyHub<MemoryStore, Vec<Event>> {
        StudyHub::load(MemoryStore::new(), Vec::new(), &Config::default())
    }

    #[test]
    fn fresh_store_loads_empty_without_warnings() {
        let hub = hub();
        assert!(hub.tasks().is_empty());
        assert!(hub.goals().is_empty());
        assert_eq!(hub.session_count(), 0);
        assert_eq!(hub.theme(), Theme::Light);
        assert_eq!(hub.timer().remaining_secs(), 1500);
        assert!(hub.notifier().is_empty());
    }

    #[test]
    fn configured_default_duration_is_used() {
        let mut config = Config::default();
        config.timer.default_minutes = 45;
        let hub = StudyHub::load(MemoryStore::new(), Vec::<Event>::new(), &config);
        assert_eq!(hub.timer().total_secs(), 45 * 60);
    }

    #[test]
    fn expiry_counts_logs_and_notifies() {
        let mut hub = hub();
        let mut scheduler = ManualScheduler::new();
        hub.set_preset(1).unwrap();
        assert!(hub.start_timer(&mut scheduler));
        let generation = hub.timer().generation().unwrap();
        for _ in 0..60 {
            hub.tick(generation);
        }

        assert_eq!(hub.timer().phase(), Phase::Idle);
        assert_eq!(hub.session_count(), 1);
        assert_eq!(hub.session_log().last().unwrap().duration_minutes, 1);
        assert_eq!(
            hub.store().get(keys::SESSION_COUNT).unwrap().as_deref(),
            Some("1")
        );
        let expired = hub
            .notifier()
            .iter()
            .find(|e| matches!(e, Event::TimerExpired { .. }))
            .unwrap();
        assert_eq!(
            expired,
            &Event::TimerExpired {
                total_minutes: 1,
                message: "Break over! Back to work.".into(),
                session_count: 1,
            }
        );
    }

    #[test]
    fn reset_while_running_drops_pending_ticks() {
        let mut hub = hub();
        let mut scheduler = ManualScheduler::new();
        hub.start_timer(&mut scheduler);
        let generation = hub.timer().generation().unwrap();
        hub.tick(generation);
        hub.reset_timer();
        assert_eq!(scheduler.active(), 0);
        assert_eq!(hub.tick(generation), TickOutcome::Ignored);
        assert_eq!(hub.timer().remaining_secs(), 1500);
    }

    #[test]
    fn theme_toggle_round_trips_through_load() {
        let mut hub = hub();
        hub.toggle_theme();
        let store = hub.store().clone();
        let reloaded = StudyHub::load(store, Vec::<Event>::new(), &Config::default());
        assert_eq!(reloaded.theme(), Theme::Dark);
    }
}
