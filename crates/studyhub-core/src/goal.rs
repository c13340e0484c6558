//! Goal list.
//!
//! Goals are persisted as one snapshot under [`keys::GOALS`]: the whole list
//! is written on every change and read back in one piece. There is no
//! per-goal addressing in storage, and completing a goal removes it.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::context::Context;
use crate::error::ValidationError;
use crate::events::Event;
use crate::storage::keys;

const COLLECTION: &str = "goal list";

/// A free-text aspiration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Goal {
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GoalList {
    goals: Vec<Goal>,
}

impl GoalList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn goals(&self) -> &[Goal] {
        &self.goals
    }

    pub fn len(&self) -> usize {
        self.goals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.goals.is_empty()
    }

    pub fn add(&mut self, ctx: &mut Context<'_>, text: &str) -> Result<&Goal, ValidationError> {
        if text.trim().is_empty() {
            return Err(ValidationError::EmptyText { field: "goal text" });
        }
        self.goals.push(Goal {
            text: text.to_string(),
        });
        self.persist(ctx);
        let position = self.goals.len() - 1;
        ctx.notify(Event::GoalAdded { position });
        Ok(&self.goals[position])
    }

    /// Mark a goal done, which removes it.
    pub fn complete(&mut self, ctx: &mut Context<'_>, position: usize) -> Result<Goal, ValidationError> {
        ValidationError::check_position(COLLECTION, position, self.goals.len())?;
        let goal = self.goals.remove(position);
        self.persist(ctx);
        ctx.notify(Event::GoalCompleted { position });
        Ok(goal)
    }

    pub fn clear_all(&mut self, ctx: &mut Context<'_>) {
        self.goals.clear();
        self.persist(ctx);
        ctx.notify(Event::GoalsCleared);
    }

    pub fn snapshot(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.goals)
    }

    /// Decode a whole snapshot. Any defect rejects the snapshot as a unit.
    pub fn restore(snapshot: &str) -> Result<Self, serde_json::Error> {
        let goals = serde_json::from_str(snapshot)?;
        Ok(Self { goals })
    }

    /// Rehydrate from storage; a corrupt snapshot loads as an empty list.
    pub fn load(ctx: &mut Context<'_>) -> Self {
        let Some(raw) = ctx.load(keys::GOALS) else {
            return Self::new();
        };
        match Self::restore(&raw) {
            Ok(list) => list,
            Err(e) => {
                warn!(error = %e, "failed to restore goal snapshot");
                ctx.warn("Error loading goals.");
                Self::new()
            }
        }
    }

    fn persist(&self, ctx: &mut Context<'_>) {
        ctx.save_json(keys::GOALS, &self.goals);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStore, PersistentStore};

    #[test]
    fn add_complete_clear() {
        let mut store = MemoryStore::new();
        let mut events: Vec<Event> = Vec::new();
        let mut goals = GoalList::new();
        let mut ctx = Context::new(&mut store, &mut events);

        goals.add(&mut ctx, "Finish the essay").unwrap();
        goals.add(&mut ctx, "Learn 50 words").unwrap();
        goals.add(&mut ctx, "Sleep 8h").unwrap();

        let done = goals.complete(&mut ctx, 1).unwrap();
        assert_eq!(done.text, "Learn 50 words");
        assert_eq!(goals.len(), 2);
        assert!(goals.complete(&mut ctx, 2).is_err());

        goals.clear_all(&mut ctx);
        assert!(goals.is_empty());
        assert_eq!(store.get(keys::GOALS).unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn blank_goal_is_rejected() {
        let mut store = MemoryStore::new();
        let mut events: Vec<Event> = Vec::new();
        let mut goals = GoalList::new();
        let err = goals
            .add(&mut Context::new(&mut store, &mut events), "  ")
            .unwrap_err();
        assert_eq!(err, ValidationError::EmptyText { field: "goal text" });
        assert_eq!(store.write_count(keys::GOALS), 0);
    }

    #[test]
    fn snapshot_is_written_whole() {
        let mut store = MemoryStore::new();
        let mut events: Vec<Event> = Vec::new();
        let mut goals = GoalList::new();
        let mut ctx = Context::new(&mut store, &mut events);
        goals.add(&mut ctx, "one").unwrap();
        goals.add(&mut ctx, "two").unwrap();
        assert_eq!(
            store.get(keys::GOALS).unwrap().as_deref(),
            Some(r#"["one","two"]"#)
        );

        let restored = GoalList::load(&mut Context::new(&mut store, &mut events));
        assert_eq!(restored, goals);
    }

    #[test]
    fn partially_bad_snapshot_is_rejected_whole() {
        let mut store = MemoryStore::new();
        store.set(keys::GOALS, r#"["one", 2]"#).unwrap();
        let mut events: Vec<Event> = Vec::new();
        let goals = GoalList::load(&mut Context::new(&mut store, &mut events));
        assert!(goals.is_empty());
        assert_eq!(events, vec![Event::warning("Error loading goals.")]);
    }

    #[test]
    fn missing_snapshot_is_empty_without_warning() {
        let mut store = MemoryStore::new();
        let mut events: Vec<Event> = Vec::new();
        let goals = GoalList::load(&mut Context::new(&mut store, &mut events));
        assert!(goals.is_empty());
        assert!(events.is_empty());
    }
}
