use chrono::NaiveDate;
use serde_json::Value;
use tracing::{debug, warn};

use super::{Category, Task, TaskFilter};
use crate::context::Context;
use crate::error::ValidationError;
use crate::events::Event;
use crate::storage::keys;

const COLLECTION: &str = "task list";

/// Ordered task collection.
///
/// Every successful mutation writes the full list under [`keys::TASKS`], so
/// the persisted order always equals the in-memory order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskList {
    tasks: Vec<Task>,
}

impl TaskList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, position: usize) -> Option<&Task> {
        self.tasks.get(position)
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Lazily yields `(position, task)` pairs matching `filter`.
    ///
    /// Positions refer to the unfiltered list, so they can be fed straight
    /// back into `toggle_completed`, `delete` and friends.
    pub fn filter(&self, filter: TaskFilter) -> impl Iterator<Item = (usize, &Task)> + '_ {
        self.tasks
            .iter()
            .enumerate()
            .filter(move |(_, task)| filter.matches(task))
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn add(
        &mut self,
        ctx: &mut Context<'_>,
        text: &str,
        category: Category,
        due_date: Option<NaiveDate>,
    ) -> Result<Task, ValidationError> {
        let text = required_text(text)?;
        let task = Task::new(text, category, due_date);
        self.tasks.push(task.clone());
        self.persist(ctx);
        ctx.notify(Event::TaskAdded {
            position: self.tasks.len() - 1,
            text: task.text.clone(),
            category,
        });
        Ok(task)
    }

    pub fn edit(
        &mut self,
        ctx: &mut Context<'_>,
        position: usize,
        new_text: &str,
    ) -> Result<&Task, ValidationError> {
        ValidationError::check_position(COLLECTION, position, self.tasks.len())?;
        let text = required_text(new_text)?;
        self.tasks[position].text = text;
        self.persist(ctx);
        ctx.notify(Event::TaskEdited { position });
        Ok(&self.tasks[position])
    }

    pub fn toggle_completed(
        &mut self,
        ctx: &mut Context<'_>,
        position: usize,
    ) -> Result<&Task, ValidationError> {
        ValidationError::check_position(COLLECTION, position, self.tasks.len())?;
        let completed = !self.tasks[position].completed;
        self.tasks[position].completed = completed;
        self.persist(ctx);
        ctx.notify(Event::TaskToggled {
            position,
            completed,
        });
        Ok(&self.tasks[position])
    }

    pub fn delete(&mut self, ctx: &mut Context<'_>, position: usize) -> Result<Task, ValidationError> {
        ValidationError::check_position(COLLECTION, position, self.tasks.len())?;
        let removed = self.tasks.remove(position);
        self.persist(ctx);
        ctx.notify(Event::TaskDeleted { position });
        Ok(removed)
    }

    /// Remove every task. Asking the user first is the caller's job.
    pub fn clear_all(&mut self, ctx: &mut Context<'_>) {
        self.tasks.clear();
        self.persist(ctx);
        ctx.notify(Event::TasksCleared);
    }

    /// Stable sort by due date, undated tasks last.
    pub fn sort_by_due_date(&mut self, ctx: &mut Context<'_>) {
        self.tasks
            .sort_by_key(|task| (task.due_date.is_none(), task.due_date));
        self.persist(ctx);
        ctx.notify(Event::TasksSorted);
    }

    /// Move the task at `from` to `to`, shifting the tasks in between by one.
    ///
    /// Returns `false` (and writes nothing) when `from == to`.
    pub fn reorder(
        &mut self,
        ctx: &mut Context<'_>,
        from: usize,
        to: usize,
    ) -> Result<bool, ValidationError> {
        let len = self.tasks.len();
        ValidationError::check_position(COLLECTION, from, len)?;
        ValidationError::check_position(COLLECTION, to, len)?;
        if from == to {
            return Ok(false);
        }
        let task = self.tasks.remove(from);
        self.tasks.insert(to, task);
        self.persist(ctx);
        ctx.notify(Event::TaskMoved { from, to });
        Ok(true)
    }

    // ── Persistence ──────────────────────────────────────────────────

    pub fn serialize(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.tasks)
    }

    /// Decode a stored task list, skipping malformed entries.
    ///
    /// Returns the tasks plus a warning when the blob could not be used at
    /// all. Never fails.
    pub fn deserialize(raw: &str) -> (Vec<Task>, Option<String>) {
        let entries = match serde_json::from_str::<Value>(raw) {
            Ok(Value::Array(entries)) => entries,
            Ok(other) => {
                warn!(kind = json_kind(&other), "stored tasks are not a list");
                return (Vec::new(), Some("Error loading tasks.".into()));
            }
            Err(e) => {
                warn!(error = %e, "failed to parse stored tasks");
                return (Vec::new(), Some("Error loading tasks.".into()));
            }
        };

        let total = entries.len();
        let tasks: Vec<Task> = entries.into_iter().filter_map(decode_entry).collect();
        if tasks.len() < total {
            debug!(skipped = total - tasks.len(), "dropped malformed stored tasks");
        }
        (tasks, None)
    }

    /// Rehydrate from storage. A missing key is an empty list.
    pub fn load(ctx: &mut Context<'_>) -> Self {
        let Some(raw) = ctx.load(keys::TASKS) else {
            return Self::new();
        };
        let (tasks, warning) = Self::deserialize(&raw);
        if let Some(message) = warning {
            ctx.warn(message);
        }
        Self { tasks }
    }

    fn persist(&self, ctx: &mut Context<'_>) {
        ctx.save_json(keys::TASKS, &self.tasks);
    }
}

fn required_text(text: &str) -> Result<String, ValidationError> {
    if text.trim().is_empty() {
        return Err(ValidationError::EmptyText { field: "task text" });
    }
    Ok(text.to_string())
}

/// An entry is usable when it is an object with non-empty `text` and
/// `category` strings and a boolean `completed`.
fn decode_entry(entry: Value) -> Option<Task> {
    let obj = entry.as_object()?;
    let text = obj.get("text")?.as_str().filter(|s| !s.is_empty())?;
    let category = obj.get("category")?.as_str().filter(|s| !s.is_empty())?;
    let completed = obj.get("completed")?.as_bool()?;
    let due_date = obj
        .get("dueDate")
        .and_then(Value::as_str)
        .and_then(|s| NaiveDate::parse_from_str(s.trim(), super::DUE_DATE_FORMAT).ok());

    Some(Task {
        text: text.to_string(),
        category: Category::from_label(category).unwrap_or(Category::Other),
        completed,
        due_date,
    })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
