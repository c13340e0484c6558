//! Task types.
//!
//! A task has no id: its identity is its position in the [`TaskList`].

mod list;

pub use list::TaskList;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// Date format used for due dates, both in storage and on input.
pub const DUE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Fixed set of task categories.
///
/// Serialized as the display label, e.g. `"Exam Prep"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Study,
    Homework,
    ExamPrep,
    Project,
    Personal,
    Other,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Study,
        Category::Homework,
        Category::ExamPrep,
        Category::Project,
        Category::Personal,
        Category::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::Study => "Study",
            Category::Homework => "Homework",
            Category::ExamPrep => "Exam Prep",
            Category::Project => "Project",
            Category::Personal => "Personal",
            Category::Other => "Other",
        }
    }

    /// Case-insensitive match against labels; `-`/`_` stand in for spaces.
    pub fn from_label(label: &str) -> Option<Category> {
        let wanted = label.trim().replace(['-', '_'], " ");
        Category::ALL
            .into_iter()
            .find(|c| c.label().eq_ignore_ascii_case(&wanted))
    }
}

impl Default for Category {
    fn default() -> Self {
        Category::Study
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::from_label(s).ok_or_else(|| ValidationError::InvalidValue {
            field: "category".into(),
            message: format!(
                "unknown category '{s}' (expected one of: {})",
                Category::ALL.map(|c| c.label()).join(", ")
            ),
        })
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for Category {
    /// Labels outside the fixed set load as [`Category::Other`].
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        Ok(Category::from_label(&label).unwrap_or(Category::Other))
    }
}

/// A user-entered to-do item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub text: String,
    pub category: Category,
    pub completed: bool,
    /// Stored as `""` when absent.
    #[serde(with = "due_date", default)]
    pub due_date: Option<NaiveDate>,
}

impl Task {
    pub fn new(text: impl Into<String>, category: Category, due_date: Option<NaiveDate>) -> Self {
        Self {
            text: text.into(),
            category,
            completed: false,
            due_date,
        }
    }
}

/// Parse a `YYYY-MM-DD` due date.
pub fn parse_due_date(input: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(input.trim(), DUE_DATE_FORMAT).map_err(|e| {
        ValidationError::InvalidValue {
            field: "dueDate".into(),
            message: format!("'{input}' is not a YYYY-MM-DD date: {e}"),
        }
    })
}

/// Which tasks a [`TaskList::filter`] view yields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskFilter {
    #[default]
    All,
    Completed,
    Pending,
}

impl TaskFilter {
    pub fn matches(&self, task: &Task) -> bool {
        match self {
            TaskFilter::All => true,
            TaskFilter::Completed => task.completed,
            TaskFilter::Pending => !task.completed,
        }
    }
}

mod due_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::DUE_DATE_FORMAT;

    pub fn serialize<S: Serializer>(date: &Option<NaiveDate>, s: S) -> Result<S::Ok, S::Error> {
        match date {
            Some(d) => s.serialize_str(&d.format(DUE_DATE_FORMAT).to_string()),
            None => s.serialize_str(""),
        }
    }

    /// Empty, null and unparseable values all mean "no due date".
    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveDate>, D::Error> {
        let raw = Option::<String>::deserialize(d)?;
        Ok(raw.and_then(|s| NaiveDate::parse_from_str(s.trim(), DUE_DATE_FORMAT).ok()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_labels_roundtrip() {
        for category in Category::ALL {
            assert_eq!(Category::from_label(category.label()), Some(category));
        }
        assert_eq!(Category::from_label("exam-prep"), Some(Category::ExamPrep));
        assert_eq!(Category::from_label("  study "), Some(Category::Study));
        assert!("Chores".parse::<Category>().is_err());
    }

    #[test]
    fn task_uses_stored_field_names() {
        let task = Task::new("Read ch.3", Category::ExamPrep, None);
        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "text": "Read ch.3",
                "category": "Exam Prep",
                "completed": false,
                "dueDate": ""
            })
        );
    }

    #[test]
    fn due_date_tolerates_missing_and_garbage() {
        let task: Task =
            serde_json::from_str(r#"{"text":"a","category":"Study","completed":true}"#).unwrap();
        assert_eq!(task.due_date, None);

        let task: Task = serde_json::from_str(
            r#"{"text":"a","category":"Study","completed":true,"dueDate":"next week"}"#,
        )
        .unwrap();
        assert_eq!(task.due_date, None);

        let task: Task = serde_json::from_str(
            r#"{"text":"a","category":"Study","completed":true,"dueDate":"2025-01-10"}"#,
        )
        .unwrap();
        assert_eq!(task.due_date, NaiveDate::from_ymd_opt(2025, 1, 10));
    }

    #[test]
    fn unknown_category_loads_as_other() {
        let task: Task =
            serde_json::from_str(r#"{"text":"a","category":"Chores","completed":false}"#).unwrap();
        assert_eq!(task.category, Category::Other);
    }

    #[test]
    fn parse_due_date_rejects_bad_input() {
        assert!(parse_due_date("2025-01-10").is_ok());
        assert!(parse_due_date("10/01/2025").is_err());
    }

    #[test]
    fn filter_matches_completion() {
        let mut task = Task::new("x", Category::Other, None);
        assert!(TaskFilter::Pending.matches(&task));
        task.completed = true;
        assert!(TaskFilter::Completed.matches(&task));
        assert!(TaskFilter::All.matches(&task));
    }
}
