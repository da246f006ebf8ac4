//! Task domain model.
//!
//! # Responsibility
//! - Define the task record and its persisted wire field names.
//! - Validate and normalize user-supplied task text.
//!
//! # Invariants
//! - `id` is assigned once on creation and never mutated.
//! - `completed` starts as `false`.
//! - Wire fields are `id`, `todo`, `isCompleted`.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Minimum accepted task text length, counted in chars after trimming.
pub const MIN_TASK_TEXT_CHARS: usize = 4;

/// Opaque task identifier.
///
/// New tasks get UUID v4 text; ids read back from storage are accepted
/// verbatim, whatever their shape.
pub type TaskId = String;

/// Reason a draft task text was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskValidationError {
    /// Text is empty or whitespace only.
    Empty,
    /// Trimmed text is shorter than `MIN_TASK_TEXT_CHARS`.
    TooShort { chars: usize, min: usize },
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "task text cannot be empty"),
            Self::TooShort { chars, min } => {
                write!(f, "task text has {chars} char(s); at least {min} required")
            }
        }
    }
}

impl Error for TaskValidationError {}

/// Single to-do entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    /// Serialized as `todo` to match the stored list format.
    #[serde(rename = "todo")]
    pub text: String,
    #[serde(rename = "isCompleted")]
    pub completed: bool,
}

impl Task {
    /// Creates an incomplete task with a freshly generated id.
    ///
    /// Callers are expected to pass text that already went through
    /// [`normalize_task_text`].
    pub fn new(text: impl Into<String>) -> Self {
        Self::with_id(generate_task_id(), text)
    }

    /// Creates an incomplete task with a caller-provided id.
    pub fn with_id(id: impl Into<TaskId>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            completed: false,
        }
    }

    /// Flips the completion flag.
    pub fn toggle(&mut self) {
        self.completed = !self.completed;
    }
}

/// Generates a new opaque task id.
pub fn generate_task_id() -> TaskId {
    Uuid::new_v4().to_string()
}

/// Trims `text` and checks it against the minimum length rule.
///
/// # Errors
/// - `Empty` when nothing is left after trimming.
/// - `TooShort` when fewer than `MIN_TASK_TEXT_CHARS` chars remain.
pub fn normalize_task_text(text: &str) -> Result<String, TaskValidationError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(TaskValidationError::Empty);
    }

    let chars = trimmed.chars().count();
    if chars < MIN_TASK_TEXT_CHARS {
        return Err(TaskValidationError::TooShort {
            chars,
            min: MIN_TASK_TEXT_CHARS,
        });
    }

    Ok(trimmed.to_string())
}
