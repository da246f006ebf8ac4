//! Persistence bridge between the task list and key-value storage.
//!
//! # Responsibility
//! - Encode/decode the task list as one JSON array string.
//! - Read once at startup, write after every mutation.
//!
//! # Invariants
//! - The list lives under the fixed key `TODOS_STORAGE_KEY`.
//! - Unreadable stored values decode to an empty list, never an error.
//! - Decoded lists never contain duplicate ids.

use crate::model::task::Task;
use crate::storage::{KeyValueStorage, StorageError};
use log::{debug, warn};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Storage key holding the serialized task list.
pub const TODOS_STORAGE_KEY: &str = "todos";

pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// Failure while moving the task list in or out of storage.
#[derive(Debug)]
pub enum PersistenceError {
    Storage(StorageError),
    Encode(serde_json::Error),
}

impl Display for PersistenceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Storage(err) => write!(f, "task list storage failed: {err}"),
            Self::Encode(err) => write!(f, "task list encoding failed: {err}"),
        }
    }
}

impl Error for PersistenceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            Self::Encode(err) => Some(err),
        }
    }
}

impl From<StorageError> for PersistenceError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

impl From<serde_json::Error> for PersistenceError {
    fn from(value: serde_json::Error) -> Self {
        Self::Encode(value)
    }
}

/// Serializes tasks into the stored JSON array form.
pub fn encode_tasks(tasks: &[Task]) -> PersistenceResult<String> {
    Ok(serde_json::to_string(tasks)?)
}

/// Parses a stored value back into tasks.
///
/// Returns `None` when `raw` is not a JSON array of task objects.
/// Later entries reusing an earlier id are dropped.
pub fn decode_tasks(raw: &str) -> Option<Vec<Task>> {
    let decoded = serde_json::from_str::<Vec<Task>>(raw).ok()?;

    let mut seen = HashSet::with_capacity(decoded.len());
    let total = decoded.len();
    let tasks = decoded
        .into_iter()
        .filter(|task| seen.insert(task.id.clone()))
        .collect::<Vec<_>>();
    if tasks.len() != total {
        warn!(
            "event=tasks_decode module=persistence status=ok dropped_duplicates={}",
            total - tasks.len()
        );
    }

    Some(tasks)
}

/// Adapter reading and writing the task list through a storage backend.
pub struct PersistenceBridge<S> {
    storage: S,
    key: &'static str,
}

impl<S: KeyValueStorage> PersistenceBridge<S> {
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, TODOS_STORAGE_KEY)
    }

    /// Uses `key` instead of the default `todos` slot.
    pub fn with_key(storage: S, key: &'static str) -> Self {
        Self { storage, key }
    }

    pub fn key(&self) -> &'static str {
        self.key
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Reads the last written list.
    ///
    /// Missing, empty and unparsable values all yield an empty list.
    ///
    /// # Errors
    /// - Returns `Storage` when the backend itself fails to read.
    pub fn read_tasks(&self) -> PersistenceResult<Vec<Task>> {
        let Some(raw) = self.storage.get_item(self.key)? else {
            debug!(
                "event=tasks_read module=persistence status=ok source=absent key={}",
                self.key
            );
            return Ok(Vec::new());
        };

        if raw.is_empty() {
            return Ok(Vec::new());
        }

        match decode_tasks(&raw) {
            Some(tasks) => {
                debug!(
                    "event=tasks_read module=persistence status=ok source=stored key={} count={}",
                    self.key,
                    tasks.len()
                );
                Ok(tasks)
            }
            None => {
                warn!(
                    "event=tasks_read module=persistence status=degraded reason=unparsable key={} bytes={}",
                    self.key,
                    raw.len()
                );
                Ok(Vec::new())
            }
        }
    }

    /// Replaces the stored list with `tasks`.
    pub fn write_tasks(&mut self, tasks: &[Task]) -> PersistenceResult<()> {
        let encoded = encode_tasks(tasks)?;
        self.storage.set_item(self.key, &encoded)?;
        debug!(
            "event=tasks_write module=persistence status=ok key={} count={} bytes={}",
            self.key,
            tasks.len(),
            encoded.len()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{decode_tasks, encode_tasks, PersistenceBridge, TODOS_STORAGE_KEY};
    use crate::model::task::Task;
    use crate::storage::{KeyValueStorage, MemoryStorage};

    #[test]
    fn encode_uses_stored_field_names() {
        let mut task = Task::with_id("a1", "Buy milk");
        let encoded = encode_tasks(std::slice::from_ref(&task)).unwrap();
        assert_eq!(encoded, r#"[{"id":"a1","todo":"Buy milk","isCompleted":false}]"#);

        task.completed = true;
        let encoded = encode_tasks(&[task]).unwrap();
        assert!(encoded.contains(r#""isCompleted":true"#));
    }

    #[test]
    fn decode_rejects_non_array_values() {
        assert_eq!(decode_tasks("not json"), None);
        assert_eq!(decode_tasks("null"), None);
        assert_eq!(decode_tasks(r#"{"id":"a1"}"#), None);
        assert_eq!(decode_tasks(r#"[{"id":"a1","todo":"x"}]"#), None);
    }

    #[test]
    fn decode_ignores_unknown_fields() {
        let tasks =
            decode_tasks(r#"[{"id":"a1","todo":"Buy milk","isCompleted":true,"extra":1}]"#)
                .expect("extra fields are tolerated");
        assert_eq!(tasks.len(), 1);
        assert!(tasks[0].completed);
    }

    #[test]
    fn decode_keeps_first_of_duplicate_ids() {
        let tasks = decode_tasks(
            r#"[{"id":"a1","todo":"first","isCompleted":false},
                {"id":"b2","todo":"other","isCompleted":false},
                {"id":"a1","todo":"second","isCompleted":true}]"#,
        )
        .unwrap();
        let texts = tasks.iter().map(|t| t.text.as_str()).collect::<Vec<_>>();
        assert_eq!(texts, vec!["first", "other"]);
    }

    #[test]
    fn read_treats_empty_string_as_no_data() {
        let storage = MemoryStorage::new().with_item(TODOS_STORAGE_KEY, "");
        let bridge = PersistenceBridge::new(storage);
        assert!(bridge.read_tasks().unwrap().is_empty());
    }

    #[test]
    fn custom_key_is_used_for_reads_and_writes() {
        let mut bridge = PersistenceBridge::with_key(MemoryStorage::new(), "todos-test");
        bridge.write_tasks(&[Task::with_id("a1", "Buy milk")]).unwrap();

        let storage = bridge.into_storage();
        assert_eq!(storage.get_item(TODOS_STORAGE_KEY).unwrap(), None);
        assert!(storage.get_item("todos-test").unwrap().is_some());
    }
}
