//! Core domain logic for the task list.
//! This crate is the single source of truth for task list invariants.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod persistence;
pub mod service;
pub mod storage;

pub use config::{default_db_path, DB_PATH_ENV, DEFAULT_DB_FILE_NAME};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::task::{
    generate_task_id, normalize_task_text, Task, TaskId, TaskValidationError,
    MIN_TASK_TEXT_CHARS,
};
pub use persistence::{
    decode_tasks, encode_tasks, PersistenceBridge, PersistenceError, PersistenceResult,
    TODOS_STORAGE_KEY,
};
pub use service::task_store::{text_meets_minimum, TaskStore};
pub use storage::{KeyValueStorage, MemoryStorage, SqliteStorage, StorageError, StorageResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
