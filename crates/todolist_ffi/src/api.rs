//! FFI use-case API for the task list UI shell.
//!
//! # Responsibility
//! - Expose sync, use-case-level task operations to Dart via FRB.
//! - Hand the UI an owned session handle instead of ambient global state.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - A session loads persisted tasks exactly once, when opened.
//! - Invalid text and unknown ids report `ok = true` with nothing changed;
//!   only storage failures report `ok = false`.

use log::warn;
use std::path::PathBuf;
use std::sync::OnceLock;
use todolist_core::{
    core_version as core_version_inner, default_db_path, init_logging as init_logging_inner,
    logging_status as logging_status_inner, text_meets_minimum, SqliteStorage, Task, TaskStore,
};

static DEFAULT_DB_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// # FFI contract
/// - Sync call; may create the log directory.
/// - Idempotent for the same `level + log_dir`.
/// - Returns empty string on success and an error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// Active logging configuration for the diagnostics view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingStatus {
    /// Whether `init_logging` has succeeded in this process.
    pub active: bool,
    /// Active level, empty when inactive.
    pub level: String,
    /// Active log directory, empty when inactive.
    pub log_dir: String,
}

/// Reports whether core logging is active and where it writes.
///
/// # FFI contract
/// - Sync call, no side effects.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn logging_status() -> LoggingStatus {
    match logging_status_inner() {
        Some((level, log_dir)) => LoggingStatus {
            active: true,
            level: level.to_string(),
            log_dir: log_dir.display().to_string(),
        },
        None => LoggingStatus {
            active: false,
            level: String::new(),
            log_dir: String::new(),
        },
    }
}

/// Opaque handle owning one UI session's task list.
#[flutter_rust_bridge::frb(opaque)]
pub struct TaskSession {
    store: TaskStore<SqliteStorage>,
    db_path: PathBuf,
}

/// Task row as rendered by the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskItem {
    pub id: String,
    pub text: String,
    pub completed: bool,
}

impl From<&Task> for TaskItem {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id.clone(),
            text: task.text.clone(),
            completed: task.completed,
        }
    }
}

/// Generic action response envelope for task operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskActionResponse {
    /// Whether the operation and its persistence write succeeded.
    pub ok: bool,
    /// Whether the task list changed.
    pub changed: bool,
    /// Created task ID for `task_add`.
    pub task_id: Option<String>,
    /// Removed task text for `task_begin_edit`.
    pub text: Option<String>,
    /// Human-readable message for diagnostics/UI.
    pub message: String,
}

impl TaskActionResponse {
    fn changed(message: impl Into<String>) -> Self {
        Self {
            ok: true,
            changed: true,
            task_id: None,
            text: None,
            message: message.into(),
        }
    }

    fn unchanged(message: impl Into<String>) -> Self {
        Self {
            changed: false,
            ..Self::changed(message)
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            ..Self::unchanged(message)
        }
    }
}

/// Response envelope for opening a session.
pub struct TaskSessionOpenResponse {
    pub session: Option<TaskSession>,
    /// Number of tasks loaded from storage.
    pub loaded: u32,
    pub message: String,
}

/// Opens a session over the SQLite store and loads persisted tasks.
///
/// `db_path` overrides the default location (`TODOLIST_DB_PATH`, falling
/// back to a file in the OS temp dir).
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics; `session` is `None` when the store cannot be opened.
#[flutter_rust_bridge::frb(sync)]
pub fn task_session_open(db_path: Option<String>) -> TaskSessionOpenResponse {
    let db_path = db_path
        .map(|raw| raw.trim().to_string())
        .filter(|raw| !raw.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(resolve_default_db_path);

    let opened = SqliteStorage::open(&db_path)
        .map_err(|err| err.to_string())
        .and_then(|storage| TaskStore::open(storage).map_err(|err| err.to_string()));

    match opened {
        Ok(store) => {
            let loaded = u32::try_from(store.len()).unwrap_or(u32::MAX);
            TaskSessionOpenResponse {
                session: Some(TaskSession { store, db_path }),
                loaded,
                message: format!("Loaded {loaded} task(s)."),
            }
        }
        Err(err) => {
            warn!("event=session_open module=ffi status=error error={err}");
            TaskSessionOpenResponse {
                session: None,
                loaded: 0,
                message: format!("task_session_open failed: {err}"),
            }
        }
    }
}

/// Returns the database file backing `session`.
#[flutter_rust_bridge::frb(sync)]
pub fn task_session_db_path(session: &TaskSession) -> String {
    session.db_path.display().to_string()
}

/// Adds a task from the input field text.
#[flutter_rust_bridge::frb(sync)]
pub fn task_add(session: &mut TaskSession, text: String) -> TaskActionResponse {
    match session.store.add(&text) {
        Ok(Some(task_id)) => TaskActionResponse {
            task_id: Some(task_id),
            ..TaskActionResponse::changed("Task added.")
        },
        Ok(None) => TaskActionResponse::unchanged("Task text too short; nothing added."),
        Err(err) => TaskActionResponse::failure(format!("task_add failed: {err}")),
    }
}

/// Deletes a task by id.
#[flutter_rust_bridge::frb(sync)]
pub fn task_delete(session: &mut TaskSession, task_id: String) -> TaskActionResponse {
    match session.store.delete(&task_id) {
        Ok(true) => TaskActionResponse::changed("Task deleted."),
        Ok(false) => TaskActionResponse::unchanged("Task not found."),
        Err(err) => TaskActionResponse::failure(format!("task_delete failed: {err}")),
    }
}

/// Removes a task and returns its text to re-populate the input field.
#[flutter_rust_bridge::frb(sync)]
pub fn task_begin_edit(session: &mut TaskSession, task_id: String) -> TaskActionResponse {
    match session.store.begin_edit(&task_id) {
        Ok(Some(text)) => TaskActionResponse {
            text: Some(text),
            ..TaskActionResponse::changed("Task moved to input for editing.")
        },
        Ok(None) => TaskActionResponse::unchanged("Task not found."),
        Err(err) => TaskActionResponse::failure(format!("task_begin_edit failed: {err}")),
    }
}

/// Flips completion of a task.
#[flutter_rust_bridge::frb(sync)]
pub fn task_toggle(session: &mut TaskSession, task_id: String) -> TaskActionResponse {
    match session.store.toggle_completed(&task_id) {
        Ok(Some(true)) => TaskActionResponse::changed("Task completed."),
        Ok(Some(false)) => TaskActionResponse::changed("Task reopened."),
        Ok(None) => TaskActionResponse::unchanged("Task not found."),
        Err(err) => TaskActionResponse::failure(format!("task_toggle failed: {err}")),
    }
}

/// Lists tasks in display order, honoring the "show finished" toggle.
#[flutter_rust_bridge::frb(sync)]
pub fn task_list(session: &TaskSession, show_completed: bool) -> Vec<TaskItem> {
    session
        .store
        .visible(show_completed)
        .map(TaskItem::from)
        .collect()
}

/// Whether the add control should be enabled for the current draft.
#[flutter_rust_bridge::frb(sync)]
pub fn task_text_is_valid(text: String) -> bool {
    text_meets_minimum(&text)
}

fn resolve_default_db_path() -> PathBuf {
    DEFAULT_DB_PATH.get_or_init(default_db_path).clone()
}
