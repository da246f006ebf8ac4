//! Process-level configuration shared by every front end.
//!
//! # Invariants
//! - `TODOLIST_DB_PATH`, when set and non-blank, wins over the default.
//! - The fallback database lives in the OS temp dir.

use std::path::PathBuf;

/// Environment variable overriding the database location.
pub const DB_PATH_ENV: &str = "TODOLIST_DB_PATH";
/// File name used when no database path is configured.
pub const DEFAULT_DB_FILE_NAME: &str = "todolist.sqlite3";

/// Resolves the database path from `TODOLIST_DB_PATH` or the temp dir.
pub fn default_db_path() -> PathBuf {
    resolve_db_path(std::env::var(DB_PATH_ENV).ok().as_deref())
}

fn resolve_db_path(configured: Option<&str>) -> PathBuf {
    match configured.map(str::trim) {
        Some(path) if !path.is_empty() => PathBuf::from(path),
        _ => std::env::temp_dir().join(DEFAULT_DB_FILE_NAME),
    }
}
