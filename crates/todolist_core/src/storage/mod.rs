//! Key-value storage abstraction and backends.
//!
//! # Responsibility
//! - Model a local, synchronous, string-keyed storage area.
//! - Keep backend details (map, SQLite) behind one trait.
//!
//! # Invariants
//! - `set_item` replaces any previous value under the same key.
//! - A value read back is byte-identical to the last value written.

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod memory;
pub mod sqlite;

pub use memory::MemoryStorage;
pub use sqlite::SqliteStorage;

pub type StorageResult<T> = Result<T, StorageError>;

/// Failure raised by a storage backend.
#[derive(Debug)]
pub enum StorageError {
    /// Writing `key` would push the store past its byte quota.
    QuotaExceeded {
        key: String,
        required: usize,
        quota: usize,
    },
    Db(DbError),
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::QuotaExceeded {
                key,
                required,
                quota,
            } => write!(
                f,
                "storage quota exceeded writing `{key}`: {required} bytes needed, quota is {quota}"
            ),
            Self::Db(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::QuotaExceeded { .. } => None,
            Self::Db(err) => Some(err),
        }
    }
}

impl From<DbError> for StorageError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Local string-keyed storage area.
pub trait KeyValueStorage {
    /// Returns the value stored under `key`, if any.
    fn get_item(&self, key: &str) -> StorageResult<Option<String>>;
    /// Stores `value` under `key`, replacing any previous value.
    fn set_item(&mut self, key: &str, value: &str) -> StorageResult<()>;
}

impl<S: KeyValueStorage + ?Sized> KeyValueStorage for &mut S {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&mut self, key: &str, value: &str) -> StorageResult<()> {
        (**self).set_item(key, value)
    }
}
