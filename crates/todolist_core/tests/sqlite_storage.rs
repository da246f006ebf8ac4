use todolist_core::db::migrations::latest_version;
use todolist_core::db::{open_db, DbError};
use todolist_core::{KeyValueStorage, SqliteStorage, StorageError, TaskStore, TODOS_STORAGE_KEY};

#[test]
fn open_applies_migrations_and_sets_user_version() {
    let storage = SqliteStorage::open_in_memory().unwrap();
    let version: u32 = storage
        .connection()
        .query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(version, latest_version());
}

#[test]
fn reopen_is_idempotent_for_migrated_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("todolist.sqlite3");

    open_db(&path).unwrap();
    let conn = open_db(&path).unwrap();
    let version: u32 = conn
        .query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(version, latest_version());
}

#[test]
fn newer_schema_version_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.sqlite3");
    {
        let conn = rusqlite::Connection::open(&path).unwrap();
        conn.pragma_update(None, "user_version", latest_version() + 1)
            .unwrap();
    }

    let err = SqliteStorage::open(&path).err().expect("newer schema must fail");
    assert!(matches!(
        err,
        StorageError::Db(DbError::UnsupportedSchemaVersion { .. })
    ));
}

#[test]
fn task_list_survives_reopening_the_database() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("todolist.sqlite3");

    let (kept, toggled) = {
        let mut store = TaskStore::open(SqliteStorage::open(&path).unwrap()).unwrap();
        let kept = store.add("Call the bank").unwrap().unwrap();
        let dropped = store.add("Old errand").unwrap().unwrap();
        let toggled = store.add("Return library books").unwrap().unwrap();
        store.delete(&dropped).unwrap();
        store.toggle_completed(&toggled).unwrap();
        (kept, toggled)
    };

    let store = TaskStore::open(SqliteStorage::open(&path).unwrap()).unwrap();
    let ids = store.tasks().iter().map(|t| t.id.clone()).collect::<Vec<_>>();
    assert_eq!(ids, vec![kept, toggled.clone()]);
    assert!(store.get(&toggled).unwrap().completed);
}

#[test]
fn corrupt_stored_value_loads_empty() {
    let mut storage = SqliteStorage::open_in_memory().unwrap();
    storage.set_item(TODOS_STORAGE_KEY, "not json").unwrap();

    let store = TaskStore::open(storage).unwrap();
    assert!(store.is_empty());
}
