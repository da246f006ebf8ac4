use todolist_core::{
    decode_tasks, encode_tasks, KeyValueStorage, MemoryStorage, PersistenceBridge, Task,
    TODOS_STORAGE_KEY,
};

fn sample_tasks() -> Vec<Task> {
    let mut done = Task::with_id("b2", "Pay rent \"March\"");
    done.completed = true;
    vec![
        Task::with_id("a1", "Buy milk"),
        done,
        Task::new("Café → 日本語 ✓"),
    ]
}

#[test]
fn encoded_list_decodes_to_equal_list() {
    let tasks = sample_tasks();
    let encoded = encode_tasks(&tasks).unwrap();
    assert_eq!(decode_tasks(&encoded), Some(tasks));
}

#[test]
fn stored_format_matches_documented_example() {
    let encoded = encode_tasks(&[Task::with_id("a1", "Buy milk")]).unwrap();
    assert_eq!(encoded, r#"[{"id":"a1","todo":"Buy milk","isCompleted":false}]"#);
}

#[test]
fn bridge_round_trips_through_storage() {
    let tasks = sample_tasks();
    let mut bridge = PersistenceBridge::new(MemoryStorage::new());
    bridge.write_tasks(&tasks).unwrap();

    assert_eq!(bridge.key(), TODOS_STORAGE_KEY);
    assert_eq!(bridge.read_tasks().unwrap(), tasks);
}

#[test]
fn bridge_reads_absent_and_corrupt_values_as_empty() {
    let absent = PersistenceBridge::new(MemoryStorage::new());
    assert!(absent.read_tasks().unwrap().is_empty());

    for corrupt in ["not json", "{}", "[1, 2]", "[{\"id\": 7}]", "[{"] {
        let storage = MemoryStorage::new().with_item(TODOS_STORAGE_KEY, corrupt);
        let bridge = PersistenceBridge::new(storage);
        assert!(
            bridge.read_tasks().unwrap().is_empty(),
            "`{corrupt}` should read as empty"
        );
    }
}

#[test]
fn empty_list_is_written_as_empty_array() {
    let mut bridge = PersistenceBridge::new(MemoryStorage::new());
    bridge.write_tasks(&[]).unwrap();

    let raw = bridge.storage().get_item(TODOS_STORAGE_KEY).unwrap();
    assert_eq!(raw.as_deref(), Some("[]"));
}
