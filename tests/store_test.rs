use pkm::error::PkmError;
use pkm::model::Priority;
use pkm::schema::Document;
use pkm::services::{NoteService, TaskService};
use pkm::store::fs::JsonFileStore;
use pkm::store::DocumentStore;
use std::fs;
use tempfile::TempDir;

fn setup() -> (TempDir, JsonFileStore) {
    let dir = TempDir::new().unwrap();
    let store = JsonFileStore::new(dir.path().join("pkm"));
    (dir, store)
}

#[test]
fn missing_file_loads_empty_document() {
    let (_dir, store) = setup();
    let doc = store.load().unwrap();
    assert!(doc.notes.is_empty());
    assert!(doc.tasks.is_empty());
    assert!(!store.data_file().exists());
}

#[test]
fn save_creates_directory_and_leaves_no_tmp_files() {
    let (_dir, store) = setup();
    store.save(&Document::default()).unwrap();

    assert!(store.data_file().exists());
    for entry in fs::read_dir(store.data_dir()).unwrap() {
        let path = entry.unwrap().path();
        let name = path.file_name().unwrap().to_str().unwrap();
        assert!(!name.ends_with(".tmp"), "Found leftover tmp file: {}", name);
    }

    let on_disk: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(store.data_file()).unwrap()).unwrap();
    assert_eq!(on_disk, serde_json::json!({"notes": [], "tasks": []}));
}

#[test]
fn corrupt_file_is_reported_and_left_alone() {
    let (_dir, store) = setup();
    fs::create_dir_all(store.data_dir()).unwrap();
    fs::write(store.data_file(), "{ not json").unwrap();

    let err = store.load().unwrap_err();
    assert!(matches!(err, PkmError::CorruptStore { .. }));

    let notes = NoteService::new(&store);
    assert!(notes.create_note("anything", None, &[]).is_err());
    assert_eq!(fs::read_to_string(store.data_file()).unwrap(), "{ not json");
}

#[test]
fn notes_and_tasks_share_one_file() {
    let (_dir, store) = setup();
    let notes = NoteService::new(&store);
    let tasks = TaskService::new(&store);

    let note = notes
        .create_note("Mitochondria", Some("Biology 101"), &["Cells"])
        .unwrap();
    let task = tasks
        .create_task("Read chapter 4", None, Priority::High, None)
        .unwrap();
    tasks.link_note(&task.id, &note.id).unwrap().unwrap();

    let reopened = JsonFileStore::new(store.data_dir());
    let doc = reopened.load().unwrap();
    assert_eq!(doc.notes.len(), 1);
    assert_eq!(doc.tasks.len(), 1);
    assert_eq!(doc.notes[0].linked_from_tasks, vec![task.id.clone()]);
    assert_eq!(doc.tasks[0].linked_notes, vec![note.id.clone()]);
    assert_eq!(doc.tasks[0].priority, "high");
}

#[test]
fn unknown_task_leaves_file_byte_for_byte_unchanged() {
    let (_dir, store) = setup();
    let tasks = TaskService::new(&store);
    tasks
        .create_task("Essay draft", None, Priority::Medium, Some("History"))
        .unwrap();
    let before = fs::read(store.data_file()).unwrap();

    assert!(tasks.complete_task("t_20250101_000000_zzz").unwrap().is_none());
    assert!(tasks.add_subtask("t_missing", "step").unwrap().is_none());
    assert!(tasks.complete_subtask("t_missing", 1).unwrap().is_none());

    assert_eq!(fs::read(store.data_file()).unwrap(), before);
}

#[test]
fn stored_timestamps_use_document_format() {
    let (_dir, store) = setup();
    let notes = NoteService::new(&store);
    notes.create_note("Timestamp check", None, &[]).unwrap();

    let doc = store.load().unwrap();
    let created = &doc.notes[0].created_at;
    assert!(
        chrono::NaiveDateTime::parse_from_str(created, "%Y-%m-%dT%H:%M:%S%.f").is_ok(),
        "unexpected timestamp: {}",
        created
    );
}
