use noteapp_core::db::open_db_in_memory;
use noteapp_core::{Note, NoteRepository, RepoError, SqliteNoteRepository};
use rusqlite::{params, Connection};
use uuid::Uuid;

#[test]
fn insert_and_get_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::try_new(&conn).unwrap();

    let note = Note::new("Groceries", "Milk, eggs");
    repo.insert_note(&note).unwrap();

    let loaded = repo.get_note(note.id).unwrap().unwrap();
    assert_eq!(loaded, note);
}

#[test]
fn get_missing_note_returns_none() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::try_new(&conn).unwrap();

    assert!(repo.get_note(Uuid::new_v4()).unwrap().is_none());
}

#[test]
fn list_orders_by_updated_at_desc() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::try_new(&conn).unwrap();

    let mut oldest = Note::new("oldest", "");
    oldest.created_at = 1_000;
    oldest.updated_at = 1_000;
    let mut newest = Note::new("newest", "");
    newest.created_at = 1_500;
    newest.updated_at = 3_000;
    let mut middle = Note::new("middle", "");
    middle.created_at = 2_000;
    middle.updated_at = 2_000;

    repo.insert_note(&oldest).unwrap();
    repo.insert_note(&newest).unwrap();
    repo.insert_note(&middle).unwrap();

    let listed = repo.list_notes().unwrap();
    let titles: Vec<&str> = listed.iter().map(|note| note.title.as_str()).collect();
    assert_eq!(titles, vec!["newest", "middle", "oldest"]);
}

#[test]
fn list_breaks_same_second_ties_by_insertion_order() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::try_new(&conn).unwrap();

    for title in ["first", "second", "third"] {
        let mut note = Note::new(title, "");
        note.created_at = 5_000;
        note.updated_at = 5_000;
        repo.insert_note(&note).unwrap();
    }

    let listed = repo.list_notes().unwrap();
    let titles: Vec<&str> = listed.iter().map(|note| note.title.as_str()).collect();
    assert_eq!(titles, vec!["third", "second", "first"]);
}

#[test]
fn update_rewrites_fields_and_reports_missing_rows() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::try_new(&conn).unwrap();

    let note = Note::new("draft", "v1");
    repo.insert_note(&note).unwrap();

    repo.update_note(note.id, "final", "v2", note.updated_at + 10)
        .unwrap();
    let loaded = repo.get_note(note.id).unwrap().unwrap();
    assert_eq!(loaded.title, "final");
    assert_eq!(loaded.content, "v2");
    assert_eq!(loaded.created_at, note.created_at);
    assert_eq!(loaded.updated_at, note.updated_at + 10);

    let missing = Uuid::new_v4();
    let err = repo.update_note(missing, "x", "y", 1).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(id) if id == missing));
}

#[test]
fn delete_removes_row_and_reports_missing_rows() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::try_new(&conn).unwrap();

    let note = Note::new("to remove", "");
    repo.insert_note(&note).unwrap();
    repo.delete_note(note.id).unwrap();
    assert!(repo.get_note(note.id).unwrap().is_none());

    let err = repo.delete_note(note.id).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(id) if id == note.id));
}

#[test]
fn duplicate_id_insert_is_a_persistence_error() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::try_new(&conn).unwrap();

    let note = Note::new("unique", "");
    repo.insert_note(&note).unwrap();
    let err = repo.insert_note(&note).unwrap_err();
    assert!(matches!(err, RepoError::Persistence { op: "note_insert", .. }));
}

#[test]
fn corrupt_uuid_in_storage_is_rejected_on_read() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO notes (id, title, content, created_at, updated_at)
         VALUES ('not-a-uuid', 't', 'c', 1, 1);",
        [],
    )
    .unwrap();

    let repo = SqliteNoteRepository::try_new(&conn).unwrap();
    let err = repo.list_notes().unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(_)));
}

#[test]
fn reversed_timestamps_in_storage_are_rejected_on_read() {
    let conn = open_db_in_memory().unwrap();
    let id = Uuid::new_v4().to_string();
    conn.execute(
        "INSERT INTO notes (id, title, content, created_at, updated_at)
         VALUES (?1, 't', 'c', 100, 50);",
        params![id],
    )
    .unwrap();

    let repo = SqliteNoteRepository::try_new(&conn).unwrap();
    let err = repo.list_notes().unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(_)));
}

#[test]
fn null_content_reads_back_as_empty_string() {
    let conn = open_db_in_memory().unwrap();
    let id = Uuid::new_v4();
    conn.execute(
        "INSERT INTO notes (id, title, content, created_at, updated_at)
         VALUES (?1, 'legacy', NULL, 10, 10);",
        params![id.to_string()],
    )
    .unwrap();

    let repo = SqliteNoteRepository::try_new(&conn).unwrap();
    let loaded = repo.get_note(id).unwrap().unwrap();
    assert_eq!(loaded.content, "");
}

#[test]
fn repository_rejects_connection_without_notes_table() {
    let conn = Connection::open_in_memory().unwrap();
    let err = SqliteNoteRepository::try_new(&conn).unwrap_err();
    assert!(matches!(err, RepoError::MissingTable("notes")));
}
