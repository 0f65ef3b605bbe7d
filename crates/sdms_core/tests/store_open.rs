use rusqlite::Connection;
use sdms_core::{
    CodecError, SqliteStudentStore, StoreError, StoreLocation, Student, StudentRepository,
};

#[test]
fn empty_key_is_rejected_before_opening_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("students.db");

    let err = SqliteStudentStore::open(StoreLocation::file(&path), b"").unwrap_err();
    assert!(matches!(err, StoreError::Config(CodecError::EmptyKey)));
    assert!(!path.exists());
}

#[test]
fn unopenable_path_fails_with_store_init() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing-dir").join("students.db");

    let err = SqliteStudentStore::open(StoreLocation::file(&path), b"key").unwrap_err();
    assert!(matches!(err, StoreError::StoreInit(_)));
    assert!(!err.to_string().is_empty());
}

#[test]
fn open_creates_students_table() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("students.db");
    let store = SqliteStudentStore::open(StoreLocation::file(&path), b"key").unwrap();

    let raw = Connection::open(&path).unwrap();
    let columns: Vec<String> = raw
        .prepare("SELECT name FROM pragma_table_info('students') ORDER BY cid;")
        .unwrap()
        .query_map([], |row| row.get(0))
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(columns, vec!["id", "name", "age", "grade_enc"]);

    store.close().unwrap();
}

#[test]
fn reopening_with_same_key_recovers_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("students.db");

    let store = SqliteStudentStore::open(StoreLocation::file(&path), b"mySecretKey").unwrap();
    store.create(&Student::new(1, "Alice", 20, "A+")).unwrap();
    store.create(&Student::new(2, "Bob", 22, "B-")).unwrap();
    drop(store);

    let reopened = SqliteStudentStore::open(StoreLocation::file(&path), b"mySecretKey").unwrap();
    let grades: Vec<String> = reopened
        .list_all()
        .unwrap()
        .into_iter()
        .map(|student| student.grade)
        .collect();
    assert_eq!(grades, vec!["A+", "B-"]);
}

#[test]
fn wrong_key_never_recovers_original_grade() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("students.db");

    let store = SqliteStudentStore::open(StoreLocation::file(&path), b"mySecretKey").unwrap();
    store.create(&Student::new(1, "Alice", 20, "A+")).unwrap();
    store.close().unwrap();

    let other = SqliteStudentStore::open(StoreLocation::file(&path), b"another").unwrap();
    match other.list_all() {
        Ok(students) => assert_ne!(students[0].grade, "A+"),
        Err(StoreError::InvalidData(message)) => assert!(message.contains("id 1")),
        Err(other) => panic!("unexpected error: {other}"),
    }
}

#[test]
fn non_utf8_grade_surfaces_invalid_data() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("students.db");
    let store = SqliteStudentStore::open(StoreLocation::file(&path), &[0x00]).unwrap();

    // Key 0x00 is the identity transform, so the raw blob is the decoded grade.
    let raw = Connection::open(&path).unwrap();
    raw.execute(
        "INSERT INTO students (id, name, age, grade_enc) VALUES (9, 'Zed', 30, X'FF');",
        [],
    )
    .unwrap();

    let err = store.list_all().unwrap_err();
    assert!(matches!(err, StoreError::InvalidData(_)));
}

#[test]
fn session_sees_rows_written_by_parent() {
    let location = StoreLocation::memory();
    let store = SqliteStudentStore::open(location.clone(), b"key").unwrap();
    store.create(&Student::new(1, "Alice", 20, "A+")).unwrap();

    let session = store.open_session().unwrap();
    assert_eq!(session.location(), &location);
    assert_eq!(session.list_all().unwrap(), store.list_all().unwrap());
}

#[test]
fn distinct_memory_locations_are_isolated() {
    let first = SqliteStudentStore::open(StoreLocation::memory(), b"key").unwrap();
    let second = SqliteStudentStore::open(StoreLocation::memory(), b"key").unwrap();
    first.create(&Student::new(1, "Alice", 20, "A+")).unwrap();

    assert!(second.list_all().unwrap().is_empty());
}
