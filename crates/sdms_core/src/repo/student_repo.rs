//! Student repository contract and SQLite store adapter.
//!
//! # Responsibility
//! - Own the SQLite connection for the adapter lifetime.
//! - Provide create/list/update/delete over the `students` table.
//! - Apply the grade codec at the storage boundary.
//!
//! # Invariants
//! - A `SqliteStudentStore` value only exists once the schema is ensured.
//! - `list_all` returns rows ordered by ascending `id`.
//! - Update/delete of a missing id succeed and report zero affected rows.

use crate::codec::{decode_grade, encode_grade, CipherKey, CodecError};
use crate::db::{open_connection, DbError, StoreLocation};
use crate::model::student::{Student, StudentId, StudentValidationError};
use log::{debug, error, info, warn};
use rusqlite::{ffi, params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const STUDENT_SELECT_SQL: &str = "SELECT id, name, age, grade_enc FROM students ORDER BY id ASC;";

pub type StoreResult<T> = Result<T, StoreError>;

/// Error taxonomy for store construction and CRUD operations.
#[derive(Debug)]
pub enum StoreError {
    /// Backing store could not be opened or its schema ensured.
    StoreInit(DbError),
    /// Adapter configuration was rejected before opening anything.
    Config(CodecError),
    /// Record failed write-side validation.
    Validation(StudentValidationError),
    /// Insert collided with an existing primary key.
    DuplicateKey(StudentId),
    Read(rusqlite::Error),
    Write(rusqlite::Error),
    /// Explicit close reported an engine error.
    Close(rusqlite::Error),
    /// Persisted row cannot be reconstructed into a `Student`.
    InvalidData(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::StoreInit(err) => write!(f, "failed to initialize student store: {err}"),
            Self::Config(err) => write!(f, "invalid store configuration: {err}"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::DuplicateKey(id) => write!(f, "student with id {id} already exists"),
            Self::Read(err) => write!(f, "failed to read students: {err}"),
            Self::Write(err) => write!(f, "failed to write student: {err}"),
            Self::Close(err) => write!(f, "failed to close student store: {err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted student data: {message}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::StoreInit(err) => Some(err),
            Self::Config(err) => Some(err),
            Self::Validation(err) => Some(err),
            Self::DuplicateKey(_) => None,
            Self::Read(err) => Some(err),
            Self::Write(err) => Some(err),
            Self::Close(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<StudentValidationError> for StoreError {
    fn from(value: StudentValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Repository interface for student CRUD operations.
pub trait StudentRepository {
    fn create(&self, student: &Student) -> StoreResult<()>;
    fn list_all(&self) -> StoreResult<Vec<Student>>;
    /// Returns the number of rows changed (0 when `id` does not exist).
    fn update_grade(&self, id: StudentId, new_grade: &str) -> StoreResult<usize>;
    /// Returns the number of rows removed (0 when `id` does not exist).
    fn delete(&self, id: StudentId) -> StoreResult<usize>;
}

/// SQLite-backed store adapter that owns its connection.
///
/// The connection is released when the store is dropped or passed to
/// [`SqliteStudentStore::close`]. `rusqlite::Connection` is `Send` but not
/// `Sync`, so concurrent readers use [`SqliteStudentStore::open_session`]
/// instead of sharing one store by reference.
#[derive(Debug)]
pub struct SqliteStudentStore {
    conn: Connection,
    key: CipherKey,
    location: StoreLocation,
}

impl SqliteStudentStore {
    /// Validates `key` and opens a Ready store at `location`.
    ///
    /// # Errors
    /// - `StoreError::Config` when `key` is empty; nothing is opened.
    /// - `StoreError::StoreInit` when the database cannot be opened or the
    ///   schema statement fails.
    pub fn open(location: StoreLocation, key: &[u8]) -> StoreResult<Self> {
        let key = CipherKey::new(key).map_err(|err| {
            warn!("event=store_open module=repo status=error error_code=invalid_config error={err}");
            StoreError::Config(err)
        })?;
        Self::open_with_key(location, key)
    }

    /// Opens a Ready store with an already validated key.
    pub fn open_with_key(location: StoreLocation, key: CipherKey) -> StoreResult<Self> {
        let conn = open_connection(&location).map_err(StoreError::StoreInit)?;
        info!(
            "event=store_open module=repo status=ok mode={}",
            location.mode()
        );
        Ok(Self {
            conn,
            key,
            location,
        })
    }

    /// Opens an independent connection against the same backing store and key.
    pub fn open_session(&self) -> StoreResult<Self> {
        Self::open_with_key(self.location.clone(), self.key.clone())
    }

    pub fn location(&self) -> &StoreLocation {
        &self.location
    }

    /// Closes the connection, surfacing any engine error on release.
    pub fn close(self) -> StoreResult<()> {
        self.conn
            .close()
            .map_err(|(_conn, err)| StoreError::Close(err))
    }

    fn parse_student_row(&self, row: &Row<'_>) -> StoreResult<Student> {
        let id: StudentId = row.get("id").map_err(StoreError::Read)?;
        let blob: Vec<u8> = row.get("grade_enc").map_err(StoreError::Read)?;
        let grade = decode_grade(&blob, &self.key).map_err(|err| {
            StoreError::InvalidData(format!(
                "students.grade_enc for id {id} cannot be decoded with the configured key: {err}"
            ))
        })?;

        Ok(Student {
            id,
            name: row.get("name").map_err(StoreError::Read)?,
            age: row.get("age").map_err(StoreError::Read)?,
            grade,
        })
    }
}

impl StudentRepository for SqliteStudentStore {
    fn create(&self, student: &Student) -> StoreResult<()> {
        student.validate()?;

        let grade_enc = encode_grade(&student.grade, &self.key);
        let result = self.conn.execute(
            "INSERT INTO students (id, name, age, grade_enc) VALUES (?1, ?2, ?3, ?4);",
            params![student.id, student.name.as_str(), student.age, grade_enc],
        );

        match result {
            Ok(_) => {
                debug!(
                    "event=student_create module=repo status=ok id={}",
                    student.id
                );
                Ok(())
            }
            Err(err) if is_unique_violation(&err) => {
                warn!(
                    "event=student_create module=repo status=error id={} error_code=duplicate_key",
                    student.id
                );
                Err(StoreError::DuplicateKey(student.id))
            }
            Err(err) => {
                error!(
                    "event=student_create module=repo status=error id={} error_code=write_failed error={}",
                    student.id, err
                );
                Err(StoreError::Write(err))
            }
        }
    }

    fn list_all(&self) -> StoreResult<Vec<Student>> {
        match self.query_all() {
            Ok(students) => {
                debug!(
                    "event=student_list module=repo status=ok count={}",
                    students.len()
                );
                Ok(students)
            }
            Err(err) => {
                error!(
                    "event=student_list module=repo status=error error_code={} error={}",
                    error_code(&err),
                    err
                );
                Err(err)
            }
        }
    }

    fn update_grade(&self, id: StudentId, new_grade: &str) -> StoreResult<usize> {
        let grade_enc = encode_grade(new_grade, &self.key);
        let result = self.conn.execute(
            "UPDATE students SET grade_enc = ?1 WHERE id = ?2;",
            params![grade_enc, id],
        );
        log_write("student_update_grade", id, result)
    }

    fn delete(&self, id: StudentId) -> StoreResult<usize> {
        let result = self
            .conn
            .execute("DELETE FROM students WHERE id = ?1;", [id]);
        log_write("student_delete", id, result)
    }
}

impl SqliteStudentStore {
    fn query_all(&self) -> StoreResult<Vec<Student>> {
        let mut stmt = self
            .conn
            .prepare(STUDENT_SELECT_SQL)
            .map_err(StoreError::Read)?;
        let mut rows = stmt.query([]).map_err(StoreError::Read)?;
        let mut students = Vec::new();

        while let Some(row) = rows.next().map_err(StoreError::Read)? {
            students.push(self.parse_student_row(row)?);
        }
        Ok(students)
    }
}

fn log_write(event: &str, id: StudentId, result: rusqlite::Result<usize>) -> StoreResult<usize> {
    match result {
        Ok(changed) => {
            debug!("event={event} module=repo status=ok id={id} changed={changed}");
            Ok(changed)
        }
        Err(err) => {
            error!(
                "event={event} module=repo status=error id={id} error_code=write_failed error={err}"
            );
            Err(StoreError::Write(err))
        }
    }
}

fn error_code(err: &StoreError) -> &'static str {
    match err {
        StoreError::Read(_) => "read_failed",
        StoreError::InvalidData(_) => "invalid_data",
        _ => "store_failed",
    }
}

fn is_unique_violation(err: &rusqlite::Error) -> bool {
    // INTEGER PRIMARY KEY collisions report PRIMARYKEY on current SQLite and
    // UNIQUE on some older builds.
    matches!(
        err,
        rusqlite::Error::SqliteFailure(inner, _)
            if inner.extended_code == ffi::SQLITE_CONSTRAINT_PRIMARYKEY
                || inner.extended_code == ffi::SQLITE_CONSTRAINT_UNIQUE
    )
}
