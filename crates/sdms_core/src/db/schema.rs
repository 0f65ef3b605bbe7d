//! Schema ensure for the `students` table.
//!
//! There is no versioning: the statement is idempotent and runs on every open.

use super::DbResult;
use rusqlite::Connection;

const SCHEMA_SQL: &str = "CREATE TABLE IF NOT EXISTS students (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    age INTEGER NOT NULL,
    grade_enc BLOB NOT NULL
);";

/// Creates the `students` table when absent.
pub fn ensure_schema(conn: &Connection) -> DbResult<()> {
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(())
}
