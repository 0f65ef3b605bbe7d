//! Student domain model.
//!
//! # Responsibility
//! - Define the record shape shared by store, service and CLI.
//! - Validate write-side invariants before persistence.
//!
//! # Invariants
//! - `id` is supplied by the caller and never generated here.
//! - `name` must contain at least one non-whitespace character.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Primary key of a student row.
pub type StudentId = i64;

/// One student entity. `grade` is plaintext once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: StudentId,
    pub name: String,
    pub age: i64,
    pub grade: String,
}

/// Validation failure for write paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StudentValidationError {
    EmptyName,
}

impl Display for StudentValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "student name must not be empty"),
        }
    }
}

impl Error for StudentValidationError {}

impl Student {
    pub fn new(
        id: StudentId,
        name: impl Into<String>,
        age: i64,
        grade: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            age,
            grade: grade.into(),
        }
    }

    /// Checks invariants required before the record is inserted.
    pub fn validate(&self) -> Result<(), StudentValidationError> {
        if self.name.trim().is_empty() {
            return Err(StudentValidationError::EmptyName);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{Student, StudentValidationError};

    #[test]
    fn validate_accepts_regular_record() {
        assert!(Student::new(1, "Alice", 20, "A+").validate().is_ok());
    }

    #[test]
    fn validate_rejects_blank_name() {
        let student = Student::new(2, "   ", 19, "B");
        assert_eq!(student.validate(), Err(StudentValidationError::EmptyName));
    }
}
