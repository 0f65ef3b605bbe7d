//! Student use-case service.
//!
//! # Responsibility
//! - Provide stable CRUD entry points for core callers.
//! - Delegate persistence to repository implementations.
//!
//! # Invariants
//! - Service APIs never bypass repository validation or codec contracts.
//! - Service layer remains storage-agnostic.

use crate::model::student::{Student, StudentId};
use crate::repo::student_repo::{StoreResult, StudentRepository};
use log::info;

/// Record inserted on first start so the listing is never empty.
pub fn demo_seed_student() -> Student {
    Student::new(1, "Alice", 20, "A+")
}

/// Use-case service wrapper for student CRUD operations.
pub struct StudentService<R: StudentRepository> {
    repo: R,
}

impl<R: StudentRepository> StudentService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Borrows the underlying repository.
    pub fn repo(&self) -> &R {
        &self.repo
    }

    /// Consumes the service and returns the repository.
    pub fn into_repo(self) -> R {
        self.repo
    }

    pub fn add_student(&self, student: &Student) -> StoreResult<()> {
        self.repo.create(student)
    }

    /// Lists all students ordered by ascending id.
    pub fn list_students(&self) -> StoreResult<Vec<Student>> {
        self.repo.list_all()
    }

    /// Replaces the grade of `id`.
    ///
    /// Returns `true` when a row was changed and `false` when `id` is unknown.
    pub fn update_grade(&self, id: StudentId, new_grade: &str) -> StoreResult<bool> {
        Ok(self.repo.update_grade(id, new_grade)? > 0)
    }

    /// Deletes `id`.
    ///
    /// Returns `true` when a row was removed and `false` when `id` is unknown.
    pub fn delete_student(&self, id: StudentId) -> StoreResult<bool> {
        Ok(self.repo.delete(id)? > 0)
    }

    /// Inserts `seed` only when the store holds no records yet.
    ///
    /// Returns whether the seed was inserted.
    pub fn seed_if_empty(&self, seed: &Student) -> StoreResult<bool> {
        if !self.repo.list_all()?.is_empty() {
            return Ok(false);
        }
        self.repo.create(seed)?;
        info!("event=store_seed module=service status=ok id={}", seed.id);
        Ok(true)
    }
}
