//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the CRUD contract for student records.
//! - Isolate SQLite and codec details from service/CLI orchestration.
//!
//! # Invariants
//! - Write paths validate the record and encode `grade` before SQL mutations.
//! - Read paths decode `grade` and reject undecodable rows instead of masking them.

pub mod student_repo;
