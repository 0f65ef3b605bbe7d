//! Domain model for student records.
//!
//! # Invariants
//! - Every record is identified by a caller-supplied `StudentId`.
//! - Grades are held in plaintext in memory; only the store sees ciphertext.

pub mod student;
