//! Core domain logic for the student database manager.
//! Owns the record codec, the SQLite store adapter and the concurrent read demo.

pub mod codec;
pub mod config;
pub mod db;
pub mod demo;
pub mod logging;
pub mod model;
pub mod render;
pub mod repo;
pub mod service;

pub use codec::{transform, CipherKey, CodecError};
pub use config::{ConfigError, SdmsConfig};
pub use db::{DbError, StoreLocation};
pub use demo::{concurrent_read_demo, run_concurrent_read_demo, DemoError, OutputGuard};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::student::{Student, StudentId, StudentValidationError};
pub use render::render_students;
pub use repo::student_repo::{SqliteStudentStore, StoreError, StoreResult, StudentRepository};
pub use service::student_service::{demo_seed_student, StudentService};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
