//! Concurrent read demonstration.
//!
//! # Responsibility
//! - Run independent `list_all` readers in parallel, one connection each.
//! - Serialize their console output through a single guarded sink.
//!
//! # Invariants
//! - No store handle is shared between threads.
//! - One table is printed per lock acquisition.

pub mod concurrent_read;
pub mod output;

pub use concurrent_read::{
    concurrent_read_demo, run_concurrent_read_demo, DemoError, DEFAULT_DEMO_WORKERS,
};
pub use output::OutputGuard;
