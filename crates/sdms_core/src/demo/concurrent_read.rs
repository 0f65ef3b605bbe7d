//! Parallel `list_all` readers over per-worker sessions.

use super::output::OutputGuard;
use crate::model::student::Student;
use crate::repo::student_repo::{SqliteStudentStore, StoreError, StoreResult, StudentRepository};
use log::{debug, error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io::{self, Write};
use std::time::Instant;

/// Worker count used by the interactive demo.
pub const DEFAULT_DEMO_WORKERS: usize = 2;

#[derive(Debug)]
pub enum DemoError {
    Store(StoreError),
    Output(io::Error),
    /// Worker at this index panicked before returning a snapshot.
    WorkerPanicked(usize),
}

impl Display for DemoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store(err) => write!(f, "{err}"),
            Self::Output(err) => write!(f, "failed to print students: {err}"),
            Self::WorkerPanicked(worker) => write!(f, "demo worker {worker} panicked"),
        }
    }
}

impl Error for DemoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::Output(err) => Some(err),
            Self::WorkerPanicked(_) => None,
        }
    }
}

impl From<StoreError> for DemoError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl From<io::Error> for DemoError {
    fn from(value: io::Error) -> Self {
        Self::Output(value)
    }
}

/// Runs one scoped thread per session; each lists all students and prints
/// the table through `out`.
///
/// Returns each worker's snapshot in session order. Sessions are moved into
/// their worker and released when it finishes.
pub fn run_concurrent_read_demo<R, W>(
    sessions: Vec<R>,
    out: &OutputGuard<W>,
) -> Result<Vec<Vec<Student>>, DemoError>
where
    R: StudentRepository + Send,
    W: Write + Send,
{
    let started_at = Instant::now();
    let workers = sessions.len();
    info!("event=demo_read module=demo status=start workers={workers}");

    let result = std::thread::scope(|scope| {
        let handles: Vec<_> = sessions
            .into_iter()
            .enumerate()
            .map(|(worker, session)| {
                scope.spawn(move || -> Result<Vec<Student>, DemoError> {
                    let students = session.list_all()?;
                    out.print_students(&students)?;
                    debug!(
                        "event=demo_worker module=demo status=ok worker={worker} count={}",
                        students.len()
                    );
                    Ok(students)
                })
            })
            .collect();

        // Join every handle before inspecting outcomes; an unjoined panicked
        // worker would make the scope itself panic.
        let outcomes: Vec<_> = handles
            .into_iter()
            .enumerate()
            .map(|(worker, handle)| match handle.join() {
                Ok(outcome) => outcome,
                Err(_) => Err(DemoError::WorkerPanicked(worker)),
            })
            .collect();

        outcomes.into_iter().collect::<Result<Vec<_>, _>>()
    });

    match &result {
        Ok(_) => info!(
            "event=demo_read module=demo status=ok workers={workers} duration_ms={}",
            started_at.elapsed().as_millis()
        ),
        Err(err) => error!(
            "event=demo_read module=demo status=error workers={workers} duration_ms={} error={err}",
            started_at.elapsed().as_millis()
        ),
    }
    result
}

/// Opens `workers` sessions against `store` and runs the demo over them.
pub fn concurrent_read_demo<W: Write + Send>(
    store: &SqliteStudentStore,
    workers: usize,
    out: &OutputGuard<W>,
) -> Result<Vec<Vec<Student>>, DemoError> {
    let sessions = (0..workers)
        .map(|_| store.open_session())
        .collect::<StoreResult<Vec<_>>>()?;
    run_concurrent_read_demo(sessions, out)
}
