//! Exclusively owned output sink shared by demo workers.

use crate::model::student::Student;
use crate::render::render_students;
use parking_lot::Mutex;
use std::io::{self, Write};

/// Output sink guarded by one mutex.
///
/// The guard is held for exactly one `print_students` call and dropped on
/// every return path, including write failures.
pub struct OutputGuard<W: Write> {
    sink: Mutex<W>,
}

impl<W: Write> OutputGuard<W> {
    pub fn new(sink: W) -> Self {
        Self {
            sink: Mutex::new(sink),
        }
    }

    /// Writes one rendered table, preceded by a blank line, then flushes.
    pub fn print_students(&self, students: &[Student]) -> io::Result<()> {
        let rendered = render_students(students);
        let mut sink = self.sink.lock();
        sink.write_all(b"\n")?;
        sink.write_all(rendered.as_bytes())?;
        sink.flush()
    }

    pub fn into_inner(self) -> W {
        self.sink.into_inner()
    }
}

#[cfg(test)]
mod tests {
    use super::OutputGuard;
    use crate::model::student::Student;
    use std::io::{self, Write};

    struct FailingSink;

    impl Write for FailingSink {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "sink closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn print_writes_blank_line_and_table() {
        let guard = OutputGuard::new(Vec::new());
        guard
            .print_students(&[Student::new(7, "Bob", 22, "B")])
            .unwrap();

        let text = String::from_utf8(guard.into_inner()).unwrap();
        assert!(text.starts_with("\nID   | Name"));
        assert!(text.contains("7    | Bob"));
    }

    #[test]
    fn lock_is_released_after_write_failure() {
        let guard = OutputGuard::new(FailingSink);
        assert!(guard.print_students(&[]).is_err());
        // A second call would deadlock if the first had kept the lock.
        assert!(guard.print_students(&[]).is_err());
    }
}
