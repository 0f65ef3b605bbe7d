//! Menu-driven operator loop.
//!
//! Reads one answer per line. End of input exits the loop cleanly; store
//! errors are reported and the loop continues.

use sdms_core::demo::DEFAULT_DEMO_WORKERS;
use sdms_core::{
    concurrent_read_demo, render_students, OutputGuard, SqliteStudentStore, Student,
    StudentService,
};
use std::io::{self, BufRead, Write};
use std::str::FromStr;

const MENU: &str = "\nStudent DB (Rust - SQLite/Threads/Encryption)
1. Add Student
2. List Students
3. Update Grade
4. Delete Student
5. Concurrent Read Demo
6. Exit
";

enum Flow {
    Continue,
    Exit,
}

pub struct Menu<'s, R, W> {
    service: &'s StudentService<SqliteStudentStore>,
    input: R,
    output: W,
}

impl<'s, R: BufRead, W: Write + Send> Menu<'s, R, W> {
    pub fn new(service: &'s StudentService<SqliteStudentStore>, input: R, output: W) -> Self {
        Self {
            service,
            input,
            output,
        }
    }

    pub fn run(&mut self) -> io::Result<()> {
        loop {
            self.output.write_all(MENU.as_bytes())?;
            let Some(choice) = self.read_line("Choose: ")? else {
                return Ok(());
            };

            let flow = match choice.as_str() {
                "1" => self.add_student()?,
                "2" => self.list_students()?,
                "3" => self.update_grade()?,
                "4" => self.delete_student()?,
                "5" => self.concurrent_read()?,
                "6" => Flow::Exit,
                _ => {
                    writeln!(self.output, "Invalid choice.")?;
                    Flow::Continue
                }
            };

            if let Flow::Exit = flow {
                return Ok(());
            }
        }
    }

    fn add_student(&mut self) -> io::Result<Flow> {
        let Some(id) = self.read_number("ID: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(name) = self.read_line("Name: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(age) = self.read_number("Age: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(grade) = self.read_line("Grade: ")? else {
            return Ok(Flow::Exit);
        };

        match self.service.add_student(&Student::new(id, name, age, grade)) {
            Ok(()) => writeln!(self.output, "Added.")?,
            Err(err) => writeln!(self.output, "Error: {err}")?,
        }
        Ok(Flow::Continue)
    }

    fn list_students(&mut self) -> io::Result<Flow> {
        match self.service.list_students() {
            Ok(students) => write!(self.output, "\n{}", render_students(&students))?,
            Err(err) => writeln!(self.output, "Error: {err}")?,
        }
        Ok(Flow::Continue)
    }

    fn update_grade(&mut self) -> io::Result<Flow> {
        let Some(id) = self.read_number::<i64>("ID: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(grade) = self.read_line("New Grade: ")? else {
            return Ok(Flow::Exit);
        };

        match self.service.update_grade(id, &grade) {
            Ok(true) => writeln!(self.output, "Updated.")?,
            Ok(false) => writeln!(self.output, "No student with ID {id}.")?,
            Err(err) => writeln!(self.output, "Error: {err}")?,
        }
        Ok(Flow::Continue)
    }

    fn delete_student(&mut self) -> io::Result<Flow> {
        let Some(id) = self.read_number::<i64>("ID: ")? else {
            return Ok(Flow::Exit);
        };

        match self.service.delete_student(id) {
            Ok(true) => writeln!(self.output, "Deleted.")?,
            Ok(false) => writeln!(self.output, "No student with ID {id}.")?,
            Err(err) => writeln!(self.output, "Error: {err}")?,
        }
        Ok(Flow::Continue)
    }

    fn concurrent_read(&mut self) -> io::Result<Flow> {
        let guard = OutputGuard::new(&mut self.output);
        let result = concurrent_read_demo(self.service.repo(), DEFAULT_DEMO_WORKERS, &guard);
        drop(guard);

        if let Err(err) = result {
            writeln!(self.output, "Error: {err}")?;
        }
        Ok(Flow::Continue)
    }

    /// Prompts until the answer parses as `T`. `None` on end of input.
    fn read_number<T: FromStr>(&mut self, label: &str) -> io::Result<Option<T>> {
        loop {
            let Some(line) = self.read_line(label)? else {
                return Ok(None);
            };
            match line.parse() {
                Ok(value) => return Ok(Some(value)),
                Err(_) => writeln!(self.output, "Please enter a whole number.")?,
            }
        }
    }

    /// Prompts for one trimmed line. `None` on end of input.
    fn read_line(&mut self, label: &str) -> io::Result<Option<String>> {
        write!(self.output, "{label}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::Menu;
    use sdms_core::{SqliteStudentStore, StoreLocation, StudentRepository, StudentService};
    use std::io::Cursor;

    fn service() -> StudentService<SqliteStudentStore> {
        StudentService::new(SqliteStudentStore::open(StoreLocation::memory(), b"key").unwrap())
    }

    fn run_script(service: &StudentService<SqliteStudentStore>, script: &str) -> String {
        let mut output = Vec::new();
        Menu::new(service, Cursor::new(script.as_bytes()), &mut output)
            .run()
            .unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn add_then_list_prints_decrypted_grade() {
        let service = service();
        let output = run_script(&service, "1\n2\nBob\n22\nB+\n2\n6\n");

        assert!(output.contains("Added."));
        assert!(output.contains("2    | Bob                  | 22  | B+"));
        assert_eq!(service.repo().list_all().unwrap().len(), 1);
    }

    #[test]
    fn duplicate_id_is_reported_and_loop_continues() {
        let service = service();
        let output = run_script(&service, "1\n1\nA\n1\nA\n1\n1\nB\n2\nB\n2\n6\n");

        assert!(output.contains("already exists"));
        assert!(output.contains("1    | A "));
    }

    #[test]
    fn invalid_number_is_reprompted() {
        let service = service();
        let output = run_script(&service, "1\nabc\n3\nCarol\n30\nC\n6\n");

        assert!(output.contains("Please enter a whole number."));
        assert_eq!(service.repo().list_all().unwrap()[0].id, 3);
    }

    #[test]
    fn update_and_delete_report_missing_ids() {
        let service = service();
        let output = run_script(&service, "3\n99\nZ\n4\n99\n6\n");

        assert_eq!(output.matches("No student with ID 99.").count(), 2);
    }

    #[test]
    fn concurrent_demo_prints_one_table_per_worker() {
        let service = service();
        let output = run_script(&service, "1\n1\nAlice\n20\nA+\n5\n6\n");

        assert_eq!(output.matches("ID   | Name").count(), 2);
    }

    #[test]
    fn end_of_input_exits_cleanly() {
        let service = service();
        let output = run_script(&service, "1\n5\n");

        assert!(output.ends_with("Name: "));
        assert!(service.repo().list_all().unwrap().is_empty());
    }

    #[test]
    fn unknown_choice_is_reported() {
        let service = service();
        let output = run_script(&service, "9\n6\n");

        assert!(output.contains("Invalid choice."));
    }
}
