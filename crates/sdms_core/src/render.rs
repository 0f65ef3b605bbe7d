//! Fixed-width table rendering for student listings.

use crate::model::student::Student;
use std::fmt::Write;

const HEADER: &str = "ID   | Name                 | Age | Grade";
const SEPARATOR: &str = "----------------------------------------------";

/// Renders `students` as a header, separator and one line per record.
///
/// Every line, including the last, ends with `\n`.
pub fn render_students(students: &[Student]) -> String {
    let mut out = String::new();
    out.push_str(HEADER);
    out.push('\n');
    out.push_str(SEPARATOR);
    out.push('\n');
    for student in students {
        // Writing into a String cannot fail.
        let _ = writeln!(
            out,
            "{:<4} | {:<20} | {:<3} | {}",
            student.id, student.name, student.age, student.grade
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::render_students;
    use crate::model::student::Student;

    #[test]
    fn empty_listing_renders_header_only() {
        let rendered = render_students(&[]);
        assert_eq!(rendered.lines().count(), 2);
        assert!(rendered.starts_with("ID   | Name"));
    }

    #[test]
    fn rows_are_padded_to_fixed_columns() {
        let rendered = render_students(&[Student::new(1, "Alice", 20, "A+")]);
        let row = rendered.lines().nth(2).unwrap();
        assert_eq!(row, "1    | Alice                | 20  | A+");
    }
}
