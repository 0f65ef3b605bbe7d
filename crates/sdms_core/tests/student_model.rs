use sdms_core::Student;

#[test]
fn student_serializes_with_plaintext_grade() {
    let student = Student::new(1, "Alice", 20, "A+");
    let json = serde_json::to_value(&student).unwrap();

    assert_eq!(
        json,
        serde_json::json!({ "id": 1, "name": "Alice", "age": 20, "grade": "A+" })
    );
}

#[test]
fn student_deserializes_from_export_shape() {
    let student: Student =
        serde_json::from_str(r#"{"id":7,"name":"Bob","age":22,"grade":"B"}"#).unwrap();
    assert_eq!(student, Student::new(7, "Bob", 22, "B"));
}
