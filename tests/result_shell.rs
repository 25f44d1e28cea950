use std::io::Cursor;

use campus_records::{ResultTable, console::Console, results::Outcome, shell};

/// Feed `script` to the result menu and return everything it printed
fn run_script(table: &mut ResultTable, script: &str) -> String {
    colored::control::set_override(false);
    let mut console = Console::new(Cursor::new(script.as_bytes().to_vec()), Vec::new());
    let result = shell::results::run(table, &mut console);
    assert!(result.is_ok());
    let (_, out) = console.into_inner();
    String::from_utf8_lossy(&out).into_owned()
}

#[test]
fn test_add_and_show_student() {
    let mut table = ResultTable::new();
    let out = run_script(&mut table, "1\n21\nAsha Rao\n70\n80\n90\n2\n21\n3\n");

    assert!(out.contains("===== Student Result Management System ====="));
    assert!(out.contains("Enter marks for subject 3: "));
    assert!(out.contains("Student added successfully."));
    assert!(out.contains("Returning to main menu..."));
    assert!(out.contains("Roll Number: 21\nStudent Name: Asha Rao\nMarks: 70 80 90\nAverage: 80.0\nResult: Pass\n"));
    assert!(out.contains("Search completed."));
    assert!(out.ends_with("Exiting program. Thank you!\n"));
    assert_eq!(table.len(), 1);
}

#[test]
fn test_invalid_marks_are_rejected() {
    let mut table = ResultTable::new();
    let out = run_script(&mut table, "1\n5\nRavi\n101\n50\n60\n2\n5\n3\n");

    assert!(out.contains("Error: Invalid marks for subject 1: 101"));
    assert!(out.contains("Student with Roll Number 5 not found."));
    assert!(table.is_empty());
}

#[test]
fn test_numeric_errors_discard_the_line() {
    let mut table = ResultTable::new();
    let script = "\
one\n\
1\n8\nMeera\n40\nforty 40\n\
2\nx8\n\
1\n8\nMeera\n40\n39\n41\n\
4\n\
3\n";
    let out = run_script(&mut table, script);

    assert!(out.contains("Error: Please enter a valid number."));
    assert!(out.contains("Error: Invalid input type. Enter numeric values only."));
    assert!(out.contains("Invalid option. Try again."));
    assert_eq!(out.matches("Student added successfully.").count(), 1);
    assert!(matches!(table.get(8), Some(s) if s.outcome() == Outcome::Pass));
}

#[test]
fn test_duplicate_roll_number_keeps_first_student() {
    let mut table = ResultTable::new();
    let out = run_script(&mut table, "1\n3\nFirst\n10\n20\n30\n1\n3\nSecond\n90\n90\n90\n3\n");

    assert!(out.contains("Error: Student with Roll Number 3 already exists"));
    assert!(matches!(table.get(3), Some(s) if s.name() == "First" && s.outcome() == Outcome::Fail));
}

#[test]
fn test_end_of_input_exits() {
    let mut table = ResultTable::new();
    let out = run_script(&mut table, "1\n4\n");

    assert!(out.ends_with("Exiting program. Thank you!\n"));
    assert!(table.is_empty());
}
