//! Human-readable renderings of records for the console.

use std::io::{self, Write};

use crate::{
    record::{Book, Member},
    results::Student,
};

/// Separator printed above every book or member
const RULE: &str = "-----------------------------------";

/// Write the detail block of one book
///
/// # Errors
///
/// Returns any error of the underlying writer.
pub fn write_book(out: &mut impl Write, book: &Book) -> io::Result<()> {
    writeln!(out, "{RULE}")?;
    writeln!(out, "Book ID: {}", book.id)?;
    writeln!(out, "Title: {}", book.title)?;
    writeln!(out, "Author: {}", book.author)?;
    writeln!(out, "Category: {}", book.category)?;
    writeln!(out, "Status: {}", book.state().label())
}

/// Write the detail block of one member
///
/// # Errors
///
/// Returns any error of the underlying writer.
pub fn write_member(out: &mut impl Write, member: &Member) -> io::Result<()> {
    writeln!(out, "{RULE}")?;
    writeln!(out, "Member ID: {}", member.id)?;
    writeln!(out, "Name: {}", member.name)?;
    writeln!(out, "Email: {}", member.email)?;
    writeln!(out, "Issued Books: {}", member.issued_list_text())
}

/// Write the result sheet of one student
///
/// # Errors
///
/// Returns any error of the underlying writer.
pub fn write_student(out: &mut impl Write, student: &Student) -> io::Result<()> {
    writeln!(out, "Roll Number: {}", student.roll_number())?;
    writeln!(out, "Student Name: {}", student.name())?;
    let marks: Vec<String> = student.marks().iter().map(i32::to_string).collect();
    writeln!(out, "Marks: {}", marks.join(" "))?;
    // Debug formatting keeps the fractional part, so 80.0 shows as "80.0".
    writeln!(out, "Average: {:?}", student.average())?;
    writeln!(out, "Result: {}", student.outcome().label())
}
