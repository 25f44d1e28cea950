use std::io::{BufRead, Write};

use colored::Colorize;

use super::{Flow, print_menu, settle};
use crate::{
    console::Console,
    display,
    error::InputError,
    results::{ResultTable, SUBJECTS},
};

/// Title shown above the result menu
const TITLE: &str = "Student Result Management System";

/// Menu entries, in option order
const OPTIONS: [&str; 3] = ["Add Student", "Show Student Details", "Exit"];

/// Run the result menu until the user exits or input ends
///
/// # Errors
///
/// Returns `InputError::Io` if the console itself fails.
pub fn run<R: BufRead, W: Write>(
    table: &mut ResultTable,
    console: &mut Console<R, W>,
) -> Result<(), InputError> {
    loop {
        print_menu(console, TITLE, &OPTIONS)?;
        let choice = console.prompt_number::<u32>("Enter your choice: ");
        let flow = match choice {
            Ok(1) => {
                let result = add_student(table, console).map(|()| Flow::Continue);
                let flow = settle(console, result, "Invalid input type. Enter numeric values only.")?;
                console.say("Returning to main menu...")?;
                flow
            }
            Ok(2) => {
                let result = show_student(table, console).map(|()| Flow::Continue);
                let flow = settle(console, result, "Please enter a valid number.")?;
                console.say("Search completed.")?;
                flow
            }
            Ok(3) => Flow::Exit,
            Ok(_) => {
                console.say("Invalid option. Try again.".red())?;
                Flow::Continue
            }
            Err(err) => settle(console, Err(err), "Please enter a valid number.")?,
        };

        if flow == Flow::Exit {
            break;
        }
    }

    console.say("Exiting program. Thank you!")
}

/// Prompt for a student and add them if their marks are valid
fn add_student<R: BufRead, W: Write>(
    table: &mut ResultTable,
    console: &mut Console<R, W>,
) -> Result<(), InputError> {
    let roll_number: u32 = console.prompt_number("Enter Roll Number: ")?;
    let name = console.prompt("Enter Student Name: ")?;

    let mut marks = [0_i32; SUBJECTS];
    for (subject, mark) in (1..).zip(marks.iter_mut()) {
        *mark = console.prompt_number(&format!("Enter marks for subject {subject}: "))?;
    }

    match table.add(roll_number, &name, marks) {
        Ok(_) => console.say("Student added successfully.".green()),
        Err(err) => {
            tracing::debug!(roll_number, "student rejected: {err}");
            console.say(format!("Error: {err}").as_str().red())
        }
    }
}

/// Prompt for a roll number and show that student's result
fn show_student<R: BufRead, W: Write>(
    table: &ResultTable,
    console: &mut Console<R, W>,
) -> Result<(), InputError> {
    let roll_number: u32 = console.prompt_number("Enter Roll Number to search: ")?;
    match table.get(roll_number) {
        Some(student) => Ok(display::write_student(console.output(), student)?),
        None => console.say(format!("Student with Roll Number {roll_number} not found.")),
    }
}
