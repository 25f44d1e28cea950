use std::io::{BufRead, Write};

use colored::Colorize;

use super::{Flow, print_menu, settle};
use crate::{
    catalog::SortKey,
    console::Console,
    display,
    error::{Entity, InputError, LibraryError},
    record::{Book, Member},
    system::LibrarySystem,
};

/// Title shown above the library menu
const TITLE: &str = "City Library Digital Management System";

/// Menu entries, in option order
const OPTIONS: [&str; 7] = [
    "Add Book",
    "Add Member",
    "Issue Book",
    "Return Book",
    "Search Books",
    "Sort Books",
    "Exit",
];

/// One entry of the library menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Catalog a new book
    AddBook,
    /// Register a new member
    AddMember,
    /// Issue a book to a member
    IssueBook,
    /// Take a book back
    ReturnBook,
    /// Find books by a search term
    SearchBooks,
    /// List the catalog in order
    SortBooks,
    /// Save and leave
    Exit,
}

impl Command {
    /// Map a menu number to its command
    #[must_use]
    pub fn from_choice(choice: u32) -> Option<Self> {
        match choice {
            1 => Some(Self::AddBook),
            2 => Some(Self::AddMember),
            3 => Some(Self::IssueBook),
            4 => Some(Self::ReturnBook),
            5 => Some(Self::SearchBooks),
            6 => Some(Self::SortBooks),
            7 => Some(Self::Exit),
            _ => None,
        }
    }
}

/// Run the library menu until the user exits or input ends
///
/// The record files are saved once more on the way out.
///
/// # Errors
///
/// Returns `InputError::Io` if the console itself fails.
pub fn run<R: BufRead, W: Write>(
    system: &mut LibrarySystem,
    console: &mut Console<R, W>,
) -> Result<(), InputError> {
    loop {
        print_menu(console, TITLE, &OPTIONS)?;
        let choice = console.prompt_number::<u32>("Enter your choice: ");
        let flow = match choice {
            Ok(choice) => {
                let result = dispatch(system, console, choice);
                settle(console, result, "Invalid input type. Enter numeric values only.")?
            }
            Err(err) => settle(console, Err(err), "Please enter a valid number.")?,
        };

        if flow == Flow::Exit {
            break;
        }
    }

    if let Err(err) = system.save() {
        tracing::error!("final save failed: {err}");
        console.say(describe(&err).as_str().red())?;
    }
    console.say("Exiting System. Thank you!")
}

/// Carry out one menu choice
fn dispatch<R: BufRead, W: Write>(
    system: &mut LibrarySystem,
    console: &mut Console<R, W>,
    choice: u32,
) -> Result<Flow, InputError> {
    let Some(command) = Command::from_choice(choice) else {
        console.say("Invalid choice!".red())?;
        return Ok(Flow::Continue);
    };

    match command {
        Command::AddBook => add_book(system, console)?,
        Command::AddMember => add_member(system, console)?,
        Command::IssueBook => issue_book(system, console)?,
        Command::ReturnBook => return_book(system, console)?,
        Command::SearchBooks => search_books(system, console)?,
        Command::SortBooks => sort_books(system, console)?,
        Command::Exit => return Ok(Flow::Exit),
    }
    Ok(Flow::Continue)
}

/// Prompt for a book and add it
fn add_book<R: BufRead, W: Write>(
    system: &mut LibrarySystem,
    console: &mut Console<R, W>,
) -> Result<(), InputError> {
    let id: u32 = console.prompt_number("Enter Book ID: ")?;
    let title = console.prompt("Enter Book Title: ")?;
    let author = console.prompt("Enter Author: ")?;
    let category = console.prompt("Enter Category: ")?;

    let outcome = system.add_book(Book::new(id, &title, &author, &category));
    report(console, outcome.map(|()| "Book added successfully!"))
}

/// Prompt for a member and register them
fn add_member<R: BufRead, W: Write>(
    system: &mut LibrarySystem,
    console: &mut Console<R, W>,
) -> Result<(), InputError> {
    let id: u32 = console.prompt_number("Enter Member ID: ")?;
    let name = console.prompt("Enter Name: ")?;
    let email = console.prompt("Enter Email: ")?;

    let outcome = system.add_member(Member::new(id, &name, &email));
    report(console, outcome.map(|()| "Member added successfully!"))
}

/// Prompt for a book and a member and issue the book
fn issue_book<R: BufRead, W: Write>(
    system: &mut LibrarySystem,
    console: &mut Console<R, W>,
) -> Result<(), InputError> {
    let book_id: u32 = console.prompt_number("Enter Book ID: ")?;
    let member_id: u32 = console.prompt_number("Enter Member ID: ")?;

    let outcome = system.issue_book(book_id, member_id);
    let issued = outcome.is_ok();
    report(console, outcome.map(|()| "Book issued successfully!"))?;
    if issued {
        show_member(system, console, member_id)?;
    }
    Ok(())
}

/// Prompt for a book and a member and take the book back
fn return_book<R: BufRead, W: Write>(
    system: &mut LibrarySystem,
    console: &mut Console<R, W>,
) -> Result<(), InputError> {
    let book_id: u32 = console.prompt_number("Enter Book ID: ")?;
    let member_id: u32 = console.prompt_number("Enter Member ID: ")?;

    let outcome = system.return_book(book_id, member_id);
    let returned = outcome.is_ok();
    report(console, outcome.map(|()| "Book returned successfully!"))?;
    if returned {
        show_member(system, console, member_id)?;
    }
    Ok(())
}

/// Prompt for a term and list the matching books
fn search_books<R: BufRead, W: Write>(
    system: &LibrarySystem,
    console: &mut Console<R, W>,
) -> Result<(), InputError> {
    let term = console.prompt("Search by (title/author/category): ")?;
    let hits = system.search(&term);
    if hits.is_empty() {
        return console.say("No matching books found.".yellow());
    }
    for book in hits {
        display::write_book(console.output(), book)?;
    }
    Ok(())
}

/// Prompt for an ordering and list the whole catalog in it
fn sort_books<R: BufRead, W: Write>(
    system: &LibrarySystem,
    console: &mut Console<R, W>,
) -> Result<(), InputError> {
    console.say("1. Sort by Title")?;
    console.say("2. Sort by Author")?;
    let key = match console.prompt_number::<u32>("Enter your choice: ")? {
        1 => SortKey::Title,
        2 => SortKey::Author,
        _ => return console.say("Invalid choice!".red()),
    };

    for book in system.sorted_books(key) {
        display::write_book(console.output(), book)?;
    }
    Ok(())
}

/// Show a member's details after their holdings changed
fn show_member<R: BufRead, W: Write>(
    system: &LibrarySystem,
    console: &mut Console<R, W>,
    member_id: u32,
) -> Result<(), InputError> {
    if let Some(member) = system.member(member_id) {
        display::write_member(console.output(), member)?;
    }
    Ok(())
}

/// Print the success message or the one-line description of the failure
fn report<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    outcome: Result<&str, LibraryError>,
) -> Result<(), InputError> {
    match outcome {
        Ok(message) => console.say(message.green()),
        Err(err) => {
            if let LibraryError::Persistence(store) = &err {
                tracing::error!("{store}");
            }
            console.say(describe(&err).as_str().red())
        }
    }
}

/// User-facing text for a library error
fn describe(err: &LibraryError) -> String {
    match err {
        LibraryError::NotFound { entity: Entity::Book, .. } => "Book not found!".to_string(),
        LibraryError::NotFound { entity: Entity::Member, .. } => "Member not found!".to_string(),
        LibraryError::DuplicateId { entity, id } => format!("{entity} ID {id} already exists!"),
        LibraryError::AlreadyIssued(_) => "Book is already issued!".to_string(),
        LibraryError::NotIssued(_) => "Book is not issued!".to_string(),
        LibraryError::NotHeld { member_id, .. } => {
            format!("Book is not issued to member {member_id}!")
        }
        LibraryError::Persistence(_) => format!("Error saving to files: {err}"),
    }
}
