//! Error types for every layer of the record managers.

use std::{io, path::PathBuf};

use thiserror::Error;

/// Which keyed collection an id belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    /// The book catalog
    Book,
    /// The member register
    Member,
}

impl std::fmt::Display for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Book => f.write_str("Book"),
            Self::Member => f.write_str("Member"),
        }
    }
}

/// Failure to read or rewrite a backing record file
#[derive(Debug, Error)]
pub enum StoreError {
    /// The file could not be created, read or written
    #[error("{action} {}: {source}", .path.display())]
    Io {
        /// What was being attempted when the failure happened
        action: &'static str,
        /// The backing file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },
}

/// A single line that does not decode into a record
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    /// The line has the wrong number of comma-separated fields
    #[error("expected {expected} fields, found {found}")]
    FieldCount {
        /// Fields the record needs
        expected: usize,
        /// Fields present on the line
        found: usize,
    },
    /// A numeric field is not an integer
    #[error("invalid {field} '{value}'")]
    InvalidNumber {
        /// Name of the field
        field: &'static str,
        /// Raw text of the field
        value: String,
    },
    /// The issued flag is neither `true` nor `false`
    #[error("invalid issued flag '{0}'")]
    InvalidFlag(String),
    /// The issued book list is not a bracketed list of ids
    #[error("invalid issued book list '{0}'")]
    InvalidList(String),
}

/// Errors raised by library catalog operations
#[derive(Debug, Error)]
pub enum LibraryError {
    /// No record with this id exists
    #[error("{entity} {id} not found")]
    NotFound {
        /// Collection that was searched
        entity: Entity,
        /// The missing id
        id: u32,
    },
    /// A record with this id already exists
    #[error("{entity} {id} already exists")]
    DuplicateId {
        /// Collection that already holds the id
        entity: Entity,
        /// The conflicting id
        id: u32,
    },
    /// The book is already issued to a member
    #[error("Book {0} is already issued")]
    AlreadyIssued(u32),
    /// The book is not issued, so it cannot be returned
    #[error("Book {0} is not issued")]
    NotIssued(u32),
    /// The book is issued, but not to the member returning it
    #[error("Book {book_id} is not held by member {member_id}")]
    NotHeld {
        /// Book being returned
        book_id: u32,
        /// Member who tried to return it
        member_id: u32,
    },
    /// Writing the record files failed
    #[error("could not save records: {0}")]
    Persistence(#[from] StoreError),
}

/// Errors raised by the student result table
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResultError {
    /// A mark lies outside 0..=100
    #[error("Invalid marks for subject {}: {value}", .subject.saturating_add(1))]
    InvalidMarks {
        /// Zero-based subject index
        subject: usize,
        /// The offending mark
        value: i32,
    },
    /// A student with this roll number is already recorded
    #[error("Student with Roll Number {0} already exists")]
    DuplicateRollNumber(u32),
}

/// Errors raised while reading interactive input
#[derive(Debug, Error)]
pub enum InputError {
    /// A number was expected but the line held something else
    #[error("'{0}' is not a valid number")]
    Format(String),
    /// The line is not UTF-8 text; holds a lossy rendering of it
    #[error("'{0}' is not valid text")]
    Encoding(String),
    /// Input reached end of file
    #[error("input closed")]
    Closed,
    /// Reading or writing the console failed
    #[error("console error: {0}")]
    Io(#[from] io::Error),
}

/// Errors raised while assembling the runtime configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read
    #[error("cannot read config {}: {source}", .path.display())]
    Read {
        /// Config file path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },
    /// The config file is not valid JSON for [`crate::config::PartialConfig`]
    #[error("cannot parse config {}: {source}", .path.display())]
    Parse {
        /// Config file path
        path: PathBuf,
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },
}

/// Errors raised while installing the tracing subscriber
#[derive(Debug, Error)]
pub enum LoggingError {
    /// The filter directive could not be parsed
    #[error("invalid log filter '{directive}': {message}")]
    Filter {
        /// Directive that failed
        directive: String,
        /// Parser message
        message: String,
    },
    /// A global subscriber was already installed
    #[error("logging already initialised: {0}")]
    Init(String),
}
