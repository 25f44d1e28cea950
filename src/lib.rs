//! Record managers for a small campus: a library catalog and a student result table.
//!
//! The library side keeps books and members in flat comma-separated files that
//! are rewritten after every change. The result side keeps students in memory.

pub mod book_state;
pub mod catalog;
pub mod config;
pub mod console;
pub mod display;
pub mod error;
pub mod events;
pub mod logging;
pub mod observers;
pub mod persistence;
pub mod record;
pub mod results;
pub mod shell;
pub mod store;
pub mod system;

pub use book_state::BookState;
pub use catalog::SortKey;
pub use error::{InputError, LibraryError, ResultError};
pub use events::BookEvent;
pub use record::{Book, Member, Record};
pub use results::{ResultTable, Student};
pub use store::RecordStore;
pub use system::LibrarySystem;
