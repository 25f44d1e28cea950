//! Book and member records and their comma-separated line format.
//!
//! A book line is `id,title,author,category,issued` and a member line is
//! `id,name,email,[a, b]`. Fields are never escaped, so a comma inside a free
//! text field makes the line undecodable.

use crate::{book_state::BookState, error::RecordError};

/// A value that lives in a [`crate::store::RecordStore`] and is persisted as one line
pub trait Record: Sized {
    /// Key of the record inside its store
    fn id(&self) -> u32;

    /// Render the record as a single line without the trailing newline
    fn to_line(&self) -> String;

    /// Decode a record from one line of its backing file
    ///
    /// # Errors
    ///
    /// Returns a [`RecordError`] when the line does not have the record's shape.
    fn from_line(line: &str) -> Result<Self, RecordError>;
}

/// A book in the catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    /// Unique book id
    pub id: u32,
    /// Title as entered
    pub title: String,
    /// Author as entered
    pub author: String,
    /// Free-text category
    pub category: String,
    /// Whether the book is on the shelf or issued
    state: BookState,
}

impl Book {
    /// Create an available book
    #[must_use]
    pub fn new(id: u32, title: &str, author: &str, category: &str) -> Self {
        Self {
            id,
            title: title.to_string(),
            author: author.to_string(),
            category: category.to_string(),
            state: BookState::Available,
        }
    }

    /// Current state of the book
    #[must_use]
    pub fn state(&self) -> BookState {
        self.state
    }

    /// Whether the book is issued
    #[must_use]
    pub fn is_issued(&self) -> bool {
        self.state.is_issued()
    }

    /// Move the book to a new state
    pub(crate) fn set_state(&mut self, state: BookState) {
        self.state = state;
    }
}

impl Record for Book {
    fn id(&self) -> u32 {
        self.id
    }

    fn to_line(&self) -> String {
        format!(
            "{},{},{},{},{}",
            self.id,
            self.title,
            self.author,
            self.category,
            self.state.is_issued()
        )
    }

    fn from_line(line: &str) -> Result<Self, RecordError> {
        let fields: Vec<&str> = line.split(',').collect();
        let [id, title, author, category, issued] = fields.as_slice() else {
            return Err(RecordError::FieldCount { expected: 5, found: fields.len() });
        };

        Ok(Self {
            id: parse_id("book id", id)?,
            title: (*title).to_string(),
            author: (*author).to_string(),
            category: (*category).to_string(),
            state: BookState::from_issued(parse_flag(issued)?),
        })
    }
}

/// A library member and the books currently issued to them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    /// Unique member id
    pub id: u32,
    /// Display name
    pub name: String,
    /// Contact address
    pub email: String,
    /// Ids of issued books, in issue order
    issued_book_ids: Vec<u32>,
}

impl Member {
    /// Create a member holding no books
    #[must_use]
    pub fn new(id: u32, name: &str, email: &str) -> Self {
        Self { id, name: name.to_string(), email: email.to_string(), issued_book_ids: Vec::new() }
    }

    /// Books currently issued to this member
    #[must_use]
    pub fn issued_book_ids(&self) -> &[u32] {
        &self.issued_book_ids
    }

    /// Whether this member holds the given book
    #[must_use]
    pub fn holds(&self, book_id: u32) -> bool {
        self.issued_book_ids.contains(&book_id)
    }

    /// Record a newly issued book; an id already held is not added again
    pub(crate) fn add_issued_book(&mut self, book_id: u32) {
        if !self.holds(book_id) {
            self.issued_book_ids.push(book_id);
        }
    }

    /// Drop the first occurrence of a returned book, if present
    pub(crate) fn return_issued_book(&mut self, book_id: u32) {
        if let Some(pos) = self.issued_book_ids.iter().position(|id| *id == book_id) {
            self.issued_book_ids.remove(pos);
        }
    }

    /// The issued list as written to `members.txt`: `[1, 2, 3]`
    #[must_use]
    pub fn issued_list_text(&self) -> String {
        let ids: Vec<String> = self.issued_book_ids.iter().map(u32::to_string).collect();
        format!("[{}]", ids.join(", "))
    }
}

impl Record for Member {
    fn id(&self) -> u32 {
        self.id
    }

    fn to_line(&self) -> String {
        format!("{},{},{},{}", self.id, self.name, self.email, self.issued_list_text())
    }

    fn from_line(line: &str) -> Result<Self, RecordError> {
        // The list itself contains ", " so only the first three commas split fields.
        let fields: Vec<&str> = line.splitn(4, ',').collect();
        let [id, name, email, list] = fields.as_slice() else {
            return Err(RecordError::FieldCount { expected: 4, found: fields.len() });
        };

        Ok(Self {
            id: parse_id("member id", id)?,
            name: (*name).to_string(),
            email: (*email).to_string(),
            issued_book_ids: parse_id_list(list)?,
        })
    }
}

/// Parse a non-negative integer id field
fn parse_id(field: &'static str, raw: &str) -> Result<u32, RecordError> {
    raw.trim()
        .parse()
        .map_err(|_| RecordError::InvalidNumber { field, value: raw.to_string() })
}

/// Parse the issued flag, accepting any letter case
fn parse_flag(raw: &str) -> Result<bool, RecordError> {
    let flag = raw.trim();
    if flag.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if flag.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err(RecordError::InvalidFlag(raw.to_string()))
    }
}

/// Parse `[a, b, c]` into ids
fn parse_id_list(raw: &str) -> Result<Vec<u32>, RecordError> {
    let inner = raw
        .trim()
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .ok_or_else(|| RecordError::InvalidList(raw.to_string()))?;

    if inner.trim().is_empty() {
        return Ok(Vec::new());
    }

    inner
        .split(',')
        .map(|part| part.trim().parse().map_err(|_| RecordError::InvalidList(raw.to_string())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_book_line_format() {
        let mut book = Book::new(7, "Dune", "Frank Herbert", "SciFi");
        assert_eq!(book.to_line(), "7,Dune,Frank Herbert,SciFi,false");

        book.set_state(BookState::Issued);
        assert_eq!(book.to_line(), "7,Dune,Frank Herbert,SciFi,true");
    }

    #[test]
    fn test_book_from_line() {
        let book = Book::from_line("3,Emma,Jane Austen,Classic,true");
        assert_eq!(
            book,
            Ok(Book {
                id: 3,
                title: "Emma".to_string(),
                author: "Jane Austen".to_string(),
                category: "Classic".to_string(),
                state: BookState::Issued,
            })
        );
    }

    #[test]
    fn test_book_title_with_comma_is_rejected() {
        let book = Book::new(1, "War, and Peace", "Tolstoy", "Classic");
        assert_eq!(
            Book::from_line(&book.to_line()),
            Err(RecordError::FieldCount { expected: 5, found: 6 })
        );
    }

    #[test]
    fn test_book_bad_fields() {
        assert_eq!(
            Book::from_line("x,Emma,Jane Austen,Classic,true"),
            Err(RecordError::InvalidNumber { field: "book id", value: "x".to_string() })
        );
        assert_eq!(
            Book::from_line("1,Emma,Jane Austen,Classic,maybe"),
            Err(RecordError::InvalidFlag("maybe".to_string()))
        );
        assert_eq!(
            Book::from_line("1,Emma"),
            Err(RecordError::FieldCount { expected: 5, found: 2 })
        );
    }

    #[test]
    fn test_member_line_format() {
        let mut member = Member::new(2, "Ada", "ada@example.org");
        assert_eq!(member.to_line(), "2,Ada,ada@example.org,[]");

        member.add_issued_book(10);
        member.add_issued_book(4);
        assert_eq!(member.to_line(), "2,Ada,ada@example.org,[10, 4]");
    }

    #[test]
    fn test_member_from_line_keeps_issued_list() {
        let member = Member::from_line("2,Ada,ada@example.org,[10, 4]");
        assert!(matches!(member, Ok(ref m) if m.issued_book_ids() == [10, 4]));

        let empty = Member::from_line("5,Bo,bo@example.org,[]");
        assert!(matches!(empty, Ok(ref m) if m.issued_book_ids().is_empty()));
    }

    #[test]
    fn test_member_bad_list() {
        assert_eq!(
            Member::from_line("2,Ada,ada@example.org,10"),
            Err(RecordError::InvalidList("10".to_string()))
        );
        assert_eq!(
            Member::from_line("2,Ada,ada@example.org,[1, x]"),
            Err(RecordError::InvalidList("[1, x]".to_string()))
        );
        assert_eq!(
            Member::from_line("2,Ada"),
            Err(RecordError::FieldCount { expected: 4, found: 2 })
        );
    }

    #[test]
    fn test_issuing_a_held_id_does_not_repeat_it() {
        let mut member = Member::new(1, "Ada", "ada@example.org");
        member.add_issued_book(3);
        member.add_issued_book(5);
        member.add_issued_book(3);
        assert_eq!(member.issued_book_ids(), [3, 5]);
    }

    #[test]
    fn test_return_removes_first_occurrence_only() {
        // Hand-edited files can still carry a repeated id
        let Ok(mut member) = Member::from_line("1,Ada,ada@example.org,[3, 5, 3]") else {
            panic!("member line is well formed");
        };

        member.return_issued_book(3);
        assert_eq!(member.issued_book_ids(), [5, 3]);

        member.return_issued_book(99);
        assert_eq!(member.issued_book_ids(), [5, 3]);
    }
}
