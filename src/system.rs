use std::{fmt, path::Path};

use crate::{
    book_state::BookState,
    catalog::{self, SortKey},
    error::{Entity, LibraryError, StoreError},
    events::BookEvent,
    observers::{StateObserver, TransitionLogger},
    persistence::LoadSummary,
    record::{Book, Member},
    store::RecordStore,
};

/// What was found when loading the two record files
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OpenReport {
    /// Outcome of reading the book file
    pub books: LoadSummary,
    /// Outcome of reading the member file
    pub members: LoadSummary,
}

/// A broken link between the book catalog and the member register
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inconsistency {
    /// The book is flagged issued but no member holds it
    IssuedWithoutHolder {
        /// Affected book
        book_id: u32,
    },
    /// More than one member (or one member twice) holds the book
    MultipleHolders {
        /// Affected book
        book_id: u32,
        /// Every member holding it, one entry per occurrence
        member_ids: Vec<u32>,
    },
    /// A member holds an id that is not in the catalog
    UnknownBook {
        /// Holding member
        member_id: u32,
        /// Missing book
        book_id: u32,
    },
    /// A member holds a book that is flagged available
    HeldButAvailable {
        /// Holding member
        member_id: u32,
        /// Affected book
        book_id: u32,
    },
}

impl fmt::Display for Inconsistency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IssuedWithoutHolder { book_id } => {
                write!(f, "Book {book_id} is issued but no member holds it")
            }
            Self::MultipleHolders { book_id, member_ids } => {
                write!(f, "Book {book_id} is held by several members: {member_ids:?}")
            }
            Self::UnknownBook { member_id, book_id } => {
                write!(f, "Member {member_id} holds unknown book {book_id}")
            }
            Self::HeldButAvailable { member_id, book_id } => {
                write!(f, "Member {member_id} holds book {book_id}, which is marked available")
            }
        }
    }
}

/// The library catalog: books, members and the issue relation between them
///
/// Every mutating operation rewrites both record files before returning.
pub struct LibrarySystem {
    /// Book catalog, backed by `books.txt`
    books: RecordStore<Book>,
    /// Member register, backed by `members.txt`
    members: RecordStore<Member>,
    /// Registered state change observers
    observers: Vec<Box<dyn StateObserver>>,
}

// Manual implementation of Debug for LibrarySystem
impl fmt::Debug for LibrarySystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LibrarySystem")
            .field("books", &self.books)
            .field("members", &self.members)
            .field("observers_count", &self.observers.len())
            .finish()
    }
}

impl LibrarySystem {
    /// Create an empty system backed by the two files, without reading them
    #[must_use]
    pub fn new(books_path: &Path, members_path: &Path) -> Self {
        Self {
            books: RecordStore::new(books_path),
            members: RecordStore::new(members_path),
            observers: Vec::new(),
        }
    }

    /// Load both record files, creating them when missing
    ///
    /// The standard [`TransitionLogger`] is registered on the returned system.
    ///
    /// # Errors
    ///
    /// Returns a `StoreError::Io` if either file cannot be created or read.
    pub fn open(books_path: &Path, members_path: &Path) -> Result<(Self, OpenReport), StoreError> {
        let (books, book_summary) = RecordStore::<Book>::open(books_path)?;
        let (members, member_summary) = RecordStore::<Member>::open(members_path)?;

        let mut system = Self { books, members, observers: Vec::new() };
        system.register_observer(Box::new(TransitionLogger));

        Ok((system, OpenReport { books: book_summary, members: member_summary }))
    }

    /// Register an observer to be notified of issue and return transitions
    pub fn register_observer(&mut self, observer: Box<dyn StateObserver>) {
        self.observers.push(observer);
    }

    /// Add a new book to the catalog
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::DuplicateId` if the id is taken, or
    /// `LibraryError::Persistence` if the files cannot be rewritten.
    pub fn add_book(&mut self, book: Book) -> Result<(), LibraryError> {
        if self.books.contains(book.id) {
            return Err(LibraryError::DuplicateId { entity: Entity::Book, id: book.id });
        }
        tracing::debug!(book_id = book.id, "adding book");
        self.books.upsert(book);
        self.save()
    }

    /// Register a new member
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::DuplicateId` if the id is taken, or
    /// `LibraryError::Persistence` if the files cannot be rewritten.
    pub fn add_member(&mut self, member: Member) -> Result<(), LibraryError> {
        if self.members.contains(member.id) {
            return Err(LibraryError::DuplicateId { entity: Entity::Member, id: member.id });
        }
        tracing::debug!(member_id = member.id, "adding member");
        self.members.upsert(member);
        self.save()
    }

    /// Issue a book to a member
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::NotFound` if either id is unknown (the book is
    /// checked first), `LibraryError::AlreadyIssued` if the book is out, or
    /// `LibraryError::Persistence` if the files cannot be rewritten. In the
    /// last case the in-memory issue has already happened.
    pub fn issue_book(&mut self, book_id: u32, member_id: u32) -> Result<(), LibraryError> {
        let from = self.lookup_book(book_id)?.state();
        self.lookup_member(member_id)?;
        if from.is_issued() {
            return Err(LibraryError::AlreadyIssued(book_id));
        }

        self.apply(BookEvent::Issue { book_id, member_id }, from, BookState::Issued);
        self.save()
    }

    /// Return a book on behalf of the member holding it
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::NotFound` if either id is unknown,
    /// `LibraryError::NotIssued` if the book is on the shelf,
    /// `LibraryError::NotHeld` if it is issued to someone else, or
    /// `LibraryError::Persistence` if the files cannot be rewritten.
    pub fn return_book(&mut self, book_id: u32, member_id: u32) -> Result<(), LibraryError> {
        let from = self.lookup_book(book_id)?.state();
        let holds = self.lookup_member(member_id)?.holds(book_id);
        if !from.is_issued() {
            return Err(LibraryError::NotIssued(book_id));
        }
        if !holds {
            return Err(LibraryError::NotHeld { book_id, member_id });
        }

        self.apply(BookEvent::Return { book_id, member_id }, from, BookState::Available);
        self.save()
    }

    /// Books whose title, author or category contains `term`, ignoring case
    #[must_use]
    pub fn search(&self, term: &str) -> Vec<&Book> {
        catalog::search(self.books.records(), term)
    }

    /// A sorted snapshot of the whole catalog
    #[must_use]
    pub fn sorted_books(&self, key: SortKey) -> Vec<&Book> {
        catalog::sorted(self.books.records(), key)
    }

    /// Look a book up by id
    #[must_use]
    pub fn book(&self, id: u32) -> Option<&Book> {
        self.books.get(id)
    }

    /// Look a member up by id
    #[must_use]
    pub fn member(&self, id: u32) -> Option<&Member> {
        self.members.get(id)
    }

    /// All books in ascending id order
    pub fn books(&self) -> impl Iterator<Item = &Book> {
        self.books.records()
    }

    /// All members in ascending id order
    pub fn members(&self) -> impl Iterator<Item = &Member> {
        self.members.records()
    }

    /// Rewrite both record files
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::Persistence` if either file cannot be written.
    pub fn save(&self) -> Result<(), LibraryError> {
        self.books.save()?;
        self.members.save()?;
        Ok(())
    }

    /// Every place where the issue flags and the member lists disagree
    #[must_use]
    pub fn check_consistency(&self) -> Vec<Inconsistency> {
        let mut problems = Vec::new();

        for member in self.members.records() {
            for &book_id in member.issued_book_ids() {
                match self.books.get(book_id) {
                    None => problems
                        .push(Inconsistency::UnknownBook { member_id: member.id, book_id }),
                    Some(book) if !book.is_issued() => problems
                        .push(Inconsistency::HeldButAvailable { member_id: member.id, book_id }),
                    Some(_) => {}
                }
            }
        }

        for book in self.books.records().filter(|b| b.is_issued()) {
            let member_ids: Vec<u32> = self
                .members
                .records()
                .flat_map(|m| {
                    let held = m.issued_book_ids().iter().filter(|id| **id == book.id).count();
                    std::iter::repeat_n(m.id, held)
                })
                .collect();
            match member_ids.len() {
                0 => problems.push(Inconsistency::IssuedWithoutHolder { book_id: book.id }),
                1 => {}
                _ => problems.push(Inconsistency::MultipleHolders { book_id: book.id, member_ids }),
            }
        }

        problems
    }

    /// Find a book or report it missing
    fn lookup_book(&self, id: u32) -> Result<&Book, LibraryError> {
        self.books.get(id).ok_or(LibraryError::NotFound { entity: Entity::Book, id })
    }

    /// Find a member or report them missing
    fn lookup_member(&self, id: u32) -> Result<&Member, LibraryError> {
        self.members.get(id).ok_or(LibraryError::NotFound { entity: Entity::Member, id })
    }

    /// Move a validated transition into both collections and notify observers
    fn apply(&mut self, event: BookEvent, from: BookState, to: BookState) {
        if let Some(book) = self.books.get_mut(event.book_id()) {
            book.set_state(to);
        }
        if let Some(member) = self.members.get_mut(event.member_id()) {
            match event {
                BookEvent::Issue { book_id, .. } => member.add_issued_book(book_id),
                BookEvent::Return { book_id, .. } => member.return_issued_book(book_id),
            }
        }

        for observer in &self.observers {
            observer.on_state_change(from, to, &event);
        }
    }
}
