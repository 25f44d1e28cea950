/// Events that cause a book state transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookEvent {
    /// Issue a book to the member with this id
    Issue {
        /// Book being issued
        book_id: u32,
        /// Member receiving the book
        member_id: u32,
    },
    /// Return a book on behalf of the member with this id
    Return {
        /// Book being returned
        book_id: u32,
        /// Member returning the book
        member_id: u32,
    },
}

impl BookEvent {
    /// The book this event applies to
    #[must_use]
    pub fn book_id(self) -> u32 {
        match self {
            Self::Issue { book_id, .. } | Self::Return { book_id, .. } => book_id,
        }
    }

    /// The member taking part in this event
    #[must_use]
    pub fn member_id(self) -> u32 {
        match self {
            Self::Issue { member_id, .. } | Self::Return { member_id, .. } => member_id,
        }
    }
}
