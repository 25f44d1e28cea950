/// Represents the possible states of a library book
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BookState {
    /// Book is on the shelf and can be issued
    #[default]
    Available,
    /// Book is issued to a member
    Issued,
}

impl BookState {
    /// Build the state from the issued flag stored in `books.txt`
    #[must_use]
    pub fn from_issued(issued: bool) -> Self {
        if issued { Self::Issued } else { Self::Available }
    }

    /// Whether the book is currently issued
    #[must_use]
    pub fn is_issued(self) -> bool {
        self == Self::Issued
    }

    /// Get a human-readable label of the current state
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Available => "Available",
            Self::Issued => "Issued",
        }
    }
}
