//! Search and ordering over a snapshot of the book catalog.

use std::cmp::Ordering;

use crate::record::Book;

/// Field a catalog listing is ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    /// Title, ignoring letter case
    Title,
    /// Author, respecting letter case
    Author,
}

impl SortKey {
    /// Compare two books by this key
    #[must_use]
    pub fn compare(self, a: &Book, b: &Book) -> Ordering {
        match self {
            Self::Title => compare_ignore_case(&a.title, &b.title),
            // Author order stays case-sensitive: "Zola" sorts before "de Beauvoir".
            Self::Author => a.author.cmp(&b.author),
        }
    }
}

/// Whether `book` mentions `term` in its title, author or category, ignoring case
#[must_use]
pub fn matches(book: &Book, term: &str) -> bool {
    let term = term.to_lowercase();
    [&book.title, &book.author, &book.category]
        .iter()
        .any(|field| field.to_lowercase().contains(&term))
}

/// Books matching `term`, in the order they are yielded
pub fn search<'a>(books: impl IntoIterator<Item = &'a Book>, term: &str) -> Vec<&'a Book> {
    books.into_iter().filter(|book| matches(book, term)).collect()
}

/// A sorted copy of the books, leaving the source untouched
///
/// The sort is stable, so books with equal keys keep their relative order.
pub fn sorted<'a>(books: impl IntoIterator<Item = &'a Book>, key: SortKey) -> Vec<&'a Book> {
    let mut list: Vec<&Book> = books.into_iter().collect();
    list.sort_by(|a, b| key.compare(a, b));
    list
}

/// Lexicographic comparison of the lowercase forms of two strings
fn compare_ignore_case(a: &str, b: &str) -> Ordering {
    a.chars().flat_map(char::to_lowercase).cmp(b.chars().flat_map(char::to_lowercase))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A small mixed-case catalog
    fn books() -> Vec<Book> {
        vec![
            Book::new(1, "Zebra", "alice Walker", "Nature"),
            Book::new(2, "apple", "Bob Marley", "Cooking"),
            Book::new(3, "Rome", "Mary Beard", "History"),
            Book::new(4, "Mango", "Bob Marley", "Cooking"),
        ]
    }

    #[test]
    fn test_search_is_case_insensitive_across_fields() {
        let books = books();

        let hits: Vec<u32> = search(&books, "hist").iter().map(|b| b.id).collect();
        assert_eq!(hits, [3]);

        let hits: Vec<u32> = search(&books, "MARLEY").iter().map(|b| b.id).collect();
        assert_eq!(hits, [2, 4]);

        let hits: Vec<u32> = search(&books, "zeb").iter().map(|b| b.id).collect();
        assert_eq!(hits, [1]);
    }

    #[test]
    fn test_search_without_match_is_empty() {
        let books = books();
        assert!(search(&books, "quantum").is_empty());
    }

    #[test]
    fn test_sort_by_title_ignores_case() {
        let books = vec![Book::new(1, "Zebra", "X", "Y"), Book::new(2, "apple", "X", "Y")];
        let titles: Vec<&str> =
            sorted(&books, SortKey::Title).iter().map(|b| b.title.as_str()).collect();
        assert_eq!(titles, ["apple", "Zebra"]);
    }

    #[test]
    fn test_sort_by_author_is_case_sensitive_and_stable() {
        let books = books();
        let ids: Vec<u32> = sorted(&books, SortKey::Author).iter().map(|b| b.id).collect();
        // Uppercase sorts first; the two "Bob Marley" books keep their order.
        assert_eq!(ids, [2, 4, 3, 1]);
    }

    #[test]
    fn test_sort_leaves_source_untouched() {
        let books = books();
        let _sorted = sorted(&books, SortKey::Title);
        let ids: Vec<u32> = books.iter().map(|b| b.id).collect();
        assert_eq!(ids, [1, 2, 3, 4]);
    }
}
