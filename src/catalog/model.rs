use slotmap::new_key_type;

new_key_type! {
    /// Handle to one book record.
    ///
    /// Re-adding an isbn creates a fresh record with a fresh id, so two books
    /// with the same isbn are still told apart by their ids.
    pub struct BookId;
}

/// A book record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub is_checked_out: bool,
}

impl Book {
    pub fn new(title: impl Into<String>, author: impl Into<String>, isbn: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            isbn: isbn.into(),
            is_checked_out: false,
        }
    }

    /// Case-insensitive substring match against title or author.
    ///
    /// `needle` must already be lowercased.
    pub(crate) fn matches(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle) || self.author.to_lowercase().contains(needle)
    }
}

/// A registered borrower and the books they hold, in checkout order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    name: String,
    pub(crate) checked_out: Vec<BookId>,
}

impl User {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            checked_out: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Ids of the held books, oldest checkout first.
    pub fn checked_out(&self) -> &[BookId] {
        &self.checked_out
    }

    pub fn holds(&self, id: BookId) -> bool {
        self.checked_out.contains(&id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_book_is_available() {
        let book = Book::new("1984", "George Orwell", "0003");
        assert!(!book.is_checked_out);
        assert_eq!(book.isbn, "0003");
    }

    #[test]
    fn matches_title_or_author_ignoring_case() {
        let book = Book::new("Pride and Prejudice", "Jane Austen", "0004");
        assert!(book.matches("prejudice"));
        assert!(book.matches("austen"));
        assert!(book.matches(""));
        assert!(!book.matches("orwell"));
    }
}
