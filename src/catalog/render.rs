//! Text renderings of catalog records.

use super::model::{Book, User};

/// `"{title} by {author}"`, the short form used in replies and listings.
pub fn book_line(book: &Book) -> String {
    format!("{} by {}", book.title, book.author)
}

/// Full record line used by the all-books listing.
pub fn book_record(book: &Book) -> String {
    format!(
        "Title: {}, Author: {}, ISBN: {}",
        book.title, book.author, book.isbn
    )
}

pub fn user_line(user: &User) -> String {
    user.name().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_short_and_full_forms() {
        let book = Book::new("The Great Gatsby", "F. Scott", "0001");
        assert_eq!(book_line(&book), "The Great Gatsby by F. Scott");
        assert_eq!(
            book_record(&book),
            "Title: The Great Gatsby, Author: F. Scott, ISBN: 0001"
        );
    }

    #[test]
    fn renders_user_by_name() {
        assert_eq!(user_line(&User::new("Alice")), "Alice");
    }
}
