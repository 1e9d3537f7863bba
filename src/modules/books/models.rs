use serde::{Deserialize, Serialize};

use crate::catalog::{render, Book};

/// Book as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BookResponse {
    /// Unique key of the book within the catalog
    pub isbn: String,
    /// Title of the book
    pub title: String,
    /// Author of the book
    pub author: String,
    /// Whether some user currently holds the book
    pub is_checked_out: bool,
    /// `"{title} by {author}"`
    pub label: String,
}

impl From<&Book> for BookResponse {
    fn from(book: &Book) -> Self {
        Self {
            isbn: book.isbn.clone(),
            title: book.title.clone(),
            author: book.author.clone(),
            is_checked_out: book.is_checked_out,
            label: render::book_line(book),
        }
    }
}

/// Request model for adding a book.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBook {
    pub title: String,
    pub author: String,
    pub isbn: String,
}

/// Query string of the list endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchParams {
    /// Case-insensitive title/author filter
    pub q: Option<String>,
}
