//! In-memory book catalog with checkout bookkeeping.
//!
//! Books are stored in an arena keyed by [`BookId`]; the isbn index points
//! into the arena and users hold ids. Two behaviors are kept on purpose:
//!
//! - Adding a book under an isbn that is already indexed replaces the index
//!   entry (last write wins) while keeping the isbn's place in listing order.
//!   A user holding the replaced record keeps holding it, and it stays
//!   flagged as checked out; an unheld replaced record is dropped.
//! - Adding a user under a taken name replaces the user. Books the previous
//!   user held stay flagged as checked out but are no longer reachable from
//!   any user.

mod error;
mod model;
pub mod render;

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;

use slotmap::SlotMap;
use tokio::sync::Mutex;

pub use error::CatalogError;
pub use model::{Book, BookId, User};

/// Catalog shared between request handlers; one lock around every operation.
pub type SharedCatalog = Arc<Mutex<Catalog>>;

/// Starter titles as `(title, author, isbn)`.
pub const SEED_BOOKS: [(&str, &str, &str); 5] = [
    ("The Great Gatsby", "F. Scott", "0001"),
    ("To Kill a Mockingbird", "Harper", "0002"),
    ("1984", "George Orwell", "0003"),
    ("Pride and Prejudice", "Jane Austen", "0004"),
    ("The Catcher in the Rye", "J.D.", "0005"),
];

#[derive(Debug, Default)]
pub struct Catalog {
    records: SlotMap<BookId, Book>,
    /// Indexed books in listing order.
    shelf: Vec<BookId>,
    /// isbn -> position in `shelf`.
    by_isbn: HashMap<String, usize>,
    users: HashMap<String, User>,
}

impl Catalog {
    /// An empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// A catalog stocked with [`SEED_BOOKS`].
    pub fn seeded() -> Self {
        let mut catalog = Self::new();
        for (title, author, isbn) in SEED_BOOKS {
            catalog.add_book(title, author, isbn);
        }
        catalog
    }

    pub fn into_shared(self) -> SharedCatalog {
        Arc::new(Mutex::new(self))
    }

    /// Number of indexed books.
    pub fn len(&self) -> usize {
        self.shelf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shelf.is_empty()
    }

    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    /// Index a new book under `isbn`, replacing any book already indexed there.
    pub fn add_book(
        &mut self,
        title: impl Into<String>,
        author: impl Into<String>,
        isbn: impl Into<String>,
    ) -> &Book {
        let book = Book::new(title, author, isbn);
        let isbn = book.isbn.clone();
        let id = self.records.insert(book);

        match self.by_isbn.get(&isbn) {
            Some(&position) => {
                let previous = std::mem::replace(&mut self.shelf[position], id);
                // A held record stays reachable through its holder.
                let held = self
                    .records
                    .get(previous)
                    .is_some_and(|book| book.is_checked_out);
                if !held {
                    self.records.remove(previous);
                }
                tracing::debug!(
                    isbn = %isbn,
                    kept_previous = held,
                    "book replaced under existing isbn"
                );
            }
            None => {
                self.by_isbn.insert(isbn.clone(), self.shelf.len());
                self.shelf.push(id);
                tracing::debug!(isbn = %isbn, "book added");
            }
        }

        &self.records[id]
    }

    /// Register a user under `name`, replacing any user already registered there.
    pub fn add_user(&mut self, name: impl Into<String>) -> &User {
        let name = name.into();
        let user = User::new(name.clone());

        match self.users.entry(name) {
            Entry::Occupied(mut slot) => {
                let previous = slot.insert(user);
                if !previous.checked_out.is_empty() {
                    tracing::warn!(
                        user = %previous.name(),
                        orphaned = previous.checked_out.len(),
                        "user replaced while holding books"
                    );
                }
                &*slot.into_mut()
            }
            Entry::Vacant(slot) => {
                tracing::debug!(user = %slot.key(), "user added");
                &*slot.insert(user)
            }
        }
    }

    /// Books whose title or author contains `query`, ignoring case, in listing order.
    pub fn search_books(&self, query: &str) -> Vec<&Book> {
        let needle = query.to_lowercase();
        self.books().filter(|book| book.matches(&needle)).collect()
    }

    /// All indexed books in listing order.
    pub fn books(&self) -> impl Iterator<Item = &Book> + '_ {
        self.shelf.iter().filter_map(|id| self.records.get(*id))
    }

    pub fn book(&self, isbn: &str) -> Option<&Book> {
        self.book_id(isbn).and_then(|id| self.records.get(id))
    }

    pub fn user(&self, name: &str) -> Option<&User> {
        self.users.get(name)
    }

    /// Resolve a held id, including records no longer indexed.
    pub fn record(&self, id: BookId) -> Option<&Book> {
        self.records.get(id)
    }

    /// Lend the book indexed under `isbn` to `user`.
    pub fn checkout_book(&mut self, user: &str, isbn: &str) -> Result<&Book, CatalogError> {
        let id = self.resolve(user, isbn)?;

        let Self { records, users, .. } = self;
        let book = &mut records[id];
        if book.is_checked_out {
            tracing::debug!(user, isbn, "checkout refused, book already out");
            return Err(CatalogError::AlreadyCheckedOut {
                isbn: isbn.to_string(),
            });
        }

        let holder = users
            .get_mut(user)
            .ok_or_else(|| CatalogError::unknown_user(user))?;
        holder.checked_out.push(id);
        book.is_checked_out = true;

        tracing::debug!(user, isbn, "book checked out");
        Ok(&*book)
    }

    /// Take back the book indexed under `isbn` from `user`.
    pub fn return_book(&mut self, user: &str, isbn: &str) -> Result<&Book, CatalogError> {
        let id = self.resolve(user, isbn)?;

        let Self { records, users, .. } = self;
        let holder = users
            .get_mut(user)
            .ok_or_else(|| CatalogError::unknown_user(user))?;
        let Some(position) = holder.checked_out.iter().position(|held| *held == id) else {
            tracing::debug!(user, isbn, "return refused, book not held by user");
            return Err(CatalogError::NotCheckedOutByUser {
                user: user.to_string(),
                isbn: isbn.to_string(),
            });
        };

        holder.checked_out.remove(position);
        let book = &mut records[id];
        book.is_checked_out = false;

        tracing::debug!(user, isbn, "book returned");
        Ok(&*book)
    }

    /// Books held by `user`, oldest checkout first.
    pub fn list_checked_out(&self, user: &str) -> Result<Vec<&Book>, CatalogError> {
        let holder = self
            .users
            .get(user)
            .ok_or_else(|| CatalogError::unknown_user(user))?;
        Ok(holder
            .checked_out
            .iter()
            .filter_map(|id| self.records.get(*id))
            .collect())
    }

    fn book_id(&self, isbn: &str) -> Option<BookId> {
        self.by_isbn
            .get(isbn)
            .and_then(|&position| self.shelf.get(position))
            .copied()
    }

    /// The user must exist before the isbn is looked up.
    fn resolve(&self, user: &str, isbn: &str) -> Result<BookId, CatalogError> {
        if !self.users.contains_key(user) {
            return Err(CatalogError::unknown_user(user));
        }
        self.book_id(isbn)
            .ok_or_else(|| CatalogError::not_found(isbn))
    }
}
