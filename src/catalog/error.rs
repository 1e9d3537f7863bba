//! Error type for catalog operations.
//!
//! The `Display` text of each variant is the reply shown to the person at the
//! desk, so callers can surface errors verbatim.

/// Reasons a catalog operation is refused. The catalog is left unchanged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    /// No book is indexed under the isbn.
    #[error("Book not found.")]
    NotFound {
        /// The isbn that was looked up.
        isbn: String,
    },

    /// The book is already held, by this user or any other.
    #[error("Book is already checked out.")]
    AlreadyCheckedOut {
        /// The isbn of the held book.
        isbn: String,
    },

    /// A return was attempted for a book the user does not hold.
    #[error("{user} does not have this book checked out.")]
    NotCheckedOutByUser {
        /// The user attempting the return.
        user: String,
        /// The isbn being returned.
        isbn: String,
    },

    /// No user is registered under the name.
    #[error("User not found.")]
    UnknownUser {
        /// The name that was looked up.
        name: String,
    },
}

impl CatalogError {
    pub(crate) fn not_found(isbn: &str) -> Self {
        Self::NotFound {
            isbn: isbn.to_string(),
        }
    }

    pub(crate) fn unknown_user(name: &str) -> Self {
        Self::UnknownUser {
            name: name.to_string(),
        }
    }
}
