use serde::{Deserialize, Serialize};

use crate::modules::books::models::BookResponse;

/// Request model for registering a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    pub name: String,
}

/// A user and the books they hold, oldest checkout first.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserResponse {
    pub name: String,
    pub checked_out: Vec<BookResponse>,
}

/// Request model for checking a book out.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutRequest {
    pub isbn: String,
}

/// Result of a checkout or return.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoanResponse {
    pub user: String,
    pub book: BookResponse,
    /// Human-readable confirmation, e.g. `"Alice has returned 1984 by George Orwell."`
    pub message: String,
}
