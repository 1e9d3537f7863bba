//! Front desk: a line-oriented text session over a [`Catalog`].
//!
//! Each line is one request, e.g. `checkout Alice, 0001`; the reply is the
//! text to show the person at the desk.

mod command;

pub use command::{Command, InputError};

use crate::catalog::render::{book_line, book_record, user_line};
use crate::catalog::Catalog;

/// Usage banner shown by `help`, and before every reply when enabled.
pub const HELP_TEXT: &str = "\
How to enter data:
1. add-book: title, author, isbn
2. add-user: user name
3. search: title or author
4. checkout: user name, isbn
5. return: user name, isbn
6. checked-out: user name
7. all-books: no input
Type 'quit' to leave.
";

/// Outcome of one session line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// Nothing to show (blank line).
    Silent,
    Reply(String),
    /// The session should end.
    Quit,
}

/// Owns the catalog for one interactive session.
#[derive(Debug)]
pub struct Desk {
    catalog: Catalog,
    show_help: bool,
}

impl Desk {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            show_help: false,
        }
    }

    /// Prefix every reply with [`HELP_TEXT`].
    pub fn with_help_banner(mut self, show_help: bool) -> Self {
        self.show_help = show_help;
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Handle one typed line.
    pub fn respond(&mut self, line: &str) -> Response {
        match Command::parse_line(line) {
            Ok(None) => Response::Silent,
            Ok(Some(Command::Quit)) => Response::Quit,
            Ok(Some(command)) => {
                let reply = self.execute(&command);
                Response::Reply(self.decorate(reply))
            }
            Err(err) => {
                tracing::debug!(error = %err, "desk input rejected");
                Response::Reply(self.decorate(err.to_string()))
            }
        }
    }

    /// Run a command against the catalog and render the reply text.
    pub fn execute(&mut self, command: &Command) -> String {
        match command {
            Command::AddBook {
                title,
                author,
                isbn,
            } => {
                let book = self.catalog.add_book(title.as_str(), author.as_str(), isbn.as_str());
                format!("Added book: {}", book_line(book))
            }
            Command::AddUser { name } => {
                let user = self.catalog.add_user(name.as_str());
                format!("Added user: {}", user_line(user))
            }
            Command::Search { query } => {
                let results = self.catalog.search_books(query);
                if results.is_empty() {
                    "No matching books found.".to_string()
                } else {
                    listing("Search results:", results.into_iter().map(book_line))
                }
            }
            Command::Checkout { user, isbn } => match self.catalog.checkout_book(user, isbn) {
                Ok(book) => format!("{} has checked out {}.", user, book_line(book)),
                Err(err) => err.to_string(),
            },
            Command::Return { user, isbn } => match self.catalog.return_book(user, isbn) {
                Ok(book) => format!("{} has returned {}.", user, book_line(book)),
                Err(err) => err.to_string(),
            },
            Command::CheckedOut { user } => match self.catalog.list_checked_out(user) {
                Ok(books) if books.is_empty() => format!("{} has no books checked out.", user),
                Ok(books) => listing(
                    &format!("{} has checked out the following books:", user),
                    books.into_iter().map(book_line),
                ),
                Err(err) => err.to_string(),
            },
            Command::AllBooks => {
                if self.catalog.is_empty() {
                    "No books in the library.".to_string()
                } else {
                    listing("All books:", self.catalog.books().map(book_record))
                }
            }
            Command::Help | Command::Quit => HELP_TEXT.trim_end().to_string(),
        }
    }

    fn decorate(&self, reply: String) -> String {
        if self.show_help {
            format!("{}\n{}", HELP_TEXT, reply)
        } else {
            reply
        }
    }
}

fn listing(heading: &str, lines: impl Iterator<Item = String>) -> String {
    std::iter::once(heading.to_string())
        .chain(lines)
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reply(desk: &mut Desk, line: &str) -> String {
        match desk.respond(line) {
            Response::Reply(text) => text,
            other => panic!("expected a reply to {line:?}, got {other:?}"),
        }
    }

    fn seeded_desk() -> Desk {
        Desk::new(Catalog::seeded())
    }

    #[test]
    fn checkout_session_matches_desk_wording() {
        let mut desk = seeded_desk();
        assert_eq!(reply(&mut desk, "add-user Alice"), "Added user: Alice");
        assert_eq!(
            reply(&mut desk, "checkout Alice, 0001"),
            "Alice has checked out The Great Gatsby by F. Scott."
        );
        assert_eq!(
            reply(&mut desk, "checked-out Alice"),
            "Alice has checked out the following books:\nThe Great Gatsby by F. Scott"
        );
        assert_eq!(
            reply(&mut desk, "checkout Alice, 0001"),
            "Book is already checked out."
        );
        assert_eq!(
            reply(&mut desk, "return Alice, 0001"),
            "Alice has returned The Great Gatsby by F. Scott."
        );
        assert_eq!(
            reply(&mut desk, "checked-out Alice"),
            "Alice has no books checked out."
        );
    }

    #[test]
    fn unregistered_user_is_user_not_found() {
        let mut desk = seeded_desk();
        assert_eq!(reply(&mut desk, "checkout Bob, 0001"), "User not found.");
        assert_eq!(reply(&mut desk, "return Bob, 0001"), "User not found.");
        assert_eq!(reply(&mut desk, "checked-out Bob"), "User not found.");
    }

    #[test]
    fn error_replies_for_unknown_book_and_wrong_holder() {
        let mut desk = seeded_desk();
        reply(&mut desk, "add-user Alice");
        assert_eq!(reply(&mut desk, "checkout Alice, 4242"), "Book not found.");
        assert_eq!(
            reply(&mut desk, "return Alice, 0002"),
            "Alice does not have this book checked out."
        );
        assert_eq!(
            reply(&mut desk, "checkout Alice"),
            "Please enter user name and ISBN separated by commas."
        );
    }

    #[test]
    fn search_and_add_book_replies() {
        let mut desk = seeded_desk();
        assert_eq!(
            reply(&mut desk, "add-book Dune, Frank Herbert, 0100"),
            "Added book: Dune by Frank Herbert"
        );
        assert_eq!(
            reply(&mut desk, "search ORWELL"),
            "Search results:\n1984 by George Orwell"
        );
        assert_eq!(reply(&mut desk, "search tolkien"), "No matching books found.");
    }

    #[test]
    fn all_books_lists_full_records() {
        let mut desk = seeded_desk();
        let text = reply(&mut desk, "all-books");
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("All books:"));
        assert_eq!(
            lines.next(),
            Some("Title: The Great Gatsby, Author: F. Scott, ISBN: 0001")
        );
        assert_eq!(lines.count(), 4);

        let mut empty = Desk::new(Catalog::new());
        assert_eq!(reply(&mut empty, "all-books"), "No books in the library.");
    }

    #[test]
    fn help_banner_prefixes_replies_when_enabled() {
        let mut desk = seeded_desk().with_help_banner(true);
        let text = reply(&mut desk, "add-user Alice");
        assert!(text.starts_with("How to enter data:"));
        assert!(text.ends_with("\nAdded user: Alice"));
    }

    #[test]
    fn blank_and_quit_lines() {
        let mut desk = seeded_desk();
        assert_eq!(desk.respond(""), Response::Silent);
        assert_eq!(desk.respond("exit"), Response::Quit);
        assert_eq!(desk.catalog().user_count(), 0);
    }
}
