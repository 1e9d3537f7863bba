use thiserror::Error;

/// Input the desk could not turn into a command.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    /// Wrong number of comma-separated fields, or a missing value.
    #[error("{prompt}")]
    InvalidInput { prompt: &'static str },

    #[error("Unknown command '{0}'. Type 'help' for usage.")]
    UnknownCommand(String),
}

const BOOK_FIELDS_PROMPT: &str = "Please enter title, author, and ISBN separated by commas.";
const LOAN_FIELDS_PROMPT: &str = "Please enter user name and ISBN separated by commas.";
const NAME_PROMPT: &str = "Please enter a user name.";

/// One front desk request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    AddBook {
        title: String,
        author: String,
        isbn: String,
    },
    AddUser {
        name: String,
    },
    Search {
        query: String,
    },
    Checkout {
        user: String,
        isbn: String,
    },
    Return {
        user: String,
        isbn: String,
    },
    CheckedOut {
        user: String,
    },
    AllBooks,
    Help,
    Quit,
}

impl Command {
    /// Parse `<command> [<input>]`. Blank lines yield `Ok(None)`.
    pub fn parse_line(line: &str) -> Result<Option<Self>, InputError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        let (verb, input) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim_start()),
            None => (line, ""),
        };

        Self::parse(verb, input).map(Some)
    }

    /// Build a command from its verb and the raw text typed after it.
    pub fn parse(verb: &str, input: &str) -> Result<Self, InputError> {
        match verb.to_ascii_lowercase().as_str() {
            "add-book" => {
                let [title, author, isbn] = split_fields::<3>(input, BOOK_FIELDS_PROMPT)?;
                Ok(Self::AddBook {
                    title,
                    author,
                    isbn,
                })
            }
            "add-user" => Ok(Self::AddUser {
                name: required_name(input)?,
            }),
            "search" => Ok(Self::Search {
                query: input.to_string(),
            }),
            "checkout" => {
                let [user, isbn] = split_fields::<2>(input, LOAN_FIELDS_PROMPT)?;
                Ok(Self::Checkout { user, isbn })
            }
            "return" => {
                let [user, isbn] = split_fields::<2>(input, LOAN_FIELDS_PROMPT)?;
                Ok(Self::Return { user, isbn })
            }
            "checked-out" => Ok(Self::CheckedOut {
                user: input.trim().to_string(),
            }),
            "all-books" => Ok(Self::AllBooks),
            "help" => Ok(Self::Help),
            "quit" | "exit" => Ok(Self::Quit),
            other => Err(InputError::UnknownCommand(other.to_string())),
        }
    }
}

/// Split on commas into exactly `N` trimmed fields.
fn split_fields<const N: usize>(
    input: &str,
    prompt: &'static str,
) -> Result<[String; N], InputError> {
    let fields: Vec<String> = input.split(',').map(|f| f.trim().to_string()).collect();
    fields
        .try_into()
        .map_err(|_| InputError::InvalidInput { prompt })
}

fn required_name(input: &str) -> Result<String, InputError> {
    let name = input.trim();
    if name.is_empty() {
        return Err(InputError::InvalidInput {
            prompt: NAME_PROMPT,
        });
    }
    Ok(name.to_string())
}
