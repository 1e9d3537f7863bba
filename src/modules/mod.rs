pub mod books;
pub mod users;

use axum::extract::rejection::JsonRejection;
use axum::Json;
use serde_json::json;
use stacks_http::error::AppError;
use stacks_kernel::ModuleRegistry;

use crate::catalog::{CatalogError, SharedCatalog};

/// Register the catalog modules with the registry, all sharing `catalog`
pub fn register_all(registry: &mut ModuleRegistry, catalog: &SharedCatalog) {
    registry.register(books::create_module(catalog.clone()));
    registry.register(users::create_module(catalog.clone()));
}

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        let message = err.to_string();
        match err {
            CatalogError::NotFound { .. } | CatalogError::UnknownUser { .. } => {
                AppError::not_found(message)
            }
            CatalogError::AlreadyCheckedOut { isbn } => {
                AppError::conflict(vec![json!({ "isbn": isbn })], message)
            }
            CatalogError::NotCheckedOutByUser { user, isbn } => {
                AppError::conflict(vec![json!({ "user": user, "isbn": isbn })], message)
            }
        }
    }
}

/// Unwrap a JSON body, reporting malformed payloads in the standard error format
pub(crate) fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    match payload {
        Ok(Json(body)) => Ok(body),
        Err(rejection) => Err(AppError::validation(
            vec![json!({ "body": rejection.body_text() })],
            "Request body does not match the expected fields",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn catalog_errors_map_to_http_statuses() {
        let cases = [
            (
                CatalogError::NotFound {
                    isbn: "9".to_string(),
                },
                StatusCode::NOT_FOUND,
            ),
            (
                CatalogError::UnknownUser {
                    name: "Bob".to_string(),
                },
                StatusCode::NOT_FOUND,
            ),
            (
                CatalogError::AlreadyCheckedOut {
                    isbn: "0001".to_string(),
                },
                StatusCode::CONFLICT,
            ),
            (
                CatalogError::NotCheckedOutByUser {
                    user: "Bob".to_string(),
                    isbn: "0001".to_string(),
                },
                StatusCode::CONFLICT,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(AppError::from(err).status(), status);
        }
    }

    #[test]
    fn error_message_is_the_desk_text() {
        let err = AppError::from(CatalogError::AlreadyCheckedOut {
            isbn: "0001".to_string(),
        });
        match err {
            AppError::Conflict {
                message, details, ..
            } => {
                assert_eq!(message, "Book is already checked out.");
                assert_eq!(details, vec![json!({ "isbn": "0001" })]);
            }
            other => panic!("expected conflict, got {other:?}"),
        }
    }
}
