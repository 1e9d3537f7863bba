pub mod models;

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde_json::json;
use stacks_http::error::AppError;
use stacks_kernel::{InitCtx, Module};

use crate::catalog::{CatalogError, SharedCatalog};
use models::{BookResponse, CreateBook, SearchParams};

/// Books module: adding, listing, and searching catalog titles
pub struct BooksModule {
    catalog: SharedCatalog,
}

impl BooksModule {
    pub fn new(catalog: SharedCatalog) -> Self {
        Self { catalog }
    }
}

#[async_trait]
impl Module for BooksModule {
    fn name(&self) -> &'static str {
        "books"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        let books = self.catalog.lock().await.len();
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            books,
            "books module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        Router::new()
            .route("/", get(list_books).post(create_book))
            .route("/health", get(health_check))
            .route("/{isbn}", get(get_book))
            .with_state(self.catalog.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        let book_ref = json!({ "$ref": "#/components/schemas/Book" });
        let error_content = json!({
            "application/json": {
                "schema": { "$ref": "#/components/schemas/ErrorResponse" }
            }
        });

        Some(json!({
            "paths": {
                "/": {
                    "get": {
                        "summary": "List or search books",
                        "tags": ["Books"],
                        "parameters": [{
                            "name": "q",
                            "in": "query",
                            "required": false,
                            "description": "Case-insensitive title or author filter",
                            "schema": { "type": "string" }
                        }],
                        "responses": {
                            "200": {
                                "description": "Books in catalog order",
                                "content": {
                                    "application/json": {
                                        "schema": { "type": "array", "items": book_ref }
                                    }
                                }
                            }
                        }
                    },
                    "post": {
                        "summary": "Add a book, replacing any book with the same ISBN",
                        "tags": ["Books"],
                        "requestBody": {
                            "required": true,
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/CreateBook" }
                                }
                            }
                        },
                        "responses": {
                            "201": {
                                "description": "Book added",
                                "content": { "application/json": { "schema": book_ref } }
                            },
                            "422": { "description": "Malformed body", "content": error_content }
                        }
                    }
                },
                "/{isbn}": {
                    "get": {
                        "summary": "Get a book by ISBN",
                        "tags": ["Books"],
                        "parameters": [{
                            "name": "isbn",
                            "in": "path",
                            "required": true,
                            "schema": { "type": "string" }
                        }],
                        "responses": {
                            "200": {
                                "description": "The book",
                                "content": { "application/json": { "schema": book_ref } }
                            },
                            "404": { "description": "Book not found", "content": error_content }
                        }
                    }
                },
                "/health": {
                    "get": {
                        "summary": "Books health check",
                        "tags": ["Books"],
                        "responses": {
                            "200": {
                                "description": "OK",
                                "content": { "text/plain": { "schema": { "type": "string" } } }
                            }
                        }
                    }
                }
            },
            "components": {
                "schemas": {
                    "Book": {
                        "type": "object",
                        "properties": {
                            "isbn": { "type": "string", "description": "Unique key of the book" },
                            "title": { "type": "string" },
                            "author": { "type": "string" },
                            "is_checked_out": { "type": "boolean" },
                            "label": { "type": "string", "description": "Title by author" }
                        },
                        "required": ["isbn", "title", "author", "is_checked_out", "label"]
                    },
                    "CreateBook": {
                        "type": "object",
                        "properties": {
                            "title": { "type": "string" },
                            "author": { "type": "string" },
                            "isbn": { "type": "string" }
                        },
                        "required": ["title", "author", "isbn"]
                    }
                }
            }
        }))
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module stopped");
        Ok(())
    }
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "books module is healthy"
}

/// All books, or those matching `q`
async fn list_books(
    State(catalog): State<SharedCatalog>,
    Query(params): Query<SearchParams>,
) -> Json<Vec<BookResponse>> {
    let catalog = catalog.lock().await;
    let books = match params.q.as_deref() {
        Some(query) => catalog.search_books(query),
        None => catalog.books().collect(),
    };
    Json(books.into_iter().map(BookResponse::from).collect())
}

async fn create_book(
    State(catalog): State<SharedCatalog>,
    payload: Result<Json<CreateBook>, JsonRejection>,
) -> Result<(StatusCode, Json<BookResponse>), AppError> {
    let CreateBook {
        title,
        author,
        isbn,
    } = super::json_body(payload)?;

    let mut catalog = catalog.lock().await;
    let book = catalog.add_book(title, author, isbn);
    Ok((StatusCode::CREATED, Json(BookResponse::from(book))))
}

async fn get_book(
    State(catalog): State<SharedCatalog>,
    Path(isbn): Path<String>,
) -> Result<Json<BookResponse>, AppError> {
    let catalog = catalog.lock().await;
    let book = catalog.book(&isbn).ok_or(CatalogError::NotFound { isbn })?;
    Ok(Json(BookResponse::from(book)))
}

/// Create a new instance of the books module
pub fn create_module(catalog: SharedCatalog) -> Arc<dyn Module> {
    Arc::new(BooksModule::new(catalog))
}
