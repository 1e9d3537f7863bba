pub mod models;

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use serde_json::json;
use stacks_http::error::AppError;
use stacks_kernel::{InitCtx, Module};

use crate::catalog::{render, SharedCatalog};
use crate::modules::books::models::BookResponse;
use models::{CheckoutRequest, CreateUser, LoanResponse, UserResponse};

/// Users module: registration, checkouts, and returns
pub struct UsersModule {
    catalog: SharedCatalog,
}

impl UsersModule {
    pub fn new(catalog: SharedCatalog) -> Self {
        Self { catalog }
    }
}

#[async_trait]
impl Module for UsersModule {
    fn name(&self) -> &'static str {
        "users"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            "users module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        Router::new()
            .route("/", post(create_user))
            .route("/health", get(health_check))
            .route("/{name}", get(get_user))
            .route(
                "/{name}/checkouts",
                get(list_checkouts).post(checkout_book),
            )
            .route("/{name}/checkouts/{isbn}", delete(return_book))
            .with_state(self.catalog.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        let name_param = json!({
            "name": "name",
            "in": "path",
            "required": true,
            "schema": { "type": "string" }
        });
        let isbn_param = json!({
            "name": "isbn",
            "in": "path",
            "required": true,
            "schema": { "type": "string" }
        });
        let errors = json!({
            "404": {
                "description": "User or book not found",
                "content": {
                    "application/json": {
                        "schema": { "$ref": "#/components/schemas/ErrorResponse" }
                    }
                }
            },
            "409": {
                "description": "Book already checked out, or not held by this user",
                "content": {
                    "application/json": {
                        "schema": { "$ref": "#/components/schemas/ErrorResponse" }
                    }
                }
            }
        });
        let loan_ok = json!({
            "description": "Loan updated",
            "content": {
                "application/json": { "schema": { "$ref": "#/components/schemas/Loan" } }
            }
        });

        Some(json!({
            "paths": {
                "/": {
                    "post": {
                        "summary": "Register a user, replacing any user with the same name",
                        "tags": ["Users"],
                        "requestBody": {
                            "required": true,
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/CreateUser" }
                                }
                            }
                        },
                        "responses": {
                            "201": {
                                "description": "User registered",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/User" }
                                    }
                                }
                            }
                        }
                    }
                },
                "/{name}": {
                    "get": {
                        "summary": "Get a user and their checkouts",
                        "tags": ["Users"],
                        "parameters": [name_param],
                        "responses": {
                            "200": {
                                "description": "The user",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/User" }
                                    }
                                }
                            },
                            "404": errors["404"]
                        }
                    }
                },
                "/{name}/checkouts": {
                    "get": {
                        "summary": "Books held by the user, oldest first",
                        "tags": ["Users"],
                        "parameters": [name_param],
                        "responses": {
                            "200": {
                                "description": "Held books",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "type": "array",
                                            "items": { "$ref": "#/components/schemas/Book" }
                                        }
                                    }
                                }
                            },
                            "404": errors["404"]
                        }
                    },
                    "post": {
                        "summary": "Check a book out",
                        "tags": ["Users"],
                        "parameters": [name_param],
                        "requestBody": {
                            "required": true,
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/CheckoutRequest" }
                                }
                            }
                        },
                        "responses": {
                            "200": loan_ok,
                            "404": errors["404"],
                            "409": errors["409"]
                        }
                    }
                },
                "/{name}/checkouts/{isbn}": {
                    "delete": {
                        "summary": "Return a book",
                        "tags": ["Users"],
                        "parameters": [name_param, isbn_param],
                        "responses": {
                            "200": loan_ok,
                            "404": errors["404"],
                            "409": errors["409"]
                        }
                    }
                },
                "/health": {
                    "get": {
                        "summary": "Users health check",
                        "tags": ["Users"],
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
                    "User": {
                        "type": "object",
                        "properties": {
                            "name": { "type": "string", "description": "Unique user name" },
                            "checked_out": {
                                "type": "array",
                                "items": { "$ref": "#/components/schemas/Book" }
                            }
                        },
                        "required": ["name", "checked_out"]
                    },
                    "CreateUser": {
                        "type": "object",
                        "properties": { "name": { "type": "string" } },
                        "required": ["name"]
                    },
                    "CheckoutRequest": {
                        "type": "object",
                        "properties": { "isbn": { "type": "string" } },
                        "required": ["isbn"]
                    },
                    "Loan": {
                        "type": "object",
                        "properties": {
                            "user": { "type": "string" },
                            "book": { "$ref": "#/components/schemas/Book" },
                            "message": { "type": "string" }
                        },
                        "required": ["user", "book", "message"]
                    }
                }
            }
        }))
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "users module stopped");
        Ok(())
    }
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "users module is healthy"
}

async fn create_user(
    State(catalog): State<SharedCatalog>,
    payload: Result<Json<CreateUser>, JsonRejection>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    let CreateUser { name } = super::json_body(payload)?;
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::validation(
            vec![json!({ "field": "name", "error": "required" })],
            "Please enter a user name.",
        ));
    }

    let mut catalog = catalog.lock().await;
    let user = catalog.add_user(name);
    let response = UserResponse {
        name: render::user_line(user),
        checked_out: Vec::new(),
    };
    Ok((StatusCode::CREATED, Json(response)))
}

async fn get_user(
    State(catalog): State<SharedCatalog>,
    Path(name): Path<String>,
) -> Result<Json<UserResponse>, AppError> {
    let catalog = catalog.lock().await;
    let books = catalog.list_checked_out(&name)?;
    Ok(Json(UserResponse {
        checked_out: books.into_iter().map(BookResponse::from).collect(),
        name,
    }))
}

async fn list_checkouts(
    State(catalog): State<SharedCatalog>,
    Path(name): Path<String>,
) -> Result<Json<Vec<BookResponse>>, AppError> {
    let catalog = catalog.lock().await;
    let books = catalog.list_checked_out(&name)?;
    Ok(Json(books.into_iter().map(BookResponse::from).collect()))
}

async fn checkout_book(
    State(catalog): State<SharedCatalog>,
    Path(name): Path<String>,
    payload: Result<Json<CheckoutRequest>, JsonRejection>,
) -> Result<Json<LoanResponse>, AppError> {
    let CheckoutRequest { isbn } = super::json_body(payload)?;

    let mut catalog = catalog.lock().await;
    let book = catalog.checkout_book(&name, isbn.trim())?;
    Ok(Json(LoanResponse {
        message: format!("{} has checked out {}.", name, render::book_line(book)),
        book: BookResponse::from(book),
        user: name,
    }))
}

async fn return_book(
    State(catalog): State<SharedCatalog>,
    Path((name, isbn)): Path<(String, String)>,
) -> Result<Json<LoanResponse>, AppError> {
    let mut catalog = catalog.lock().await;
    let book = catalog.return_book(&name, isbn.trim())?;
    Ok(Json(LoanResponse {
        message: format!("{} has returned {}.", name, render::book_line(book)),
        book: BookResponse::from(book),
        user: name,
    }))
}

/// Create a new instance of the users module
pub fn create_module(catalog: SharedCatalog) -> Arc<dyn Module> {
    Arc::new(UsersModule::new(catalog))
}
