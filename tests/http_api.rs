//! Integration tests for the full HTTP stack: kernel registry, catalog
//! modules, middleware, and OpenAPI document, driven in-process.

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use stacks_app::{build_registry, Catalog};
use stacks_kernel::settings::Settings;
use tower::ServiceExt;

fn app() -> Router {
    let catalog = Catalog::seeded().into_shared();
    let registry = build_registry(&catalog);
    stacks_http::build_router(&registry, &Settings::default())
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.clone().oneshot(request).await.expect("router is infallible");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body should be readable");
    (status, serde_json::from_slice(&bytes).unwrap_or_default())
}

fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::post(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request should build")
}

#[tokio::test]
async fn books_and_users_share_one_catalog() {
    let app = app();

    let (status, _) = send(&app, post_json("/api/users", r#"{"name":"Alice"}"#)).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = send(
        &app,
        post_json("/api/users/Alice/checkouts", r#"{"isbn":"0003"}"#),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
        &app,
        Request::get("/api/books/0003").body(Body::empty()).unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["is_checked_out"], true);

    let (status, body) = send(
        &app,
        Request::get("/api/books?q=orwell").body(Body::empty()).unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["label"], "1984 by George Orwell");
}

#[tokio::test]
async fn health_and_docs_are_served() {
    let app = app();

    let response = app
        .clone()
        .oneshot(Request::get("/healthz").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));

    let (status, body) = send(
        &app,
        Request::get("/docs/openapi.json")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/api/books"]["get"].is_object());
    assert!(body["paths"]["/api/users/{name}/checkouts/{isbn}"]["delete"].is_object());
    assert!(body["components"]["schemas"]["Loan"].is_object());
}

#[tokio::test]
async fn errors_use_the_standard_envelope() {
    let app = app();
    let (status, body) = send(
        &app,
        post_json("/api/users/Nobody/checkouts", r#"{"isbn":"0001"}"#),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "not_found");
    assert_eq!(body["error"]["message"], "User not found.");
    assert!(body["error"]["trace_id"].is_string());
}
