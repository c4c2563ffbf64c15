//! Shared helpers for exercising the router with mock dependencies.

use axum::body::Body;
use axum::http::{header, HeaderMap, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

use server_core::kernel::ServerDeps;
use server_core::server::build_app;

/// Build a test app around mock dependencies.
pub fn app_with(deps: ServerDeps, leads_api_key: Option<&str>) -> Router {
    build_app(Arc::new(deps), leads_api_key.map(String::from))
}

/// POST a JSON body, optionally with a bearer token.
pub async fn post_json(
    app: &Router,
    uri: &str,
    body: Value,
    bearer: Option<&str>,
) -> (StatusCode, HeaderMap, String) {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = bearer {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = builder
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap();

    send(app, request).await
}

/// GET a path, optionally with a bearer token.
pub async fn get(app: &Router, uri: &str, bearer: Option<&str>) -> (StatusCode, HeaderMap, String) {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = bearer {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = builder.body(Body::empty()).unwrap();

    send(app, request).await
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, HeaderMap, String) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, headers, String::from_utf8(bytes.to_vec()).unwrap())
}

/// Parse a response body as JSON.
pub fn json(body: &str) -> Value {
    serde_json::from_str(body).unwrap()
}

/// A complete, valid audit submission body.
pub fn valid_submission_body() -> Value {
    serde_json::json!({
        "name": "Acme",
        "email": "a@acme.com",
        "website": "https://acme.example",
        "businessType": "E-commerce",
        "currentChallenges": "manual order entry",
        "timeSpentDaily": 5
    })
}
