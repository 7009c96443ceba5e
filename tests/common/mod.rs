//! Shared fixtures for integration tests.
#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use serde_json::Value;
use tower::ServiceExt;

use estove_api::common::AppState;
use estove_api::config::Config;
use estove_api::routes;

/// Fresh in-memory SQLite database with the production migrations applied.
///
/// A single pooled connection keeps every query on the same in-memory database.
pub async fn setup_db() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);

    let db = Database::connect(options)
        .await
        .expect("Failed to open in-memory database");
    migration::Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");
    db
}

pub async fn setup_app() -> (Router, DatabaseConnection) {
    setup_app_with(Config::default()).await
}

pub async fn setup_app_with(config: Config) -> (Router, DatabaseConnection) {
    let db = setup_db().await;
    let app = routes::build_router(AppState::new(db.clone(), config));
    (app, db)
}

/// Send a request and decode the JSON response body.
pub async fn send_json(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let (status, bytes) = send(app, method, uri, body).await;
    let json = serde_json::from_slice(&bytes).expect("Response body is not JSON");
    (status, json)
}

pub async fn send_text(app: &Router, method: Method, uri: &str) -> (StatusCode, String) {
    let (status, bytes) = send(app, method, uri, None).await;
    (status, String::from_utf8(bytes).expect("Response body is not UTF-8"))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).expect("Failed to build request"))
        .await
        .expect("Router is infallible");

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read response body");

    (status, bytes.to_vec())
}
