// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use athlete_tracker::config::Config;
use athlete_tracker::db::Database;
use athlete_tracker::routes::create_router;
use athlete_tracker::AppState;
use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

pub const PASSWORD: &str = "Str0ngPassw0rd";

/// Create a test app over a fresh in-memory database.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub async fn create_test_app() -> (axum::Router, Arc<AppState>) {
    let config = Config::test_default();
    let db = Database::in_memory()
        .await
        .expect("Failed to open in-memory database");

    let state = Arc::new(AppState::new(config, db));
    (create_router(state.clone()), state)
}

/// Create a test app over a migrated SQLite file with a multi-connection
/// pool, so concurrent requests really contend for the database. The
/// returned directory must outlive the app.
#[allow(dead_code)]
pub async fn create_file_backed_app() -> (axum::Router, Arc<AppState>, tempfile::TempDir) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let url = format!("sqlite://{}", dir.path().join("athlete_tracker.db").display());

    let mut config = Config::test_default();
    config.database_url = url.clone();
    config.database_max_connections = 5;

    let db = Database::connect(&url, config.database_max_connections)
        .await
        .expect("Failed to open database file");
    db.migrate().await.expect("Failed to migrate database");

    let state = Arc::new(AppState::new(config, db));
    (create_router(state.clone()), state, dir)
}

/// Send a request and decode the JSON response body (`Null` when empty).
#[allow(dead_code)]
pub async fn send(
    app: &axum::Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

/// Register an account and return the register response body.
#[allow(dead_code)]
pub async fn register(app: &axum::Router, email: &str, role: &str) -> Value {
    let (status, body) = send(
        app,
        "POST",
        "/register/",
        None,
        Some(json!({
            "full_name": "Test Person",
            "email": email,
            "password": PASSWORD,
            "confirm_password": PASSWORD,
            "role": role,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "register failed: {body}");
    body
}

/// Register an account and return its access token.
#[allow(dead_code)]
pub async fn access_token(app: &axum::Router, email: &str, role: &str) -> String {
    register(app, email, role).await["access"]
        .as_str()
        .unwrap()
        .to_string()
}

#[allow(dead_code)]
pub fn onboarding_body() -> Value {
    json!({
        "age": 28,
        "gender": "male",
        "region": "Colorado",
        "food_types": ["vegetarian"],
        "sports_activities": ["running", "cycling"],
        "activity_level": "active",
        "primary_goals": ["endurance"],
        "experience_level": "intermediate",
        "medical_conditions": "",
        "preferences": "",
        "motivation": "Finish a marathon",
        "timeline": "short-term"
    })
}

#[allow(dead_code)]
pub fn workout_body(date: &str, activity_type: &str) -> Value {
    json!({
        "date": date,
        "activity_type": activity_type,
        "duration_minutes": 45,
        "distance_km": 8.5,
        "average_heart_rate": 150,
        "notes": "Tempo run"
    })
}
