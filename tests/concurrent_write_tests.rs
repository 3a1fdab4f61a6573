// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Concurrent writes against a file-backed database with several pooled
//! connections. Uniqueness must come from the store, and contention must
//! never surface as a server error.

use athlete_tracker::models::WorkoutLog;
use axum::http::StatusCode;
use serde_json::Value;

mod common;

/// Fire one request per token at the same time and collect the statuses.
async fn send_all(
    app: &axum::Router,
    method: &'static str,
    uri: &'static str,
    tokens: &[String],
    body: Value,
) -> Vec<StatusCode> {
    let handles: Vec<_> = tokens
        .iter()
        .map(|token| {
            let app = app.clone();
            let token = token.clone();
            let body = body.clone();
            tokio::spawn(async move {
                common::send(&app, method, uri, Some(&token), Some(body))
                    .await
                    .0
            })
        })
        .collect();

    let mut statuses = Vec::with_capacity(handles.len());
    for handle in handles {
        statuses.push(handle.await.unwrap());
    }
    statuses
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_onboarding_for_many_athletes() {
    let (app, state, _dir) = common::create_file_backed_app().await;

    let mut tokens = Vec::new();
    for i in 0..20 {
        let email = format!("athlete{i}@example.com");
        tokens.push(common::access_token(&app, &email, "athlete").await);
    }

    let statuses = send_all(&app, "PUT", "/onboarding/", &tokens, common::onboarding_body()).await;
    assert!(
        statuses.iter().all(|s| *s == StatusCode::CREATED),
        "statuses: {statuses:?}"
    );

    let statuses = send_all(&app, "POST", "/onboarding/", &tokens, common::onboarding_body()).await;
    assert!(
        statuses.iter().all(|s| *s == StatusCode::OK),
        "statuses: {statuses:?}"
    );

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM onboarding")
        .fetch_one(state.db.pool())
        .await
        .unwrap();
    assert_eq!(count, 20);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_onboarding_for_one_athlete() {
    let (app, state, _dir) = common::create_file_backed_app().await;
    let registered = common::register(&app, "solo@example.com", "athlete").await;
    let token = registered["access"].as_str().unwrap().to_string();
    let user_id = registered["user"]["id"].as_i64().unwrap();

    let tokens = vec![token; 10];
    let statuses = send_all(&app, "PUT", "/onboarding/", &tokens, common::onboarding_body()).await;

    let created = statuses.iter().filter(|s| **s == StatusCode::CREATED).count();
    let replaced = statuses.iter().filter(|s| **s == StatusCode::OK).count();
    assert_eq!((created, replaced), (1, 9), "statuses: {statuses:?}");

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM onboarding WHERE user_id = ?")
        .bind(user_id)
        .fetch_one(state.db.pool())
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_duplicate_workout_race_has_one_winner() {
    let (app, state, _dir) = common::create_file_backed_app().await;
    let registered = common::register(&app, "racer@example.com", "athlete").await;
    let token = registered["access"].as_str().unwrap().to_string();
    let user_id = registered["user"]["id"].as_i64().unwrap();

    let tokens = vec![token; 10];
    let body = common::workout_body("2024-03-01", "Run");
    let statuses = send_all(&app, "POST", "/workouts/", &tokens, body).await;

    let created = statuses.iter().filter(|s| **s == StatusCode::CREATED).count();
    let rejected = statuses
        .iter()
        .filter(|s| **s == StatusCode::BAD_REQUEST)
        .count();
    assert_eq!((created, rejected), (1, 9), "statuses: {statuses:?}");

    let stored = state.db.owned::<WorkoutLog>(user_id).list().await.unwrap();
    assert_eq!(stored.len(), 1);
}
