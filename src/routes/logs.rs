// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! CRUD routes for the per-user logs.
//!
//! Every log type gets the same five handlers: list and create on the
//! collection, retrieve, full update and delete on `{id}`. The repository is
//! always opened for the authenticated user, so records owned by anyone else
//! come back as 404.

use crate::db::OwnedRecord;
use crate::error::{AppError, Result};
use crate::extract::ValidatedJson;
use crate::middleware::auth::AuthUser;
use crate::models::{HealthMetric, InjuryReport, NutritionLog, RecordId, WorkoutLog};
use crate::AppState;
use axum::{
    extract::{rejection::PathRejection, Path, State},
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .merge(resource::<WorkoutLog>("/workouts"))
        .merge(resource::<HealthMetric>("/health-metrics"))
        .merge(resource::<NutritionLog>("/nutrition-logs"))
        .merge(resource::<InjuryReport>("/injury-reports"))
}

fn resource<T: OwnedRecord>(base: &str) -> Router<Arc<AppState>> {
    Router::new()
        .route(&format!("{base}/"), get(list::<T>).post(create::<T>))
        .route(
            &format!("{base}/{{id}}/"),
            get(retrieve::<T>).put(update::<T>).delete(destroy::<T>),
        )
}

/// Non-numeric ids cannot name a row, so they are reported like missing ones.
fn record_id<T: OwnedRecord>(
    path: std::result::Result<Path<RecordId>, PathRejection>,
) -> Result<RecordId> {
    path.map(|Path(id)| id)
        .map_err(|_| AppError::NotFound(format!("{} not found", T::NAME)))
}

async fn list<T: OwnedRecord>(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<T>>> {
    let records = state.db.owned::<T>(user.user_id).list().await?;
    Ok(Json(records))
}

async fn create<T: OwnedRecord>(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    ValidatedJson(input): ValidatedJson<T::Input>,
) -> Result<(StatusCode, Json<T>)> {
    let record = state.db.owned::<T>(user.user_id).create(&input).await?;
    tracing::debug!(user_id = user.user_id, table = T::TABLE, "Record created");
    Ok((StatusCode::CREATED, Json(record)))
}

async fn retrieve<T: OwnedRecord>(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    path: std::result::Result<Path<RecordId>, PathRejection>,
) -> Result<Json<T>> {
    let id = record_id::<T>(path)?;
    Ok(Json(state.db.owned::<T>(user.user_id).get(id).await?))
}

async fn update<T: OwnedRecord>(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    path: std::result::Result<Path<RecordId>, PathRejection>,
    ValidatedJson(input): ValidatedJson<T::Input>,
) -> Result<Json<T>> {
    let id = record_id::<T>(path)?;
    let record = state.db.owned::<T>(user.user_id).update(id, &input).await?;
    tracing::debug!(user_id = user.user_id, record_id = id, table = T::TABLE, "Record updated");
    Ok(Json(record))
}

async fn destroy<T: OwnedRecord>(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    path: std::result::Result<Path<RecordId>, PathRejection>,
) -> Result<StatusCode> {
    let id = record_id::<T>(path)?;
    state.db.owned::<T>(user.user_id).delete(id).await?;
    tracing::debug!(user_id = user.user_id, record_id = id, table = T::TABLE, "Record deleted");
    Ok(StatusCode::NO_CONTENT)
}
