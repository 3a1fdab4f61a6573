// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Onboarding questionnaire routes.

use crate::error::{AppError, Result};
use crate::extract::ValidatedJson;
use crate::middleware::auth::{AuthUser, Authorized};
use crate::models::{Onboarding, OnboardingInput};
use crate::services::policy::SubmitOnboarding;
use crate::AppState;
use axum::{extract::State, http::StatusCode, routing::get, Extension, Json, Router};
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route(
        "/onboarding/",
        get(get_onboarding)
            .put(submit_onboarding)
            .post(submit_onboarding),
    )
}

async fn get_onboarding(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Onboarding>> {
    state
        .db
        .get_onboarding(user.user_id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Onboarding data not found.".to_string()))
}

/// Create or replace the questionnaire. The role check happens in the
/// `Authorized` extractor, before the body is parsed.
async fn submit_onboarding(
    State(state): State<Arc<AppState>>,
    authorized: Authorized<SubmitOnboarding>,
    ValidatedJson(input): ValidatedJson<OnboardingInput>,
) -> Result<(StatusCode, Json<Onboarding>)> {
    let user_id = authorized.user.user_id;
    let (record, created) = state.db.upsert_onboarding(user_id, &input).await?;

    let status = if created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(record)))
}
