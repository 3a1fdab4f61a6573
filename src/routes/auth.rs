// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Registration, login and token refresh routes.

use axum::extract::rejection::JsonRejection;
use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::error::{AppError, Result};
use crate::extract::ValidatedJson;
use crate::middleware::auth::{decode_jwt, issue_access_token, issue_token_pair, TokenKind};
use crate::models::UserSummary;
use crate::services::accounts::{self, LoginRequest, RegisterRequest};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/register/", post(register))
        .route("/login/", post(login))
        .route("/token/refresh/", post(refresh))
}

/// Tokens plus the account they were issued for.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct AuthResponse {
    pub access: String,
    pub refresh: String,
    pub user: UserSummary,
}

#[derive(Deserialize, Validate)]
pub struct RefreshRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "This field is required."))]
    refresh: String,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct RefreshResponse {
    pub access: String,
}

/// Create an account and log it in.
///
/// Validation happens in the service so a taken email is reported alongside
/// the other field errors.
async fn register(
    State(state): State<Arc<AppState>>,
    body: std::result::Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<AuthResponse>)> {
    let Json(request) = body?;
    let user = accounts::register(&state.db, state.passwords, request).await?;
    let tokens = issue_token_pair(user.id, &state.config)?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            access: tokens.access,
            refresh: tokens.refresh,
            user: UserSummary::from(&user),
        }),
    ))
}

/// Exchange email and password for a token pair.
async fn login(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> Result<Json<AuthResponse>> {
    let user = accounts::authenticate(&state.db, state.passwords, request).await?;
    let tokens = issue_token_pair(user.id, &state.config)?;

    tracing::info!(user_id = user.id, "User logged in");

    Ok(Json(AuthResponse {
        access: tokens.access,
        refresh: tokens.refresh,
        user: UserSummary::from(&user),
    }))
}

/// Exchange a refresh token for a new access token.
async fn refresh(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<RefreshRequest>,
) -> Result<Json<RefreshResponse>> {
    let user_id = decode_jwt(
        &request.refresh,
        &state.config.jwt_signing_key,
        TokenKind::Refresh,
    )?;

    let user = state
        .db
        .get_user(user_id)
        .await?
        .filter(|u| u.is_active)
        .ok_or(AppError::InvalidToken)?;

    Ok(Json(RefreshResponse {
        access: issue_access_token(user.id, &state.config)?,
    }))
}
