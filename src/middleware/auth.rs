// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! JWT authentication middleware.

use crate::config::Config;
use crate::error::AppError;
use crate::models::{Role, UserId};
use crate::services::policy::{self, Requirement};
use crate::AppState;
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use std::marker::PhantomData;
use std::sync::Arc;

/// Cookie that may carry the access token instead of the Authorization header.
pub const TOKEN_COOKIE: &str = "athlete_token";

/// Which half of a token pair a JWT is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

/// JWT claims structure.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: usize,
    /// Issued at (Unix timestamp)
    pub iat: usize,
    pub token_type: TokenKind,
}

/// Authenticated user extracted from JWT.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: UserId,
    pub role: Role,
}

/// Access and refresh tokens issued together on login and registration.
#[derive(Debug, Clone, Serialize)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

/// Middleware that requires a valid access token for an active user.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    // Try cookie first, then header
    let token = if let Some(cookie) = jar.get(TOKEN_COOKIE) {
        cookie.value().to_string()
    } else {
        let auth_header = request
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok());

        match auth_header.and_then(|h| h.strip_prefix("Bearer ")) {
            Some(token) if !token.trim().is_empty() => token.trim().to_string(),
            _ => return Err(AppError::Unauthorized),
        }
    };

    let user_id = decode_jwt(&token, &state.config.jwt_signing_key, TokenKind::Access)?;

    // Deleted or deactivated accounts lose access even with an unexpired token.
    let user = state
        .db
        .get_user(user_id)
        .await?
        .filter(|u| u.is_active)
        .ok_or(AppError::InvalidToken)?;

    request.extensions_mut().insert(AuthUser {
        user_id: user.id,
        role: user.role,
    });

    Ok(next.run(request).await)
}

/// Create a signed JWT of the given kind for a user.
pub fn create_jwt(
    user_id: UserId,
    kind: TokenKind,
    ttl_seconds: u64,
    signing_key: &[u8],
) -> anyhow::Result<String> {
    use jsonwebtoken::{encode, EncodingKey, Header};
    use std::time::{SystemTime, UNIX_EPOCH};

    let now = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs() as usize;

    let claims = Claims {
        sub: user_id.to_string(),
        iat: now,
        exp: now + ttl_seconds as usize,
        token_type: kind,
    };

    Ok(encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(signing_key),
    )?)
}

/// Issue a fresh access token using the configured lifetime.
pub fn issue_access_token(user_id: UserId, config: &Config) -> anyhow::Result<String> {
    create_jwt(
        user_id,
        TokenKind::Access,
        config.access_token_ttl_minutes * 60,
        &config.jwt_signing_key,
    )
}

/// Issue an access/refresh pair using the configured lifetimes.
pub fn issue_token_pair(user_id: UserId, config: &Config) -> anyhow::Result<TokenPair> {
    Ok(TokenPair {
        access: issue_access_token(user_id, config)?,
        refresh: create_jwt(
            user_id,
            TokenKind::Refresh,
            config.refresh_token_ttl_days * 24 * 60 * 60,
            &config.jwt_signing_key,
        )?,
    })
}

/// Verify signature, expiry and kind of a token; returns the subject.
pub fn decode_jwt(
    token: &str,
    signing_key: &[u8],
    expected: TokenKind,
) -> Result<UserId, AppError> {
    let key = DecodingKey::from_secret(signing_key);
    let validation = Validation::new(Algorithm::HS256);

    let token_data =
        decode::<Claims>(token, &key, &validation).map_err(|_| AppError::InvalidToken)?;

    if token_data.claims.token_type != expected {
        return Err(AppError::InvalidToken);
    }

    token_data
        .claims
        .sub
        .parse()
        .map_err(|_| AppError::InvalidToken)
}

/// Extractor for an authenticated user who holds the capability `R`.
///
/// Runs from request parts, so a handler taking this before its body
/// extractor rejects unauthorized callers before the body is read.
#[derive(Debug, Clone)]
pub struct Authorized<R> {
    pub user: AuthUser,
    _requirement: PhantomData<fn() -> R>,
}

impl<S, R> FromRequestParts<S> for Authorized<R>
where
    S: Send + Sync,
    R: Requirement,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .ok_or(AppError::Unauthorized)?;

        if let Err(err) = policy::authorize(user.role, R::CAPABILITY) {
            tracing::info!(
                user_id = user.user_id,
                capability = ?R::CAPABILITY,
                "Request denied by policy"
            );
            return Err(err);
        }

        Ok(Self {
            user,
            _requirement: PhantomData,
        })
    }
}
