// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.

use std::env;
use std::num::NonZeroU32;
use std::str::FromStr;

const DEFAULT_DATABASE_URL: &str = "sqlite://athlete_tracker.db";
const DEFAULT_FRONTEND_URL: &str = "http://localhost:5173";
const TEST_HASH_ITERATIONS: NonZeroU32 = match NonZeroU32::new(1000) {
    Some(n) => n,
    None => unreachable!(),
};

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    // --- Environment Variables (non-sensitive) ---
    /// SQLite connection string
    pub database_url: String,
    /// Upper bound on pooled database connections
    pub database_max_connections: u32,
    /// Frontend URL allowed by CORS
    pub frontend_url: String,
    /// Server port
    pub port: u16,
    /// Lifetime of access tokens, in minutes
    pub access_token_ttl_minutes: u64,
    /// Lifetime of refresh tokens, in days
    pub refresh_token_ttl_days: u64,
    /// PBKDF2 work factor for newly hashed passwords
    pub password_hash_iterations: NonZeroU32,

    // --- Secrets ---
    /// JWT signing key for session tokens (raw bytes)
    pub jwt_signing_key: Vec<u8>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// A `.env` file in the working directory is honoured for local development.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let jwt_signing_key = env::var("JWT_SIGNING_KEY")
            .map(|v| v.trim().to_string())
            .map_err(|_| ConfigError::Missing("JWT_SIGNING_KEY"))?;
        if jwt_signing_key.is_empty() {
            return Err(ConfigError::Missing("JWT_SIGNING_KEY"));
        }

        let password_hash_iterations: u32 = parse_var("PASSWORD_HASH_ITERATIONS", 600_000)?;

        Ok(Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
            database_max_connections: parse_var("DATABASE_MAX_CONNECTIONS", 5)?,
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| DEFAULT_FRONTEND_URL.to_string()),
            port: parse_var("PORT", 8000)?,
            access_token_ttl_minutes: parse_var("ACCESS_TOKEN_TTL_MINUTES", 60)?,
            refresh_token_ttl_days: parse_var("REFRESH_TOKEN_TTL_DAYS", 1)?,
            password_hash_iterations: NonZeroU32::new(password_hash_iterations)
                .ok_or(ConfigError::Invalid("PASSWORD_HASH_ITERATIONS"))?,
            jwt_signing_key: jwt_signing_key.into_bytes(),
        })
    }

    /// Config for tests: in-memory database and a cheap hash work factor.
    pub fn test_default() -> Self {
        Self {
            database_url: "sqlite::memory:".to_string(),
            database_max_connections: 1,
            frontend_url: DEFAULT_FRONTEND_URL.to_string(),
            port: 8000,
            access_token_ttl_minutes: 60,
            refresh_token_ttl_days: 1,
            password_hash_iterations: TEST_HASH_ITERATIONS,
            jwt_signing_key: b"test_jwt_key_32_bytes_minimum!!".to_vec(),
        }
    }
}

/// Read an optional variable, falling back to `default` when unset.
fn parse_var<T: FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid(name)),
        Err(_) => Ok(default),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for environment variable: {0}")]
    Invalid(&'static str),
}
