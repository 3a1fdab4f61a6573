// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Athlete Tracker: accounts, onboarding and training logs for athletes
//!
//! This crate provides the backend API: registration and token
//! authentication, a one-per-user onboarding questionnaire, and per-user
//! workout, health metric, nutrition and injury logs.

pub mod config;
pub mod db;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::Database;
use services::PasswordHasher;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: Database,
    pub passwords: PasswordHasher,
}

impl AppState {
    pub fn new(config: Config, db: Database) -> Self {
        let passwords = PasswordHasher::new(config.password_hash_iterations);
        Self {
            config,
            db,
            passwords,
        }
    }
}
