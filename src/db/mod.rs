// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Database layer (SQLite via sqlx).
//!
//! - `accounts`: user rows
//! - `onboarding`: one questionnaire per user
//! - `owned`: repository for per-user log tables, always scoped to the caller
//! - `logs`: table mappings for the four log types

pub mod accounts;
pub mod logs;
pub mod onboarding;
pub mod owned;

pub use owned::{OwnedRecord, OwnedRecords};

use crate::error::AppError;
use crate::models::UserId;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;

/// How long a writer waits for another connection's write lock.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Table names as constants.
pub mod tables {
    pub const USERS: &str = "users";
    pub const ONBOARDING: &str = "onboarding";
    pub const WORKOUT_LOGS: &str = "workout_logs";
    pub const HEALTH_METRICS: &str = "health_metrics";
    pub const NUTRITION_LOGS: &str = "nutrition_logs";
    pub const INJURY_REPORTS: &str = "injury_reports";
}

static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!();

/// Database handle. Cheap to clone (the pool is reference counted).
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Connect to the database at `url`, creating the file if needed.
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self, AppError> {
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .foreign_keys(true)
            .busy_timeout(BUSY_TIMEOUT);

        // Every connection to `:memory:` is a separate database, so pin the
        // pool to one connection that never expires.
        let pool = if url.contains(":memory:") {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect_with(options)
                .await?
        } else {
            // WAL lets readers proceed while one connection writes.
            SqlitePoolOptions::new()
                .max_connections(max_connections.max(1))
                .connect_with(options.journal_mode(SqliteJournalMode::Wal))
                .await?
        };

        tracing::info!(max_connections, "Connected to database");

        Ok(Self { pool })
    }

    /// Fresh, migrated in-memory database (tests and local experiments).
    pub async fn in_memory() -> Result<Self, AppError> {
        let db = Self::connect("sqlite::memory:", 1).await?;
        db.migrate().await?;
        Ok(db)
    }

    /// Apply pending schema migrations.
    pub async fn migrate(&self) -> Result<(), AppError> {
        MIGRATOR
            .run(&self.pool)
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Migration failed: {}", e)))?;
        tracing::info!("Database migrations applied");
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Repository over one log table, restricted to rows owned by `owner`.
    pub fn owned<T: OwnedRecord>(&self, owner: UserId) -> OwnedRecords<'_, T> {
        OwnedRecords::new(&self.pool, owner)
    }
}

/// True when the error is a UNIQUE constraint violation.
pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db_err) if db_err.is_unique_violation())
}
