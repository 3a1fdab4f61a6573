// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Account storage.

use super::{is_unique_violation, tables, Database};
use crate::error::AppError;
use crate::models::{NewUser, User, UserId};

pub(crate) const DUPLICATE_EMAIL: &str = "user with this email already exists.";

impl Database {
    // ─── User Operations ─────────────────────────────────────────

    /// Insert a new account. Email uniqueness is enforced by the table's
    /// UNIQUE constraint and reported as an `email` field error.
    pub async fn insert_user(&self, user: &NewUser) -> Result<User, AppError> {
        let sql = format!(
            "INSERT INTO {} (email, full_name, password_hash, role, date_joined) \
             VALUES (?, ?, ?, ?, ?) RETURNING *",
            tables::USERS
        );

        sqlx::query_as::<_, User>(&sql)
            .bind(&user.email)
            .bind(&user.full_name)
            .bind(&user.password_hash)
            .bind(user.role)
            .bind(chrono::Utc::now())
            .fetch_one(self.pool())
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    AppError::field("email", DUPLICATE_EMAIL)
                } else {
                    e.into()
                }
            })
    }

    /// Get a user by primary key.
    pub async fn get_user(&self, id: UserId) -> Result<Option<User>, AppError> {
        let sql = format!("SELECT * FROM {} WHERE id = ?", tables::USERS);
        Ok(sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(self.pool())
            .await?)
    }

    /// Get a user by (already normalized) email.
    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let sql = format!("SELECT * FROM {} WHERE email = ?", tables::USERS);
        Ok(sqlx::query_as::<_, User>(&sql)
            .bind(email)
            .fetch_optional(self.pool())
            .await?)
    }

    /// Record a successful login.
    pub async fn touch_last_login(&self, id: UserId) -> Result<(), AppError> {
        let sql = format!("UPDATE {} SET last_login = ? WHERE id = ?", tables::USERS);
        sqlx::query(&sql)
            .bind(chrono::Utc::now())
            .bind(id)
            .execute(self.pool())
            .await?;
        Ok(())
    }

    // ─── User Data Deletion ──────────────────────────────────────

    /// Delete a user. Onboarding and all logs go with it (ON DELETE CASCADE).
    ///
    /// Returns whether a row was removed.
    pub async fn delete_user(&self, id: UserId) -> Result<bool, AppError> {
        let sql = format!("DELETE FROM {} WHERE id = ?", tables::USERS);
        let result = sqlx::query(&sql).bind(id).execute(self.pool()).await?;

        let deleted = result.rows_affected() > 0;
        tracing::info!(user_id = id, deleted, "User deletion complete");
        Ok(deleted)
    }
}
