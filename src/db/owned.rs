// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Repository for per-user log tables.
//!
//! An [`OwnedRecords`] handle is bound to one owner at construction time and
//! every statement it issues carries `user_id = ?` for that owner. A row that
//! belongs to someone else is indistinguishable from a row that does not
//! exist.

use super::is_unique_violation;
use crate::error::AppError;
use crate::models::{RecordId, UserId};
use serde::de::DeserializeOwned;
use serde::Serialize;
use sqlx::query::QueryAs;
use sqlx::sqlite::{SqliteArguments, SqlitePool, SqliteRow};
use sqlx::{FromRow, Sqlite};
use std::marker::PhantomData;
use validator::Validate;

/// A `query_as` statement returning `T` from SQLite.
pub type RecordQuery<'q, T> = QueryAs<'q, Sqlite, T, SqliteArguments<'q>>;

/// Mapping between a log type and its table.
pub trait OwnedRecord:
    for<'r> FromRow<'r, SqliteRow> + Serialize + Send + Unpin + 'static
{
    /// Request body accepted on create and full update.
    type Input: DeserializeOwned + Validate + Send + Sync + 'static;

    const TABLE: &'static str;
    /// Human readable name for error messages.
    const NAME: &'static str;
    /// Writable columns, in the order `bind_input` binds them.
    const COLUMNS: &'static [&'static str];
    /// ORDER BY clause for listings (newest first).
    const ORDER_BY: &'static str;
    /// Columns that together with the owner form a UNIQUE key, if any.
    const UNIQUE_TOGETHER: &'static [&'static str] = &[];

    /// Bind `input` values for each of `COLUMNS`, in order.
    fn bind_input<'q>(input: &'q Self::Input, query: RecordQuery<'q, Self>)
        -> RecordQuery<'q, Self>;
}

/// Log rows of type `T` owned by a single user.
pub struct OwnedRecords<'a, T> {
    pool: &'a SqlitePool,
    owner: UserId,
    _record: PhantomData<fn() -> T>,
}

impl<'a, T: OwnedRecord> OwnedRecords<'a, T> {
    pub(crate) fn new(pool: &'a SqlitePool, owner: UserId) -> Self {
        Self {
            pool,
            owner,
            _record: PhantomData,
        }
    }

    pub fn owner(&self) -> UserId {
        self.owner
    }

    /// All rows owned by the caller, newest first.
    pub async fn list(&self) -> Result<Vec<T>, AppError> {
        let sql = format!(
            "SELECT * FROM {} WHERE user_id = ? ORDER BY {}",
            T::TABLE,
            T::ORDER_BY
        );
        Ok(sqlx::query_as::<_, T>(&sql)
            .bind(self.owner)
            .fetch_all(self.pool)
            .await?)
    }

    /// One row by id; `NotFound` if missing or owned by another user.
    pub async fn get(&self, id: RecordId) -> Result<T, AppError> {
        let sql = format!("SELECT * FROM {} WHERE id = ? AND user_id = ?", T::TABLE);
        sqlx::query_as::<_, T>(&sql)
            .bind(id)
            .bind(self.owner)
            .fetch_optional(self.pool)
            .await?
            .ok_or_else(|| self.not_found(id))
    }

    /// Insert a row owned by the caller.
    pub async fn create(&self, input: &T::Input) -> Result<T, AppError> {
        let placeholders = vec!["?"; T::COLUMNS.len()].join(", ");
        let sql = format!(
            "INSERT INTO {} (user_id, created_at, {}) VALUES (?, ?, {}) RETURNING *",
            T::TABLE,
            T::COLUMNS.join(", "),
            placeholders
        );

        let query = sqlx::query_as::<_, T>(&sql)
            .bind(self.owner)
            .bind(chrono::Utc::now());

        T::bind_input(input, query)
            .fetch_one(self.pool)
            .await
            .map_err(Self::map_write_error)
    }

    /// Replace all writable columns of a row owned by the caller.
    pub async fn update(&self, id: RecordId, input: &T::Input) -> Result<T, AppError> {
        let assignments = T::COLUMNS
            .iter()
            .map(|column| format!("{column} = ?"))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "UPDATE {} SET {} WHERE id = ? AND user_id = ? RETURNING *",
            T::TABLE,
            assignments
        );

        T::bind_input(input, sqlx::query_as::<_, T>(&sql))
            .bind(id)
            .bind(self.owner)
            .fetch_optional(self.pool)
            .await
            .map_err(Self::map_write_error)?
            .ok_or_else(|| self.not_found(id))
    }

    /// Delete a row owned by the caller.
    pub async fn delete(&self, id: RecordId) -> Result<(), AppError> {
        let sql = format!("DELETE FROM {} WHERE id = ? AND user_id = ?", T::TABLE);
        let result = sqlx::query(&sql)
            .bind(id)
            .bind(self.owner)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(self.not_found(id));
        }
        Ok(())
    }

    fn not_found(&self, id: RecordId) -> AppError {
        AppError::NotFound(format!("{} {} not found", T::NAME, id))
    }

    fn map_write_error(err: sqlx::Error) -> AppError {
        if is_unique_violation(&err) && !T::UNIQUE_TOGETHER.is_empty() {
            return AppError::non_field(format!(
                "The fields {} must make a unique set.",
                T::UNIQUE_TOGETHER.join(", ")
            ));
        }
        err.into()
    }
}
