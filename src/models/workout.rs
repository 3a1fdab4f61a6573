// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout log model for storage and API.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

use super::RecordId;

/// Stored workout, unique per (user, date, activity type).
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct WorkoutLog {
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub id: RecordId,
    pub date: NaiveDate,
    /// Free-form sport name (Run, Ride, Swim, ...)
    pub activity_type: String,
    pub duration_minutes: u32,
    pub distance_km: Option<f64>,
    pub calories_burned: Option<u32>,
    pub average_heart_rate: Option<u32>,
    pub max_heart_rate: Option<u32>,
    pub notes: String,
    #[serde(serialize_with = "crate::time_utils::serialize_utc_rfc3339")]
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct WorkoutLogInput {
    pub date: NaiveDate,
    #[validate(length(
        min = 1,
        max = 100,
        message = "Activity type must be between 1 and 100 characters."
    ))]
    pub activity_type: String,
    pub duration_minutes: u32,
    #[serde(default)]
    #[validate(range(
        min = 0.0,
        max = 9999.99,
        message = "Distance must be between 0 and 9999.99 km."
    ))]
    pub distance_km: Option<f64>,
    #[serde(default)]
    pub calories_burned: Option<u32>,
    #[serde(default)]
    pub average_heart_rate: Option<u32>,
    #[serde(default)]
    pub max_heart_rate: Option<u32>,
    #[serde(default)]
    pub notes: String,
}
