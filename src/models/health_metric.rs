// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Health metric samples (HRV, sleep, weight, ...).

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

use super::RecordId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum MetricType {
    /// Heart rate variability
    Hrv,
    /// Sleep hours
    Sleep,
    /// Hydration %
    Hydration,
    /// Stress level
    Stress,
    /// Resting heart rate
    RestingHr,
    TrainingLoad,
    Weight,
    /// Body fat %
    BodyFat,
    MuscleMass,
}

/// Stored metric, unique per (user, metric type, date).
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct HealthMetric {
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub id: RecordId,
    pub metric_type: MetricType,
    pub value: f64,
    pub unit: String,
    pub date_recorded: NaiveDate,
    /// manual, fitbit, apple_health, ...
    pub source: String,
    #[serde(serialize_with = "crate::time_utils::serialize_utc_rfc3339")]
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct HealthMetricInput {
    pub metric_type: MetricType,
    #[validate(range(
        exclusive_min = -1_000_000.0,
        exclusive_max = 1_000_000.0,
        message = "Ensure the value has no more than 6 digits before the decimal point."
    ))]
    pub value: f64,
    #[serde(default)]
    #[validate(length(max = 20, message = "Unit must be at most 20 characters."))]
    pub unit: String,
    pub date_recorded: NaiveDate,
    #[serde(default = "default_source")]
    #[validate(length(
        min = 1,
        max = 50,
        message = "Source must be between 1 and 50 characters."
    ))]
    pub source: String,
}

fn default_source() -> String {
    "manual".to_string()
}
