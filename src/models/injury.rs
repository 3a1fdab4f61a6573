// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Injury report model for storage and API.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

use super::RecordId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum Severity {
    Minor,
    Moderate,
    Severe,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct InjuryReport {
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub id: RecordId,
    pub injury_type: String,
    pub severity: Severity,
    pub description: String,
    pub date_occurred: NaiveDate,
    pub recovery_status: String,
    /// Whether a clinician has seen the injury
    pub medical_attention: bool,
    #[serde(serialize_with = "crate::time_utils::serialize_utc_rfc3339")]
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct InjuryReportInput {
    #[validate(length(
        min = 1,
        max = 100,
        message = "Injury type must be between 1 and 100 characters."
    ))]
    pub injury_type: String,
    pub severity: Severity,
    #[validate(length(min = 1, message = "This field may not be blank."))]
    pub description: String,
    pub date_occurred: NaiveDate,
    #[serde(default = "default_recovery_status")]
    #[validate(length(
        min = 1,
        max = 50,
        message = "Recovery status must be between 1 and 50 characters."
    ))]
    pub recovery_status: String,
    #[serde(default)]
    pub medical_attention: bool,
}

fn default_recovery_status() -> String {
    "recovering".to_string()
}
