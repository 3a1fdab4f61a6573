// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Nutrition log model for storage and API.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

use super::RecordId;

/// Stored meal entry.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct NutritionLog {
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub id: RecordId,
    pub date: NaiveDate,
    /// breakfast, lunch, dinner, snack
    pub meal_type: String,
    #[sqlx(json)]
    pub food_items: Vec<String>,
    pub calories: u32,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fats_g: f64,
    pub water_ml: u32,
    pub notes: String,
    #[serde(serialize_with = "crate::time_utils::serialize_utc_rfc3339")]
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NutritionLogInput {
    pub date: NaiveDate,
    #[validate(length(
        min = 1,
        max = 50,
        message = "Meal type must be between 1 and 50 characters."
    ))]
    pub meal_type: String,
    #[serde(default)]
    #[validate(custom(function = "super::onboarding::validate_tags"))]
    pub food_items: Vec<String>,
    pub calories: u32,
    #[serde(default)]
    #[validate(range(min = 0.0, max = 99_999.9, message = "Enter between 0 and 99999.9 grams."))]
    pub protein_g: f64,
    #[serde(default)]
    #[validate(range(min = 0.0, max = 99_999.9, message = "Enter between 0 and 99999.9 grams."))]
    pub carbs_g: f64,
    #[serde(default)]
    #[validate(range(min = 0.0, max = 99_999.9, message = "Enter between 0 and 99999.9 grams."))]
    pub fats_g: f64,
    #[serde(default)]
    pub water_ml: u32,
    #[serde(default)]
    pub notes: String,
}
