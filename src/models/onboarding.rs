// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Athlete onboarding questionnaire (one record per user).

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "kebab-case")]
#[sqlx(rename_all = "kebab-case")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum Gender {
    Male,
    Female,
    Other,
    PreferNotToSay,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "kebab-case")]
#[sqlx(rename_all = "kebab-case")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum ActivityLevel {
    Sedentary,
    Moderate,
    Active,
    VeryActive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "kebab-case")]
#[sqlx(rename_all = "kebab-case")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum ExperienceLevel {
    Beginner,
    Intermediate,
    Advanced,
}

/// Goal horizon: weeks, months, or a year and more.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "kebab-case")]
#[sqlx(rename_all = "kebab-case")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum Timeline {
    ShortTerm,
    MediumTerm,
    LongTerm,
}

/// Stored onboarding record, as returned by the API.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Onboarding {
    pub age: u32,
    pub gender: Gender,
    pub region: String,
    #[sqlx(json)]
    pub food_types: Vec<String>,
    #[sqlx(json)]
    pub sports_activities: Vec<String>,
    pub activity_level: ActivityLevel,
    #[sqlx(json)]
    pub primary_goals: Vec<String>,
    pub experience_level: ExperienceLevel,
    pub medical_conditions: String,
    pub preferences: String,
    pub motivation: String,
    pub timeline: Timeline,
}

/// Full questionnaire submitted on create or replace.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct OnboardingInput {
    #[validate(range(min = 1, message = "Ensure this value is greater than or equal to 1."))]
    pub age: u32,
    pub gender: Gender,
    #[validate(length(
        min = 1,
        max = 255,
        message = "Region must be between 1 and 255 characters."
    ))]
    pub region: String,
    #[serde(default)]
    #[validate(custom(function = "validate_tags"))]
    pub food_types: Vec<String>,
    #[serde(default)]
    #[validate(custom(function = "validate_tags"))]
    pub sports_activities: Vec<String>,
    pub activity_level: ActivityLevel,
    #[serde(default)]
    #[validate(custom(function = "validate_tags"))]
    pub primary_goals: Vec<String>,
    pub experience_level: ExperienceLevel,
    #[serde(default)]
    pub medical_conditions: String,
    #[serde(default)]
    pub preferences: String,
    #[serde(default)]
    pub motivation: String,
    pub timeline: Timeline,
}

const MAX_TAGS: usize = 50;
const MAX_TAG_LEN: usize = 100;

/// Free-form tag lists (food types, sports, goals) stay small and non-blank.
pub(crate) fn validate_tags(tags: &[String]) -> Result<(), validator::ValidationError> {
    if tags.len() > MAX_TAGS {
        return Err(validator::ValidationError::new("too_many_items")
            .with_message(format!("Ensure this list has no more than {MAX_TAGS} items.").into()));
    }
    if tags
        .iter()
        .any(|t| t.trim().is_empty() || t.chars().count() > MAX_TAG_LEN)
    {
        return Err(validator::ValidationError::new("invalid_item").with_message(
            format!("Items must be non-blank and at most {MAX_TAG_LEN} characters.").into(),
        ));
    }
    Ok(())
}
