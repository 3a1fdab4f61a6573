// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data models for the application.

pub mod health_metric;
pub mod injury;
pub mod nutrition;
pub mod onboarding;
pub mod user;
pub mod workout;

/// Primary key of a per-user log row.
pub type RecordId = i64;

pub use health_metric::{HealthMetric, HealthMetricInput, MetricType};
pub use injury::{InjuryReport, InjuryReportInput, Severity};
pub use nutrition::{NutritionLog, NutritionLogInput};
pub use onboarding::{Onboarding, OnboardingInput};
pub use user::{NewUser, Role, User, UserId, UserSummary};
pub use workout::{WorkoutLog, WorkoutLogInput};
