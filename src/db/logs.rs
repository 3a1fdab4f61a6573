// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Table mappings for the per-user log types.

use super::owned::{OwnedRecord, RecordQuery};
use super::tables;
use crate::models::{
    HealthMetric, HealthMetricInput, InjuryReport, InjuryReportInput, NutritionLog,
    NutritionLogInput, WorkoutLog, WorkoutLogInput,
};
use sqlx::types::Json;

impl OwnedRecord for WorkoutLog {
    type Input = WorkoutLogInput;

    const TABLE: &'static str = tables::WORKOUT_LOGS;
    const NAME: &'static str = "Workout log";
    const COLUMNS: &'static [&'static str] = &[
        "date",
        "activity_type",
        "duration_minutes",
        "distance_km",
        "calories_burned",
        "average_heart_rate",
        "max_heart_rate",
        "notes",
    ];
    const ORDER_BY: &'static str = "date DESC, id DESC";
    const UNIQUE_TOGETHER: &'static [&'static str] = &["date", "activity_type"];

    fn bind_input<'q>(
        input: &'q WorkoutLogInput,
        query: RecordQuery<'q, Self>,
    ) -> RecordQuery<'q, Self> {
        query
            .bind(input.date)
            .bind(&input.activity_type)
            .bind(input.duration_minutes)
            .bind(input.distance_km)
            .bind(input.calories_burned)
            .bind(input.average_heart_rate)
            .bind(input.max_heart_rate)
            .bind(&input.notes)
    }
}

impl OwnedRecord for HealthMetric {
    type Input = HealthMetricInput;

    const TABLE: &'static str = tables::HEALTH_METRICS;
    const NAME: &'static str = "Health metric";
    const COLUMNS: &'static [&'static str] =
        &["metric_type", "value", "unit", "date_recorded", "source"];
    const ORDER_BY: &'static str = "date_recorded DESC, id DESC";
    const UNIQUE_TOGETHER: &'static [&'static str] = &["metric_type", "date_recorded"];

    fn bind_input<'q>(
        input: &'q HealthMetricInput,
        query: RecordQuery<'q, Self>,
    ) -> RecordQuery<'q, Self> {
        query
            .bind(input.metric_type)
            .bind(input.value)
            .bind(&input.unit)
            .bind(input.date_recorded)
            .bind(&input.source)
    }
}

impl OwnedRecord for NutritionLog {
    type Input = NutritionLogInput;

    const TABLE: &'static str = tables::NUTRITION_LOGS;
    const NAME: &'static str = "Nutrition log";
    const COLUMNS: &'static [&'static str] = &[
        "date",
        "meal_type",
        "food_items",
        "calories",
        "protein_g",
        "carbs_g",
        "fats_g",
        "water_ml",
        "notes",
    ];
    const ORDER_BY: &'static str = "date DESC, id DESC";

    fn bind_input<'q>(
        input: &'q NutritionLogInput,
        query: RecordQuery<'q, Self>,
    ) -> RecordQuery<'q, Self> {
        query
            .bind(input.date)
            .bind(&input.meal_type)
            .bind(Json(&input.food_items))
            .bind(input.calories)
            .bind(input.protein_g)
            .bind(input.carbs_g)
            .bind(input.fats_g)
            .bind(input.water_ml)
            .bind(&input.notes)
    }
}

impl OwnedRecord for InjuryReport {
    type Input = InjuryReportInput;

    const TABLE: &'static str = tables::INJURY_REPORTS;
    const NAME: &'static str = "Injury report";
    const COLUMNS: &'static [&'static str] = &[
        "injury_type",
        "severity",
        "description",
        "date_occurred",
        "recovery_status",
        "medical_attention",
    ];
    const ORDER_BY: &'static str = "date_occurred DESC, id DESC";

    fn bind_input<'q>(
        input: &'q InjuryReportInput,
        query: RecordQuery<'q, Self>,
    ) -> RecordQuery<'q, Self> {
        query
            .bind(&input.injury_type)
            .bind(input.severity)
            .bind(&input.description)
            .bind(input.date_occurred)
            .bind(&input.recovery_status)
            .bind(input.medical_attention)
    }
}
