// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Onboarding questionnaire storage.

use super::{tables, Database};
use crate::error::AppError;
use crate::models::{Onboarding, OnboardingInput, UserId};
use sqlx::types::Json;

impl Database {
    /// The user's onboarding record, if they have submitted one.
    pub async fn get_onboarding(&self, user_id: UserId) -> Result<Option<Onboarding>, AppError> {
        let sql = format!("SELECT * FROM {} WHERE user_id = ?", tables::ONBOARDING);
        Ok(sqlx::query_as::<_, Onboarding>(&sql)
            .bind(user_id)
            .fetch_optional(self.pool())
            .await?)
    }

    /// Create or replace the user's onboarding record.
    ///
    /// One statement: the UNIQUE `user_id` column and `ON CONFLICT` hold the
    /// single-row-per-user rule. A fresh row has `created_at = updated_at`;
    /// a replaced one keeps its original `created_at`. Returns the stored
    /// record and `true` if it was created.
    pub async fn upsert_onboarding(
        &self,
        user_id: UserId,
        input: &OnboardingInput,
    ) -> Result<(Onboarding, bool), AppError> {
        let sql = format!(
            "INSERT INTO {} (user_id, age, gender, region, food_types, sports_activities, \
             activity_level, primary_goals, experience_level, medical_conditions, \
             preferences, motivation, timeline, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?) \
             ON CONFLICT (user_id) DO UPDATE SET \
             age = excluded.age, gender = excluded.gender, region = excluded.region, \
             food_types = excluded.food_types, sports_activities = excluded.sports_activities, \
             activity_level = excluded.activity_level, primary_goals = excluded.primary_goals, \
             experience_level = excluded.experience_level, \
             medical_conditions = excluded.medical_conditions, \
             preferences = excluded.preferences, motivation = excluded.motivation, \
             timeline = excluded.timeline, updated_at = excluded.updated_at \
             RETURNING *, created_at = updated_at AS created",
            tables::ONBOARDING
        );

        let now = chrono::Utc::now();
        let saved = sqlx::query_as::<_, SavedOnboarding>(&sql)
            .bind(user_id)
            .bind(input.age)
            .bind(input.gender)
            .bind(&input.region)
            .bind(Json(&input.food_types))
            .bind(Json(&input.sports_activities))
            .bind(input.activity_level)
            .bind(Json(&input.primary_goals))
            .bind(input.experience_level)
            .bind(&input.medical_conditions)
            .bind(&input.preferences)
            .bind(&input.motivation)
            .bind(input.timeline)
            .bind(now)
            .bind(now)
            .fetch_one(self.pool())
            .await?;

        tracing::debug!(user_id, created = saved.created, "Onboarding saved");
        Ok((saved.record, saved.created))
    }
}

/// Row returned by the upsert: the record plus whether it was inserted.
#[derive(sqlx::FromRow)]
struct SavedOnboarding {
    #[sqlx(flatten)]
    record: Onboarding,
    created: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::onboarding::{ActivityLevel, ExperienceLevel, Gender, Timeline};
    use crate::models::{NewUser, Role};

    fn input(age: u32) -> OnboardingInput {
        OnboardingInput {
            age,
            gender: Gender::Female,
            region: "Alps".to_string(),
            food_types: vec!["omnivore".to_string()],
            sports_activities: vec!["skiing".to_string(), "climbing".to_string()],
            activity_level: ActivityLevel::VeryActive,
            primary_goals: vec!["strength".to_string()],
            experience_level: ExperienceLevel::Advanced,
            medical_conditions: String::new(),
            preferences: "mornings".to_string(),
            motivation: String::new(),
            timeline: Timeline::MediumTerm,
        }
    }

    async fn db_with_user() -> (Database, UserId) {
        let db = Database::in_memory().await.unwrap();
        let user = db
            .insert_user(&NewUser {
                email: "athlete@example.com".to_string(),
                full_name: "Athlete".to_string(),
                password_hash: "x".to_string(),
                role: Role::Athlete,
            })
            .await
            .unwrap();
        (db, user.id)
    }

    #[tokio::test]
    async fn test_create_then_replace() {
        let (db, user_id) = db_with_user().await;
        assert!(db.get_onboarding(user_id).await.unwrap().is_none());

        let (first, created) = db.upsert_onboarding(user_id, &input(30)).await.unwrap();
        assert!(created);
        assert_eq!(first.age, 30);
        assert_eq!(first.sports_activities, vec!["skiing", "climbing"]);

        let (second, created) = db.upsert_onboarding(user_id, &input(31)).await.unwrap();
        assert!(!created);
        assert_eq!(second.age, 31);

        let stored = db.get_onboarding(user_id).await.unwrap().unwrap();
        assert_eq!(stored.age, 31);
        assert_eq!(stored.timeline, Timeline::MediumTerm);
    }

    #[tokio::test]
    async fn test_removed_with_user() {
        let (db, user_id) = db_with_user().await;
        db.upsert_onboarding(user_id, &input(30)).await.unwrap();

        db.delete_user(user_id).await.unwrap();
        assert!(db.get_onboarding(user_id).await.unwrap().is_none());
    }
}
