// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Registration and credential checks.

use crate::db::accounts::DUPLICATE_EMAIL;
use crate::db::Database;
use crate::error::{AppError, FieldErrors};
use crate::models::user::normalize_email;
use crate::models::{NewUser, Role, User};
use crate::services::passwords::PasswordHasher;
use serde::Deserialize;
use validator::{Validate, ValidationError};

const MIN_PASSWORD_LEN: usize = 8;
const INVALID_CREDENTIALS: &str = "Invalid email or password.";
const MISSING_CREDENTIALS: &str = "Email and password are required.";

/// Body of `POST /register/`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[serde(deserialize_with = "crate::models::user::deserialize_trimmed")]
    #[validate(length(
        min = 1,
        max = 255,
        message = "Full name must be between 1 and 255 characters."
    ))]
    pub full_name: String,
    #[serde(deserialize_with = "crate::models::user::deserialize_email")]
    #[validate(email(message = "Enter a valid email address."))]
    pub email: String,
    #[validate(
        custom(function = "validate_password_strength"),
        must_match(other = "confirm_password", message = "Password fields didn't match.")
    )]
    pub password: String,
    pub confirm_password: String,
    #[serde(default)]
    #[validate(custom(function = "validate_self_service_role"))]
    pub role: Role,
}

/// Body of `POST /login/`. Both fields are optional on the wire so that a
/// missing one yields the generic credentials message.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

fn validate_password_strength(password: &str) -> Result<(), ValidationError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::new("password_too_short").with_message(
            format!(
                "This password is too short. \
                 It must contain at least {MIN_PASSWORD_LEN} characters."
            )
            .into(),
        ));
    }
    if password.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::new("password_entirely_numeric")
            .with_message("This password is entirely numeric.".into()));
    }
    Ok(())
}

fn validate_self_service_role(role: &Role) -> Result<(), ValidationError> {
    if *role == Role::Admin {
        return Err(ValidationError::new("admin_role")
            .with_message("Admin registration is not allowed.".into()));
    }
    Ok(())
}

/// Hash on the blocking pool; PBKDF2 at production iteration counts takes
/// long enough to stall a runtime worker.
async fn hash_password(hasher: PasswordHasher, password: String) -> Result<String, AppError> {
    let encoded = tokio::task::spawn_blocking(move || hasher.hash(&password))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Password hashing task failed: {}", e)))??;
    Ok(encoded)
}

async fn verify_password(
    hasher: PasswordHasher,
    password: String,
    encoded: String,
) -> Result<bool, AppError> {
    tokio::task::spawn_blocking(move || hasher.verify(&password, &encoded))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Password check task failed: {}", e)))
}

/// Validate a registration and create the account.
///
/// A taken email is reported together with any rule violations. The insert
/// still relies on the UNIQUE email column for racing registrations.
pub async fn register(
    db: &Database,
    hasher: PasswordHasher,
    request: RegisterRequest,
) -> Result<User, AppError> {
    let mut errors = match request.validate() {
        Ok(()) => FieldErrors::default(),
        Err(e) => FieldErrors::from(e),
    };
    let email = normalize_email(&request.email);
    if errors.get("email").is_none() && db.get_user_by_email(&email).await?.is_some() {
        errors.add("email", DUPLICATE_EMAIL);
    }
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    let password_hash = hash_password(hasher, request.password).await?;

    let user = db
        .insert_user(&NewUser {
            email,
            full_name: request.full_name,
            password_hash,
            role: request.role,
        })
        .await?;

    tracing::info!(user_id = user.id, role = ?user.role, "Account registered");
    Ok(user)
}

/// Resolve login credentials to an active user and record the login.
///
/// Unknown email, wrong password and inactive account all produce the same
/// error.
pub async fn authenticate(
    db: &Database,
    hasher: PasswordHasher,
    request: LoginRequest,
) -> Result<User, AppError> {
    if request.email.trim().is_empty() || request.password.is_empty() {
        return Err(AppError::non_field(MISSING_CREDENTIALS));
    }

    let Some(user) = db.get_user_by_email(&normalize_email(&request.email)).await? else {
        // Spend the same work as a real check so timing does not reveal
        // which emails are registered.
        hash_password(hasher, request.password).await?;
        return Err(AppError::non_field(INVALID_CREDENTIALS));
    };

    let matches = verify_password(hasher, request.password, user.password_hash.clone()).await?;
    if !matches || !user.is_active {
        tracing::info!(user_id = user.id, "Login rejected");
        return Err(AppError::non_field(INVALID_CREDENTIALS));
    }

    db.touch_last_login(user.id).await?;
    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::num::NonZeroU32;

    fn hasher() -> PasswordHasher {
        PasswordHasher::new(NonZeroU32::new(1000).unwrap())
    }

    fn request(email: &str, password: &str) -> RegisterRequest {
        RegisterRequest {
            full_name: "Test Athlete".to_string(),
            email: email.to_string(),
            password: password.to_string(),
            confirm_password: password.to_string(),
            role: Role::Athlete,
        }
    }

    fn error_fields(req: &RegisterRequest) -> Vec<String> {
        match req.validate() {
            Ok(()) => Vec::new(),
            Err(errors) => errors.field_errors().keys().map(|k| k.to_string()).collect(),
        }
    }

    #[test]
    fn test_password_rules() {
        assert!(error_fields(&request("a@example.com", "longenough1")).is_empty());
        assert_eq!(error_fields(&request("a@example.com", "short")), vec!["password"]);
        assert_eq!(error_fields(&request("a@example.com", "1234567890")), vec!["password"]);

        let mut mismatched = request("a@example.com", "longenough1");
        mismatched.confirm_password = "different1".to_string();
        assert_eq!(error_fields(&mismatched), vec!["password"]);
    }

    #[test]
    fn test_admin_role_rejected() {
        let mut req = request("a@example.com", "longenough1");
        req.role = Role::Admin;
        assert_eq!(error_fields(&req), vec!["role"]);

        req.role = Role::Coach;
        assert!(error_fields(&req).is_empty());
    }

    #[test]
    fn test_bad_email_rejected() {
        assert_eq!(error_fields(&request("not-an-email", "longenough1")), vec!["email"]);
    }

    #[tokio::test]
    async fn test_register_then_authenticate() {
        let db = Database::in_memory().await.unwrap();
        let user = register(&db, hasher(), request("Mixed@Example.com", "longenough1"))
            .await
            .unwrap();
        assert_eq!(user.email, "mixed@example.com");
        assert_ne!(user.password_hash, "longenough1");

        let login = LoginRequest {
            email: "MIXED@example.com ".to_string(),
            password: "longenough1".to_string(),
        };
        let authed = authenticate(&db, hasher(), login).await.unwrap();
        assert_eq!(authed.id, user.id);

        let reloaded = db.get_user(user.id).await.unwrap().unwrap();
        assert!(reloaded.last_login.is_some());
    }

    #[tokio::test]
    async fn test_failed_logins_are_indistinguishable() {
        let db = Database::in_memory().await.unwrap();
        register(&db, hasher(), request("a@example.com", "longenough1"))
            .await
            .unwrap();

        let attempts = [
            ("a@example.com", "wrongpass1"),
            ("nobody@example.com", "longenough1"),
        ];
        for (email, password) in attempts {
            let err = authenticate(
                &db,
                hasher(),
                LoginRequest {
                    email: email.to_string(),
                    password: password.to_string(),
                },
            )
            .await
            .unwrap_err();
            match err {
                AppError::Validation(errors) => {
                    assert_eq!(errors.get("non_field_errors").unwrap(), [INVALID_CREDENTIALS])
                }
                other => panic!("expected validation error, got {other:?}"),
            }
        }
    }

    #[tokio::test]
    async fn test_taken_email_reported_with_rule_errors() {
        let db = Database::in_memory().await.unwrap();
        register(&db, hasher(), request("taken@example.com", "longenough1"))
            .await
            .unwrap();

        let err = register(&db, hasher(), request("Taken@Example.com", "short"))
            .await
            .unwrap_err();
        match err {
            AppError::Validation(errors) => {
                assert_eq!(errors.get("email").unwrap(), [DUPLICATE_EMAIL]);
                assert!(errors.get("password").is_some());
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_inactive_user_cannot_log_in() {
        let db = Database::in_memory().await.unwrap();
        let user = register(&db, hasher(), request("a@example.com", "longenough1"))
            .await
            .unwrap();
        sqlx::query("UPDATE users SET is_active = 0 WHERE id = ?")
            .bind(user.id)
            .execute(db.pool())
            .await
            .unwrap();

        let result = authenticate(
            &db,
            hasher(),
            LoginRequest {
                email: "a@example.com".to_string(),
                password: "longenough1".to_string(),
            },
        )
        .await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_missing_credentials() {
        let db = Database::in_memory().await.unwrap();
        let err = authenticate(&db, hasher(), LoginRequest::default())
            .await
            .unwrap_err();
        match err {
            AppError::Validation(errors) => {
                assert_eq!(errors.get("non_field_errors").unwrap(), [MISSING_CREDENTIALS])
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }
}
