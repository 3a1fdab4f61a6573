// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Role-based authorization rules.

use crate::error::AppError;
use crate::models::Role;

/// Actions restricted to some roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// Create or replace the onboarding questionnaire.
    SubmitOnboarding,
}

impl Capability {
    fn denial(self) -> &'static str {
        match self {
            Capability::SubmitOnboarding => "Only athletes can submit onboarding data.",
        }
    }
}

/// Whether `role` may perform `capability`.
pub fn permits(role: Role, capability: Capability) -> bool {
    match capability {
        Capability::SubmitOnboarding => role == Role::Athlete,
    }
}

/// `Forbidden` unless `role` may perform `capability`.
pub fn authorize(role: Role, capability: Capability) -> Result<(), AppError> {
    if permits(role, capability) {
        Ok(())
    } else {
        Err(AppError::Forbidden(capability.denial().to_string()))
    }
}

/// Type-level capability, for use with `middleware::auth::Authorized`.
pub trait Requirement: Send + Sync + 'static {
    const CAPABILITY: Capability;
}

pub struct SubmitOnboarding;

impl Requirement for SubmitOnboarding {
    const CAPABILITY: Capability = Capability::SubmitOnboarding;
}
