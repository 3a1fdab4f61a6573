// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod accounts;
pub mod passwords;
pub mod policy;

pub use accounts::{LoginRequest, RegisterRequest};
pub use passwords::PasswordHasher;
pub use policy::{Capability, Requirement};
