// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! JWT authentication tests.
//!
//! These tests verify that tokens issued by the auth routes have the claim
//! layout the middleware and any other consumer expect, catching
//! compatibility issues early.

use athlete_tracker::config::Config;
use athlete_tracker::middleware::auth::{decode_jwt, issue_token_pair, TokenKind};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Claims structure that must match what the middleware expects.
/// This is the canonical format - if either create_jwt or the middleware
/// changes, this test should catch the incompatibility.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    exp: usize,
    iat: usize,
    token_type: String,
}

fn now() -> usize {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs() as usize
}

fn sign(claims: &Claims, signing_key: &[u8]) -> String {
    encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(signing_key),
    )
    .expect("Failed to create JWT")
}

#[test]
fn test_issued_claims_layout() {
    let config = Config::test_default();
    let pair = issue_token_pair(12345, &config).unwrap();

    let key = DecodingKey::from_secret(&config.jwt_signing_key);
    let validation = Validation::new(Algorithm::HS256);

    let access = decode::<Claims>(&pair.access, &key, &validation)
        .expect("Failed to decode JWT - check Claims struct compatibility")
        .claims;
    assert_eq!(access.sub, "12345");
    assert_eq!(access.token_type, "access");
    assert!(access.exp > access.iat);

    let refresh = decode::<Claims>(&pair.refresh, &key, &validation)
        .unwrap()
        .claims;
    assert_eq!(refresh.token_type, "refresh");
    assert!(refresh.exp > access.exp);
}

#[test]
fn test_externally_signed_token_accepted() {
    let signing_key = b"test_signing_key_32_bytes_long!!";
    let token = sign(
        &Claims {
            sub: "98765432".to_string(),
            exp: now() + 3600,
            iat: now(),
            token_type: "access".to_string(),
        },
        signing_key,
    );

    assert_eq!(decode_jwt(&token, signing_key, TokenKind::Access).unwrap(), 98765432);
}

#[test]
fn test_jwt_expired_token_rejected() {
    let signing_key = b"test_signing_key_32_bytes_long!!";
    let past = now() - 86400;
    let token = sign(
        &Claims {
            sub: "12345".to_string(),
            exp: past,
            iat: past - 3600,
            token_type: "access".to_string(),
        },
        signing_key,
    );

    assert!(decode_jwt(&token, signing_key, TokenKind::Access).is_err());
}

#[test]
fn test_jwt_non_numeric_subject_rejected() {
    let signing_key = b"test_signing_key_32_bytes_long!!";
    let token = sign(
        &Claims {
            sub: "not-a-number".to_string(),
            exp: now() + 3600,
            iat: now(),
            token_type: "access".to_string(),
        },
        signing_key,
    );

    assert!(decode_jwt(&token, signing_key, TokenKind::Access).is_err());
}

#[test]
fn test_jwt_unknown_token_type_rejected() {
    let signing_key = b"test_signing_key_32_bytes_long!!";
    let token = sign(
        &Claims {
            sub: "12345".to_string(),
            exp: now() + 3600,
            iat: now(),
            token_type: "session".to_string(),
        },
        signing_key,
    );

    assert!(decode_jwt(&token, signing_key, TokenKind::Access).is_err());
}
