// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! PBKDF2-HMAC-SHA256 password hashing.
//!
//! Hashes are stored as PHC strings, `$pbkdf2-sha256$i=<iterations>$<salt>$<hash>`,
//! so the iteration count can be raised without invalidating existing
//! accounts.

use password_hash::{Ident, Output, ParamsString, PasswordHash, SaltString};
use ring::rand::{SecureRandom, SystemRandom};
use ring::{digest, pbkdf2};
use std::num::NonZeroU32;

const ALGORITHM: pbkdf2::Algorithm = pbkdf2::PBKDF2_HMAC_SHA256;
const SCHEME: Ident<'static> = Ident::new_unwrap("pbkdf2-sha256");
const ITERATIONS_PARAM: &str = "i";
const SALT_LEN: usize = 16;
const HASH_LEN: usize = digest::SHA256_OUTPUT_LEN;
const MAX_SALT_LEN: usize = 64;

#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    iterations: NonZeroU32,
}

impl PasswordHasher {
    pub fn new(iterations: NonZeroU32) -> Self {
        Self { iterations }
    }

    /// Hash `password` with a fresh random salt.
    pub fn hash(&self, password: &str) -> anyhow::Result<String> {
        let mut salt_bytes = [0u8; SALT_LEN];
        SystemRandom::new()
            .fill(&mut salt_bytes)
            .map_err(|_| anyhow::anyhow!("Failed to generate password salt"))?;
        let salt = SaltString::encode_b64(&salt_bytes)?;

        let mut hash = [0u8; HASH_LEN];
        pbkdf2::derive(ALGORITHM, self.iterations, &salt_bytes, password.as_bytes(), &mut hash);

        let mut params = ParamsString::new();
        params.add_decimal(ITERATIONS_PARAM, self.iterations.get())?;

        let phc = PasswordHash {
            algorithm: SCHEME,
            version: None,
            params,
            salt: Some(salt.as_salt()),
            hash: Some(Output::new(&hash)?),
        };
        Ok(phc.to_string())
    }

    /// Check `password` against a stored hash string.
    ///
    /// Malformed hashes never match. The stored iteration count is used, not
    /// the hasher's own.
    pub fn verify(&self, password: &str, encoded: &str) -> bool {
        let Ok(phc) = PasswordHash::new(encoded) else {
            return false;
        };
        if phc.algorithm != SCHEME {
            return false;
        }
        let Some(iterations) = phc
            .params
            .get_decimal(ITERATIONS_PARAM)
            .and_then(NonZeroU32::new)
        else {
            return false;
        };
        let (Some(salt), Some(hash)) = (phc.salt, phc.hash) else {
            return false;
        };

        let mut salt_buf = [0u8; MAX_SALT_LEN];
        let Ok(salt_bytes) = salt.decode_b64(&mut salt_buf) else {
            return false;
        };
        pbkdf2::verify(ALGORITHM, iterations, salt_bytes, password.as_bytes(), hash.as_bytes())
            .is_ok()
    }
}
