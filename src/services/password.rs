// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Password hashing (HMAC-SHA256 with a server-side pepper).

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

// Type alias for HMAC-SHA256
type HmacSha256 = Hmac<Sha256>;

#[derive(Clone)]
pub struct PasswordHasher {
    pepper: Vec<u8>,
}

impl PasswordHasher {
    pub fn new(pepper: &[u8]) -> Self {
        Self {
            pepper: pepper.to_vec(),
        }
    }

    /// Hex-encoded MAC of the password.
    pub fn hash(&self, password: &str) -> anyhow::Result<String> {
        let mut mac = HmacSha256::new_from_slice(&self.pepper)
            .map_err(|e| anyhow::anyhow!("HMAC init failed: {}", e))?;
        mac.update(password.as_bytes());
        Ok(hex::encode(mac.finalize().into_bytes()))
    }

    /// Constant-time comparison against a stored hash.
    pub fn verify(&self, password: &str, stored_hash: &str) -> bool {
        match self.hash(password) {
            Ok(computed) => computed.as_bytes().ct_eq(stored_hash.as_bytes()).into(),
            Err(_) => false,
        }
    }
}
