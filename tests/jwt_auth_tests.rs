// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! JWT authentication tests.
//!
//! These tests verify that tokens minted by the login flow decode with the
//! claim layout clients and the middleware expect, catching compatibility
//! issues early.

use cleancity::middleware::auth::{create_jwt, verify_jwt, SESSION_TTL_SECS};
use cleancity::models::Role;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

/// Claims structure that must match what the middleware expects.
/// This is the canonical format - if create_jwt changes, this test should
/// catch the incompatibility.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    exp: usize,
    iat: usize,
    jti: String,
    role: String,
}

const SIGNING_KEY: &[u8] = b"test_signing_key_32_bytes_long!!";

#[test]
fn test_jwt_roundtrip() {
    let token = create_jwt("2", Role::User, SIGNING_KEY).unwrap();

    let key = DecodingKey::from_secret(SIGNING_KEY);
    let validation = Validation::new(Algorithm::HS256);
    let token_data = decode::<Claims>(&token, &key, &validation)
        .expect("Failed to decode JWT - check Claims struct compatibility");

    assert_eq!(token_data.claims.sub, "2");
    assert_eq!(token_data.claims.role, "user");
    assert!(!token_data.claims.jti.is_empty());
    assert!(token_data.claims.exp > token_data.claims.iat);
}

#[test]
fn test_jwt_expiration_is_future() {
    use std::time::{SystemTime, UNIX_EPOCH};

    let token = create_jwt("admin", Role::Admin, SIGNING_KEY).unwrap();
    let claims = verify_jwt(&token, SIGNING_KEY).expect("token should verify");

    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs() as usize;

    // Token should expire about a week from now
    assert!(claims.exp > now + SESSION_TTL_SECS - 60);
    assert!(claims.exp <= now + SESSION_TTL_SECS + 60);
}

#[test]
fn test_tampered_token_rejected() {
    let token = create_jwt("1", Role::User, SIGNING_KEY).unwrap();
    let mut parts: Vec<String> = token.split('.').map(str::to_string).collect();
    parts[2] = parts[2].chars().rev().collect();

    assert!(verify_jwt(&parts.join("."), SIGNING_KEY).is_none());
}
