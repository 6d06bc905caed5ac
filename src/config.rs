// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.

use std::env;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    // --- Environment Variables (non-sensitive) ---
    /// Frontend URL for CORS
    pub frontend_url: String,
    /// Server port
    pub port: u16,
    /// Artificial latency before report/drive submissions commit
    pub submit_delay_ms: u64,
    /// Load the mock dataset at startup
    pub seed_mock_data: bool,
    /// Password given to every seeded account
    pub demo_password: String,

    // --- Secrets ---
    /// JWT signing key for session tokens (raw bytes)
    pub jwt_signing_key: Vec<u8>,
    /// HMAC key mixed into password hashes
    pub password_pepper: Vec<u8>,
}

impl Config {
    /// Config for tests: fixed keys, no latency, seeded data.
    pub fn test_default() -> Self {
        Self {
            frontend_url: "http://localhost:5173".to_string(),
            port: 8080,
            submit_delay_ms: 0,
            seed_mock_data: true,
            demo_password: "cleancity".to_string(),
            jwt_signing_key: b"test_jwt_key_32_bytes_minimum!!".to_vec(),
            password_pepper: b"test_pepper".to_vec(),
        }
    }

    /// Load configuration from environment variables (and `.env` if present).
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Ok(Self {
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            submit_delay_ms: match env::var("SUBMIT_DELAY_MS") {
                Ok(v) => v
                    .trim()
                    .parse()
                    .map_err(|_| ConfigError::Invalid("SUBMIT_DELAY_MS", v))?,
                Err(_) => 0,
            },
            seed_mock_data: match env::var("SEED_MOCK_DATA") {
                Ok(v) => parse_bool(&v).ok_or(ConfigError::Invalid("SEED_MOCK_DATA", v))?,
                Err(_) => true,
            },
            demo_password: env::var("DEMO_PASSWORD").unwrap_or_else(|_| "cleancity".to_string()),

            jwt_signing_key: env::var("JWT_SIGNING_KEY")
                .map_err(|_| ConfigError::Missing("JWT_SIGNING_KEY"))?
                .into_bytes(),
            password_pepper: env::var("PASSWORD_PEPPER")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("PASSWORD_PEPPER"))?
                .into_bytes(),
        })
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {0}: {1}")]
    Invalid(&'static str, String),
}
