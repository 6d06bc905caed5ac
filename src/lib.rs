// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! CleanCity: community waste management with Green Points rewards
//!
//! This crate provides the backend API for reporting waste, organizing
//! cleanup drives, tracking public dustbins and redeeming the points
//! earned along the way at partner stores.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use dashmap::DashMap;
use db::MemoryDb;
use services::{PasswordHasher, Session};
use std::sync::Arc;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: MemoryDb,
    pub passwords: PasswordHasher,
    /// Logged-out token IDs mapped to their expiry (Unix seconds)
    pub revoked_tokens: Arc<DashMap<String, usize>>,
}

impl AppState {
    /// Build state from config, seeding the mock dataset if enabled.
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let passwords = PasswordHasher::new(&config.password_pepper);
        let db = if config.seed_mock_data {
            let demo_hash = passwords.hash(&config.demo_password)?;
            MemoryDb::seeded(&demo_hash)
        } else {
            MemoryDb::default()
        };

        Ok(Self {
            config,
            db,
            passwords,
            revoked_tokens: Arc::new(DashMap::new()),
        })
    }

    /// Session for the given authenticated user.
    pub fn session(&self, user_id: &str) -> Session {
        Session::for_user(self.db.clone(), user_id)
    }
}
