// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session context passed explicitly to every flow.
//!
//! A `Session` knows which user (if any) is signed in and is the only way
//! flows read that user or change their points. The user record is always
//! re-read from the store, so a session never holds a stale balance.

use serde::Deserialize;
use validator::Validate;

use crate::db::{MemoryDb, PointsApplied};
use crate::error::{AppError, AuthError, Result};
use crate::models::{PointEntry, Role, TransactionKind, User, UserPatch};
use crate::services::PasswordHasher;

#[derive(Debug, Clone, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct Registration {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8, max = 128))]
    pub password: String,
}

#[derive(Clone)]
pub struct Session {
    db: MemoryDb,
    user_id: Option<String>,
}

impl Session {
    /// A session with nobody signed in.
    pub fn anonymous(db: MemoryDb) -> Self {
        Self { db, user_id: None }
    }

    /// A session for an already-authenticated user (e.g. from a JWT).
    pub fn for_user(db: MemoryDb, user_id: impl Into<String>) -> Self {
        Self {
            db,
            user_id: Some(user_id.into()),
        }
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    pub fn db(&self) -> &MemoryDb {
        &self.db
    }

    /// The signed-in user, or `None` when unauthenticated.
    pub async fn current(&self) -> Result<Option<User>> {
        match &self.user_id {
            Some(id) => self.db.get_user(id).await,
            None => Ok(None),
        }
    }

    /// The signed-in user, or `Unauthorized`.
    pub async fn require_user(&self) -> Result<User> {
        self.current().await?.ok_or(AppError::Unauthorized)
    }

    pub async fn require_admin(&self) -> Result<User> {
        let user = self.require_user().await?;
        if !user.is_admin() {
            return Err(AppError::Forbidden);
        }
        Ok(user)
    }

    /// Check credentials and sign in. Replaces any current user.
    pub async fn login(&mut self, credentials: &Credentials, hasher: &PasswordHasher) -> Result<User> {
        let user = self
            .db
            .find_user_by_email(credentials.email.trim())
            .await?
            .filter(|u| hasher.verify(&credentials.password, &u.password_hash))
            .ok_or_else(|| {
                tracing::warn!(email = %credentials.email, "Login rejected");
                AppError::Auth(AuthError::InvalidCredentials)
            })?;

        tracing::info!(user_id = %user.id, "User logged in");
        self.user_id = Some(user.id.clone());
        Ok(user)
    }

    /// Create a regular account and sign in as it.
    pub async fn register(&mut self, registration: &Registration, hasher: &PasswordHasher) -> Result<User> {
        registration.validate()?;
        let password_hash = hasher.hash(&registration.password)?;
        let user = self
            .db
            .insert_user(
                registration.name.trim(),
                registration.email.trim(),
                password_hash,
                Role::User,
            )
            .await?;

        self.user_id = Some(user.id.clone());
        Ok(user)
    }

    pub fn logout(&mut self) {
        if let Some(id) = self.user_id.take() {
            tracing::info!(user_id = %id, "User logged out");
        }
    }

    /// Merge profile fields into the current user.
    ///
    /// Without a signed-in user this does nothing and returns `Ok(None)`.
    pub async fn update(&self, patch: &UserPatch) -> Result<Option<User>> {
        let Some(id) = &self.user_id else {
            tracing::debug!("Profile update without a session ignored");
            return Ok(None);
        };
        self.db.update_user_profile(id, patch).await.map(Some)
    }

    /// Append a ledger entry for the current user.
    ///
    /// Without a signed-in user this does nothing and returns `Ok(None)`.
    pub async fn apply_points(&self, entry: PointEntry) -> Result<Option<PointsApplied>> {
        let Some(id) = &self.user_id else {
            tracing::debug!("Points change without a session ignored");
            return Ok(None);
        };
        self.db.apply_points(id, entry).await.map(Some)
    }

    pub async fn award(&self, entry: PointEntry) -> Result<Option<PointsApplied>> {
        debug_assert_eq!(entry.kind, TransactionKind::Earned);
        self.apply_points(entry).await
    }

    pub async fn spend(&self, entry: PointEntry) -> Result<Option<PointsApplied>> {
        debug_assert_eq!(entry.kind, TransactionKind::Redeemed);
        self.apply_points(entry).await
    }
}
