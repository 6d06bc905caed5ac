// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! API routes for the signed-in user.

use crate::error::{AppError, Result};
use crate::middleware::auth::{authenticate, AuthUser};
use crate::models::{PointTransaction, ProfileStats, Role, TransactionKind, User, UserPatch};
use crate::services::navigation::{guard, RouteDecision};
use crate::time_utils::format_utc_rfc3339;
use crate::AppState;
use axum::{
    extract::{Query, State},
    http::HeaderMap,
    routing::get,
    Extension, Json, Router,
};
use axum_extra::extract::cookie::CookieJar;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

const DEFAULT_TRANSACTION_LIMIT: usize = 5;
const MAX_TRANSACTION_LIMIT: usize = 100;

/// API routes (require authentication via JWT).
/// The auth middleware is applied in routes/mod.rs for these routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/me", get(get_me).patch(update_me))
        .route("/api/me/transactions", get(get_transactions))
        .route("/api/me/profile-stats", get(get_profile_stats))
}

/// Routes where a session is optional.
pub fn public_routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/navigation", get(get_navigation))
}

// ─── User Profile ────────────────────────────────────────────

/// Current user response.
#[derive(Serialize, Debug)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub green_points: i64,
    #[cfg_attr(feature = "binding-generation", ts(type = "\"user\" | \"admin\""))]
    pub role: Role,
    pub avatar: Option<String>,
    pub joined_at: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            green_points: user.green_points,
            role: user.role,
            avatar: user.avatar,
            joined_at: format_utc_rfc3339(user.joined_at),
        }
    }
}

/// Get current user profile.
async fn get_me(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<UserResponse>> {
    let profile = state.session(&user.user_id).require_user().await?;
    Ok(Json(profile.into()))
}

/// Profile edit. Absent fields are left unchanged.
#[derive(Deserialize, Validate)]
struct ProfileUpdate {
    #[validate(length(min = 1, max = 100))]
    name: Option<String>,
    #[validate(email)]
    email: Option<String>,
    #[validate(url)]
    avatar: Option<String>,
}

async fn update_me(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(update): Json<ProfileUpdate>,
) -> Result<Json<UserResponse>> {
    update.validate()?;

    let patch = UserPatch {
        name: update.name.map(|n| n.trim().to_string()),
        email: update.email.map(|e| e.trim().to_string()),
        avatar: update.avatar,
    };
    if patch.is_empty() {
        return Err(AppError::BadRequest("Nothing to update".to_string()));
    }

    let updated = state
        .session(&user.user_id)
        .update(&patch)
        .await?
        .ok_or(AppError::Unauthorized)?;

    tracing::info!(user_id = %updated.id, "Profile updated");
    Ok(Json(updated.into()))
}

// ─── Points History ──────────────────────────────────────────

#[derive(Deserialize)]
struct TransactionsQuery {
    #[serde(default = "default_limit")]
    limit: usize,
}

fn default_limit() -> usize {
    DEFAULT_TRANSACTION_LIMIT
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct TransactionResponse {
    pub id: String,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub points: i64,
    #[serde(rename = "type")]
    #[cfg_attr(feature = "binding-generation", ts(type = "\"earned\" | \"redeemed\" | \"opening\""))]
    pub kind: TransactionKind,
    pub description: String,
    pub timestamp: String,
    pub related_id: Option<String>,
}

impl From<PointTransaction> for TransactionResponse {
    fn from(tx: PointTransaction) -> Self {
        Self {
            id: tx.id,
            points: tx.points,
            kind: tx.kind,
            description: tx.description,
            timestamp: format_utc_rfc3339(tx.timestamp),
            related_id: tx.related_id,
        }
    }
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct TransactionsResponse {
    pub transactions: Vec<TransactionResponse>,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub balance: i64,
}

/// Recent ledger entries for the current user, newest first.
async fn get_transactions(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Query(params): Query<TransactionsQuery>,
) -> Result<Json<TransactionsResponse>> {
    if params.limit == 0 {
        return Err(AppError::BadRequest(
            "Limit must be greater than 0".to_string(),
        ));
    }
    let limit = params.limit.min(MAX_TRANSACTION_LIMIT);

    let session = state.session(&user.user_id);
    let profile = session.require_user().await?;
    let transactions = state
        .db
        .transactions_for(&profile.id, Some(limit))
        .await?
        .into_iter()
        .map(TransactionResponse::from)
        .collect();

    Ok(Json(TransactionsResponse {
        transactions,
        balance: profile.green_points,
    }))
}

// ─── Profile Stats ───────────────────────────────────────────

async fn get_profile_stats(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<ProfileStats>> {
    let profile = state.session(&user.user_id).require_user().await?;
    let data = state.db.snapshot().await;
    Ok(Json(ProfileStats::compute(&profile, data.as_input())))
}

// ─── Navigation Guard ────────────────────────────────────────

#[derive(Deserialize)]
struct NavigationQuery {
    path: String,
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct NavigationResponse {
    pub path: String,
    #[cfg_attr(
        feature = "binding-generation",
        ts(type = "\"allow\" | \"redirect_to_login\" | \"deny\" | \"redirect_to_default\"")
    )]
    pub decision: RouteDecision,
}

/// Route guard decision for a client-side path.
async fn get_navigation(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    headers: HeaderMap,
    Query(params): Query<NavigationQuery>,
) -> Result<Json<NavigationResponse>> {
    let user = match authenticate(&state, &jar, &headers) {
        Some(claims) => state.db.get_user(&claims.sub).await?,
        None => None,
    };

    let decision = guard(&params.path, user.as_ref());
    tracing::debug!(path = %params.path, ?decision, "Navigation guard");

    Ok(Json(NavigationResponse {
        path: params.path,
        decision,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::seed::mock_collections;

    #[test]
    fn test_user_response_hides_password_hash() {
        let data = mock_collections("secret-hash");
        let body = serde_json::to_string(&UserResponse::from(data.users[0].clone())).unwrap();
        assert!(!body.contains("secret-hash"));
        assert!(body.contains("\"green_points\":450"));
    }

    #[test]
    fn test_transaction_response_uses_type_key() {
        let data = mock_collections("hash");
        let tx = data.transactions[0].clone();
        let value = serde_json::to_value(TransactionResponse::from(tx)).unwrap();
        assert!(value.get("type").is_some());
        assert!(value.get("kind").is_none());
        assert!(value["timestamp"].as_str().unwrap().ends_with('Z'));
    }

    #[test]
    fn test_profile_update_validation() {
        let bad: ProfileUpdate = serde_json::from_str(r#"{"email": "nope"}"#).unwrap();
        assert!(bad.validate().is_err());

        let ok: ProfileUpdate = serde_json::from_str(r#"{"name": "Jane"}"#).unwrap();
        assert!(ok.validate().is_ok());
    }
}
