// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Partner store catalog and offer redemption.

use crate::error::Result;
use crate::middleware::auth::{authenticate, AuthUser};
use crate::models::reward::{categories, filter_by_category, ALL_CATEGORIES};
use crate::services::rewards::{confirm, quote, store_view, RedemptionQuote, StoreView};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::HeaderMap,
    routing::{get, post},
    Extension, Json, Router,
};
use axum_extra::extract::cookie::CookieJar;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Redemption routes (require authentication).
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/rewards/offers/{id}/quote", get(get_quote))
        .route("/api/rewards/offers/{id}/redeem", post(redeem))
}

/// Catalog browsing works signed out; offers then read "Login to Redeem".
pub fn public_routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/rewards/stores", get(list_stores))
}

#[derive(Deserialize)]
struct StoresQuery {
    #[serde(default = "all_categories")]
    category: String,
}

fn all_categories() -> String {
    ALL_CATEGORIES.to_string()
}

#[derive(Serialize)]
pub struct StoresResponse {
    pub categories: Vec<String>,
    pub selected: String,
    pub stores: Vec<StoreView>,
    pub balance: Option<i64>,
}

async fn list_stores(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    headers: HeaderMap,
    Query(params): Query<StoresQuery>,
) -> Result<Json<StoresResponse>> {
    let user = match authenticate(&state, &jar, &headers) {
        Some(claims) => state.db.get_user(&claims.sub).await?,
        None => None,
    };

    let stores = state.db.list_stores().await?;
    let views = filter_by_category(&stores, &params.category)
        .into_iter()
        .map(|s| store_view(s, user.as_ref()))
        .collect();

    Ok(Json(StoresResponse {
        categories: categories(&stores),
        selected: params.category,
        stores: views,
        balance: user.map(|u| u.green_points),
    }))
}

/// First step of a redemption: what it would cost and leave.
async fn get_quote(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(offer_id): Path<String>,
) -> Result<Json<RedemptionQuote>> {
    Ok(Json(quote(&state.session(&user.user_id), &offer_id).await?))
}

#[derive(Serialize)]
pub struct RedeemResponse {
    pub transaction_id: String,
    pub points: i64,
    pub balance: i64,
    pub message: String,
}

/// Confirm a redemption. The price is taken from the catalog, not the client.
async fn redeem(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(offer_id): Path<String>,
) -> Result<Json<RedeemResponse>> {
    let session = state.session(&user.user_id);
    let selected = quote(&session, &offer_id).await?;
    let receipt = confirm(&session, selected).await?;

    Ok(Json(RedeemResponse {
        transaction_id: receipt.transaction.id,
        points: receipt.transaction.points,
        balance: receipt.balance,
        message: receipt.message,
    }))
}
