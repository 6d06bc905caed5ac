// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Login, registration and logout.

use axum::{extract::State, http::HeaderMap, http::StatusCode, routing::post, Json, Router};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Serialize;
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::error::{AppError, Result};
use crate::middleware::auth::{authenticate, create_jwt, revoke, SESSION_COOKIE};
use crate::models::User;
use crate::routes::api::UserResponse;
use crate::services::{Credentials, Registration, Session};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/register", post(register))
        .route("/auth/logout", post(logout))
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserResponse,
}

fn session_cookie(state: &AppState, token: String) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(state.config.frontend_url.starts_with("https://"))
        .path("/")
        .build()
}

/// Mint a token for `user` and attach it to the response as a cookie.
fn start_session(state: &AppState, jar: CookieJar, user: User) -> Result<(CookieJar, Json<AuthResponse>)> {
    let token = create_jwt(&user.id, user.role, &state.config.jwt_signing_key)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("JWT creation failed: {}", e)))?;

    let jar = jar.add(session_cookie(state, token.clone()));
    Ok((
        jar,
        Json(AuthResponse {
            token,
            user: user.into(),
        }),
    ))
}

async fn login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Json(credentials): Json<Credentials>,
) -> Result<(CookieJar, Json<AuthResponse>)> {
    let mut session = Session::anonymous(state.db.clone());
    let user = session.login(&credentials, &state.passwords).await?;
    start_session(&state, jar, user)
}

async fn register(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Json(registration): Json<Registration>,
) -> Result<(StatusCode, CookieJar, Json<AuthResponse>)> {
    let mut session = Session::anonymous(state.db.clone());
    let user = session.register(&registration, &state.passwords).await?;

    let (jar, body) = start_session(&state, jar, user)?;
    Ok((StatusCode::CREATED, jar, body))
}

/// Revoke the presented token (if any) and clear the cookie.
///
/// Logging out without a valid session is not an error.
async fn logout(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    headers: HeaderMap,
) -> (StatusCode, CookieJar) {
    match authenticate(&state, &jar, &headers) {
        Some(claims) => {
            revoke(&state, &claims.jti, claims.exp);
            tracing::info!(user_id = %claims.sub, "User logged out");
        }
        None => tracing::debug!("Logout without an active session"),
    }

    // Removal must carry the same attributes as the cookie it replaces
    let jar = jar.remove(session_cookie(&state, String::new()));
    (StatusCode::NO_CONTENT, jar)
}
