// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! JWT authentication middleware.

use crate::models::Role;
use crate::AppState;
use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
    Extension,
};
use axum_extra::extract::cookie::CookieJar;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "cleancity_token";

/// Session lifetime in seconds (7 days).
pub const SESSION_TTL_SECS: usize = 7 * 24 * 60 * 60;

/// JWT claims structure.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: usize,
    /// Issued at (Unix timestamp)
    pub iat: usize,
    /// Token ID, used for logout revocation
    pub jti: String,
    /// Role at issue time; informational only, admin checks re-read the store
    pub role: Role,
}

/// Authenticated user extracted from JWT.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: String,
    pub jti: String,
    pub exp: usize,
}

fn bearer_or_cookie(jar: &CookieJar, headers: &HeaderMap) -> Option<String> {
    // Try cookie first, then header
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        return Some(cookie.value().to_string());
    }
    headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::to_string)
}

/// Decode and validate a session token.
pub fn verify_jwt(token: &str, signing_key: &[u8]) -> Option<Claims> {
    let key = DecodingKey::from_secret(signing_key);
    let validation = Validation::new(Algorithm::HS256);
    decode::<Claims>(token, &key, &validation)
        .map(|data| data.claims)
        .ok()
}

/// Claims of the request's session token, if it carries a valid,
/// unrevoked one. Used directly by routes where signing in is optional.
pub fn authenticate(state: &AppState, jar: &CookieJar, headers: &HeaderMap) -> Option<Claims> {
    let token = bearer_or_cookie(jar, headers)?;
    let claims = verify_jwt(&token, &state.config.jwt_signing_key)?;

    if state.revoked_tokens.contains_key(&claims.jti) {
        tracing::debug!(jti = %claims.jti, "Rejected revoked token");
        return None;
    }
    Some(claims)
}

/// Middleware that requires valid JWT authentication.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let claims = authenticate(&state, &jar, request.headers()).ok_or(StatusCode::UNAUTHORIZED)?;

    // Token for an account that no longer exists
    match state.db.get_user(&claims.sub).await {
        Ok(Some(_)) => {}
        Ok(None) => return Err(StatusCode::UNAUTHORIZED),
        Err(e) => {
            tracing::error!(error = %e, "User lookup failed during auth");
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    }

    request.extensions_mut().insert(AuthUser {
        user_id: claims.sub,
        jti: claims.jti,
        exp: claims.exp,
    });

    Ok(next.run(request).await)
}

/// Middleware that requires the authenticated user to be an admin.
///
/// Must be layered inside `require_auth`. The role is read from the store
/// on every request so a demoted admin loses access immediately.
pub async fn require_admin(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let user = state
        .db
        .get_user(&auth.user_id)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?
        .ok_or(StatusCode::UNAUTHORIZED)?;

    if !user.is_admin() {
        tracing::warn!(user_id = %user.id, "Non-admin denied admin route");
        return Err(StatusCode::FORBIDDEN);
    }

    Ok(next.run(request).await)
}

static TOKEN_COUNTER: AtomicU64 = AtomicU64::new(0);

fn new_jti(now_nanos: u128) -> String {
    let n = TOKEN_COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("{:x}-{:x}", now_nanos, n)
}

/// Create a JWT for a user session.
pub fn create_jwt(user_id: &str, role: Role, signing_key: &[u8]) -> anyhow::Result<String> {
    use jsonwebtoken::{encode, EncodingKey, Header};

    let elapsed = SystemTime::now().duration_since(UNIX_EPOCH)?;
    let now = elapsed.as_secs() as usize;

    let claims = Claims {
        sub: user_id.to_string(),
        iat: now,
        exp: now + SESSION_TTL_SECS,
        jti: new_jti(elapsed.as_nanos()),
        role,
    };

    Ok(encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(signing_key),
    )?)
}

/// Record a token as logged out until it would have expired anyway.
pub fn revoke(state: &AppState, jti: &str, exp: usize) {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as usize)
        .unwrap_or(0);

    // Expired entries can never match a valid token again
    state.revoked_tokens.retain(|_, expires| *expires > now);
    state.revoked_tokens.insert(jti.to_string(), exp);
    tracing::info!(jti, "Session token revoked");
}
