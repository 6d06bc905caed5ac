// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Admin dashboard and moderation routes.
//!
//! Mounted behind both `require_auth` and `require_admin`.

use crate::error::Result;
use crate::middleware::auth::AuthUser;
use crate::models::dashboard::{report_rows, ReportRow};
use crate::models::{CleanupDrive, DashboardStats, Role, User, WasteReport};
use crate::services::drive::approve_drive;
use crate::time_utils::format_utc_rfc3339;
use crate::AppState;
use axum::{
    extract::{Path, State},
    routing::{get, post},
    Extension, Json, Router,
};
use serde::Serialize;
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/admin/dashboard", get(get_dashboard))
        .route("/api/admin/reports", get(get_reports))
        .route("/api/admin/users", get(get_users))
        .route("/api/admin/reports/{id}/complete", post(complete_report))
        .route("/api/admin/drives/{id}/approve", post(approve))
}

async fn get_dashboard(State(state): State<Arc<AppState>>) -> Result<Json<DashboardStats>> {
    let data = state.db.snapshot().await;
    Ok(Json(DashboardStats::compute(data.as_input())))
}

/// Reports table with reporter names joined in.
async fn get_reports(State(state): State<Arc<AppState>>) -> Result<Json<Vec<ReportRow>>> {
    let data = state.db.snapshot().await;
    Ok(Json(report_rows(&data.reports, &data.users)))
}

/// Row of the user management table.
#[derive(Serialize, Debug)]
pub struct UserRow {
    pub id: String,
    pub name: String,
    pub email: String,
    pub green_points: i64,
    pub joined_at: String,
}

impl From<User> for UserRow {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            green_points: user.green_points,
            joined_at: format_utc_rfc3339(user.joined_at),
        }
    }
}

/// Regular accounts, highest balance first. Admins are not listed.
async fn get_users(State(state): State<Arc<AppState>>) -> Result<Json<Vec<UserRow>>> {
    let mut users: Vec<User> = state
        .db
        .list_users()
        .await?
        .into_iter()
        .filter(|u| u.role == Role::User)
        .collect();
    users.sort_by(|a, b| b.green_points.cmp(&a.green_points).then_with(|| a.name.cmp(&b.name)));

    Ok(Json(users.into_iter().map(UserRow::from).collect()))
}

/// Mark a reported site as cleaned by the authority. No points move.
async fn complete_report(
    State(state): State<Arc<AppState>>,
    Extension(admin): Extension<AuthUser>,
    Path(report_id): Path<String>,
) -> Result<Json<WasteReport>> {
    let report = state.db.complete_report(&report_id).await?;
    tracing::info!(admin_id = %admin.user_id, report_id = %report.id, "Waste report completed");
    Ok(Json(report))
}

async fn approve(
    State(state): State<Arc<AppState>>,
    Extension(admin): Extension<AuthUser>,
    Path(drive_id): Path<String>,
) -> Result<Json<CleanupDrive>> {
    Ok(Json(approve_drive(&state.session(&admin.user_id), &drive_id).await?))
}
