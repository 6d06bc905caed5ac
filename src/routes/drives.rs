// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Cleanup drive routes.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::{CleanupDrive, ImageRef};
use crate::routes::map::LocationInput;
use crate::routes::submit_delay;
use crate::services::drive::{complete_drive, create_drive, DriveDraft, DriveReceipt};
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/drives", get(list_drives).post(adopt))
        .route("/api/drives/{id}", get(get_drive))
        .route("/api/drives/{id}/complete", post(complete))
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateDriveRequest {
    #[validate(length(min = 1, max = 200))]
    pub community_name: String,
    #[validate(length(min = 1, max = 2000))]
    pub description: String,
    pub before_image: String,
    pub location: LocationInput,
}

impl CreateDriveRequest {
    fn into_draft(self) -> Result<DriveDraft> {
        self.validate()?;
        Ok(DriveDraft {
            community_name: self.community_name,
            description: self.description,
            location: Some(self.location.into_location()?),
            before_image: Some(ImageRef::parse(&self.before_image)?),
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct CompleteDriveRequest {
    pub after_image: String,
}

#[derive(Serialize)]
pub struct DriveResponse {
    pub drive: CleanupDrive,
    pub points_awarded: i64,
    pub balance: i64,
    pub message: String,
}

impl From<DriveReceipt> for DriveResponse {
    fn from(receipt: DriveReceipt) -> Self {
        Self {
            drive: receipt.drive,
            points_awarded: receipt.points_awarded,
            balance: receipt.balance,
            message: receipt.message,
        }
    }
}

/// Adopt a new cleanup drive.
async fn adopt(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(req): Json<CreateDriveRequest>,
) -> Result<(StatusCode, Json<DriveResponse>)> {
    let draft = req.into_draft()?;

    submit_delay(&state).await;

    let receipt = create_drive(&state.session(&user.user_id), draft).await?;
    Ok((StatusCode::CREATED, Json(receipt.into())))
}

/// Finish an adopted drive with its after photo.
async fn complete(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(drive_id): Path<String>,
    Json(req): Json<CompleteDriveRequest>,
) -> Result<Json<DriveResponse>> {
    let after_image = ImageRef::parse(&req.after_image)?;

    submit_delay(&state).await;

    let receipt = complete_drive(&state.session(&user.user_id), &drive_id, after_image).await?;
    Ok(Json(receipt.into()))
}

async fn list_drives(State(state): State<Arc<AppState>>) -> Result<Json<Vec<CleanupDrive>>> {
    let mut drives = state.db.list_drives().await?;
    drives.sort_by(|a, b| b.adopted_at.cmp(&a.adopted_at));
    Ok(Json(drives))
}

async fn get_drive(
    State(state): State<Arc<AppState>>,
    Path(drive_id): Path<String>,
) -> Result<Json<CleanupDrive>> {
    state
        .db
        .get_drive(&drive_id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Drive {} not found", drive_id)))
}
