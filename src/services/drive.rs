// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Cleanup drive lifecycle: create (adopt), complete, approve.
//!
//! Adopting a drive earns the adoption award. Completing it with an after
//! photo tops the organizer up to the full completion award, so a drive's
//! `points_awarded` always equals `award_for_drive(after_image.is_some())`.

use chrono::Utc;

use crate::error::{AppError, Result};
use crate::models::{CleanupDrive, DriveStatus, ImageRef, Location, LocationError, PointEntry};
use crate::services::policy::{award_for_drive, completion_bonus};
use crate::services::Session;

#[derive(Debug, Clone, Default)]
pub struct DriveDraft {
    pub community_name: String,
    pub description: String,
    pub location: Option<Location>,
    pub before_image: Option<ImageRef>,
}

#[derive(Debug, Clone)]
pub struct DriveReceipt {
    pub drive: CleanupDrive,
    pub points_awarded: i64,
    /// Balance after the award
    pub balance: i64,
    pub message: String,
}

impl DriveDraft {
    pub fn set_location_from_map(&mut self, latitude: f64, longitude: f64) -> std::result::Result<(), LocationError> {
        self.location = Some(Location::from_coordinates(latitude, longitude)?);
        Ok(())
    }

    pub fn can_submit(&self) -> bool {
        !self.community_name.trim().is_empty()
            && !self.description.trim().is_empty()
            && self.location.is_some()
            && self.before_image.is_some()
    }
}

/// Adopt a new drive organized by the signed-in user.
pub async fn create_drive(session: &Session, draft: DriveDraft) -> Result<DriveReceipt> {
    let user = session.require_user().await?;

    if draft.community_name.trim().is_empty() {
        return Err(AppError::BadRequest("Community name is required".to_string()));
    }
    if draft.description.trim().is_empty() {
        return Err(AppError::BadRequest("Description is required".to_string()));
    }
    let location = draft
        .location
        .ok_or_else(|| AppError::BadRequest("Location is required".to_string()))?;
    let before_image = draft
        .before_image
        .ok_or_else(|| AppError::BadRequest("Before image is required".to_string()))?;

    let points = award_for_drive(false);
    let drive = CleanupDrive {
        id: String::new(),
        community_name: draft.community_name.trim().to_string(),
        user_id: user.id.clone(),
        location,
        description: draft.description.trim().to_string(),
        before_image,
        after_image: None,
        status: DriveStatus::Adopted,
        adopted_at: Utc::now(),
        completed_at: None,
        approved_at: None,
        points_awarded: 0,
    };

    let (drive, applied) = session
        .db()
        .insert_drive(drive, PointEntry::earned(points, "Organized cleanup drive"))
        .await?;

    tracing::info!(
        user_id = %user.id,
        drive_id = %drive.id,
        points,
        "Cleanup drive created"
    );

    Ok(DriveReceipt {
        message: format!(
            "Cleanup drive created successfully! You earned {} Green Points.",
            points
        ),
        drive,
        points_awarded: points,
        balance: applied.user.green_points,
    })
}

/// Finish an adopted drive with its after photo. Organizer only.
pub async fn complete_drive(session: &Session, drive_id: &str, after_image: ImageRef) -> Result<DriveReceipt> {
    let user = session.require_user().await?;

    let (drive, applied) = session
        .db()
        .complete_drive(drive_id, &user.id, after_image, |drive| {
            PointEntry::earned(
                completion_bonus(drive.points_awarded),
                "Completed cleanup drive",
            )
        })
        .await
        .inspect_err(|e| {
            tracing::warn!(user_id = %user.id, drive_id, error = %e, "Drive completion rejected");
        })?;

    let points = applied.transaction.points;
    tracing::info!(user_id = %user.id, drive_id, points, "Cleanup drive completed");

    Ok(DriveReceipt {
        message: format!(
            "Cleanup drive completed successfully! You earned {} Green Points.",
            points
        ),
        drive,
        points_awarded: points,
        balance: applied.user.green_points,
    })
}

/// Sign off a completed drive. Admin only; no points move.
pub async fn approve_drive(session: &Session, drive_id: &str) -> Result<CleanupDrive> {
    let admin = session.require_admin().await?;
    let drive = session.db().approve_drive(drive_id).await?;

    tracing::info!(admin_id = %admin.id, drive_id, "Cleanup drive approved");
    Ok(drive)
}
