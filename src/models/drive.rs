// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Cleanup drive model and its lifecycle.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{ImageRef, Location};

/// Drive lifecycle: adopted -> completed -> approved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DriveStatus {
    Adopted,
    Completed,
    Approved,
}

impl DriveStatus {
    pub const ALL: [DriveStatus; 3] = [
        DriveStatus::Adopted,
        DriveStatus::Completed,
        DriveStatus::Approved,
    ];

    pub fn is_finished(self) -> bool {
        matches!(self, DriveStatus::Completed | DriveStatus::Approved)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DriveStatus::Adopted => "adopted",
            DriveStatus::Completed => "completed",
            DriveStatus::Approved => "approved",
        }
    }
}

/// Actions that move a drive through its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriveAction {
    Complete,
    Approve,
}

impl DriveAction {
    pub fn as_str(self) -> &'static str {
        match self {
            DriveAction::Complete => "complete",
            DriveAction::Approve => "approve",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CleanupDrive {
    pub id: String,
    pub community_name: String,
    /// Organizer
    pub user_id: String,
    pub location: Location,
    pub description: String,
    pub before_image: ImageRef,
    pub after_image: Option<ImageRef>,
    pub status: DriveStatus,
    pub adopted_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub approved_at: Option<DateTime<Utc>>,
    /// Running total awarded to the organizer for this drive
    pub points_awarded: i64,
}

impl CleanupDrive {
    /// Status reached by applying `action`, or `None` if not allowed.
    pub fn next_status(&self, action: DriveAction) -> Option<DriveStatus> {
        match (self.status, action) {
            (DriveStatus::Adopted, DriveAction::Complete) => Some(DriveStatus::Completed),
            (DriveStatus::Completed, DriveAction::Approve) => Some(DriveStatus::Approved),
            _ => None,
        }
    }
}
