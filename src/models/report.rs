// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Waste report model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{ImageRef, Location};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    Pending,
    SelfCleaned,
    SubmittedToAuthority,
    Completed,
}

impl ReportStatus {
    pub const ALL: [ReportStatus; 4] = [
        ReportStatus::Pending,
        ReportStatus::SelfCleaned,
        ReportStatus::SubmittedToAuthority,
        ReportStatus::Completed,
    ];

    /// Whether the site is considered clean.
    pub fn is_resolved(self) -> bool {
        matches!(self, ReportStatus::SelfCleaned | ReportStatus::Completed)
    }

    pub fn label(self) -> &'static str {
        match self {
            ReportStatus::Pending => "Pending",
            ReportStatus::SelfCleaned => "Self Cleaned",
            ReportStatus::SubmittedToAuthority => "Submitted to Authority",
            ReportStatus::Completed => "Completed",
        }
    }
}

/// What the reporter chose to do about the site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CleanupType {
    SelfClean,
    #[default]
    SubmitToAuthority,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WasteReport {
    pub id: String,
    pub user_id: String,
    pub location: Location,
    pub description: String,
    pub before_image: ImageRef,
    pub after_image: Option<ImageRef>,
    pub status: ReportStatus,
    pub cleanup_type: CleanupType,
    pub reported_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    /// Fixed when the report is created
    pub points_awarded: i64,
}

/// Initial status of a freshly submitted report.
pub fn initial_status(cleanup_type: CleanupType, has_after_image: bool) -> ReportStatus {
    match (cleanup_type, has_after_image) {
        (CleanupType::SelfClean, true) => ReportStatus::SelfCleaned,
        (CleanupType::SelfClean, false) => ReportStatus::Pending,
        (CleanupType::SubmitToAuthority, _) => ReportStatus::SubmittedToAuthority,
    }
}
