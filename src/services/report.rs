// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Waste report submission flow.
//!
//! A `ReportDraft` collects the form fields. It becomes submittable once it
//! has a description, a location and a before photo, and refuses a second
//! submission while one is in flight.

use chrono::Utc;

use crate::error::{AppError, GeolocationUnavailable, Result};
use crate::models::report::initial_status;
use crate::models::{CleanupType, ImageRef, Location, LocationError, PointEntry, WasteReport};
use crate::services::location::{locate, Geolocator};
use crate::services::policy::award_for_report;
use crate::services::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DraftState {
    #[default]
    Editing,
    Submitting,
}

#[derive(Debug, Clone, Default)]
pub struct ReportDraft {
    pub description: String,
    pub cleanup_type: CleanupType,
    before_image: Option<ImageRef>,
    after_image: Option<ImageRef>,
    location: Option<Location>,
    state: DraftState,
}

/// Validated contents of a draft, ready to commit.
#[derive(Debug, Clone)]
pub struct ReportSubmission {
    pub description: String,
    pub cleanup_type: CleanupType,
    pub before_image: ImageRef,
    pub after_image: Option<ImageRef>,
    pub location: Location,
}

/// Outcome of a committed report.
#[derive(Debug, Clone)]
pub struct ReportReceipt {
    pub report: WasteReport,
    pub points_awarded: i64,
    /// Balance after the award
    pub balance: i64,
    pub message: String,
}

impl ReportDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DraftState {
        self.state
    }

    pub fn location(&self) -> Option<&Location> {
        self.location.as_ref()
    }

    pub fn set_location(&mut self, location: Location) {
        self.location = Some(location);
    }

    /// Location picked by clicking the map.
    pub fn set_location_from_map(&mut self, latitude: f64, longitude: f64) -> std::result::Result<(), LocationError> {
        self.location = Some(Location::from_coordinates(latitude, longitude)?);
        Ok(())
    }

    /// Ask the device for its position.
    ///
    /// On failure the draft keeps whatever location it had and the caller
    /// should fall back to map selection.
    pub fn use_current_location(&mut self, geolocator: &impl Geolocator) -> std::result::Result<(), GeolocationUnavailable> {
        self.location = Some(locate(geolocator)?);
        Ok(())
    }

    pub fn attach_before_image(&mut self, image: ImageRef) {
        self.before_image = Some(image);
    }

    pub fn remove_before_image(&mut self) {
        self.before_image = None;
    }

    pub fn attach_after_image(&mut self, image: ImageRef) {
        self.after_image = Some(image);
    }

    pub fn remove_after_image(&mut self) {
        self.after_image = None;
    }

    /// The after photo only counts for self-cleaned sites.
    fn effective_after_image(&self) -> Option<&ImageRef> {
        match self.cleanup_type {
            CleanupType::SelfClean => self.after_image.as_ref(),
            CleanupType::SubmitToAuthority => None,
        }
    }

    pub fn can_submit(&self) -> bool {
        self.state == DraftState::Editing
            && !self.description.trim().is_empty()
            && self.location.is_some()
            && self.before_image.is_some()
    }

    /// Points the draft would earn if submitted now.
    pub fn expected_points(&self) -> i64 {
        award_for_report(self.cleanup_type, self.effective_after_image().is_some())
    }

    /// Lock the draft and hand out its validated contents.
    pub fn begin_submit(&mut self) -> Result<ReportSubmission> {
        if self.state == DraftState::Submitting {
            return Err(AppError::Conflict("Report already being submitted".to_string()));
        }
        if self.description.trim().is_empty() {
            return Err(AppError::BadRequest("Description is required".to_string()));
        }
        let location = self
            .location
            .clone()
            .ok_or_else(|| AppError::BadRequest("Location is required".to_string()))?;
        let before_image = self
            .before_image
            .clone()
            .ok_or_else(|| AppError::BadRequest("Before image is required".to_string()))?;

        self.state = DraftState::Submitting;
        Ok(ReportSubmission {
            description: self.description.trim().to_string(),
            cleanup_type: self.cleanup_type,
            before_image,
            after_image: self.effective_after_image().cloned(),
            location,
        })
    }

    /// Settle a submission: a success resets the form, a failure unlocks it.
    pub fn finish_submit<T>(&mut self, outcome: &Result<T>) {
        match outcome {
            Ok(_) => *self = Self::default(),
            Err(_) => self.state = DraftState::Editing,
        }
    }
}

/// Commit a report for the signed-in user and credit the award.
pub async fn submit_report(session: &Session, submission: ReportSubmission) -> Result<ReportReceipt> {
    let user = session.require_user().await?;
    let has_after = submission.after_image.is_some();
    let points = award_for_report(submission.cleanup_type, has_after);
    let now = Utc::now();

    let report = WasteReport {
        id: String::new(),
        user_id: user.id.clone(),
        location: submission.location,
        description: submission.description,
        before_image: submission.before_image,
        after_image: submission.after_image,
        status: initial_status(submission.cleanup_type, has_after),
        cleanup_type: submission.cleanup_type,
        reported_at: now,
        completed_at: has_after.then_some(now),
        points_awarded: points,
    };

    let description = match submission.cleanup_type {
        CleanupType::SelfClean if has_after => "Self-cleaned waste area",
        CleanupType::SelfClean => "Reported waste area for self-cleanup",
        CleanupType::SubmitToAuthority => "Reported waste area to authority",
    };
    let (report, applied) = session
        .db()
        .insert_report(report, PointEntry::earned(points, description))
        .await?;

    tracing::info!(
        user_id = %user.id,
        report_id = %report.id,
        points,
        cleanup_type = ?report.cleanup_type,
        "Waste report submitted"
    );

    Ok(ReportReceipt {
        message: format!(
            "Waste report submitted successfully! You earned {} Green Points.",
            points
        ),
        report,
        points_awarded: points,
        balance: applied.user.green_points,
    })
}
