// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Waste report routes.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::{CleanupType, ImageRef, WasteReport};
use crate::routes::map::LocationInput;
use crate::routes::submit_delay;
use crate::services::report::{submit_report, ReportDraft, ReportReceipt};
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/reports", get(list_reports).post(create_report))
        .route("/api/reports/{id}", get(get_report))
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateReportRequest {
    #[validate(length(min = 1, max = 2000))]
    pub description: String,
    #[serde(default)]
    pub cleanup_type: CleanupType,
    pub before_image: String,
    #[serde(default)]
    pub after_image: Option<String>,
    pub location: LocationInput,
}

impl CreateReportRequest {
    fn into_draft(self) -> Result<ReportDraft> {
        self.validate()?;

        let mut draft = ReportDraft::new();
        draft.description = self.description;
        draft.cleanup_type = self.cleanup_type;
        draft.set_location(self.location.into_location()?);
        draft.attach_before_image(ImageRef::parse(&self.before_image)?);
        if let Some(after) = self.after_image.as_deref() {
            draft.attach_after_image(ImageRef::parse(after)?);
        }
        Ok(draft)
    }
}

#[derive(Serialize)]
pub struct ReportResponse {
    pub report: WasteReport,
    pub points_awarded: i64,
    pub balance: i64,
    pub message: String,
}

impl From<ReportReceipt> for ReportResponse {
    fn from(receipt: ReportReceipt) -> Self {
        Self {
            report: receipt.report,
            points_awarded: receipt.points_awarded,
            balance: receipt.balance,
            message: receipt.message,
        }
    }
}

/// Submit a waste report and credit its award.
///
/// Nothing is written until after the configured submit delay, so a client
/// that disconnects first leaves no trace.
async fn create_report(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(req): Json<CreateReportRequest>,
) -> Result<(StatusCode, Json<ReportResponse>)> {
    // The draft lives for this request only; it just validates the form
    let submission = req.into_draft()?.begin_submit()?;

    submit_delay(&state).await;

    let receipt = submit_report(&state.session(&user.user_id), submission).await?;
    Ok((StatusCode::CREATED, Json(receipt.into())))
}

async fn list_reports(State(state): State<Arc<AppState>>) -> Result<Json<Vec<WasteReport>>> {
    let mut reports = state.db.list_reports().await?;
    reports.sort_by(|a, b| b.reported_at.cmp(&a.reported_at));
    Ok(Json(reports))
}

async fn get_report(
    State(state): State<Arc<AppState>>,
    Path(report_id): Path<String>,
) -> Result<Json<WasteReport>> {
    state
        .db
        .get_report(&report_id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Report {} not found", report_id)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PIXEL: &str = "data:image/png;base64,iVBORw0KGgo=";

    fn request(json: serde_json::Value) -> CreateReportRequest {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn test_cleanup_type_defaults_to_authority() {
        let req = request(serde_json::json!({
            "description": "Plastic pile",
            "before_image": PIXEL,
            "location": { "latitude": 8.5, "longitude": 76.9 }
        }));
        assert_eq!(req.cleanup_type, CleanupType::SubmitToAuthority);

        let draft = req.into_draft().unwrap();
        assert!(draft.can_submit());
        assert_eq!(draft.expected_points(), 30);
    }

    #[test]
    fn test_bad_image_is_bad_request() {
        let req = request(serde_json::json!({
            "description": "Plastic pile",
            "before_image": "ftp://example.com/a.png",
            "location": { "latitude": 8.5, "longitude": 76.9 }
        }));
        assert!(matches!(req.into_draft(), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn test_empty_description_rejected() {
        let req = request(serde_json::json!({
            "description": "",
            "cleanup_type": "self_clean",
            "before_image": PIXEL,
            "after_image": PIXEL,
            "location": { "latitude": 8.5, "longitude": 76.9 }
        }));
        assert!(matches!(req.into_draft(), Err(AppError::BadRequest(_))));
    }
}
