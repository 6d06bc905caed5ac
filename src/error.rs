// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent API responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::models::{ImageError, LocationError};

/// Login failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("Unknown email or wrong password")]
    InvalidCredentials,
}

/// Device geolocation could not produce a position; pick on the map instead.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unable to get your location. Please select manually on the map.")]
pub struct GeolocationUnavailable {
    pub reason: String,
}

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Authentication required")]
    Unauthorized,

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("Admin access required")]
    Forbidden,

    #[error("Only the organizer can complete this drive")]
    NotOrganizer,

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Insufficient Green Points: need {required}, have {available}")]
    InsufficientPoints { required: i64, available: i64 },

    #[error("Cannot {action} from status {from}")]
    InvalidTransition { from: String, action: &'static str },

    #[error(transparent)]
    GeolocationUnavailable(#[from] GeolocationUnavailable),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<ImageError> for AppError {
    fn from(err: ImageError) -> Self {
        AppError::BadRequest(err.to_string())
    }
}

impl From<LocationError> for AppError {
    fn from(err: LocationError) -> Self {
        AppError::BadRequest(err.to_string())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::BadRequest(err.to_string())
    }
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = match &self {
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "unauthorized", None),
            AppError::Auth(err) => (
                StatusCode::UNAUTHORIZED,
                "invalid_credentials",
                Some(err.to_string()),
            ),
            AppError::Forbidden => (StatusCode::FORBIDDEN, "forbidden", None),
            AppError::NotOrganizer => (
                StatusCode::FORBIDDEN,
                "not_organizer",
                Some(self.to_string()),
            ),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", Some(msg.clone())),
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, "bad_request", Some(msg.clone()))
            }
            AppError::Conflict(msg) => (StatusCode::CONFLICT, "conflict", Some(msg.clone())),
            AppError::InsufficientPoints { .. } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "insufficient_points",
                Some(self.to_string()),
            ),
            AppError::InvalidTransition { .. } => (
                StatusCode::CONFLICT,
                "invalid_transition",
                Some(self.to_string()),
            ),
            AppError::GeolocationUnavailable(err) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "geolocation_unavailable",
                Some(err.to_string()),
            ),
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", None)
            }
        };

        let body = ErrorResponse {
            error: error.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
