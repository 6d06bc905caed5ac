// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Map markers, location picking and dustbin updates.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::{Dustbin, LayerVisibility, Location};
use crate::services::dustbin::toggle_dustbin;
use crate::services::map::{marker_collection, select_location, Bounds};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Extension, Json, Router,
};
use geojson::FeatureCollection;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/map/markers", get(get_markers))
        .route("/api/map/select", post(select))
        .route("/api/dustbins", get(list_dustbins))
        .route("/api/dustbins/{id}/toggle", post(toggle))
}

/// Coordinates supplied by a client, either from a map click or the
/// device's position. Without an address a coordinate placeholder is used.
#[derive(Debug, Deserialize, Validate)]
pub struct LocationInput {
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
    #[serde(default)]
    pub address: Option<String>,
}

impl LocationInput {
    pub fn into_location(self) -> Result<Location> {
        self.validate()?;
        match self.address.map(|a| a.trim().to_string()) {
            Some(address) if !address.is_empty() => {
                Ok(Location::new(self.latitude, self.longitude, address))
            }
            _ => Ok(Location::from_coordinates(self.latitude, self.longitude)?),
        }
    }
}

// ─── Markers ─────────────────────────────────────────────────

fn visible() -> bool {
    true
}

#[derive(Deserialize)]
struct MarkersQuery {
    #[serde(default = "visible")]
    dustbins: bool,
    #[serde(default = "visible")]
    waste_reports: bool,
    #[serde(default = "visible")]
    cleanup_drives: bool,
    min_lat: Option<f64>,
    min_lng: Option<f64>,
    max_lat: Option<f64>,
    max_lng: Option<f64>,
}

impl MarkersQuery {
    fn layers(&self) -> LayerVisibility {
        LayerVisibility {
            dustbins: self.dustbins,
            waste_reports: self.waste_reports,
            cleanup_drives: self.cleanup_drives,
        }
    }

    /// All four edges or none.
    fn bounds(&self) -> Result<Option<Bounds>> {
        match (self.min_lat, self.min_lng, self.max_lat, self.max_lng) {
            (None, None, None, None) => Ok(None),
            (Some(min_lat), Some(min_lng), Some(max_lat), Some(max_lng)) => {
                if min_lat > max_lat || min_lng > max_lng {
                    return Err(AppError::BadRequest(
                        "Bounding box minimum exceeds maximum".to_string(),
                    ));
                }
                Ok(Some(Bounds {
                    min_lat,
                    min_lng,
                    max_lat,
                    max_lng,
                }))
            }
            _ => Err(AppError::BadRequest(
                "Bounding box needs min_lat, min_lng, max_lat and max_lng".to_string(),
            )),
        }
    }
}

/// Markers for the visible layers as a GeoJSON FeatureCollection.
async fn get_markers(
    State(state): State<Arc<AppState>>,
    Query(params): Query<MarkersQuery>,
) -> Result<Json<FeatureCollection>> {
    let bounds = params.bounds()?;
    let data = state.db.snapshot().await;
    Ok(Json(marker_collection(&data, params.layers(), bounds)))
}

#[derive(Deserialize)]
struct SelectRequest {
    lat: f64,
    lng: f64,
}

/// Map background click: resolve the clicked point to a location.
async fn select(Json(req): Json<SelectRequest>) -> Result<Json<Location>> {
    Ok(Json(select_location(req.lat, req.lng)?))
}

// ─── Dustbins ────────────────────────────────────────────────

async fn list_dustbins(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Dustbin>>> {
    Ok(Json(state.db.list_dustbins().await?))
}

#[derive(Serialize)]
pub struct ToggleResponse {
    pub dustbin: Dustbin,
    pub points_awarded: i64,
    pub balance: i64,
}

async fn toggle(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(dustbin_id): Path<String>,
) -> Result<Json<ToggleResponse>> {
    let session = state.session(&user.user_id);
    let result = toggle_dustbin(&session, &dustbin_id).await?;

    let (points_awarded, balance) = match result.award {
        Some(applied) => (applied.transaction.points, applied.user.green_points),
        None => (0, session.require_user().await?.green_points),
    };

    Ok(Json(ToggleResponse {
        dustbin: result.dustbin,
        points_awarded,
        balance,
    }))
}
