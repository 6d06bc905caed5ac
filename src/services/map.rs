// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Map layers rendered as GeoJSON.
//!
//! Every dustbin, waste report and cleanup drive becomes a point feature
//! whose properties carry what the client needs to draw the icon. Layers
//! can be hidden and the set can be clipped to a bounding box.

use geo::{coord, Intersects, Point, Rect};
use geojson::{feature::Id, Feature, FeatureCollection, Geometry, JsonObject, Value};
use serde::Serialize;

use crate::db::Collections;
use crate::models::location::DEFAULT_CENTER;
use crate::models::{LayerVisibility, Location, LocationError, MarkerKind};

/// Visible map area in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_lat: f64,
    pub min_lng: f64,
    pub max_lat: f64,
    pub max_lng: f64,
}

impl Bounds {
    fn rect(&self) -> Rect<f64> {
        Rect::new(
            coord! { x: self.min_lng, y: self.min_lat },
            coord! { x: self.max_lng, y: self.max_lat },
        )
    }
}

struct Marker<'a> {
    kind: MarkerKind,
    id: &'a str,
    status: serde_json::Value,
    location: &'a Location,
    title: String,
}

fn status_value(status: impl Serialize) -> serde_json::Value {
    serde_json::to_value(status).unwrap_or_default()
}

fn markers(data: &Collections) -> Vec<Marker<'_>> {
    let dustbins = data.dustbins.iter().map(|d| Marker {
        kind: MarkerKind::Dustbin(d.status),
        id: &d.id,
        status: status_value(d.status),
        location: &d.location,
        title: "Dustbin".to_string(),
    });
    let reports = data.reports.iter().map(|r| Marker {
        kind: MarkerKind::WasteReport,
        id: &r.id,
        status: status_value(r.status),
        location: &r.location,
        title: r.description.clone(),
    });
    let drives = data.drives.iter().map(|d| Marker {
        kind: MarkerKind::CleanupDrive,
        id: &d.id,
        status: status_value(d.status),
        location: &d.location,
        title: d.community_name.clone(),
    });

    dustbins.chain(reports).chain(drives).collect()
}

fn to_feature(marker: Marker<'_>) -> Feature {
    let icon = marker.kind.icon();
    let point: Point<f64> = marker.location.point();

    let mut properties = JsonObject::new();
    properties.insert("kind".into(), marker.kind.as_str().into());
    properties.insert("id".into(), marker.id.into());
    properties.insert("status".into(), marker.status);
    properties.insert("color".into(), icon.color.into());
    properties.insert("glyph".into(), icon.glyph.as_str().into());
    properties.insert("title".into(), marker.title.into());
    properties.insert("address".into(), marker.location.address.clone().into());

    Feature {
        bbox: None,
        geometry: Some(Geometry::new(Value::Point(vec![point.x(), point.y()]))),
        id: Some(Id::String(format!("{}-{}", marker.kind.as_str(), marker.id))),
        properties: Some(properties),
        foreign_members: None,
    }
}

/// Markers for the visible layers, optionally clipped to `bounds`.
pub fn marker_collection(
    data: &Collections,
    layers: LayerVisibility,
    bounds: Option<Bounds>,
) -> FeatureCollection {
    let rect = bounds.map(|b| b.rect());

    let features: Vec<Feature> = markers(data)
        .into_iter()
        .filter(|m| layers.shows(m.kind))
        .filter(|m| rect.is_none_or(|r| r.intersects(&m.location.point())))
        .map(to_feature)
        .collect();

    tracing::debug!(count = features.len(), "Built map markers");

    // Where the client centres the map before the user pans
    let (lat, lng) = DEFAULT_CENTER;
    let mut extra = JsonObject::new();
    extra.insert("center".into(), serde_json::json!([lng, lat]));

    FeatureCollection {
        bbox: None,
        features,
        foreign_members: Some(extra),
    }
}

/// A map click picks a location with a coordinate placeholder address.
pub fn select_location(latitude: f64, longitude: f64) -> Result<Location, LocationError> {
    Location::from_coordinates(latitude, longitude)
}
