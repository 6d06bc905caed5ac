// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Map marker kinds and their icons.

use serde::{Deserialize, Serialize};

use crate::models::DustbinStatus;

/// Which marker layers the map shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerVisibility {
    #[serde(default = "visible")]
    pub dustbins: bool,
    #[serde(default = "visible")]
    pub waste_reports: bool,
    #[serde(default = "visible")]
    pub cleanup_drives: bool,
}

fn visible() -> bool {
    true
}

impl Default for LayerVisibility {
    fn default() -> Self {
        Self {
            dustbins: true,
            waste_reports: true,
            cleanup_drives: true,
        }
    }
}

impl LayerVisibility {
    /// No layers; used by location pickers that only need map clicks.
    pub fn none() -> Self {
        Self {
            dustbins: false,
            waste_reports: false,
            cleanup_drives: false,
        }
    }

    pub fn shows(&self, kind: MarkerKind) -> bool {
        match kind {
            MarkerKind::Dustbin(_) => self.dustbins,
            MarkerKind::WasteReport => self.waste_reports,
            MarkerKind::CleanupDrive => self.cleanup_drives,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerKind {
    Dustbin(DustbinStatus),
    WasteReport,
    CleanupDrive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glyph {
    Bin,
    Warning,
    People,
}

/// Icon descriptor rendered by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerIcon {
    /// Stroke colour (hex)
    pub color: &'static str,
    pub glyph: Glyph,
}

impl MarkerKind {
    pub fn icon(self) -> MarkerIcon {
        match self {
            MarkerKind::Dustbin(DustbinStatus::Empty) => MarkerIcon {
                color: "#22C55E",
                glyph: Glyph::Bin,
            },
            MarkerKind::Dustbin(DustbinStatus::Filled) => MarkerIcon {
                color: "#EF4444",
                glyph: Glyph::Bin,
            },
            MarkerKind::WasteReport => MarkerIcon {
                color: "#F59E0B",
                glyph: Glyph::Warning,
            },
            MarkerKind::CleanupDrive => MarkerIcon {
                color: "#10B981",
                glyph: Glyph::People,
            },
        }
    }

    /// Value of the `kind` property in marker GeoJSON.
    pub fn as_str(self) -> &'static str {
        match self {
            MarkerKind::Dustbin(_) => "dustbin",
            MarkerKind::WasteReport => "waste_report",
            MarkerKind::CleanupDrive => "cleanup_drive",
        }
    }
}

impl Glyph {
    pub fn as_str(self) -> &'static str {
        match self {
            Glyph::Bin => "bin",
            Glyph::Warning => "warning",
            Glyph::People => "people",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dustbin_icon_follows_status() {
        assert_eq!(
            MarkerKind::Dustbin(DustbinStatus::Empty).icon().color,
            "#22C55E"
        );
        assert_eq!(
            MarkerKind::Dustbin(DustbinStatus::Filled).icon().color,
            "#EF4444"
        );
    }

    #[test]
    fn test_visibility_gates_layers() {
        let only_bins = LayerVisibility {
            dustbins: true,
            waste_reports: false,
            cleanup_drives: false,
        };
        assert!(only_bins.shows(MarkerKind::Dustbin(DustbinStatus::Filled)));
        assert!(!only_bins.shows(MarkerKind::WasteReport));
        assert!(!LayerVisibility::none().shows(MarkerKind::CleanupDrive));
        assert!(LayerVisibility::default().shows(MarkerKind::CleanupDrive));
    }

    #[test]
    fn test_missing_layer_fields_default_visible() {
        let vis: LayerVisibility = serde_json::from_str(r#"{"dustbins": false}"#).unwrap();
        assert!(!vis.dustbins);
        assert!(vis.waste_reports);
        assert!(vis.cleanup_drives);
    }
}
