// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Dustbin model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::Location;

/// Fill status of a dustbin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DustbinStatus {
    Empty,
    Filled,
}

impl DustbinStatus {
    /// The other status. Applying this twice is the identity.
    pub fn toggled(self) -> Self {
        match self {
            DustbinStatus::Empty => DustbinStatus::Filled,
            DustbinStatus::Filled => DustbinStatus::Empty,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dustbin {
    pub id: String,
    pub location: Location,
    pub status: DustbinStatus,
    pub last_updated: DateTime<Utc>,
    /// User who last changed the status
    pub updated_by: Option<String>,
}

impl Dustbin {
    /// Flip the status and stamp who did it. Returns the new status.
    pub fn toggle(&mut self, actor_id: &str, now: DateTime<Utc>) -> DustbinStatus {
        self.status = self.status.toggled();
        self.last_updated = now;
        self.updated_by = Some(actor_id.to_string());
        self.status
    }
}
