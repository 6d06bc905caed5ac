// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data models for the application.

pub mod dashboard;
pub mod drive;
pub mod dustbin;
pub mod image;
pub mod ledger;
pub mod location;
pub mod marker;
pub mod report;
pub mod reward;
pub mod user;

pub use dashboard::{DashboardInput, DashboardStats, ProfileStats};
pub use drive::{CleanupDrive, DriveAction, DriveStatus};
pub use dustbin::{Dustbin, DustbinStatus};
pub use image::{ImageError, ImageRef};
pub use ledger::{PointEntry, PointTransaction, TransactionKind};
pub use location::{Location, LocationError};
pub use marker::{LayerVisibility, MarkerKind};
pub use report::{CleanupType, ReportStatus, WasteReport};
pub use reward::{Offer, PartnerStore};
pub use user::{Role, User, UserPatch};
