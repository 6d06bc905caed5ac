// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod drive;
pub mod dustbin;
pub mod location;
pub mod map;
pub mod navigation;
pub mod password;
pub mod policy;
pub mod report;
pub mod rewards;
pub mod session;

pub use location::{FixedPosition, Geolocator};
pub use password::PasswordHasher;
pub use session::{Credentials, Registration, Session};
