// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Storage layer (in-memory, process lifetime only).

pub mod memory;
pub mod seed;

pub use memory::{Collections, DustbinToggle, MemoryDb, PointsApplied};
