// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Partner stores and the offers they give for Green Points.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Offer {
    pub id: String,
    pub title: String,
    pub description: String,
    pub points_required: i64,
    pub valid_until: NaiveDate,
    pub image: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartnerStore {
    pub id: String,
    pub name: String,
    /// Emoji logo
    pub logo: String,
    pub category: String,
    pub offers: Vec<Offer>,
}

/// Category filter value meaning "no filter".
pub const ALL_CATEGORIES: &str = "all";

/// Distinct store categories in first-seen order.
pub fn categories(stores: &[PartnerStore]) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for store in stores {
        if !out.contains(&store.category) {
            out.push(store.category.clone());
        }
    }
    out
}

/// Stores matching a category filter (`"all"` matches everything).
pub fn filter_by_category<'a>(stores: &'a [PartnerStore], category: &str) -> Vec<&'a PartnerStore> {
    stores
        .iter()
        .filter(|s| category == ALL_CATEGORIES || s.category == category)
        .collect()
}
