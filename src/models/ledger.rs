// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Green Points ledger records.
//!
//! A user's balance is the sum of their transactions. The cached
//! `User::green_points` is only ever written together with a new
//! transaction, so the two cannot drift apart.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    Earned,
    Redeemed,
    /// Balance a user already held when the ledger was started; not an award
    Opening,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PointTransaction {
    pub id: String,
    pub user_id: String,
    /// Signed: positive when earned, negative when redeemed
    pub points: i64,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub description: String,
    pub timestamp: DateTime<Utc>,
    /// Report, drive, dustbin or offer that caused this entry
    pub related_id: Option<String>,
}

pub const OPENING_BALANCE: &str = "Opening balance";

/// A ledger append that has not been committed yet.
#[derive(Debug, Clone, PartialEq)]
pub struct PointEntry {
    pub points: i64,
    pub kind: TransactionKind,
    pub description: String,
    pub related_id: Option<String>,
}

impl PointEntry {
    pub fn earned(points: i64, description: impl Into<String>) -> Self {
        Self {
            points,
            kind: TransactionKind::Earned,
            description: description.into(),
            related_id: None,
        }
    }

    /// A redemption; `cost` is stored negated.
    pub fn redeemed(cost: i64, description: impl Into<String>) -> Self {
        Self {
            points: -cost,
            kind: TransactionKind::Redeemed,
            description: description.into(),
            related_id: None,
        }
    }

    /// Carry over a balance that predates the ledger.
    pub fn opening(points: i64) -> Self {
        Self {
            points,
            kind: TransactionKind::Opening,
            description: OPENING_BALANCE.to_string(),
            related_id: None,
        }
    }

    pub fn related_to(mut self, id: impl Into<String>) -> Self {
        self.related_id = Some(id.into());
        self
    }
}

/// Sum of a user's transactions.
pub fn balance_of<'a, I>(transactions: I, user_id: &str) -> i64
where
    I: IntoIterator<Item = &'a PointTransaction>,
{
    transactions
        .into_iter()
        .filter(|t| t.user_id == user_id)
        .map(|t| t.points)
        .sum()
}

/// Totals of earned and redeemed points for one user.
///
/// `opening + earned - redeemed` is the balance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LedgerTotals {
    pub opening: i64,
    pub earned: i64,
    /// Absolute value of all redemptions
    pub redeemed: i64,
}

pub fn totals_for<'a, I>(transactions: I, user_id: &str) -> LedgerTotals
where
    I: IntoIterator<Item = &'a PointTransaction>,
{
    transactions
        .into_iter()
        .filter(|t| t.user_id == user_id)
        .fold(LedgerTotals::default(), |mut acc, t| {
            match t.kind {
                TransactionKind::Earned => acc.earned += t.points,
                TransactionKind::Redeemed => acc.redeemed += t.points.abs(),
                TransactionKind::Opening => acc.opening += t.points,
            }
            acc
        })
}
