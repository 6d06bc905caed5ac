// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Read-only rollups for the admin dashboard and the profile page.
//!
//! Everything here is recomputed from the collections on each request;
//! nothing is cached.

use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

use crate::models::{
    CleanupDrive, DriveStatus, Dustbin, DustbinStatus, PartnerStore, PointTransaction,
    ReportStatus, Role, TransactionKind, User, WasteReport,
};

/// Balance needed for the "Green Warrior" achievement.
pub const GREEN_WARRIOR_POINTS: i64 = 500;
/// Self-cleaned sites needed for the "Eco Champion" achievement.
pub const ECO_CHAMPION_CLEANUPS: usize = 10;

/// Borrowed view of every collection the rollups read.
#[derive(Debug, Clone, Copy)]
pub struct DashboardInput<'a> {
    pub users: &'a [User],
    pub dustbins: &'a [Dustbin],
    pub reports: &'a [WasteReport],
    pub drives: &'a [CleanupDrive],
    pub transactions: &'a [PointTransaction],
    pub stores: &'a [PartnerStore],
}

/// One slice of a status breakdown chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusCount {
    pub name: String,
    pub value: usize,
    pub color: &'static str,
}

/// Activity in one calendar month.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MonthlyTrend {
    pub reports: u32,
    pub cleanups: u32,
    pub points: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardStats {
    // ─── Headline Counts ─────────────────────────────────────────
    /// Accounts with the `user` role
    pub total_users: usize,
    pub total_dustbins: usize,
    pub filled_dustbins: usize,
    pub total_reports: usize,
    /// Self-cleaned or completed
    pub completed_reports: usize,
    pub total_cleanup_drives: usize,
    /// Completed or approved
    pub completed_drives: usize,
    /// Sum of all earned transactions; opening balances are not awards
    pub total_points_awarded: i64,

    // ─── Breakdowns ──────────────────────────────────────────────
    pub dustbin_status: Vec<StatusCount>,
    pub report_status: Vec<StatusCount>,
    pub drive_status: HashMap<&'static str, usize>,

    // ─── Time Series ─────────────────────────────────────────────
    /// Keyed by "YYYY-MM"
    pub monthly: BTreeMap<String, MonthlyTrend>,

    // ─── Rewards ─────────────────────────────────────────────────
    /// Offer count per store category
    pub offers_by_category: BTreeMap<String, usize>,
}

impl DashboardStats {
    pub fn compute(input: DashboardInput<'_>) -> Self {
        let filled_dustbins = count_dustbins(input.dustbins, DustbinStatus::Filled);
        let empty_dustbins = count_dustbins(input.dustbins, DustbinStatus::Empty);

        let report_status = ReportStatus::ALL
            .into_iter()
            .map(|status| StatusCount {
                name: status.label().to_string(),
                value: input.reports.iter().filter(|r| r.status == status).count(),
                color: report_status_color(status),
            })
            .collect();

        let drive_status = DriveStatus::ALL
            .into_iter()
            .map(|status| {
                let n = input.drives.iter().filter(|d| d.status == status).count();
                (status.as_str(), n)
            })
            .collect();

        let mut monthly: BTreeMap<String, MonthlyTrend> = BTreeMap::new();
        for report in input.reports {
            monthly.entry(month_key(&report.reported_at)).or_default().reports += 1;
        }
        for drive in input.drives {
            monthly.entry(month_key(&drive.adopted_at)).or_default().cleanups += 1;
        }
        for tx in earned(input.transactions) {
            monthly.entry(month_key(&tx.timestamp)).or_default().points += tx.points;
        }

        let mut offers_by_category: BTreeMap<String, usize> = BTreeMap::new();
        for store in input.stores {
            *offers_by_category.entry(store.category.clone()).or_insert(0) += store.offers.len();
        }

        Self {
            total_users: input.users.iter().filter(|u| u.role == Role::User).count(),
            total_dustbins: input.dustbins.len(),
            filled_dustbins,
            total_reports: input.reports.len(),
            completed_reports: input
                .reports
                .iter()
                .filter(|r| r.status.is_resolved())
                .count(),
            total_cleanup_drives: input.drives.len(),
            completed_drives: input
                .drives
                .iter()
                .filter(|d| d.status.is_finished())
                .count(),
            total_points_awarded: earned(input.transactions).map(|t| t.points).sum(),
            dustbin_status: vec![
                StatusCount {
                    name: "Empty".to_string(),
                    value: empty_dustbins,
                    color: "#22C55E",
                },
                StatusCount {
                    name: "Filled".to_string(),
                    value: filled_dustbins,
                    color: "#EF4444",
                },
            ],
            report_status,
            drive_status,
            monthly,
            offers_by_category,
        }
    }
}

/// Row of the admin reports table.
#[derive(Debug, Clone, Serialize)]
pub struct ReportRow {
    pub id: String,
    pub address: String,
    pub reporter: String,
    pub status: ReportStatus,
    pub points_awarded: i64,
}

pub fn report_rows(reports: &[WasteReport], users: &[User]) -> Vec<ReportRow> {
    reports
        .iter()
        .map(|r| ReportRow {
            id: r.id.clone(),
            address: r.location.address.clone(),
            reporter: users
                .iter()
                .find(|u| u.id == r.user_id)
                .map(|u| u.name.clone())
                .unwrap_or_else(|| "Unknown".to_string()),
            status: r.status,
            points_awarded: r.points_awarded,
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Achievement {
    pub title: &'static str,
    pub description: &'static str,
    pub earned: bool,
}

/// Per-user numbers shown on the profile page.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileStats {
    pub green_points: i64,
    /// Balance carried in from before the ledger started
    pub opening_balance: i64,
    pub total_earned: i64,
    pub total_redeemed: i64,
    pub reports_submitted: usize,
    pub drives_organized: usize,
    pub achievements: Vec<Achievement>,
}

impl ProfileStats {
    pub fn compute(user: &User, input: DashboardInput<'_>) -> Self {
        let totals = crate::models::ledger::totals_for(input.transactions, &user.id);
        let own_reports: Vec<&WasteReport> = input
            .reports
            .iter()
            .filter(|r| r.user_id == user.id)
            .collect();
        let drives_organized = input
            .drives
            .iter()
            .filter(|d| d.user_id == user.id)
            .count();
        let self_cleaned = own_reports
            .iter()
            .filter(|r| r.status == ReportStatus::SelfCleaned)
            .count();

        let achievements = vec![
            Achievement {
                title: "First Report",
                description: "Submitted your first waste report",
                earned: !own_reports.is_empty(),
            },
            Achievement {
                title: "Community Helper",
                description: "Joined a cleanup drive",
                earned: drives_organized > 0,
            },
            Achievement {
                title: "Green Warrior",
                description: "Earned 500+ Green Points",
                earned: user.green_points >= GREEN_WARRIOR_POINTS,
            },
            Achievement {
                title: "Eco Champion",
                description: "Cleaned 10+ waste areas",
                earned: self_cleaned >= ECO_CHAMPION_CLEANUPS,
            },
        ];

        Self {
            green_points: user.green_points,
            opening_balance: totals.opening,
            total_earned: totals.earned,
            total_redeemed: totals.redeemed,
            reports_submitted: own_reports.len(),
            drives_organized,
            achievements,
        }
    }
}

fn count_dustbins(dustbins: &[Dustbin], status: DustbinStatus) -> usize {
    dustbins.iter().filter(|d| d.status == status).count()
}

fn earned(transactions: &[PointTransaction]) -> impl Iterator<Item = &PointTransaction> {
    transactions
        .iter()
        .filter(|t| t.kind == TransactionKind::Earned)
}

fn report_status_color(status: ReportStatus) -> &'static str {
    match status {
        ReportStatus::Pending => "#F59E0B",
        ReportStatus::SelfCleaned => "#22C55E",
        ReportStatus::SubmittedToAuthority => "#3B82F6",
        ReportStatus::Completed => "#10B981",
    }
}

/// "YYYY-MM" bucket for a timestamp.
fn month_key(ts: &chrono::DateTime<chrono::Utc>) -> String {
    ts.format("%Y-%m").to_string()
}
