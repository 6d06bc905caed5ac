// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-memory store with typed operations.
//!
//! All collections sit behind one async `RwLock`. Every operation that
//! changes a balance appends its ledger row and updates the cached
//! balance under the same write guard, so readers never observe one
//! without the other.

use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{AppError, Result};
use crate::models::{
    CleanupDrive, DashboardInput, DriveAction, Dustbin, DustbinStatus, ImageRef, Offer,
    PartnerStore, PointEntry, PointTransaction, ReportStatus, Role, User, UserPatch, WasteReport,
};

/// The full dataset.
#[derive(Debug, Clone, Default)]
pub struct Collections {
    pub users: Vec<User>,
    pub dustbins: Vec<Dustbin>,
    pub reports: Vec<WasteReport>,
    pub drives: Vec<CleanupDrive>,
    pub stores: Vec<PartnerStore>,
    pub transactions: Vec<PointTransaction>,
}

impl Collections {
    pub fn as_input(&self) -> DashboardInput<'_> {
        DashboardInput {
            users: &self.users,
            dustbins: &self.dustbins,
            reports: &self.reports,
            drives: &self.drives,
            transactions: &self.transactions,
            stores: &self.stores,
        }
    }

    fn user_mut(&mut self, user_id: &str) -> Result<&mut User> {
        self.users
            .iter_mut()
            .find(|u| u.id == user_id)
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", user_id)))
    }

    /// Append one ledger row and move the cached balance with it.
    ///
    /// Rejects any entry that would leave the balance negative.
    fn append_points(
        &mut self,
        user_id: &str,
        entry: PointEntry,
        now: DateTime<Utc>,
    ) -> Result<PointsApplied> {
        let id = next_id(self.transactions.iter().map(|t| t.id.as_str()));
        let user = self.user_mut(user_id)?;

        let balance = user.green_points + entry.points;
        if balance < 0 {
            return Err(AppError::InsufficientPoints {
                required: -entry.points,
                available: user.green_points,
            });
        }
        user.green_points = balance;
        let user = user.clone();

        let transaction = PointTransaction {
            id,
            user_id: user_id.to_string(),
            points: entry.points,
            kind: entry.kind,
            description: entry.description,
            timestamp: now,
            related_id: entry.related_id,
        };
        self.transactions.push(transaction.clone());

        tracing::info!(
            user_id,
            points = transaction.points,
            balance = user.green_points,
            kind = ?transaction.kind,
            "Ledger entry appended"
        );

        Ok(PointsApplied { transaction, user })
    }
}

/// Result of a committed ledger append.
#[derive(Debug, Clone)]
pub struct PointsApplied {
    pub transaction: PointTransaction,
    /// User after the balance change
    pub user: User,
}

/// Result of a dustbin toggle.
#[derive(Debug, Clone)]
pub struct DustbinToggle {
    pub dustbin: Dustbin,
    /// Present when the new status earned points
    pub award: Option<PointsApplied>,
}

/// Next numeric id after the largest numeric id in use.
fn next_id<'a>(ids: impl Iterator<Item = &'a str>) -> String {
    let max = ids.filter_map(|id| id.parse::<u64>().ok()).max().unwrap_or(0);
    (max + 1).to_string()
}

/// In-memory database handle. Cheap to clone.
#[derive(Clone, Default)]
pub struct MemoryDb {
    inner: Arc<RwLock<Collections>>,
}

impl MemoryDb {
    pub fn new(collections: Collections) -> Self {
        Self {
            inner: Arc::new(RwLock::new(collections)),
        }
    }

    /// Store loaded with the mock dataset.
    pub fn seeded(password_hash: &str) -> Self {
        let collections = crate::db::seed::mock_collections(password_hash);
        tracing::info!(
            users = collections.users.len(),
            dustbins = collections.dustbins.len(),
            reports = collections.reports.len(),
            drives = collections.drives.len(),
            "Loaded mock dataset"
        );
        Self::new(collections)
    }

    /// Consistent copy of everything, for read-only rollups.
    pub async fn snapshot(&self) -> Collections {
        self.inner.read().await.clone()
    }

    // ─── Users ───────────────────────────────────────────────────

    pub async fn get_user(&self, user_id: &str) -> Result<Option<User>> {
        let data = self.inner.read().await;
        Ok(data.users.iter().find(|u| u.id == user_id).cloned())
    }

    pub async fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let data = self.inner.read().await;
        Ok(data
            .users
            .iter()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    pub async fn list_users(&self) -> Result<Vec<User>> {
        Ok(self.inner.read().await.users.clone())
    }

    /// Create an account with a zero balance.
    pub async fn insert_user(
        &self,
        name: &str,
        email: &str,
        password_hash: String,
        role: Role,
    ) -> Result<User> {
        let mut data = self.inner.write().await;
        if data.users.iter().any(|u| u.email.eq_ignore_ascii_case(email)) {
            return Err(AppError::Conflict(format!("Email {} already registered", email)));
        }

        let user = User {
            id: next_id(data.users.iter().map(|u| u.id.as_str())),
            name: name.to_string(),
            email: email.to_lowercase(),
            green_points: 0,
            role,
            avatar: None,
            joined_at: Utc::now(),
            password_hash,
        };
        data.users.push(user.clone());

        tracing::info!(user_id = %user.id, "User registered");
        Ok(user)
    }

    pub async fn update_user_profile(&self, user_id: &str, patch: &UserPatch) -> Result<User> {
        let mut data = self.inner.write().await;
        if let Some(email) = &patch.email {
            let taken = data
                .users
                .iter()
                .any(|u| u.id != user_id && u.email.eq_ignore_ascii_case(email));
            if taken {
                return Err(AppError::Conflict(format!("Email {} already registered", email)));
            }
        }

        let user = data.user_mut(user_id)?;
        user.apply_patch(patch);
        Ok(user.clone())
    }

    // ─── Ledger ──────────────────────────────────────────────────

    pub async fn apply_points(&self, user_id: &str, entry: PointEntry) -> Result<PointsApplied> {
        let mut data = self.inner.write().await;
        data.append_points(user_id, entry, Utc::now())
    }

    /// A user's transactions, newest first.
    pub async fn transactions_for(
        &self,
        user_id: &str,
        limit: Option<usize>,
    ) -> Result<Vec<PointTransaction>> {
        let data = self.inner.read().await;
        let mut txs: Vec<PointTransaction> = data
            .transactions
            .iter()
            .filter(|t| t.user_id == user_id)
            .cloned()
            .collect();
        // Ids are sequential, so they break timestamp ties
        txs.sort_by(|a, b| {
            b.timestamp
                .cmp(&a.timestamp)
                .then_with(|| b.id.parse::<u64>().ok().cmp(&a.id.parse::<u64>().ok()))
        });
        if let Some(limit) = limit {
            txs.truncate(limit);
        }
        Ok(txs)
    }

    // ─── Dustbins ────────────────────────────────────────────────

    pub async fn list_dustbins(&self) -> Result<Vec<Dustbin>> {
        Ok(self.inner.read().await.dustbins.clone())
    }

    /// Flip a dustbin and credit whatever `award` says the new status is worth.
    pub async fn toggle_dustbin<F>(
        &self,
        dustbin_id: &str,
        actor_id: &str,
        award: F,
    ) -> Result<DustbinToggle>
    where
        F: FnOnce(DustbinStatus) -> Option<PointEntry>,
    {
        let mut data = self.inner.write().await;
        let now = Utc::now();

        // Check the actor before mutating anything.
        data.user_mut(actor_id)?;

        let dustbin = data
            .dustbins
            .iter_mut()
            .find(|d| d.id == dustbin_id)
            .ok_or_else(|| AppError::NotFound(format!("Dustbin {} not found", dustbin_id)))?;
        let new_status = dustbin.toggle(actor_id, now);
        let dustbin = dustbin.clone();

        let award = match award(new_status) {
            Some(entry) => Some(data.append_points(actor_id, entry, now)?),
            None => None,
        };

        Ok(DustbinToggle { dustbin, award })
    }

    // ─── Waste Reports ───────────────────────────────────────────

    pub async fn list_reports(&self) -> Result<Vec<WasteReport>> {
        Ok(self.inner.read().await.reports.clone())
    }

    pub async fn get_report(&self, report_id: &str) -> Result<Option<WasteReport>> {
        let data = self.inner.read().await;
        Ok(data.reports.iter().find(|r| r.id == report_id).cloned())
    }

    /// Store a new report and credit its reporter. The report id is assigned here.
    pub async fn insert_report(
        &self,
        mut report: WasteReport,
        entry: PointEntry,
    ) -> Result<(WasteReport, PointsApplied)> {
        let mut data = self.inner.write().await;
        report.id = next_id(data.reports.iter().map(|r| r.id.as_str()));

        let applied = data.append_points(
            &report.user_id,
            entry.related_to(report.id.clone()),
            report.reported_at,
        )?;
        data.reports.push(report.clone());

        Ok((report, applied))
    }

    /// Mark a report resolved by the authority.
    pub async fn complete_report(&self, report_id: &str) -> Result<WasteReport> {
        let mut data = self.inner.write().await;
        let report = data
            .reports
            .iter_mut()
            .find(|r| r.id == report_id)
            .ok_or_else(|| AppError::NotFound(format!("Report {} not found", report_id)))?;

        match report.status {
            ReportStatus::Pending | ReportStatus::SubmittedToAuthority => {
                report.status = ReportStatus::Completed;
                report.completed_at = Some(Utc::now());
                Ok(report.clone())
            }
            other => Err(AppError::InvalidTransition {
                from: other.label().to_string(),
                action: "complete",
            }),
        }
    }

    // ─── Cleanup Drives ──────────────────────────────────────────

    pub async fn list_drives(&self) -> Result<Vec<CleanupDrive>> {
        Ok(self.inner.read().await.drives.clone())
    }

    pub async fn get_drive(&self, drive_id: &str) -> Result<Option<CleanupDrive>> {
        let data = self.inner.read().await;
        Ok(data.drives.iter().find(|d| d.id == drive_id).cloned())
    }

    /// Store a newly adopted drive and credit its organizer.
    pub async fn insert_drive(
        &self,
        mut drive: CleanupDrive,
        entry: PointEntry,
    ) -> Result<(CleanupDrive, PointsApplied)> {
        let mut data = self.inner.write().await;
        drive.id = next_id(data.drives.iter().map(|d| d.id.as_str()));
        drive.points_awarded = entry.points;

        let applied = data.append_points(
            &drive.user_id,
            entry.related_to(drive.id.clone()),
            drive.adopted_at,
        )?;
        data.drives.push(drive.clone());

        Ok((drive, applied))
    }

    /// Complete an adopted drive. Only its organizer may do this.
    ///
    /// `award` sees the drive as it stood before completion, so the credit
    /// can depend on what the drive has already paid out.
    pub async fn complete_drive<F>(
        &self,
        drive_id: &str,
        actor_id: &str,
        after_image: ImageRef,
        award: F,
    ) -> Result<(CleanupDrive, PointsApplied)>
    where
        F: FnOnce(&CleanupDrive) -> PointEntry,
    {
        let mut data = self.inner.write().await;
        let now = Utc::now();
        data.user_mut(actor_id)?;

        let drive = data
            .drives
            .iter_mut()
            .find(|d| d.id == drive_id)
            .ok_or_else(|| AppError::NotFound(format!("Drive {} not found", drive_id)))?;
        if drive.user_id != actor_id {
            return Err(AppError::NotOrganizer);
        }
        let next = drive
            .next_status(DriveAction::Complete)
            .ok_or_else(|| AppError::InvalidTransition {
                from: drive.status.as_str().to_string(),
                action: DriveAction::Complete.as_str(),
            })?;

        let entry = award(&*drive);
        drive.status = next;
        drive.after_image = Some(after_image);
        drive.completed_at = Some(now);
        drive.points_awarded += entry.points;
        let drive = drive.clone();

        let applied = data.append_points(actor_id, entry.related_to(drive.id.clone()), now)?;
        Ok((drive, applied))
    }

    pub async fn approve_drive(&self, drive_id: &str) -> Result<CleanupDrive> {
        let mut data = self.inner.write().await;
        let drive = data
            .drives
            .iter_mut()
            .find(|d| d.id == drive_id)
            .ok_or_else(|| AppError::NotFound(format!("Drive {} not found", drive_id)))?;

        let next = drive
            .next_status(DriveAction::Approve)
            .ok_or_else(|| AppError::InvalidTransition {
                from: drive.status.as_str().to_string(),
                action: DriveAction::Approve.as_str(),
            })?;
        drive.status = next;
        drive.approved_at = Some(Utc::now());
        Ok(drive.clone())
    }

    // ─── Rewards ─────────────────────────────────────────────────

    pub async fn list_stores(&self) -> Result<Vec<PartnerStore>> {
        Ok(self.inner.read().await.stores.clone())
    }

    /// Look up an offer together with the store that gives it.
    pub async fn find_offer(&self, offer_id: &str) -> Result<Option<(PartnerStore, Offer)>> {
        let data = self.inner.read().await;
        Ok(data.stores.iter().find_map(|store| {
            store
                .offers
                .iter()
                .find(|o| o.id == offer_id)
                .map(|o| (store.clone(), o.clone()))
        }))
    }
}
