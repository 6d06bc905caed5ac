// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Dustbin status toggling.

use crate::db::DustbinToggle;
use crate::error::Result;
use crate::models::PointEntry;
use crate::services::policy::award_for_dustbin;
use crate::services::Session;

/// Flip a dustbin between empty and filled on behalf of the signed-in user.
///
/// Marking a bin filled earns points; marking it empty does not. Nothing
/// stops the same user toggling back and forth.
pub async fn toggle_dustbin(session: &Session, dustbin_id: &str) -> Result<DustbinToggle> {
    let user = session.require_user().await?;

    let toggle = session
        .db()
        .toggle_dustbin(dustbin_id, &user.id, |status| {
            match award_for_dustbin(status) {
                0 => None,
                points => Some(
                    PointEntry::earned(points, "Updated dustbin status").related_to(dustbin_id),
                ),
            }
        })
        .await?;

    tracing::info!(
        user_id = %user.id,
        dustbin_id,
        status = ?toggle.dustbin.status,
        points = toggle.award.as_ref().map(|a| a.transaction.points).unwrap_or(0),
        "Dustbin status toggled"
    );

    Ok(toggle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryDb;
    use crate::error::AppError;
    use crate::models::DustbinStatus;

    #[tokio::test]
    async fn test_toggle_twice_restores_status_and_awards_once() {
        let db = MemoryDb::seeded("hash");
        let session = Session::for_user(db.clone(), "1");

        // Seed dustbin 1 starts empty
        let first = toggle_dustbin(&session, "1").await.unwrap();
        assert_eq!(first.dustbin.status, DustbinStatus::Filled);
        assert_eq!(first.award.as_ref().unwrap().transaction.points, 10);
        assert_eq!(first.dustbin.updated_by.as_deref(), Some("1"));

        let second = toggle_dustbin(&session, "1").await.unwrap();
        assert_eq!(second.dustbin.status, DustbinStatus::Empty);
        assert!(second.award.is_none());

        let user = session.require_user().await.unwrap();
        assert_eq!(user.green_points, 460);
    }

    #[tokio::test]
    async fn test_toggle_filled_to_empty_awards_nothing() {
        let db = MemoryDb::seeded("hash");
        let session = Session::for_user(db.clone(), "1");
        let before = db.snapshot().await.transactions.len();

        // Seed dustbin 2 starts filled
        let toggle = toggle_dustbin(&session, "2").await.unwrap();
        assert_eq!(toggle.dustbin.status, DustbinStatus::Empty);
        assert!(toggle.award.is_none());
        assert_eq!(db.snapshot().await.transactions.len(), before);
    }

    #[tokio::test]
    async fn test_toggle_unknown_dustbin() {
        let session = Session::for_user(MemoryDb::seeded("hash"), "1");
        assert!(matches!(
            toggle_dustbin(&session, "99").await,
            Err(AppError::NotFound(_))
        ));
    }
}
