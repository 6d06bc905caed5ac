// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Reward redemption.
//!
//! Redemption is two steps: `quote` shows the balance before and after and
//! fails outright if the user cannot afford the offer; `confirm` deducts
//! the price through the ledger. Dropping a quote is a cancellation.

use serde::Serialize;

use crate::error::{AppError, Result};
use crate::models::{Offer, PartnerStore, PointEntry, PointTransaction, User};
use crate::services::Session;

/// Whether `user` may redeem `offer`. Nobody signed in means no.
pub fn can_redeem(user: Option<&User>, offer: &Offer) -> bool {
    user.is_some_and(|u| u.green_points >= offer.points_required)
}

/// Text of the redeem button.
pub fn redeem_label(user: Option<&User>, offer: &Offer) -> String {
    match user {
        None => "Login to Redeem".to_string(),
        Some(u) if u.green_points >= offer.points_required => "Redeem Now".to_string(),
        Some(u) => format!("Need {} more GP", offer.points_required - u.green_points),
    }
}

/// Offer as seen by one user.
#[derive(Debug, Clone, Serialize)]
pub struct OfferView {
    #[serde(flatten)]
    pub offer: Offer,
    pub can_redeem: bool,
    pub label: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct StoreView {
    pub id: String,
    pub name: String,
    pub logo: String,
    pub category: String,
    pub offers: Vec<OfferView>,
}

pub fn store_view(store: &PartnerStore, user: Option<&User>) -> StoreView {
    StoreView {
        id: store.id.clone(),
        name: store.name.clone(),
        logo: store.logo.clone(),
        category: store.category.clone(),
        offers: store
            .offers
            .iter()
            .map(|o| OfferView {
                offer: o.clone(),
                can_redeem: can_redeem(user, o),
                label: redeem_label(user, o),
            })
            .collect(),
    }
}

/// Confirmation step of a redemption.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RedemptionQuote {
    pub offer_id: String,
    pub title: String,
    pub store_name: String,
    pub points_required: i64,
    pub balance_before: i64,
    pub balance_after: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct RedemptionReceipt {
    pub transaction: PointTransaction,
    pub balance: i64,
    pub message: String,
}

async fn load_offer(session: &Session, offer_id: &str) -> Result<(PartnerStore, Offer)> {
    session
        .db()
        .find_offer(offer_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Offer {} not found", offer_id)))
}

/// Select an offer. Fails with `InsufficientPoints` when it is not affordable.
pub async fn quote(session: &Session, offer_id: &str) -> Result<RedemptionQuote> {
    let user = session.require_user().await?;
    let (store, offer) = load_offer(session, offer_id).await?;

    if !can_redeem(Some(&user), &offer) {
        return Err(AppError::InsufficientPoints {
            required: offer.points_required,
            available: user.green_points,
        });
    }

    Ok(RedemptionQuote {
        offer_id: offer.id,
        title: offer.title,
        store_name: store.name,
        points_required: offer.points_required,
        balance_before: user.green_points,
        balance_after: user.green_points - offer.points_required,
    })
}

/// Deduct the offer's price.
///
/// The price is re-read from the catalog and the ledger refuses to go
/// negative, so a stale quote can never overdraw the balance.
pub async fn confirm(session: &Session, quote: RedemptionQuote) -> Result<RedemptionReceipt> {
    let user = session.require_user().await?;
    let (store, offer) = load_offer(session, &quote.offer_id).await?;

    let entry = PointEntry::redeemed(
        offer.points_required,
        format!("Redeemed: {} at {}", offer.title, store.name),
    )
    .related_to(offer.id.clone());

    let applied = session.db().apply_points(&user.id, entry).await.inspect_err(|e| {
        tracing::warn!(user_id = %user.id, offer_id = %offer.id, error = %e, "Redemption rejected");
    })?;

    tracing::info!(
        user_id = %user.id,
        offer_id = %offer.id,
        points = offer.points_required,
        balance = applied.user.green_points,
        "Offer redeemed"
    );

    Ok(RedemptionReceipt {
        message: format!(
            "Successfully redeemed {}! Check your email for the voucher code.",
            offer.title
        ),
        transaction: applied.transaction,
        balance: applied.user.green_points,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryDb;
    use crate::models::TransactionKind;

    fn offer(points: i64) -> Offer {
        Offer {
            id: "x".to_string(),
            title: "Thing".to_string(),
            description: String::new(),
            points_required: points,
            valid_until: chrono::NaiveDate::default(),
            image: String::new(),
        }
    }

    #[tokio::test]
    async fn test_labels_and_gating() {
        let db = MemoryDb::seeded("hash");
        let john = db.get_user("1").await.unwrap().unwrap();

        assert!(can_redeem(Some(&john), &offer(450)));
        assert!(!can_redeem(Some(&john), &offer(451)));
        assert!(!can_redeem(None, &offer(0)));

        assert_eq!(redeem_label(None, &offer(10)), "Login to Redeem");
        assert_eq!(redeem_label(Some(&john), &offer(100)), "Redeem Now");
        assert_eq!(redeem_label(Some(&john), &offer(500)), "Need 50 more GP");
    }

    #[tokio::test]
    async fn test_quote_then_confirm_deducts_exact_price() {
        let db = MemoryDb::seeded("hash");
        let session = Session::for_user(db.clone(), "1");

        let q = quote(&session, "3").await.unwrap();
        assert_eq!(q.points_required, 75);
        assert_eq!(q.balance_before, 450);
        assert_eq!(q.balance_after, 375);
        assert_eq!(q.store_name, "Green Cafe");

        let receipt = confirm(&session, q).await.unwrap();
        assert_eq!(receipt.balance, 375);
        assert_eq!(receipt.transaction.points, -75);
        assert_eq!(receipt.transaction.kind, TransactionKind::Redeemed);
        assert_eq!(
            receipt.transaction.description,
            "Redeemed: Free Coffee at Green Cafe"
        );
    }

    #[tokio::test]
    async fn test_cancelled_quote_changes_nothing() {
        let db = MemoryDb::seeded("hash");
        let session = Session::for_user(db.clone(), "1");
        let before = db.snapshot().await.transactions.len();

        let q = quote(&session, "1").await.unwrap();
        drop(q);

        assert_eq!(db.snapshot().await.transactions.len(), before);
        assert_eq!(session.require_user().await.unwrap().green_points, 450);
    }

    #[tokio::test]
    async fn test_stale_quote_cannot_overdraw() {
        let db = MemoryDb::seeded("hash");
        let session = Session::for_user(db.clone(), "1");

        // Spend down to 50, keeping a quote for the 100 GP offer from before
        let stale = quote(&session, "1").await.unwrap();
        session
            .apply_points(PointEntry::redeemed(400, "elsewhere"))
            .await
            .unwrap();

        let err = confirm(&session, stale).await.unwrap_err();
        assert!(matches!(
            err,
            AppError::InsufficientPoints {
                required: 100,
                available: 50
            }
        ));
        assert_eq!(session.require_user().await.unwrap().green_points, 50);
    }

    #[tokio::test]
    async fn test_quote_unaffordable_and_unknown() {
        let db = MemoryDb::seeded("hash");
        let admin = Session::for_user(db.clone(), "admin");

        assert!(matches!(
            quote(&admin, "2").await,
            Err(AppError::InsufficientPoints {
                required: 50,
                available: 0
            })
        ));
        assert!(matches!(
            quote(&admin, "404").await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_store_view_marks_offers() {
        let db = MemoryDb::seeded("hash");
        let stores = db.list_stores().await.unwrap();
        let admin = db.get_user("admin").await.unwrap().unwrap();

        let view = store_view(&stores[0], Some(&admin));
        assert!(view.offers.iter().all(|o| !o.can_redeem));
        assert_eq!(view.offers[1].label, "Need 50 more GP");
    }
}
