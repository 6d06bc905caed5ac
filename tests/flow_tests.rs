// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! End-to-end tests of the point-earning and point-spending flows.
//!
//! Each test checks both the HTTP response and that the ledger still
//! reconciles with the cached balance afterwards.

use axum::http::StatusCode;
use cleancity::models::ledger::balance_of;
use cleancity::models::PointEntry;
use cleancity::AppState;
use serde_json::json;

mod common;

async fn assert_ledger_reconciles(state: &AppState) {
    let data = state.db.snapshot().await;
    for user in &data.users {
        assert_eq!(
            balance_of(&data.transactions, &user.id),
            user.green_points,
            "ledger drift for user {}",
            user.id
        );
        assert!(user.green_points >= 0);
    }
}

fn location() -> serde_json::Value {
    json!({ "latitude": 8.5074, "longitude": 76.9570 })
}

#[tokio::test]
async fn test_points_scenario_toggle_toggle_redeem() {
    // 40 GP, two bins marked filled (+10 each), then a 50 GP offer
    let (app, state) = common::create_test_app();

    let (status, _, body) = common::call(
        &app,
        common::post_json(
            "/auth/register",
            None,
            json!({ "name": "Meera", "email": "meera@example.com", "password": "long-enough" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let token = body["token"].as_str().unwrap().to_string();
    let user_id = body["user"]["id"].as_str().unwrap().to_string();

    state
        .db
        .apply_points(&user_id, PointEntry::earned(40, "Welcome bonus"))
        .await
        .unwrap();

    // Seed dustbins 1 and 3 start empty
    for (bin, expected) in [("1", 50), ("3", 60)] {
        let (status, _, body) = common::call(
            &app,
            common::post_json(&format!("/api/dustbins/{}/toggle", bin), Some(&token), json!({})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["dustbin"]["status"], "filled");
        assert_eq!(body["points_awarded"], 10);
        assert_eq!(body["balance"], expected);
    }

    // Offer 2 is the 50 GP reusable bag
    let (status, _, quote) = common::call(
        &app,
        common::get("/api/rewards/offers/2/quote", Some(&token)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(quote["balance_before"], 60);
    assert_eq!(quote["balance_after"], 10);

    let (status, _, body) = common::call(
        &app,
        common::post_json("/api/rewards/offers/2/redeem", Some(&token), json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["balance"], 10);
    assert_eq!(body["points"], -50);
    assert_eq!(
        body["message"],
        "Successfully redeemed Free Reusable Bag! Check your email for the voucher code."
    );

    let (_, _, history) = common::call(
        &app,
        common::get("/api/me/transactions?limit=10", Some(&token)),
    )
    .await;
    let txs = history["transactions"].as_array().unwrap();
    assert_eq!(txs.len(), 4);
    assert_eq!(txs[0]["type"], "redeemed");
    assert_eq!(
        txs[0]["description"],
        "Redeemed: Free Reusable Bag at EcoMart"
    );
    assert_eq!(history["balance"], 10);

    assert_ledger_reconciles(&state).await;
}

#[tokio::test]
async fn test_redeem_unaffordable_offer_rejected() {
    let (app, state) = common::create_test_app();
    let token = common::login(&app, "admin@cleancity.com").await;

    let (status, _, body) = common::call(
        &app,
        common::post_json("/api/rewards/offers/1/redeem", Some(&token), json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "insufficient_points");

    let admin = state.db.get_user("admin").await.unwrap().unwrap();
    assert_eq!(admin.green_points, 0);
    assert_ledger_reconciles(&state).await;
}

#[tokio::test]
async fn test_store_catalog_labels() {
    let (app, state) = common::create_test_app();

    let (status, _, body) = common::call(&app, common::get("/api/rewards/stores", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["categories"], json!(["Grocery", "Food & Beverage"]));
    assert!(body["balance"].is_null());
    assert_eq!(body["stores"][0]["offers"][0]["label"], "Login to Redeem");

    let token = common::create_test_jwt("1", &state.config.jwt_signing_key);
    let (_, _, body) = common::call(
        &app,
        common::get("/api/rewards/stores?category=Grocery", Some(&token)),
    )
    .await;
    let stores = body["stores"].as_array().unwrap();
    assert_eq!(stores.len(), 1);
    assert_eq!(stores[0]["name"], "EcoMart");
    assert_eq!(stores[0]["offers"][0]["label"], "Redeem Now");
    assert_eq!(body["balance"], 450);
}

#[tokio::test]
async fn test_report_submission_awards() {
    let (app, state) = common::create_test_app();
    let token = common::create_test_jwt("2", &state.config.jwt_signing_key);

    let (status, _, body) = common::call(
        &app,
        common::post_json(
            "/api/reports",
            Some(&token),
            json!({
                "description": "Garbage dumped near the bus stop",
                "cleanup_type": "self_clean",
                "before_image": common::PIXEL,
                "after_image": common::PIXEL,
                "location": location(),
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["points_awarded"], 50);
    assert_eq!(body["balance"], 700);
    assert_eq!(body["report"]["status"], "self_cleaned");
    assert_eq!(
        body["message"],
        "Waste report submitted successfully! You earned 50 Green Points."
    );

    let (status, _, body) = common::call(
        &app,
        common::post_json(
            "/api/reports",
            Some(&token),
            json!({
                "description": "Overflowing drain",
                "before_image": common::PIXEL,
                "after_image": common::PIXEL,
                "location": location(),
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["points_awarded"], 30);
    assert_eq!(body["report"]["status"], "submitted_to_authority");
    assert!(body["report"]["after_image"].is_null());

    let (_, _, reports) = common::call(&app, common::get("/api/reports", Some(&token))).await;
    assert_eq!(reports.as_array().unwrap().len(), 4);

    assert_ledger_reconciles(&state).await;
}

#[tokio::test]
async fn test_report_without_before_image_rejected() {
    let (app, state) = common::create_test_app();
    let token = common::create_test_jwt("2", &state.config.jwt_signing_key);
    let before = state.db.snapshot().await.transactions.len();

    let (status, _, body) = common::call(
        &app,
        common::post_json(
            "/api/reports",
            Some(&token),
            json!({
                "description": "Overflowing drain",
                "before_image": "data:text/plain;base64,aGk=",
                "location": location(),
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "bad_request");
    assert_eq!(state.db.snapshot().await.transactions.len(), before);
}

#[tokio::test]
async fn test_drive_lifecycle() {
    let (app, state) = common::create_test_app();
    let token = common::create_test_jwt("1", &state.config.jwt_signing_key);
    let admin = common::login(&app, "admin@cleancity.com").await;

    let (status, _, body) = common::call(
        &app,
        common::post_json(
            "/api/drives",
            Some(&token),
            json!({
                "community_name": "Beach Buddies",
                "description": "Sunday sweep of Shanghumugham",
                "before_image": "https://example.com/before.jpg",
                "location": location(),
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["points_awarded"], 50);
    assert_eq!(body["balance"], 500);
    assert_eq!(body["drive"]["status"], "adopted");
    let drive_id = body["drive"]["id"].as_str().unwrap().to_string();

    // Approval before completion is an invalid transition
    let (status, _, body) = common::call(
        &app,
        common::post_json(
            &format!("/api/admin/drives/{}/approve", drive_id),
            Some(&admin),
            json!({}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "invalid_transition");

    // Only the organizer may complete it
    let other = common::create_test_jwt("2", &state.config.jwt_signing_key);
    let (status, _, body) = common::call(
        &app,
        common::post_json(
            &format!("/api/drives/{}/complete", drive_id),
            Some(&other),
            json!({ "after_image": common::PIXEL }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "not_organizer");
    assert_eq!(body["details"], "Only the organizer can complete this drive");

    let (status, _, body) = common::call(
        &app,
        common::post_json(
            &format!("/api/drives/{}/complete", drive_id),
            Some(&token),
            json!({ "after_image": common::PIXEL }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["balance"], 550);
    assert_eq!(body["drive"]["status"], "completed");
    assert_eq!(body["drive"]["points_awarded"], 100);

    let (status, _, body) = common::call(
        &app,
        common::post_json(
            &format!("/api/admin/drives/{}/approve", drive_id),
            Some(&admin),
            json!({}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "approved");

    assert_ledger_reconciles(&state).await;
}

#[tokio::test]
async fn test_admin_completes_authority_report_without_points() {
    let (app, state) = common::create_test_app();
    let admin = common::login(&app, "admin@cleancity.com").await;
    let before = state.db.snapshot().await.transactions.len();

    let (_, _, rows) = common::call(&app, common::get("/api/admin/reports", Some(&admin))).await;
    let pending = rows
        .as_array()
        .unwrap()
        .iter()
        .find(|r| r["status"] == "submitted_to_authority")
        .expect("seed has an authority report")
        .clone();

    let uri = format!("/api/admin/reports/{}/complete", pending["id"].as_str().unwrap());
    let (status, _, body) = common::call(&app, common::post_json(&uri, Some(&admin), json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "completed");

    // Completing twice is rejected
    let (status, _, _) = common::call(&app, common::post_json(&uri, Some(&admin), json!({}))).await;
    assert_eq!(status, StatusCode::CONFLICT);

    assert_eq!(state.db.snapshot().await.transactions.len(), before);
}

#[tokio::test]
async fn test_map_markers_geojson() {
    let (app, state) = common::create_test_app();
    let token = common::create_test_jwt("1", &state.config.jwt_signing_key);

    let (status, _, body) =
        common::call(&app, common::get("/api/map/markers", Some(&token))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["type"], "FeatureCollection");
    assert_eq!(body["features"].as_array().unwrap().len(), 10);

    let (_, _, body) = common::call(
        &app,
        common::get(
            "/api/map/markers?waste_reports=false&cleanup_drives=false",
            Some(&token),
        ),
    )
    .await;
    let features = body["features"].as_array().unwrap();
    assert_eq!(features.len(), 6);
    assert!(features
        .iter()
        .all(|f| f["properties"]["kind"] == "dustbin"));

    let (status, _, _) = common::call(
        &app,
        common::get("/api/map/markers?min_lat=8.0", Some(&token)),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_map_select_returns_placeholder_location() {
    let (app, state) = common::create_test_app();
    let token = common::create_test_jwt("1", &state.config.jwt_signing_key);

    let (status, _, body) = common::call(
        &app,
        common::post_json("/api/map/select", Some(&token), json!({ "lat": 8.52, "lng": 76.93 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["address"], "8.5200, 76.9300");

    let (status, _, _) = common::call(
        &app,
        common::post_json("/api/map/select", Some(&token), json!({ "lat": 95.0, "lng": 0.0 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_profile_update_and_stats() {
    let (app, state) = common::create_test_app();
    let token = common::create_test_jwt("2", &state.config.jwt_signing_key);

    let (status, _, body) = common::call(
        &app,
        common::send_json("PATCH", "/api/me", Some(&token), json!({ "name": "Jane S." })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Jane S.");
    assert_eq!(body["green_points"], 650);

    let (status, _, _) = common::call(
        &app,
        common::send_json("PATCH", "/api/me", Some(&token), json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _, stats) =
        common::call(&app, common::get("/api/me/profile-stats", Some(&token))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["green_points"], 650);
    assert_eq!(stats["total_earned"], 0);
    assert_eq!(stats["opening_balance"], 650);
}

#[tokio::test]
async fn test_admin_user_management_and_dashboard_totals() {
    let (app, state) = common::create_test_app();
    let admin = common::login(&app, "admin@cleancity.com").await;

    let (status, _, users) = common::call(&app, common::get("/api/admin/users", Some(&admin))).await;
    assert_eq!(status, StatusCode::OK);
    let users = users.as_array().unwrap();
    assert_eq!(users.len(), 2);
    assert_eq!(users[0]["name"], "Jane Smith");
    assert_eq!(users[0]["green_points"], 650);
    assert_eq!(users[1]["email"], "john@example.com");
    assert!(users[1]["joined_at"].as_str().unwrap().ends_with('Z'));
    assert!(users.iter().all(|u| u.get("password_hash").is_none()));

    let (status, _, stats) =
        common::call(&app, common::get("/api/admin/dashboard", Some(&admin))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["total_points_awarded"], 60);

    let user = common::create_test_jwt("1", &state.config.jwt_signing_key);
    let (status, _, _) = common::call(&app, common::get("/api/admin/users", Some(&user))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}
