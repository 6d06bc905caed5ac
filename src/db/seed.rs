// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Mock dataset loaded at startup.
//!
//! The transaction log is topped up with one "Opening balance" entry per
//! user so that every seeded balance equals the sum of its transactions.

use chrono::{DateTime, NaiveDate, Utc};

use crate::db::Collections;
use crate::models::{
    ledger, CleanupDrive, CleanupType, DriveStatus, Dustbin, DustbinStatus, ImageRef, Location,
    Offer, PartnerStore, PointEntry, PointTransaction, ReportStatus, Role, TransactionKind, User,
    WasteReport,
};

const PEXELS: &str = "https://images.pexels.com/photos";

fn at(rfc3339: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(rfc3339)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_default()
}

fn photo(id: &str, width: u32) -> String {
    format!(
        "{}/{}/pexels-photo-{}.jpeg?auto=compress&cs=tinysrgb&w={}",
        PEXELS, id, id, width
    )
}

/// Build the seeded collections. Every account gets `password_hash`.
pub fn mock_collections(password_hash: &str) -> Collections {
    let user = |id: &str, name: &str, email: &str, points: i64, role: Role, avatar: Option<&str>, joined: &str| User {
        id: id.to_string(),
        name: name.to_string(),
        email: email.to_string(),
        green_points: points,
        role,
        avatar: avatar.map(|a| photo(a, 150)),
        joined_at: at(joined),
        password_hash: password_hash.to_string(),
    };

    let users = vec![
        user("1", "John Doe", "john@example.com", 450, Role::User, Some("2379004"), "2024-01-15T10:00:00Z"),
        user("2", "Jane Smith", "jane@example.com", 650, Role::User, Some("774909"), "2024-01-20T14:30:00Z"),
        user("admin", "Admin User", "admin@cleancity.com", 0, Role::Admin, None, "2024-01-01T00:00:00Z"),
    ];

    let dustbin = |id: &str, lat: f64, lng: f64, status: DustbinStatus, updated: &str, by: &str, address: &str| Dustbin {
        id: id.to_string(),
        location: Location::new(lat, lng, address),
        status,
        last_updated: at(updated),
        updated_by: Some(by.to_string()),
    };

    let dustbins = vec![
        dustbin("1", 8.5241, 76.9366, DustbinStatus::Empty, "2024-01-25T10:00:00Z", "1", "Secretariat, Thiruvananthapuram, Kerala"),
        dustbin("2", 8.5074, 76.9570, DustbinStatus::Filled, "2024-01-25T09:30:00Z", "2", "Technopark, Thiruvananthapuram, Kerala"),
        dustbin("3", 8.5167, 76.9558, DustbinStatus::Empty, "2024-01-25T11:15:00Z", "1", "Palayam, Thiruvananthapuram, Kerala"),
        dustbin("4", 8.4855, 76.9492, DustbinStatus::Filled, "2024-01-25T08:45:00Z", "2", "Kovalam Beach, Thiruvananthapuram, Kerala"),
        dustbin("5", 8.5380, 76.9210, DustbinStatus::Empty, "2024-01-25T12:30:00Z", "1", "Vellayani Lake, Thiruvananthapuram, Kerala"),
        dustbin("6", 8.5622, 76.8820, DustbinStatus::Filled, "2024-01-25T07:20:00Z", "2", "Neyyattinkara, Thiruvananthapuram, Kerala"),
    ];

    let reports = vec![
        WasteReport {
            id: "1".to_string(),
            user_id: "1".to_string(),
            location: Location::new(8.5241, 76.9366, "MG Road, Thiruvananthapuram, Kerala"),
            description: "Plastic bottles and food containers scattered near bus stop".to_string(),
            before_image: ImageRef::unchecked(photo("4173624", 400)),
            after_image: Some(ImageRef::unchecked(photo("761297", 400))),
            status: ReportStatus::SelfCleaned,
            cleanup_type: CleanupType::SelfClean,
            reported_at: at("2024-01-24T14:30:00Z"),
            completed_at: Some(at("2024-01-24T16:00:00Z")),
            points_awarded: 50,
        },
        WasteReport {
            id: "2".to_string(),
            user_id: "2".to_string(),
            location: Location::new(8.5074, 76.9570, "Kazhakuttom, Thiruvananthapuram, Kerala"),
            description: "Large pile of construction debris near IT park".to_string(),
            before_image: ImageRef::unchecked(photo("9324547", 400)),
            after_image: None,
            status: ReportStatus::SubmittedToAuthority,
            cleanup_type: CleanupType::SubmitToAuthority,
            reported_at: at("2024-01-25T09:00:00Z"),
            completed_at: None,
            points_awarded: 30,
        },
    ];

    let drives = vec![
        CleanupDrive {
            id: "1".to_string(),
            community_name: "Green Warriors Trivandrum".to_string(),
            user_id: "1".to_string(),
            location: Location::new(8.4855, 76.9492, "Kovalam Beach, Thiruvananthapuram, Kerala"),
            description: "Beach cleanup drive with 25 volunteers from local community".to_string(),
            before_image: ImageRef::unchecked(photo("9324663", 400)),
            after_image: Some(ImageRef::unchecked(photo("5591564", 400))),
            status: DriveStatus::Completed,
            adopted_at: at("2024-01-20T10:00:00Z"),
            completed_at: Some(at("2024-01-22T16:00:00Z")),
            approved_at: None,
            points_awarded: 100,
        },
        CleanupDrive {
            id: "2".to_string(),
            community_name: "EcoFriends Kerala".to_string(),
            user_id: "2".to_string(),
            location: Location::new(8.5380, 76.9210, "Vellayani Lake, Thiruvananthapuram, Kerala"),
            description: "Weekend cleanup drive planned for lake area".to_string(),
            before_image: ImageRef::unchecked(photo("7656732", 400)),
            after_image: None,
            status: DriveStatus::Adopted,
            adopted_at: at("2024-01-25T08:00:00Z"),
            completed_at: None,
            approved_at: None,
            points_awarded: 0,
        },
    ];

    let year_end = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap_or_default();
    let offer = |id: &str, title: &str, description: &str, points: i64, image: &str| Offer {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        points_required: points,
        valid_until: year_end,
        image: photo(image, 300),
    };

    let stores = vec![
        PartnerStore {
            id: "1".to_string(),
            name: "EcoMart".to_string(),
            logo: "🛒".to_string(),
            category: "Grocery".to_string(),
            offers: vec![
                offer("1", "10% Off Organic Products", "Get 10% discount on all organic products", 100, "1128678"),
                offer("2", "Free Reusable Bag", "Get a free eco-friendly reusable shopping bag", 50, "3962285"),
            ],
        },
        PartnerStore {
            id: "2".to_string(),
            name: "Green Cafe".to_string(),
            logo: "☕".to_string(),
            category: "Food & Beverage".to_string(),
            offers: vec![offer("3", "Free Coffee", "Complimentary coffee for eco warriors", 75, "302899")],
        },
    ];

    let tx = |id: &str, user: &str, points: i64, kind: TransactionKind, description: &str, ts: &str, related: Option<&str>| PointTransaction {
        id: id.to_string(),
        user_id: user.to_string(),
        points,
        kind,
        description: description.to_string(),
        timestamp: at(ts),
        related_id: related.map(str::to_string),
    };

    let mut transactions = vec![
        tx("1", "1", 50, TransactionKind::Earned, "Self-cleaned waste area", "2024-01-24T16:00:00Z", Some("1")),
        tx("2", "1", 10, TransactionKind::Earned, "Updated dustbin status", "2024-01-25T10:00:00Z", None),
        tx("3", "1", -50, TransactionKind::Redeemed, "Redeemed: Free Reusable Bag at EcoMart", "2024-01-25T12:00:00Z", Some("2")),
    ];

    let mut next_id = transactions.len() as u64 + 1;
    let mut openings = Vec::new();
    for u in &users {
        let gap = u.green_points - ledger::balance_of(&transactions, &u.id);
        if gap != 0 {
            let entry = PointEntry::opening(gap);
            openings.push(PointTransaction {
                id: next_id.to_string(),
                user_id: u.id.clone(),
                points: entry.points,
                kind: entry.kind,
                description: entry.description,
                timestamp: u.joined_at,
                related_id: None,
            });
            next_id += 1;
        }
    }
    transactions.extend(openings);

    Collections {
        users,
        dustbins,
        reports,
        drives,
        stores,
        transactions,
    }
}
