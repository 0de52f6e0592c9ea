// ABOUTME: PostgreSQL store integration tests, run only when TEST_DATABASE_URL is set
// ABOUTME: Exercises schema setup, seeding, product filtering and chat session storage
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

#![cfg(feature = "postgresql")]
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use ai_solutions_site::config::environment::{DatabaseConfig, DatabaseSsl};
use ai_solutions_site::database_plugins::factory::Database;
use ai_solutions_site::database_plugins::SiteStore;
use chrono::Utc;
use common::init_test_logging;
use serial_test::serial;
use site_core::fallback::DEFAULT_PRICING;
use site_core::models::{
    ChatMessage, ChatSession, HeroUpdate, NewProduct, ProductFilter, ProductPatch, ProductStatus,
};
use uuid::Uuid;

async fn connect() -> Option<Database> {
    let Ok(url) = std::env::var("TEST_DATABASE_URL") else {
        eprintln!("TEST_DATABASE_URL not set, skipping PostgreSQL test");
        return None;
    };
    init_test_logging();
    let config = DatabaseConfig {
        url: Some(url),
        ssl: DatabaseSsl::Disable,
        ..DatabaseConfig::default()
    };
    Some(Database::connect(&config).await.unwrap())
}

fn new_product(tag: &str, status: ProductStatus) -> NewProduct {
    NewProduct {
        name: "Test Product".to_owned(),
        description: "Created by the integration suite".to_owned(),
        price: "$1/mo".to_owned(),
        tag: Some(tag.to_owned()),
        status,
        thumbnail: None,
        features: Some(vec!["one".to_owned(), "two".to_owned()]),
    }
}

#[tokio::test]
#[serial]
async fn test_schema_seeds_pricing_and_hero() {
    let Some(db) = connect().await else { return };
    assert!(db.is_database_enabled());

    let tiers = db.list_pricing().await.unwrap();
    for (id, _, _) in DEFAULT_PRICING {
        assert!(tiers.iter().any(|t| t.id == id));
    }
    assert!(db.update_pricing("no-such-tier", "$0").await.unwrap().is_none());

    let hero = db
        .update_hero(&HeroUpdate {
            title: Some("Integration title".to_owned()),
            subtitle: Some("Integration subtitle".to_owned()),
        })
        .await
        .unwrap();
    assert_eq!(db.get_hero().await.unwrap().id, hero.id);
}

#[tokio::test]
#[serial]
async fn test_product_lifecycle_and_literal_tag_filter() {
    let Some(db) = connect().await else { return };
    let run = Uuid::new_v4().simple().to_string();
    let literal_tag = format!("{run}_50%");

    let published = db
        .create_product(new_product(&literal_tag, ProductStatus::Published))
        .await
        .unwrap();
    let upcoming = db
        .create_product(new_product(&format!("{run}x50y"), ProductStatus::Upcoming))
        .await
        .unwrap();
    assert_eq!(published.features.as_deref().map(<[String]>::len), Some(2));

    // `_` and `%` match literally, so only the first product qualifies
    let matches = db
        .list_products(&ProductFilter {
            status: None,
            tag: Some(literal_tag.to_uppercase()),
        })
        .await
        .unwrap();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].id, published.id);

    let upcoming_only = db
        .list_products(&ProductFilter {
            status: Some(ProductStatus::Upcoming),
            tag: Some(run.clone()),
        })
        .await
        .unwrap();
    assert_eq!(upcoming_only.len(), 1);
    assert_eq!(upcoming_only[0].id, upcoming.id);

    let updated = db
        .update_product(
            &published.id,
            &ProductPatch {
                price: Some("$2/mo".to_owned()),
                features: Some(None),
                ..ProductPatch::default()
            },
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.price, "$2/mo");
    assert_eq!(updated.name, "Test Product");
    assert!(updated.features.is_none());

    assert!(db.delete_product(&published.id).await.unwrap());
    assert!(!db.delete_product(&published.id).await.unwrap());
    assert!(db.delete_product(&upcoming.id).await.unwrap());
}

#[tokio::test]
#[serial]
async fn test_chat_session_round_trip() {
    let Some(db) = connect().await else { return };
    let mut session = ChatSession {
        id: Uuid::new_v4().to_string(),
        messages: vec![ChatMessage::user("hello")],
        created_at: Utc::now(),
    };
    db.save_chat_session(&session).await.unwrap();

    session.messages.push(ChatMessage::assistant("hi there"));
    db.save_chat_session(&session).await.unwrap();

    let loaded = db.get_chat_session(&session.id).await.unwrap().unwrap();
    assert_eq!(loaded.messages, session.messages);
}
