// ABOUTME: In-memory SiteStore used when no database is configured
// ABOUTME: Seeded with the bundled defaults; each resource sits behind its own RwLock
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! Fallback store
//!
//! Contents live for the lifetime of the process only. Locks are per logical
//! resource, so a write to products never waits on a chat session update.

use super::SiteStore;
use crate::errors::AppResult;
use async_trait::async_trait;
use chrono::Utc;
use site_core::constants::BOOKING_STATUS_PENDING;
use site_core::fallback::{default_hero, default_pricing, default_products};
use site_core::models::{
    ChatSession, DemoBooking, HeroContent, HeroUpdate, NewDemoBooking, NewProduct, PricingTier,
    Product, ProductFilter, ProductPatch,
};
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Process-local store
pub struct MemoryStore {
    hero: RwLock<HeroContent>,
    pricing: RwLock<Vec<PricingTier>>,
    products: RwLock<Vec<Product>>,
    bookings: RwLock<Vec<DemoBooking>>,
    chat_sessions: RwLock<HashMap<String, ChatSession>>,
}

impl MemoryStore {
    /// Create a store holding the default hero, pricing tiers and products
    #[must_use]
    pub fn seeded() -> Self {
        let now = Utc::now();
        Self {
            hero: RwLock::new(default_hero(now)),
            pricing: RwLock::new(default_pricing(now)),
            products: RwLock::new(default_products(now)),
            bookings: RwLock::new(Vec::new()),
            chat_sessions: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::seeded()
    }
}

#[async_trait]
impl SiteStore for MemoryStore {
    async fn get_hero(&self) -> AppResult<HeroContent> {
        Ok(self.hero.read().await.clone())
    }

    async fn update_hero(&self, update: &HeroUpdate) -> AppResult<HeroContent> {
        let mut hero = self.hero.write().await;
        update.apply_to(&mut hero, Utc::now());
        Ok(hero.clone())
    }

    async fn list_pricing(&self) -> AppResult<Vec<PricingTier>> {
        Ok(self.pricing.read().await.clone())
    }

    async fn update_pricing(&self, id: &str, price: &str) -> AppResult<Option<PricingTier>> {
        let mut tiers = self.pricing.write().await;
        Ok(tiers.iter_mut().find(|tier| tier.id == id).map(|tier| {
            price.clone_into(&mut tier.price);
            tier.updated_at = Utc::now();
            tier.clone()
        }))
    }

    async fn list_products(&self, filter: &ProductFilter) -> AppResult<Vec<Product>> {
        let products = self.products.read().await;
        Ok(products
            .iter()
            .filter(|product| filter.matches(product))
            .cloned()
            .collect())
    }

    async fn get_product(&self, id: &str) -> AppResult<Option<Product>> {
        let products = self.products.read().await;
        Ok(products.iter().find(|product| product.id == id).cloned())
    }

    async fn create_product(&self, product: NewProduct) -> AppResult<Product> {
        let product = product.into_product(Uuid::new_v4().to_string(), Utc::now());
        self.products.write().await.push(product.clone());
        Ok(product)
    }

    async fn update_product(&self, id: &str, patch: &ProductPatch) -> AppResult<Option<Product>> {
        let mut products = self.products.write().await;
        Ok(products
            .iter_mut()
            .find(|product| product.id == id)
            .map(|product| {
                patch.apply_to(product);
                product.clone()
            }))
    }

    async fn delete_product(&self, id: &str) -> AppResult<bool> {
        let mut products = self.products.write().await;
        let before = products.len();
        products.retain(|product| product.id != id);
        Ok(products.len() < before)
    }

    async fn create_demo_booking(&self, booking: NewDemoBooking) -> AppResult<DemoBooking> {
        let record = DemoBooking {
            id: Uuid::new_v4().to_string(),
            full_name: booking.full_name,
            email: booking.email,
            company: booking.company,
            product_interest: booking.product_interest,
            status: BOOKING_STATUS_PENDING.to_owned(),
            created_at: Utc::now(),
        };
        self.bookings.write().await.push(record.clone());
        Ok(record)
    }

    async fn list_demo_bookings(&self) -> AppResult<Vec<DemoBooking>> {
        Ok(self.bookings.read().await.clone())
    }

    async fn get_chat_session(&self, id: &str) -> AppResult<Option<ChatSession>> {
        Ok(self.chat_sessions.read().await.get(id).cloned())
    }

    async fn save_chat_session(&self, session: &ChatSession) -> AppResult<()> {
        self.chat_sessions
            .write()
            .await
            .insert(session.id.clone(), session.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use site_core::models::{ChatMessage, ProductStatus};

    fn new_product(name: &str) -> NewProduct {
        NewProduct {
            name: name.to_owned(),
            description: "Does things".to_owned(),
            price: "$10".to_owned(),
            tag: None,
            status: ProductStatus::default(),
            thumbnail: None,
            features: None,
        }
    }

    #[tokio::test]
    async fn test_seeded_store_matches_defaults() {
        let store = MemoryStore::seeded();
        assert_eq!(store.list_pricing().await.unwrap().len(), 3);
        assert_eq!(
            store
                .list_products(&ProductFilter::default())
                .await
                .unwrap()
                .len(),
            3
        );
        assert_eq!(store.get_hero().await.unwrap().id, "hero");
    }

    #[tokio::test]
    async fn test_create_assigns_unique_ids() {
        let store = MemoryStore::seeded();
        let a = store.create_product(new_product("A")).await.unwrap();
        let b = store.create_product(new_product("B")).await.unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!(a.status, ProductStatus::Published);
        assert_eq!(store.get_product(&b.id).await.unwrap().unwrap().name, "B");
    }

    #[tokio::test]
    async fn test_update_unknown_ids_report_none() {
        let store = MemoryStore::seeded();
        assert!(store.update_pricing("platinum", "$1").await.unwrap().is_none());
        let patch = ProductPatch {
            name: Some("X".to_owned()),
            ..ProductPatch::default()
        };
        assert!(store.update_product("missing", &patch).await.unwrap().is_none());
        assert!(!store.delete_product("missing").await.unwrap());
    }

    #[tokio::test]
    async fn test_pricing_update_changes_only_price() {
        let store = MemoryStore::seeded();
        let tier = store.update_pricing("growth", "$199/mo").await.unwrap().unwrap();
        assert_eq!(tier.name, "Growth");
        assert_eq!(tier.price, "$199/mo");

        let starter = store
            .list_pricing()
            .await
            .unwrap()
            .into_iter()
            .find(|t| t.id == "starter")
            .unwrap();
        assert_eq!(starter.price, "$49/mo");
    }

    #[tokio::test]
    async fn test_chat_session_is_replaced_on_save() {
        let store = MemoryStore::seeded();
        let mut session = ChatSession {
            id: "s1".to_owned(),
            messages: vec![ChatMessage::user("hi")],
            created_at: Utc::now(),
        };
        store.save_chat_session(&session).await.unwrap();
        session.messages.push(ChatMessage::assistant("hello"));
        store.save_chat_session(&session).await.unwrap();

        let loaded = store.get_chat_session("s1").await.unwrap().unwrap();
        assert_eq!(loaded.messages.len(), 2);
    }
}
