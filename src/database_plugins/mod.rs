// ABOUTME: Persistence abstraction for storefront content, demo bookings and chat sessions
// ABOUTME: One SiteStore contract with in-memory and PostgreSQL implementations chosen at boot
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

use crate::errors::AppResult;
use async_trait::async_trait;
use site_core::models::{
    ChatSession, DemoBooking, HeroContent, HeroUpdate, NewDemoBooking, NewProduct, PricingTier,
    Product, ProductFilter, ProductPatch,
};

pub mod factory;
pub mod memory;

#[cfg(feature = "postgresql")]
pub mod postgres;

/// Core persistence trait
///
/// Both backends implement this so handlers never branch on the persistence mode.
/// "Not found" is reported through `Option`/`bool` return values; errors are
/// reserved for storage failures.
#[async_trait]
pub trait SiteStore: Send + Sync {
    // ================================
    // Hero
    // ================================

    /// Get the hero record, creating the default copy if none exists
    async fn get_hero(&self) -> AppResult<HeroContent>;

    /// Merge the supplied fields into the hero record and stamp `updated_at`
    async fn update_hero(&self, update: &HeroUpdate) -> AppResult<HeroContent>;

    // ================================
    // Pricing
    // ================================

    /// All pricing tiers in display order
    async fn list_pricing(&self) -> AppResult<Vec<PricingTier>>;

    /// Replace the price of an existing tier; `None` when the id is unknown
    async fn update_pricing(&self, id: &str, price: &str) -> AppResult<Option<PricingTier>>;

    // ================================
    // Products
    // ================================

    /// Products passing `filter`, oldest first
    async fn list_products(&self, filter: &ProductFilter) -> AppResult<Vec<Product>>;

    /// Single product lookup
    async fn get_product(&self, id: &str) -> AppResult<Option<Product>>;

    /// Insert a product with a generated id and creation time
    async fn create_product(&self, product: NewProduct) -> AppResult<Product>;

    /// Apply a partial update; `None` when the id is unknown
    async fn update_product(&self, id: &str, patch: &ProductPatch) -> AppResult<Option<Product>>;

    /// Remove a product; `false` when nothing was removed
    async fn delete_product(&self, id: &str) -> AppResult<bool>;

    // ================================
    // Leads
    // ================================

    /// Record a demo request with status `pending`
    async fn create_demo_booking(&self, booking: NewDemoBooking) -> AppResult<DemoBooking>;

    /// All demo requests, oldest first
    async fn list_demo_bookings(&self) -> AppResult<Vec<DemoBooking>>;

    /// Load a chat session transcript
    async fn get_chat_session(&self, id: &str) -> AppResult<Option<ChatSession>>;

    /// Insert or replace a chat session transcript
    async fn save_chat_session(&self, session: &ChatSession) -> AppResult<()>;
}
