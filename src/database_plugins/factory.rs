// ABOUTME: Persistence mode selection and dispatch over the SiteStore backends
// ABOUTME: Chooses memory or PostgreSQL once at startup from the database configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! Database factory
//!
//! An absent `DATABASE_URL` is an intentional fallback to memory. A configured
//! database that cannot be reached is a startup failure, never a silent fallback.

use super::memory::MemoryStore;
use super::SiteStore;
use crate::config::environment::DatabaseConfig;
use crate::errors::AppResult;
use async_trait::async_trait;
use site_core::models::{
    ChatSession, DemoBooking, HeroContent, HeroUpdate, NewDemoBooking, NewProduct, PricingTier,
    Product, ProductFilter, ProductPatch,
};
use tracing::{info, warn};

#[cfg(feature = "postgresql")]
use super::postgres::PostgresStore;

/// Persistence backend selected at boot
pub enum Database {
    /// Seeded process-local collections
    Memory(MemoryStore),
    /// Relational store
    #[cfg(feature = "postgresql")]
    PostgreSQL(PostgresStore),
}

impl Database {
    /// Select and initialize the backend for `config`
    ///
    /// # Errors
    ///
    /// Returns an error if a database is configured but the connection or
    /// schema setup fails, or if `PostgreSQL` support is not compiled in.
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        if !config.is_enabled() {
            warn!(
                "DATABASE_URL not set: hero, pricing, products, bookings and chat sessions are served from memory"
            );
            return Ok(Self::memory());
        }

        #[cfg(feature = "postgresql")]
        {
            info!("Initializing PostgreSQL store");
            let store = PostgresStore::connect(config).await?;
            info!("PostgreSQL store initialized successfully");
            Ok(Self::PostgreSQL(store))
        }

        #[cfg(not(feature = "postgresql"))]
        {
            let err_msg = "PostgreSQL support not enabled. Enable the 'postgresql' feature flag.";
            tracing::error!("{}", err_msg);
            Err(crate::errors::AppError::config(err_msg))
        }
    }

    /// A freshly seeded in-memory backend
    #[must_use]
    pub fn memory() -> Self {
        Self::Memory(MemoryStore::seeded())
    }

    /// Whether a relational store backs this instance
    #[must_use]
    pub const fn is_database_enabled(&self) -> bool {
        match self {
            Self::Memory(_) => false,
            #[cfg(feature = "postgresql")]
            Self::PostgreSQL(_) => true,
        }
    }

    /// Short persistence label reported by the health endpoint
    #[must_use]
    pub const fn persistence(&self) -> &'static str {
        if self.is_database_enabled() {
            "database"
        } else {
            "memory"
        }
    }

    /// Get a descriptive string for the current database backend
    #[must_use]
    pub const fn backend_info(&self) -> &'static str {
        match self {
            Self::Memory(_) => "In-memory (fallback, not persisted across restarts)",
            #[cfg(feature = "postgresql")]
            Self::PostgreSQL(_) => "PostgreSQL",
        }
    }
}

#[async_trait]
impl SiteStore for Database {
    async fn get_hero(&self) -> AppResult<HeroContent> {
        match self {
            Self::Memory(db) => db.get_hero().await,
            #[cfg(feature = "postgresql")]
            Self::PostgreSQL(db) => db.get_hero().await,
        }
    }

    async fn update_hero(&self, update: &HeroUpdate) -> AppResult<HeroContent> {
        match self {
            Self::Memory(db) => db.update_hero(update).await,
            #[cfg(feature = "postgresql")]
            Self::PostgreSQL(db) => db.update_hero(update).await,
        }
    }

    async fn list_pricing(&self) -> AppResult<Vec<PricingTier>> {
        match self {
            Self::Memory(db) => db.list_pricing().await,
            #[cfg(feature = "postgresql")]
            Self::PostgreSQL(db) => db.list_pricing().await,
        }
    }

    async fn update_pricing(&self, id: &str, price: &str) -> AppResult<Option<PricingTier>> {
        match self {
            Self::Memory(db) => db.update_pricing(id, price).await,
            #[cfg(feature = "postgresql")]
            Self::PostgreSQL(db) => db.update_pricing(id, price).await,
        }
    }

    async fn list_products(&self, filter: &ProductFilter) -> AppResult<Vec<Product>> {
        match self {
            Self::Memory(db) => db.list_products(filter).await,
            #[cfg(feature = "postgresql")]
            Self::PostgreSQL(db) => db.list_products(filter).await,
        }
    }

    async fn get_product(&self, id: &str) -> AppResult<Option<Product>> {
        match self {
            Self::Memory(db) => db.get_product(id).await,
            #[cfg(feature = "postgresql")]
            Self::PostgreSQL(db) => db.get_product(id).await,
        }
    }

    async fn create_product(&self, product: NewProduct) -> AppResult<Product> {
        match self {
            Self::Memory(db) => db.create_product(product).await,
            #[cfg(feature = "postgresql")]
            Self::PostgreSQL(db) => db.create_product(product).await,
        }
    }

    async fn update_product(&self, id: &str, patch: &ProductPatch) -> AppResult<Option<Product>> {
        match self {
            Self::Memory(db) => db.update_product(id, patch).await,
            #[cfg(feature = "postgresql")]
            Self::PostgreSQL(db) => db.update_product(id, patch).await,
        }
    }

    async fn delete_product(&self, id: &str) -> AppResult<bool> {
        match self {
            Self::Memory(db) => db.delete_product(id).await,
            #[cfg(feature = "postgresql")]
            Self::PostgreSQL(db) => db.delete_product(id).await,
        }
    }

    async fn create_demo_booking(&self, booking: NewDemoBooking) -> AppResult<DemoBooking> {
        match self {
            Self::Memory(db) => db.create_demo_booking(booking).await,
            #[cfg(feature = "postgresql")]
            Self::PostgreSQL(db) => db.create_demo_booking(booking).await,
        }
    }

    async fn list_demo_bookings(&self) -> AppResult<Vec<DemoBooking>> {
        match self {
            Self::Memory(db) => db.list_demo_bookings().await,
            #[cfg(feature = "postgresql")]
            Self::PostgreSQL(db) => db.list_demo_bookings().await,
        }
    }

    async fn get_chat_session(&self, id: &str) -> AppResult<Option<ChatSession>> {
        match self {
            Self::Memory(db) => db.get_chat_session(id).await,
            #[cfg(feature = "postgresql")]
            Self::PostgreSQL(db) => db.get_chat_session(id).await,
        }
    }

    async fn save_chat_session(&self, session: &ChatSession) -> AppResult<()> {
        match self {
            Self::Memory(db) => db.save_chat_session(session).await,
            #[cfg(feature = "postgresql")]
            Self::PostgreSQL(db) => db.save_chat_session(session).await,
        }
    }
}
