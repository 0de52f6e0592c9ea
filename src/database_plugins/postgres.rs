// ABOUTME: PostgreSQL SiteStore implementation for database-backed deployments
// ABOUTME: Creates the schema idempotently at startup and seeds default pricing tiers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! PostgreSQL database implementation
//!
//! Implements the same contract as [`super::memory::MemoryStore`]. Tag filtering
//! uses `ILIKE` with wildcards escaped, which gives the same literal,
//! case-insensitive substring match as the in-memory filter.

use super::SiteStore;
use crate::config::environment::{DatabaseConfig, DatabaseSsl};
use crate::constants::defaults;
use crate::errors::{AppError, AppResult};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use site_core::constants::BOOKING_STATUS_PENDING;
use site_core::fallback::{default_hero, DEFAULT_PRICING};
use site_core::models::{
    ChatMessage, ChatSession, DemoBooking, HeroContent, HeroUpdate, NewDemoBooking, NewProduct,
    PricingTier, Product, ProductFilter, ProductPatch,
};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions, PgRow, PgSslMode};
use sqlx::types::Json;
use sqlx::{PgPool, Postgres, QueryBuilder, Row};
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info};
use uuid::Uuid;

const PRODUCT_COLUMNS: &str =
    "id, name, description, price, tag, status, thumbnail, features, created_at";

/// PostgreSQL-backed store
#[derive(Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Connect, run migrations and seed pricing
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot be parsed, the server is unreachable, or
    /// schema creation fails.
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        let url = config
            .url
            .as_deref()
            .ok_or_else(|| AppError::config_missing("DATABASE_URL is not set"))?;

        let ssl_mode = match config.ssl {
            DatabaseSsl::Disable => PgSslMode::Disable,
            DatabaseSsl::Prefer => PgSslMode::Prefer,
            DatabaseSsl::Require => PgSslMode::Require,
        };
        let options = PgConnectOptions::from_str(url)
            .map_err(|e| AppError::config(format!("Invalid DATABASE_URL: {e}")))?
            .ssl_mode(ssl_mode);

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(
                defaults::DATABASE_CONNECT_TIMEOUT_SECS,
            ))
            .connect_with(options)
            .await
            .map_err(|e| {
                AppError::database(format!("Failed to connect to PostgreSQL: {e}")).with_source(e)
            })?;

        let store = Self { pool };
        store.migrate().await?;
        store.seed_pricing().await?;
        Ok(store)
    }

    /// Create all tables if they do not exist
    ///
    /// # Errors
    ///
    /// Returns an error if any DDL statement fails
    pub async fn migrate(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS hero_section (
                id TEXT PRIMARY KEY,
                title TEXT NOT NULL,
                subtitle TEXT NOT NULL,
                updated_at TIMESTAMPTZ NOT NULL DEFAULT CURRENT_TIMESTAMP
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        // sort_order keeps display order stable across updates
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS pricing (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                price TEXT NOT NULL,
                sort_order INTEGER NOT NULL DEFAULT 0,
                updated_at TIMESTAMPTZ NOT NULL DEFAULT CURRENT_TIMESTAMP
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS products (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                description TEXT NOT NULL,
                price TEXT NOT NULL,
                tag TEXT,
                status TEXT NOT NULL DEFAULT 'published' CHECK (status IN ('published', 'upcoming')),
                thumbnail TEXT,
                features TEXT[],
                created_at TIMESTAMPTZ NOT NULL DEFAULT CURRENT_TIMESTAMP
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS demo_bookings (
                id TEXT PRIMARY KEY,
                full_name TEXT NOT NULL,
                email TEXT NOT NULL,
                company TEXT,
                product_interest TEXT NOT NULL,
                status TEXT NOT NULL DEFAULT 'pending',
                created_at TIMESTAMPTZ NOT NULL DEFAULT CURRENT_TIMESTAMP
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS chat_sessions (
                id TEXT PRIMARY KEY,
                messages JSONB NOT NULL DEFAULT '[]'::jsonb,
                created_at TIMESTAMPTZ NOT NULL DEFAULT CURRENT_TIMESTAMP,
                updated_at TIMESTAMPTZ NOT NULL DEFAULT CURRENT_TIMESTAMP
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_products_status ON products(status)")
            .execute(&self.pool)
            .await?;

        debug!("PostgreSQL schema ensured");
        Ok(())
    }

    async fn seed_pricing(&self) -> AppResult<()> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM pricing")
            .fetch_one(&self.pool)
            .await?;
        if count > 0 {
            return Ok(());
        }

        let now = Utc::now();
        for (position, (id, name, price)) in (0_i32..).zip(DEFAULT_PRICING) {
            sqlx::query(
                "INSERT INTO pricing (id, name, price, sort_order, updated_at)
                 VALUES ($1, $2, $3, $4, $5) ON CONFLICT (id) DO NOTHING",
            )
            .bind(id)
            .bind(name)
            .bind(price)
            .bind(position)
            .bind(now)
            .execute(&self.pool)
            .await?;
        }
        info!("Seeded default pricing tiers");
        Ok(())
    }

    async fn first_hero(&self) -> AppResult<Option<HeroContent>> {
        let row = sqlx::query(
            "SELECT id, title, subtitle, updated_at FROM hero_section
             ORDER BY updated_at ASC, id ASC LIMIT 1",
        )
        .fetch_optional(&self.pool)
        .await?;
        row.as_ref().map(hero_from_row).transpose()
    }
}

/// Escape `LIKE` metacharacters so the needle matches literally
fn like_pattern(needle: &str) -> String {
    let mut escaped = String::with_capacity(needle.len() + 2);
    escaped.push('%');
    for c in needle.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

fn hero_from_row(row: &PgRow) -> AppResult<HeroContent> {
    Ok(HeroContent {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        subtitle: row.try_get("subtitle")?,
        updated_at: row.try_get("updated_at")?,
    })
}

fn pricing_from_row(row: &PgRow) -> AppResult<PricingTier> {
    Ok(PricingTier {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        price: row.try_get("price")?,
        updated_at: row.try_get("updated_at")?,
    })
}

fn product_from_row(row: &PgRow) -> AppResult<Product> {
    let status: String = row.try_get("status")?;
    Ok(Product {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        description: row.try_get("description")?,
        price: row.try_get("price")?,
        tag: row.try_get("tag")?,
        status: status.parse()?,
        thumbnail: row.try_get("thumbnail")?,
        features: row.try_get("features")?,
        created_at: row.try_get("created_at")?,
    })
}

fn booking_from_row(row: &PgRow) -> AppResult<DemoBooking> {
    Ok(DemoBooking {
        id: row.try_get("id")?,
        full_name: row.try_get("full_name")?,
        email: row.try_get("email")?,
        company: row.try_get("company")?,
        product_interest: row.try_get("product_interest")?,
        status: row.try_get("status")?,
        created_at: row.try_get("created_at")?,
    })
}

#[async_trait]
impl SiteStore for PostgresStore {
    async fn get_hero(&self) -> AppResult<HeroContent> {
        if let Some(hero) = self.first_hero().await? {
            return Ok(hero);
        }

        let hero = default_hero(Utc::now());
        sqlx::query(
            "INSERT INTO hero_section (id, title, subtitle, updated_at)
             VALUES ($1, $2, $3, $4) ON CONFLICT (id) DO NOTHING",
        )
        .bind(&hero.id)
        .bind(&hero.title)
        .bind(&hero.subtitle)
        .bind(hero.updated_at)
        .execute(&self.pool)
        .await?;
        info!("Inserted default hero content");

        // A concurrent first read may have won the insert
        Ok(self.first_hero().await?.unwrap_or(hero))
    }

    async fn update_hero(&self, update: &HeroUpdate) -> AppResult<HeroContent> {
        let current = self.get_hero().await?;
        let row = sqlx::query(
            "UPDATE hero_section
             SET title = COALESCE($2, title), subtitle = COALESCE($3, subtitle), updated_at = $4
             WHERE id = $1
             RETURNING id, title, subtitle, updated_at",
        )
        .bind(&current.id)
        .bind(update.title.as_deref())
        .bind(update.subtitle.as_deref())
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => hero_from_row(&row),
            None => Err(AppError::database(format!(
                "Hero record '{}' disappeared during update",
                current.id
            ))),
        }
    }

    async fn list_pricing(&self) -> AppResult<Vec<PricingTier>> {
        let rows = sqlx::query(
            "SELECT id, name, price, updated_at FROM pricing ORDER BY sort_order ASC, id ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(pricing_from_row).collect()
    }

    async fn update_pricing(&self, id: &str, price: &str) -> AppResult<Option<PricingTier>> {
        let row = sqlx::query(
            "UPDATE pricing SET price = $2, updated_at = $3 WHERE id = $1
             RETURNING id, name, price, updated_at",
        )
        .bind(id)
        .bind(price)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;
        row.as_ref().map(pricing_from_row).transpose()
    }

    async fn list_products(&self, filter: &ProductFilter) -> AppResult<Vec<Product>> {
        let mut query: QueryBuilder<Postgres> =
            QueryBuilder::new(format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE TRUE"));

        if let Some(status) = filter.status {
            query.push(" AND status = ").push_bind(status.as_str());
        }
        if let Some(tag) = &filter.tag {
            query
                .push(" AND tag ILIKE ")
                .push_bind(like_pattern(tag))
                .push(r" ESCAPE '\'");
        }
        query.push(" ORDER BY created_at ASC, id ASC");

        let rows = query.build().fetch_all(&self.pool).await?;
        rows.iter().map(product_from_row).collect()
    }

    async fn get_product(&self, id: &str) -> AppResult<Option<Product>> {
        let row = sqlx::query(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        row.as_ref().map(product_from_row).transpose()
    }

    async fn create_product(&self, product: NewProduct) -> AppResult<Product> {
        let product = product.into_product(Uuid::new_v4().to_string(), Utc::now());
        sqlx::query(
            "INSERT INTO products (id, name, description, price, tag, status, thumbnail, features, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
        )
        .bind(&product.id)
        .bind(&product.name)
        .bind(&product.description)
        .bind(&product.price)
        .bind(product.tag.as_deref())
        .bind(product.status.as_str())
        .bind(product.thumbnail.as_deref())
        .bind(product.features.clone())
        .bind(product.created_at)
        .execute(&self.pool)
        .await?;
        Ok(product)
    }

    async fn update_product(&self, id: &str, patch: &ProductPatch) -> AppResult<Option<Product>> {
        if patch.is_empty() {
            return self.get_product(id).await;
        }

        let mut query: QueryBuilder<Postgres> = QueryBuilder::new("UPDATE products SET ");
        {
            let mut set = query.separated(", ");
            if let Some(name) = &patch.name {
                set.push("name = ").push_bind_unseparated(name.clone());
            }
            if let Some(description) = &patch.description {
                set.push("description = ")
                    .push_bind_unseparated(description.clone());
            }
            if let Some(price) = &patch.price {
                set.push("price = ").push_bind_unseparated(price.clone());
            }
            if let Some(status) = patch.status {
                set.push("status = ").push_bind_unseparated(status.as_str());
            }
            if let Some(tag) = &patch.tag {
                set.push("tag = ").push_bind_unseparated(tag.clone());
            }
            if let Some(thumbnail) = &patch.thumbnail {
                set.push("thumbnail = ")
                    .push_bind_unseparated(thumbnail.clone());
            }
            if let Some(features) = &patch.features {
                set.push("features = ")
                    .push_bind_unseparated(features.clone());
            }
        }
        query
            .push(" WHERE id = ")
            .push_bind(id.to_owned())
            .push(format!(" RETURNING {PRODUCT_COLUMNS}"));

        let row = query.build().fetch_optional(&self.pool).await?;
        row.as_ref().map(product_from_row).transpose()
    }

    async fn delete_product(&self, id: &str) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn create_demo_booking(&self, booking: NewDemoBooking) -> AppResult<DemoBooking> {
        let row = sqlx::query(
            "INSERT INTO demo_bookings (id, full_name, email, company, product_interest, status, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING id, full_name, email, company, product_interest, status, created_at",
        )
        .bind(Uuid::new_v4().to_string())
        .bind(&booking.full_name)
        .bind(&booking.email)
        .bind(booking.company.as_deref())
        .bind(&booking.product_interest)
        .bind(BOOKING_STATUS_PENDING)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;
        booking_from_row(&row)
    }

    async fn list_demo_bookings(&self) -> AppResult<Vec<DemoBooking>> {
        let rows = sqlx::query(
            "SELECT id, full_name, email, company, product_interest, status, created_at
             FROM demo_bookings ORDER BY created_at ASC, id ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(booking_from_row).collect()
    }

    async fn get_chat_session(&self, id: &str) -> AppResult<Option<ChatSession>> {
        let row = sqlx::query("SELECT id, messages, created_at FROM chat_sessions WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(|row| -> AppResult<ChatSession> {
            let Json(messages): Json<Vec<ChatMessage>> = row.try_get("messages")?;
            let created_at: DateTime<Utc> = row.try_get("created_at")?;
            Ok(ChatSession {
                id: row.try_get("id")?,
                messages,
                created_at,
            })
        })
        .transpose()
    }

    async fn save_chat_session(&self, session: &ChatSession) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO chat_sessions (id, messages, created_at, updated_at)
             VALUES ($1, $2, $3, $4)
             ON CONFLICT (id) DO UPDATE SET messages = EXCLUDED.messages, updated_at = EXCLUDED.updated_at",
        )
        .bind(&session.id)
        .bind(Json(&session.messages))
        .bind(session.created_at)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use site_core::constants::HERO_ID;

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("hr"), "%hr%");
        assert_eq!(like_pattern("50%_off"), r"%50\%\_off%");
        assert_eq!(like_pattern(r"a\b"), r"%a\\b%");
    }

    #[test]
    fn test_hero_id_constant_is_used_for_default() {
        assert_eq!(default_hero(Utc::now()).id, HERO_ID);
    }
}
