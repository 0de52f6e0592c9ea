// ABOUTME: Typed HTTP client for the storefront API with graceful degradation
// ABOUTME: Falls back to the bundled default content when the API cannot be reached
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! Site data-fetch client
//!
//! The `hero`, `pricing` and `products` calls never fail: on a transport error,
//! a non-2xx status or an undecodable body they return the same defaults the
//! server seeds its in-memory store with. Each resource logs its first fallback
//! only, so a page polling a dead API does not flood the log.

use crate::constants::{defaults, env_vars, limits};
use crate::errors::{AppError, AppResult};
use chrono::Utc;
use reqwest::Client;
use serde::de::DeserializeOwned;
use site_core::fallback::{default_hero, default_pricing, default_products};
use site_core::models::{HeroContent, PricingTier, Product, ProductFilter};
use std::env;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tracing::{debug, warn};

const SERVICE: &str = "Site API";

/// Which resources have already fallen back
#[derive(Debug, Default)]
struct FallbackLog {
    hero: AtomicBool,
    pricing: AtomicBool,
    products: AtomicBool,
}

impl FallbackLog {
    fn record(flag: &AtomicBool, resource: &str, error: &AppError) {
        if !flag.swap(true, Ordering::Relaxed) {
            warn!(resource, error = %error, "Site API unavailable, using bundled defaults");
        }
    }
}

/// Client for the storefront API
#[derive(Debug)]
pub struct SiteClient {
    base_url: String,
    client: Client,
    fallbacks: FallbackLog,
}

impl SiteClient {
    /// Create a client for the API rooted at `base_url`
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is blank or the HTTP client cannot be built
    pub fn new(base_url: impl Into<String>) -> AppResult<Self> {
        let base_url = base_url.into().trim().trim_end_matches('/').to_owned();
        if base_url.is_empty() {
            return Err(AppError::config("API base URL must not be empty"));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(limits::HTTP_CLIENT_TIMEOUT_SECS))
            .build()
            .map_err(|e| AppError::internal(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            base_url,
            client,
            fallbacks: FallbackLog::default(),
        })
    }

    /// Create a client from `SITE_API_BASE_URL`
    ///
    /// # Errors
    ///
    /// Same conditions as [`Self::new`]
    pub fn from_env() -> AppResult<Self> {
        Self::new(
            env::var(env_vars::SITE_API_BASE_URL)
                .unwrap_or_else(|_| defaults::SITE_API_BASE_URL.to_owned()),
        )
    }

    /// The configured API root
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Join an absolute API path onto the base URL
    ///
    /// # Errors
    ///
    /// Returns an error if `path` does not start with `/`
    pub fn with_api_base(&self, path: &str) -> AppResult<String> {
        if !path.starts_with('/') {
            return Err(AppError::invalid_input(format!(
                "API path must start with '/': {path}"
            )));
        }
        Ok(format!("{}{path}", self.base_url))
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> AppResult<T> {
        let url = self.with_api_base(path)?;
        debug!(url = %url, "Fetching site data");

        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| AppError::external_service(SERVICE, format!("{url}: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::external_service(
                SERVICE,
                format!("{url} returned {status}"),
            ));
        }

        response.json::<T>().await.map_err(|e| {
            AppError::external_service(SERVICE, format!("Undecodable body from {url}: {e}"))
        })
    }

    /// Fetch the hero copy
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, non-2xx status or a bad body
    pub async fn try_hero(&self) -> AppResult<HeroContent> {
        self.get_json("/api/hero", &[]).await
    }

    /// Fetch the pricing tiers
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, non-2xx status or a bad body
    pub async fn try_pricing(&self) -> AppResult<Vec<PricingTier>> {
        self.get_json("/api/pricing", &[]).await
    }

    /// Fetch products matching `filter`
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, non-2xx status or a bad body
    pub async fn try_products(&self, filter: &ProductFilter) -> AppResult<Vec<Product>> {
        let mut query = Vec::new();
        if let Some(status) = filter.status {
            query.push(("status", status.as_str()));
        }
        if let Some(tag) = filter.tag.as_deref() {
            query.push(("tag", tag));
        }
        self.get_json("/api/products", &query).await
    }

    /// Hero copy, or the default when the API is unavailable
    pub async fn hero(&self) -> HeroContent {
        match self.try_hero().await {
            Ok(hero) => hero,
            Err(e) => {
                FallbackLog::record(&self.fallbacks.hero, "hero", &e);
                default_hero(Utc::now())
            }
        }
    }

    /// Pricing tiers, or the defaults when the API is unavailable
    pub async fn pricing(&self) -> Vec<PricingTier> {
        match self.try_pricing().await {
            Ok(tiers) => tiers,
            Err(e) => {
                FallbackLog::record(&self.fallbacks.pricing, "pricing", &e);
                default_pricing(Utc::now())
            }
        }
    }

    /// Products matching `filter`, or the filtered defaults when the API is unavailable
    pub async fn products(&self, filter: &ProductFilter) -> Vec<Product> {
        match self.try_products(filter).await {
            Ok(products) => products,
            Err(e) => {
                FallbackLog::record(&self.fallbacks.products, "products", &e);
                filter.apply(default_products(Utc::now()))
            }
        }
    }
}
