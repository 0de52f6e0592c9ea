// ABOUTME: Route handlers for pricing tiers
// ABOUTME: Lists tiers in display order and updates the price of an existing tier
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

use super::json_body;
use crate::database_plugins::SiteStore;
use crate::errors::{AppError, AppResult};
use crate::resources::ServerResources;
use crate::validation::{validate_price_update, PricingPayload};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::routing::{get, put};
use axum::{Json, Router};
use site_core::models::PricingTier;
use std::sync::Arc;
use tracing::info;

/// Pricing routes implementation
pub struct PricingRoutes;

impl PricingRoutes {
    /// Create the pricing routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/pricing", get(Self::list_pricing))
            .route("/api/pricing/:id", put(Self::update_pricing))
            .with_state(resources)
    }

    async fn list_pricing(
        State(resources): State<Arc<ServerResources>>,
    ) -> AppResult<Json<Vec<PricingTier>>> {
        Ok(Json(resources.database.list_pricing().await?))
    }

    /// Only the price changes; id and name are immutable here
    async fn update_pricing(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<String>,
        payload: Result<Json<PricingPayload>, JsonRejection>,
    ) -> AppResult<Json<PricingTier>> {
        let price = validate_price_update(&json_body(payload)?)?;
        let tier = resources
            .database
            .update_pricing(&id, &price)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Pricing tier '{id}'")))?;

        info!(tier.id = %tier.id, tier.price = %tier.price, "Pricing tier updated");
        Ok(Json(tier))
    }
}
