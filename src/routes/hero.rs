// ABOUTME: Route handlers for the hero banner singleton
// ABOUTME: GET returns the current copy; PUT replaces title and subtitle
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

use super::json_body;
use crate::database_plugins::SiteStore;
use crate::errors::AppResult;
use crate::resources::ServerResources;
use crate::validation::{validate_hero_update, HeroPayload};
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use site_core::models::HeroContent;
use std::sync::Arc;
use tracing::info;

/// Hero routes implementation
pub struct HeroRoutes;

impl HeroRoutes {
    /// Create the hero routes
    ///
    /// The update route is not admin-gated.
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/hero", get(Self::get_hero).put(Self::update_hero))
            .with_state(resources)
    }

    async fn get_hero(
        State(resources): State<Arc<ServerResources>>,
    ) -> AppResult<Json<HeroContent>> {
        Ok(Json(resources.database.get_hero().await?))
    }

    async fn update_hero(
        State(resources): State<Arc<ServerResources>>,
        payload: Result<Json<HeroPayload>, JsonRejection>,
    ) -> AppResult<Json<HeroContent>> {
        let update = validate_hero_update(&json_body(payload)?)?;
        let hero = resources.database.update_hero(&update).await?;
        info!(hero.id = %hero.id, "Hero content updated");
        Ok(Json(hero))
    }
}
