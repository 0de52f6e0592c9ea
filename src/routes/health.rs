// ABOUTME: Health check route for service monitoring
// ABOUTME: Reports liveness, the persistence mode and the build version
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

use crate::resources::ServerResources;
use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Health payload
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthStatus {
    /// Always `ok` when the process is serving
    pub status: String,
    /// `database` or `memory`
    pub persistence: String,
    /// Crate version
    pub version: String,
}

/// Health routes implementation
pub struct HealthRoutes;

impl HealthRoutes {
    /// Create the health route
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/health", get(Self::health))
            .with_state(resources)
    }

    async fn health(State(resources): State<Arc<ServerResources>>) -> Json<HealthStatus> {
        Json(HealthStatus {
            status: "ok".to_owned(),
            persistence: resources.database.persistence().to_owned(),
            version: env!("CARGO_PKG_VERSION").to_owned(),
        })
    }
}
