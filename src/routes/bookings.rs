// ABOUTME: Route handlers for demo booking lead capture
// ABOUTME: Public POST records a request; the admin-gated GET lists them
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

use super::json_body;
use crate::database_plugins::SiteStore;
use crate::errors::AppResult;
use crate::middleware::require_admin;
use crate::resources::ServerResources;
use crate::validation::{validate_booking, BookingPayload};
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::middleware;
use axum::routing::{get, post};
use axum::{Json, Router};
use site_core::models::DemoBooking;
use std::sync::Arc;
use tracing::info;

/// Demo booking routes implementation
pub struct BookingRoutes;

impl BookingRoutes {
    /// Create the booking routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        let admin = middleware::from_fn_with_state(resources.clone(), require_admin);
        Router::new()
            .route(
                "/api/demo-bookings",
                post(Self::create_booking).merge(get(Self::list_bookings).route_layer(admin)),
            )
            .with_state(resources)
    }

    async fn create_booking(
        State(resources): State<Arc<ServerResources>>,
        payload: Result<Json<BookingPayload>, JsonRejection>,
    ) -> AppResult<Json<DemoBooking>> {
        let booking = validate_booking(&json_body(payload)?)?;
        let booking = resources.database.create_demo_booking(booking).await?;
        info!(
            booking.id = %booking.id,
            booking.product = %booking.product_interest,
            "Demo booking captured"
        );
        Ok(Json(booking))
    }

    async fn list_bookings(
        State(resources): State<Arc<ServerResources>>,
    ) -> AppResult<Json<Vec<DemoBooking>>> {
        Ok(Json(resources.database.list_demo_bookings().await?))
    }
}
