// ABOUTME: Route module organization for the storefront HTTP API
// ABOUTME: Assembles resource routers, static uploads and the tracing, request-id and CORS layers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! Route module
//!
//! Each resource module holds its route table and thin handlers that validate,
//! call the store, and shape the response.

/// Demo booking routes
pub mod bookings;
/// Chat widget routes
pub mod chat;
/// Health check routes
pub mod health;
/// Hero banner routes
pub mod hero;
/// Pricing tier routes
pub mod pricing;
/// Product routes
pub mod products;

pub use bookings::BookingRoutes;
pub use chat::ChatRoutes;
pub use health::HealthRoutes;
pub use hero::HeroRoutes;
pub use pricing::PricingRoutes;
pub use products::ProductRoutes;

use crate::constants::uploads;
use crate::errors::AppError;
use crate::middleware::{make_request_span, setup_cors};
use crate::resources::ServerResources;
use axum::body::Body;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::{Response, Uri};
use axum::{Json, Router};
use std::sync::Arc;
use std::time::Duration;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::Span;

/// Convert a JSON extractor failure into a 400
pub(crate) fn json_rejection(rejection: JsonRejection) -> AppError {
    AppError::invalid_input(format!("Invalid JSON body: {}", rejection.body_text()))
}

/// Convert a query string extractor failure into a 400
pub(crate) fn query_rejection(rejection: QueryRejection) -> AppError {
    AppError::invalid_input(format!("Invalid query string: {}", rejection.body_text()))
}

/// Unwrap an optional-rejection JSON body
pub(crate) fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    payload.map(|Json(body)| body).map_err(json_rejection)
}

async fn route_not_found(uri: Uri) -> AppError {
    AppError::not_found(format!("Route {}", uri.path()))
}

/// Build the complete application router
pub fn build_router(resources: &Arc<ServerResources>) -> Router {
    let trace = TraceLayer::new_for_http()
        .make_span_with(make_request_span)
        .on_response(|response: &Response<Body>, latency: Duration, span: &Span| {
            span.record("status_code", response.status().as_u16());
            tracing::info!(
                status = response.status().as_u16(),
                latency_ms = latency.as_millis(),
                "Request completed"
            );
        });

    Router::new()
        .merge(HealthRoutes::routes(resources.clone()))
        .merge(HeroRoutes::routes(resources.clone()))
        .merge(PricingRoutes::routes(resources.clone()))
        .merge(ProductRoutes::routes(resources.clone()))
        .merge(BookingRoutes::routes(resources.clone()))
        .merge(ChatRoutes::routes(resources.clone()))
        .nest_service(
            uploads::PUBLIC_PATH,
            ServeDir::new(resources.uploads.directory()),
        )
        .fallback(route_not_found)
        .layer(setup_cors(&resources.config.cors))
        .layer(trace)
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}
