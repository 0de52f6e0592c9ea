// ABOUTME: Admin authorization guard for mutating product routes
// ABOUTME: Rejects requests without a valid bearer token before the body is read
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! Admin Authorization Guard
//!
//! Installed with `route_layer` so it runs ahead of any body extractor: an
//! unauthenticated request gets 401 whatever its payload, and nothing is
//! uploaded or stored.

use crate::auth::bearer_token;
use crate::errors::AppError;
use crate::resources::ServerResources;
use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use http::header::AUTHORIZATION;
use std::sync::Arc;
use tracing::warn;

/// Require a valid admin bearer token
pub async fn require_admin(
    State(resources): State<Arc<ServerResources>>,
    request: Request,
    next: Next,
) -> Response {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    let Some(header) = header else {
        warn!(
            method = %request.method(),
            path = %request.uri().path(),
            "Admin request without credentials"
        );
        return AppError::auth_required().into_response();
    };

    if !resources.authenticator.verify(bearer_token(header)) {
        warn!(
            method = %request.method(),
            path = %request.uri().path(),
            "Admin request with invalid credentials"
        );
        return AppError::auth_invalid("Unauthorized").into_response();
    }

    next.run(request).await
}
