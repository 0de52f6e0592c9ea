// ABOUTME: HTTP middleware for admin authorization, CORS and request tracing
// ABOUTME: Layers applied by the router around the resource handlers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

pub mod admin_guard;
pub mod cors;
pub mod tracing;

pub use admin_guard::require_admin;
pub use cors::setup_cors;
pub use self::tracing::{make_request_span, REQUEST_ID_HEADER};
