// ABOUTME: Main library entry point for the AI Solutions storefront API
// ABOUTME: Serves hero copy, pricing, products, demo bookings and the chat widget over REST
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

#![deny(unsafe_code)]

//! # AI Solutions Site
//!
//! Backend for a marketing site selling AI products. It serves the editable
//! hero banner, pricing tiers and product catalog, accepts demo bookings, and
//! relays chat widget messages to a Gemini-backed persona.
//!
//! ## Persistence
//!
//! With `DATABASE_URL` set, content lives in `PostgreSQL`. Without it the
//! server runs on a seeded in-memory store that is lost on restart.
//!
//! ## Architecture
//!
//! - **Routes**: one router per resource, merged in [`routes::build_router`]
//! - **Validation**: request payloads are checked before any store call
//! - **Database plugins**: the [`database_plugins::SiteStore`] trait with memory and `PostgreSQL` backends
//! - **Client**: [`client::SiteClient`] fetches content with a static fallback
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use ai_solutions_site::config::environment::ServerConfig;
//! use ai_solutions_site::errors::AppResult;
//!
//! fn main() -> AppResult<()> {
//!     let config = ServerConfig::from_env()?;
//!     println!("Storefront API configured with port: HTTP={}", config.http_port);
//!     Ok(())
//! }
//! ```

/// Admin bearer token verification
pub mod auth;

/// Data-fetch client with bundled fallback content
pub mod client;

/// Environment configuration
pub mod config;

/// Application constants and defaults
pub mod constants;

/// Persistence backends
pub mod database_plugins;

/// Unified error handling
pub mod errors;

/// Chat model providers
pub mod llm;

/// Structured logging setup
pub mod logging;

/// HTTP middleware (admin guard, CORS, request tracing)
pub mod middleware;

/// Shared resources injected into handlers
pub mod resources;

/// HTTP routes
pub mod routes;

/// Thumbnail upload handling
pub mod uploads;

/// Request payload validation
pub mod validation;
