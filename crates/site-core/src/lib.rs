// ABOUTME: Core types and constants for the AI Solutions storefront
// ABOUTME: Foundation crate with error handling, domain models and bundled fallback content
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

#![deny(unsafe_code)]

//! # Site Core
//!
//! Foundation crate providing shared types for the AI Solutions storefront. The
//! server and the client data-fetch layer both depend on it, so the wire shapes
//! and the bundled default content can never drift apart.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError` and `ErrorCode`
//! - **models**: Hero copy, pricing tiers, products, demo bookings and chat sessions
//! - **fallback**: Deterministic default content used when no database is configured
//! - **constants**: Shared literal values

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Domain models shared by the server and the client
pub mod models;

/// Bundled default content (hero, pricing tiers, products)
pub mod fallback;

/// Shared constants
pub mod constants;
