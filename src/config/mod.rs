// ABOUTME: Configuration management module for the storefront server
// ABOUTME: Exposes environment-driven server configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! Configuration module
//!
//! All configuration comes from environment variables (optionally loaded from a
//! `.env` file). See [`environment::ServerConfig::from_env`].

/// Environment and server configuration
pub mod environment;
