// ABOUTME: Test helper modules for integration tests
// ABOUTME: Shared HTTP request and response utilities
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

pub mod axum_test;
