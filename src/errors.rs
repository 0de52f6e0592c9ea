// ABOUTME: Re-export of the unified error types from site-core
// ABOUTME: Lets handlers write crate::errors::AppError regardless of where it lives
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! Unified error handling. See [`site_core::errors`].

pub use site_core::errors::{
    AppError, AppResult, ErrorCode, ErrorResponse, ErrorResponseDetails, FieldError,
};
