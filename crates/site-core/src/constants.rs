// ABOUTME: Shared literal values for the storefront domain
// ABOUTME: Status strings, default copy identifiers and canned chat replies
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

/// Product status values as stored and serialized
pub mod product_status {
    /// Product is live on the storefront
    pub const PUBLISHED: &str = "published";
    /// Product is announced but not yet available
    pub const UPCOMING: &str = "upcoming";
}

/// Status assigned to every newly captured demo booking
pub const BOOKING_STATUS_PENDING: &str = "pending";

/// Identifier of the hero singleton in the fallback store
pub const HERO_ID: &str = "hero";

/// Reply used when the language model returns no text
pub const EMPTY_CHAT_REPLY: &str = "Sorry, I could not generate a response.";
