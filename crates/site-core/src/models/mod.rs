// ABOUTME: Domain models for storefront content and lead capture
// ABOUTME: Re-exports hero, pricing, product, booking and chat session types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! Domain models
//!
//! All models serialize with camelCase keys, which is the shape the storefront
//! client consumes.

/// Hero copy, pricing tiers and products
pub mod content;

/// Demo bookings and chat sessions
pub mod leads;

pub use content::{
    HeroContent, HeroUpdate, NewProduct, PricingTier, Product, ProductFilter, ProductPatch,
    ProductStatus,
};
pub use leads::{ChatMessage, ChatRole, ChatSession, DemoBooking, NewDemoBooking};
