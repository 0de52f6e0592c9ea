// ABOUTME: Storefront content models - hero singleton, pricing tiers and products
// ABOUTME: Includes filter and partial-update types with their merge semantics
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

use crate::constants::product_status;
use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The hero banner copy. Exactly one exists at any time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroContent {
    /// Record identifier
    pub id: String,
    /// Headline
    pub title: String,
    /// Supporting copy under the headline
    pub subtitle: String,
    /// Last modification time
    pub updated_at: DateTime<Utc>,
}

/// Partial hero update; `None` leaves a field unchanged
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeroUpdate {
    /// New headline
    pub title: Option<String>,
    /// New supporting copy
    pub subtitle: Option<String>,
}

impl HeroUpdate {
    /// Merge the supplied fields into `hero` and stamp `updated_at`
    pub fn apply_to(&self, hero: &mut HeroContent, now: DateTime<Utc>) {
        if let Some(title) = &self.title {
            hero.title.clone_from(title);
        }
        if let Some(subtitle) = &self.subtitle {
            hero.subtitle.clone_from(subtitle);
        }
        hero.updated_at = now;
    }
}

/// One named price point
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingTier {
    /// Stable identifier, never reassigned
    pub id: String,
    /// Display label
    pub name: String,
    /// Free-form price such as `$49/mo` or `Contact us`
    pub price: String,
    /// Last modification time
    pub updated_at: DateTime<Utc>,
}

/// Publication state of a product
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductStatus {
    /// Live on the storefront
    #[default]
    Published,
    /// Announced, not yet available
    Upcoming,
}

impl ProductStatus {
    /// Wire and database representation
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Published => product_status::PUBLISHED,
            Self::Upcoming => product_status::UPCOMING,
        }
    }
}

impl fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProductStatus {
    type Err = AppError;

    fn from_str(s: &str) -> AppResult<Self> {
        match s {
            product_status::PUBLISHED => Ok(Self::Published),
            product_status::UPCOMING => Ok(Self::Upcoming),
            other => Err(AppError::invalid_input(format!(
                "Invalid status '{other}'. Expected 'published' or 'upcoming'"
            ))),
        }
    }
}

/// A product listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Generated unique identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Marketing description
    pub description: String,
    /// Free-form price string
    pub price: String,
    /// Optional short label
    pub tag: Option<String>,
    /// Publication state
    pub status: ProductStatus,
    /// URL or path of the thumbnail image
    pub thumbnail: Option<String>,
    /// Ordered feature bullet points
    pub features: Option<Vec<String>>,
    /// Creation time
    pub created_at: DateTime<Utc>,
}

/// Listing filter. Absent fields impose no constraint; present ones are AND-combined.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    /// Exact status match
    pub status: Option<ProductStatus>,
    /// Case-insensitive substring match against the product tag
    pub tag: Option<String>,
}

impl ProductFilter {
    /// Whether `product` passes this filter
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        if let Some(status) = self.status {
            if product.status != status {
                return false;
            }
        }
        if let Some(tag) = &self.tag {
            let needle = tag.to_lowercase();
            let haystack = product.tag.as_deref().unwrap_or_default().to_lowercase();
            if !haystack.contains(&needle) {
                return false;
            }
        }
        true
    }

    /// Keep only the products passing this filter, preserving order
    #[must_use]
    pub fn apply(&self, products: Vec<Product>) -> Vec<Product> {
        products.into_iter().filter(|p| self.matches(p)).collect()
    }
}

/// Validated data for a new product
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    /// Display name
    pub name: String,
    /// Marketing description
    pub description: String,
    /// Free-form price string
    pub price: String,
    /// Optional short label
    pub tag: Option<String>,
    /// Publication state
    pub status: ProductStatus,
    /// Thumbnail reference
    pub thumbnail: Option<String>,
    /// Feature bullet points
    pub features: Option<Vec<String>>,
}

impl NewProduct {
    /// Materialize the product with its generated id and creation time
    #[must_use]
    pub fn into_product(self, id: String, created_at: DateTime<Utc>) -> Product {
        Product {
            id,
            name: self.name,
            description: self.description,
            price: self.price,
            tag: self.tag,
            status: self.status,
            thumbnail: self.thumbnail,
            features: self.features,
            created_at,
        }
    }
}

/// Partial product update.
///
/// Outer `None` means "leave unchanged". For nullable columns `Some(None)` clears
/// the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductPatch {
    /// New name
    pub name: Option<String>,
    /// New description
    pub description: Option<String>,
    /// New price
    pub price: Option<String>,
    /// New status
    pub status: Option<ProductStatus>,
    /// New tag, or `Some(None)` to clear it
    pub tag: Option<Option<String>>,
    /// New thumbnail, or `Some(None)` to clear it
    pub thumbnail: Option<Option<String>>,
    /// New feature list, or `Some(None)` to clear it
    pub features: Option<Option<Vec<String>>>,
}

impl ProductPatch {
    /// True when the patch would not change anything
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.status.is_none()
            && self.tag.is_none()
            && self.thumbnail.is_none()
            && self.features.is_none()
    }

    /// Shallow-merge the supplied fields into `product`
    pub fn apply_to(&self, product: &mut Product) {
        if let Some(name) = &self.name {
            product.name.clone_from(name);
        }
        if let Some(description) = &self.description {
            product.description.clone_from(description);
        }
        if let Some(price) = &self.price {
            product.price.clone_from(price);
        }
        if let Some(status) = self.status {
            product.status = status;
        }
        if let Some(tag) = &self.tag {
            product.tag.clone_from(tag);
        }
        if let Some(thumbnail) = &self.thumbnail {
            product.thumbnail.clone_from(thumbnail);
        }
        if let Some(features) = &self.features {
            product.features.clone_from(features);
        }
    }
}
