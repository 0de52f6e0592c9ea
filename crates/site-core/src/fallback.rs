// ABOUTME: Bundled default storefront content
// ABOUTME: Seeds the in-memory store and backs the client when the API is unreachable
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! Default content
//!
//! The same records are used in two places: the server seeds its in-memory store
//! with them when no database is configured, and the client data-fetch layer
//! substitutes them when the live API cannot be reached.

use crate::constants::HERO_ID;
use crate::models::{HeroContent, PricingTier, Product, ProductStatus};
use chrono::{DateTime, Utc};

/// Default hero headline
pub const DEFAULT_HERO_TITLE: &str = "Transform Your Business with AI Solutions";

/// Default hero supporting copy
pub const DEFAULT_HERO_SUBTITLE: &str = "Discover powerful AI tools designed for local businesses. From intelligent chatbots to automated recruiting systems, we have the solutions to streamline your operations.";

/// Default pricing tiers as `(id, name, price)`
pub const DEFAULT_PRICING: [(&str, &str, &str); 3] = [
    ("starter", "Starter", "$49/mo"),
    ("growth", "Growth", "$149/mo"),
    ("enterprise", "Enterprise", "Contact us"),
];

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_owned()).collect()
}

/// The default hero record
#[must_use]
pub fn default_hero(now: DateTime<Utc>) -> HeroContent {
    HeroContent {
        id: HERO_ID.to_owned(),
        title: DEFAULT_HERO_TITLE.to_owned(),
        subtitle: DEFAULT_HERO_SUBTITLE.to_owned(),
        updated_at: now,
    }
}

/// The default pricing tiers in display order
#[must_use]
pub fn default_pricing(now: DateTime<Utc>) -> Vec<PricingTier> {
    DEFAULT_PRICING
        .iter()
        .map(|(id, name, price)| PricingTier {
            id: (*id).to_owned(),
            name: (*name).to_owned(),
            price: (*price).to_owned(),
            updated_at: now,
        })
        .collect()
}

/// The default product catalogue: two published products and one upcoming
#[must_use]
pub fn default_products(now: DateTime<Utc>) -> Vec<Product> {
    vec![
        Product {
            id: "ai-chatbot".to_owned(),
            name: "AI Customer Support Chatbot".to_owned(),
            description: "Deploy a multilingual AI chatbot that understands customer intents, integrates with your knowledge base, and escalates seamlessly to humans when needed.".to_owned(),
            price: "$199/mo".to_owned(),
            tag: Some("featured".to_owned()),
            status: ProductStatus::Published,
            thumbnail: None,
            features: Some(strings(&[
                "Instant web & WhatsApp integration",
                "Custom knowledge base ingestion",
                "Detailed analytics dashboard",
            ])),
            created_at: now,
        },
        Product {
            id: "recruiting-assistant".to_owned(),
            name: "AI Recruiting Assistant".to_owned(),
            description: "Automate candidate sourcing, screening, and interview scheduling with an AI assistant trained on your hiring criteria.".to_owned(),
            price: "$299/mo".to_owned(),
            tag: Some("hr".to_owned()),
            status: ProductStatus::Published,
            thumbnail: None,
            features: Some(strings(&[
                "Automated resume parsing",
                "Conversational candidate screening",
                "ATS integrations",
            ])),
            created_at: now,
        },
        Product {
            id: "ai-analytics".to_owned(),
            name: "AI Insights & Analytics".to_owned(),
            description: "Connect your data sources and get AI generated insights, weekly executive summaries, and anomaly alerts.".to_owned(),
            price: "$499/mo".to_owned(),
            tag: Some("analytics".to_owned()),
            status: ProductStatus::Upcoming,
            thumbnail: None,
            features: Some(strings(&[
                "Unified business dashboards",
                "Automated KPI commentary",
                "Forecasting & anomaly detection",
            ])),
            created_at: now,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalogue_has_one_upcoming_product() {
        let products = default_products(Utc::now());
        assert_eq!(products.len(), 3);
        let upcoming: Vec<_> = products
            .iter()
            .filter(|p| p.status == ProductStatus::Upcoming)
            .collect();
        assert_eq!(upcoming.len(), 1);
        assert_eq!(upcoming[0].id, "ai-analytics");
    }

    #[test]
    fn test_default_pricing_ids_are_stable() {
        let ids: Vec<_> = default_pricing(Utc::now())
            .into_iter()
            .map(|tier| tier.id)
            .collect();
        assert_eq!(ids, ["starter", "growth", "enterprise"]);
    }
}
