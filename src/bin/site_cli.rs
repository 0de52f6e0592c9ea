// ABOUTME: Command-line reader for the storefront API content
// ABOUTME: Prints hero, pricing or product data as JSON, falling back to bundled defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org
//!
//! Usage:
//! ```bash
//! # Hero copy from the default API (http://127.0.0.1:5000)
//! site-cli hero
//!
//! # Upcoming products tagged "analytics"
//! site-cli products --status upcoming --tag analytics
//!
//! # Fail instead of printing defaults when the API is down
//! site-cli --base-url https://api.example.com --strict pricing
//! ```

use ai_solutions_site::client::SiteClient;
use ai_solutions_site::logging::{LogFormat, LoggingConfig};
use anyhow::Result;
use clap::{Parser, Subcommand};
use serde::Serialize;
use site_core::models::{ProductFilter, ProductStatus};

#[derive(Parser)]
#[command(
    name = "site-cli",
    about = "AI Solutions storefront content reader",
    long_about = "Fetches hero copy, pricing tiers and products from the storefront API and prints them as JSON."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// API base URL (defaults to SITE_API_BASE_URL, then http://127.0.0.1:5000)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Report API failures instead of printing bundled defaults
    #[arg(long, global = true)]
    strict: bool,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Hero banner copy
    Hero,
    /// Pricing tiers
    Pricing,
    /// Product catalog
    Products {
        /// Only `published` or `upcoming` products
        #[arg(long)]
        status: Option<String>,

        /// Case-insensitive tag substring
        #[arg(long)]
        tag: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        LoggingConfig {
            level: "debug".into(),
            format: LogFormat::Compact,
            ..LoggingConfig::default()
        }
        .init()?;
    }

    let client = match cli.base_url {
        Some(url) => SiteClient::new(url)?,
        None => SiteClient::from_env()?,
    };

    match cli.command {
        Command::Hero => {
            let hero = if cli.strict {
                client.try_hero().await?
            } else {
                client.hero().await
            };
            print_json(&hero)
        }
        Command::Pricing => {
            let tiers = if cli.strict {
                client.try_pricing().await?
            } else {
                client.pricing().await
            };
            print_json(&tiers)
        }
        Command::Products { status, tag } => {
            let filter = ProductFilter {
                status: status.as_deref().map(str::parse::<ProductStatus>).transpose()?,
                tag,
            };
            let products = if cli.strict {
                client.try_products(&filter).await?
            } else {
                client.products(&filter).await
            };
            print_json(&products)
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
