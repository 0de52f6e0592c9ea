// ABOUTME: Server binary for the AI Solutions storefront API
// ABOUTME: Loads configuration, selects the persistence backend and serves the HTTP routes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! # Storefront API Server Binary
//!
//! Starts the REST API on `HOST:PORT` (default `0.0.0.0:5000`).

use ai_solutions_site::{
    config::environment::ServerConfig, database_plugins::factory::Database, logging,
    resources::ServerResources, routes::build_router,
};
use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info, warn};

#[derive(Parser)]
#[command(name = "ai-solutions-server")]
#[command(about = "AI Solutions storefront API - hero, pricing, products, bookings and chat")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    port: Option<u16>,

    /// Override bind address
    #[arg(long)]
    host: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Logging reads its settings from the environment, so load .env first
    dotenvy::dotenv().ok();
    logging::init_from_env()?;

    let mut config = ServerConfig::from_env()?;
    if let Some(port) = args.port {
        config.http_port = port;
    }
    if let Some(host) = args.host {
        config.host = host;
    }
    info!("{}", config.summary());

    let database = Database::connect(&config.database)
        .await
        .context("Failed to initialize persistence")?;
    info!("Database initialized successfully: {}", database.backend_info());

    let resources = Arc::new(ServerResources::new(database, config.clone())?);
    resources.uploads.ensure_directory().await?;
    let router = build_router(&resources);

    let address = format!("{}:{}", config.host, config.http_port);
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {address}"))?;

    display_available_endpoints(&config);
    info!("Server listening on http://{address}");

    if let Err(e) = axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("Server error: {}", e);
        return Err(e.into());
    }

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received, draining connections");
}

#[allow(clippy::cognitive_complexity)]
fn display_available_endpoints(config: &ServerConfig) {
    let base = format!("http://{}:{}", config.host, config.http_port);
    info!("=== Available API Endpoints ===");
    info!("   Health:         GET    {base}/api/health");
    info!("   Hero:           GET    {base}/api/hero");
    info!("   Hero Update:    PUT    {base}/api/hero");
    info!("   Pricing:        GET    {base}/api/pricing");
    info!("   Pricing Update: PUT    {base}/api/pricing/{{id}}");
    info!("   Products:       GET    {base}/api/products?status=&tag=");
    info!("   Product Create: POST   {base}/api/products (admin)");
    info!("   Product Update: PUT    {base}/api/products/{{id}} (admin)");
    info!("   Product Delete: DELETE {base}/api/products/{{id}} (admin)");
    info!("   Demo Booking:   POST   {base}/api/demo-bookings");
    info!("   Bookings List:  GET    {base}/api/demo-bookings (admin)");
    info!("   Chat:           POST   {base}/api/chat");
    info!("   Thumbnails:     GET    {base}/uploads/{{file}}");
    info!("=== End of Endpoint List ===");
}
