// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Discord Pull Endpoint
//!
//! A webhook endpoint that receives signed Discord interaction events and
//! serves the `/pull` command: one random Wikipedia page per (guild, user)
//! per calendar day.
//!
//! ## Configuration
//!
//! Configuration is loaded from environment variables:
//!
//! - `BIND_ADDR`: Server bind address (default: 0.0.0.0:8080)
//! - `DISCORD_APPLICATION_ID`: Application id shown on the hello page (required)
//! - `DISCORD_PUBLIC_KEY`: Hex-encoded Ed25519 public key (required)
//! - `RANDOM_PAGE_URL`: Random-page target queried with HEAD
//!   (default: https://en.wikipedia.org/wiki/Special:Random)

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use url::Url;

use discord_wiki_pull::{
    config::Config,
    fetcher::PageFetcher,
    handlers::{router, AppState},
    limiter::DailyLimiter,
    verify::SignatureVerifier,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer().json())
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    // Load configuration
    let config = Config::from_env()?;
    info!(
        bind_addr = %config.bind_addr,
        application_id = %config.application_id,
        random_page_url = %config.random_page_url,
        "Starting Discord pull endpoint"
    );

    // Create application state
    let verifier = SignatureVerifier::from_hex(&config.public_key)
        .context("DISCORD_PUBLIC_KEY is not a valid Ed25519 public key")?;
    let target =
        Url::parse(&config.random_page_url).context("RANDOM_PAGE_URL is not a valid URL")?;
    let fetcher = PageFetcher::new(target).context("failed to build outbound HTTP client")?;

    let state = Arc::new(AppState {
        config: config.clone(),
        verifier,
        limiter: DailyLimiter::new(),
        fetcher,
    });

    // Spawn cleanup task
    let cleanup_state = state.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(3600));
        loop {
            interval.tick().await;
            cleanup_state.limiter.cleanup().await;
        }
    });

    // Build router
    let app = router(state).layer(TraceLayer::new_for_http());

    // Start server
    let addr: SocketAddr = config.bind_addr.parse()?;
    let listener = TcpListener::bind(addr).await?;
    info!(addr = %addr, "Server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
