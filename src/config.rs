// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Configuration for the Discord pull endpoint.
//!
//! Loaded from environment variables. The two Discord values are required
//! secrets; everything else carries a default.

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Configuration for the interactions endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server bind address (default: 0.0.0.0:8080)
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Discord application id, shown on the diagnostic hello page
    pub application_id: String,

    /// Hex-encoded Ed25519 public key of the Discord application
    pub public_key: String,

    /// Target queried with HEAD to resolve one random page
    #[serde(default = "default_random_page_url")]
    pub random_page_url: String,
}

fn default_bind_addr() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_random_page_url() -> String {
    "https://en.wikipedia.org/wiki/Special:Random".to_string()
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// `DISCORD_APPLICATION_ID` and `DISCORD_PUBLIC_KEY` must be set;
    /// `BIND_ADDR` and `RANDOM_PAGE_URL` fall back to their defaults.
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| default_bind_addr()),
            application_id: std::env::var("DISCORD_APPLICATION_ID")
                .context("DISCORD_APPLICATION_ID must be set")?,
            public_key: std::env::var("DISCORD_PUBLIC_KEY")
                .context("DISCORD_PUBLIC_KEY must be set")?,
            random_page_url: std::env::var("RANDOM_PAGE_URL")
                .unwrap_or_else(|_| default_random_page_url()),
        })
    }
}
