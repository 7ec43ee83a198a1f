// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Random page fetcher.

use anyhow::Result;
use std::time::Duration;
use url::Url;

const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Outbound client for the random-page target.
pub struct PageFetcher {
    client: reqwest::Client,
    target: Url,
}

impl PageFetcher {
    /// Build a fetcher for the given target.
    pub fn new(target: Url) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(FETCH_TIMEOUT).build()?;
        Ok(Self { client, target })
    }

    /// Resolve one random page: HEAD the target, follow redirects, and
    /// report the final URL. The response body is discarded.
    pub async fn pull(&self) -> Result<String> {
        let response = self.client.head(self.target.clone()).send().await?;
        Ok(response.url().to_string())
    }
}
