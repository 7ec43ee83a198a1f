// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Discord interactions endpoint for the daily `/pull` command.
//!
//! Receives signed interaction webhooks from Discord, verifies the Ed25519
//! signature over the literal request bytes, and answers a single
//! application command:
//!
//! - `PING` handshake → `PONG`
//! - `/pull` → one random Wikipedia page per (guild, user) per calendar day
//!
//! Rate-limit state lives in process memory, scoped guild → user, and is
//! evicted once a recorded pull can no longer affect a decision. The
//! signature check fails closed: requests missing either signature header
//! are rejected before any cryptography runs.

pub mod config;
pub mod fetcher;
pub mod handlers;
pub mod interaction;
pub mod limiter;
pub mod verify;

pub use config::Config;
pub use fetcher::PageFetcher;
pub use limiter::DailyLimiter;
pub use verify::{SignatureError, SignatureVerifier};
