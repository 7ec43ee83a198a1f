// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! HTTP surface and command dispatch.
//!
//! `POST /` is the interaction webhook: signature check, then dispatch on
//! interaction type and command name. `GET /` is a diagnostic hello page.
//! Everything else is a 404.

use crate::config::Config;
use crate::fetcher::PageFetcher;
use crate::interaction::{Interaction, InteractionResponse, InteractionType, PULL_COMMAND};
use crate::limiter::DailyLimiter;
use crate::verify::SignatureVerifier;
use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, error, info};

/// Header carrying the hex-encoded Ed25519 signature.
pub const SIGNATURE_HEADER: &str = "x-signature-ed25519";
/// Header carrying the timestamp covered by the signature.
pub const TIMESTAMP_HEADER: &str = "x-signature-timestamp";

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub verifier: SignatureVerifier,
    pub limiter: DailyLimiter,
    pub fetcher: PageFetcher,
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: &'static str,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

/// Build the service router.
///
/// Unsupported methods on `/` fall through to the 404 handler rather than
/// axum's default 405.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(hello).post(interactions).fallback(not_found))
        .route("/health", get(health))
        .route("/healthz", get(health))
        .fallback(not_found)
        .with_state(state)
}

/// Hello page revealing the configured application id.
pub async fn hello(State(state): State<Arc<AppState>>) -> String {
    format!("👋 {}", state.config.application_id)
}

/// Health check endpoint.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "discord-wiki-pull",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Interaction webhook endpoint.
///
/// The body is captured once as raw bytes and reused for both signature
/// verification and parsing; re-serializing it would break the signature.
pub async fn interactions(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|value| value.to_str().ok());
    let timestamp = headers
        .get(TIMESTAMP_HEADER)
        .and_then(|value| value.to_str().ok());

    if let Err(err) = state.verifier.verify(&body, signature, timestamp) {
        debug!(error = %err, "rejecting request with bad signature");
        return (StatusCode::UNAUTHORIZED, "Bad request signature.").into_response();
    }

    let interaction: Interaction = match serde_json::from_slice(&body) {
        Ok(interaction) => interaction,
        Err(err) => {
            error!(error = %err, "signed request carried an undecodable interaction");
            return unknown_type();
        }
    };

    match interaction.kind {
        InteractionType::Ping => Json(InteractionResponse::pong()).into_response(),
        InteractionType::ApplicationCommand => dispatch_command(&state, interaction).await,
        InteractionType::Unknown(other) => {
            error!(interaction_type = other, "unknown interaction type");
            unknown_type()
        }
    }
}

async fn dispatch_command(state: &AppState, interaction: Interaction) -> Response {
    let name = interaction.command_name();
    if !name.eq_ignore_ascii_case(PULL_COMMAND) {
        error!(command = name, "unknown command name");
        return unknown_type();
    }

    // A guild-scoped command; DM invocations carry neither field
    let (guild_id, user_id) = match (interaction.guild_id, interaction.member) {
        (Some(guild_id), Some(member)) => (guild_id, member.user.id),
        _ => {
            error!("pull command without guild or member context");
            return unknown_type();
        }
    };

    pull(state, &guild_id, &user_id).await
}

/// The pull flow: limit check, HEAD fetch, record, respond.
async fn pull(state: &AppState, guild_id: &str, user_id: &str) -> Response {
    if state.limiter.has_reached_daily_limit(guild_id, user_id).await {
        info!(guild_id, user_id, "daily pull already used");
        return Json(InteractionResponse::message(format!(
            "You have already pulled a Wikipedia page today, <@{user_id}>. Try again tomorrow!"
        )))
        .into_response();
    }

    match state.fetcher.pull().await {
        Ok(resolved) => {
            state.limiter.record_pull(guild_id, user_id).await;
            info!(guild_id, user_id, url = %resolved, "pull resolved");
            Json(InteractionResponse::message(format!(
                "<@{user_id}> pulled\n{resolved}"
            )))
            .into_response()
        }
        // A failed fetch must not consume the day's allowance, so no pull
        // is recorded on this path.
        Err(err) => {
            error!(guild_id, user_id, error = %err, "random page fetch failed");
            Json(InteractionResponse::message(format!(
                "The wiki could not be reached, <@{user_id}>. Your pull was not used, try again later."
            )))
            .into_response()
        }
    }
}

fn unknown_type() -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: "Unknown Type",
        }),
    )
        .into_response()
}

/// Generic 404 for unmatched routes and methods.
pub async fn not_found() -> Response {
    (StatusCode::NOT_FOUND, "Not Found.").into_response()
}
