// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Wire model for Discord interactions.
//!
//! Discord tags interaction and callback kinds with integers on the wire;
//! both enums convert through `u8` so serde stays on plain derives.

use serde::{Deserialize, Serialize};

/// Name of the single application command this endpoint serves.
/// Matched case-insensitively against `data.name`.
pub const PULL_COMMAND: &str = "pull";

/// Inbound interaction kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(from = "u8")]
pub enum InteractionType {
    /// Webhook handshake issued while configuring the endpoint
    Ping,
    /// A user invoked a slash command
    ApplicationCommand,
    /// Anything this endpoint does not dispatch
    Unknown(u8),
}

impl From<u8> for InteractionType {
    fn from(value: u8) -> Self {
        match value {
            1 => Self::Ping,
            2 => Self::ApplicationCommand,
            other => Self::Unknown(other),
        }
    }
}

/// An inbound interaction event, deserialized from the verified body.
#[derive(Debug, Deserialize)]
pub struct Interaction {
    #[serde(rename = "type")]
    pub kind: InteractionType,

    /// Command payload, present on `ApplicationCommand` interactions
    #[serde(default)]
    pub data: Option<CommandData>,

    /// Guild the interaction originated from; absent for DM invocations
    #[serde(default)]
    pub guild_id: Option<String>,

    /// Invoking guild member; absent for DM invocations
    #[serde(default)]
    pub member: Option<GuildMember>,
}

impl Interaction {
    /// Declared command name, or `""` when no command payload was sent.
    pub fn command_name(&self) -> &str {
        self.data.as_ref().map(|data| data.name.as_str()).unwrap_or_default()
    }
}

#[derive(Debug, Deserialize)]
pub struct CommandData {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct GuildMember {
    pub user: User,
}

#[derive(Debug, Deserialize)]
pub struct User {
    pub id: String,
}

/// Outbound interaction callback kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(into = "u8")]
pub enum CallbackType {
    Pong,
    ChannelMessageWithSource,
}

impl From<CallbackType> for u8 {
    fn from(value: CallbackType) -> u8 {
        match value {
            CallbackType::Pong => 1,
            CallbackType::ChannelMessageWithSource => 4,
        }
    }
}

/// Response returned to Discord for a valid interaction.
#[derive(Debug, Serialize)]
pub struct InteractionResponse {
    #[serde(rename = "type")]
    pub kind: CallbackType,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<ResponseData>,
}

#[derive(Debug, Serialize)]
pub struct ResponseData {
    pub content: String,
}

impl InteractionResponse {
    /// Handshake acknowledgment.
    pub fn pong() -> Self {
        Self {
            kind: CallbackType::Pong,
            data: None,
        }
    }

    /// Channel message shown in the invoking channel.
    pub fn message(content: impl Into<String>) -> Self {
        Self {
            kind: CallbackType::ChannelMessageWithSource,
            data: Some(ResponseData {
                content: content.into(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_command_interaction() {
        let interaction: Interaction = serde_json::from_str(
            r#"{
                "type": 2,
                "data": { "name": "Pull" },
                "guild_id": "guild-1",
                "member": { "user": { "id": "user-1" } }
            }"#,
        )
        .unwrap();

        assert_eq!(interaction.kind, InteractionType::ApplicationCommand);
        assert_eq!(interaction.command_name(), "Pull");
        assert_eq!(interaction.guild_id.as_deref(), Some("guild-1"));
        assert_eq!(interaction.member.unwrap().user.id, "user-1");
    }

    #[test]
    fn test_deserialize_ping_without_payload() {
        let interaction: Interaction = serde_json::from_str(r#"{"type":1}"#).unwrap();

        assert_eq!(interaction.kind, InteractionType::Ping);
        assert!(interaction.data.is_none());
        assert_eq!(interaction.command_name(), "");
    }

    #[test]
    fn test_unknown_type_preserved() {
        let interaction: Interaction = serde_json::from_str(r#"{"type":3}"#).unwrap();

        assert_eq!(interaction.kind, InteractionType::Unknown(3));
    }

    #[test]
    fn test_serialize_pong() {
        let json = serde_json::to_value(InteractionResponse::pong()).unwrap();

        assert_eq!(json, serde_json::json!({ "type": 1 }));
    }

    #[test]
    fn test_serialize_channel_message() {
        let json =
            serde_json::to_value(InteractionResponse::message("<@user-1> pulled")).unwrap();

        assert_eq!(
            json,
            serde_json::json!({ "type": 4, "data": { "content": "<@user-1> pulled" } })
        );
    }
}
