//! Inbound event payloads
//!
//! The platform delivers slash commands, button presses, and channel
//! messages as JSON posts to the webhook. The payloads here are the narrow
//! slice of the platform's interaction format the bot consumes.

use serde::Deserialize;

use warden_core::Snowflake;

/// The invoking member as carried in every event
#[derive(Debug, Clone, Deserialize)]
pub struct MemberRef {
    pub id: Snowflake,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub role_ids: Vec<Snowflake>,
    /// Platform-level administrator flag; grants the admin command set
    /// independently of the configured role
    #[serde(default)]
    pub is_admin: bool,
}

/// Options a slash command may carry; absent ones deserialize to None
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommandOptions {
    pub user: Option<Snowflake>,
    pub reason: Option<String>,
    pub mute_duration: Option<u32>,
    pub warn_id: Option<i64>,
}

/// One inbound platform event
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// A slash command invocation
    Command {
        name: String,
        guild_id: Snowflake,
        member: MemberRef,
        #[serde(default)]
        options: CommandOptions,
    },
    /// A button press on a previous reply
    Button {
        custom_id: String,
        guild_id: Snowflake,
        member: MemberRef,
    },
    /// A plain channel message (registration ingestion)
    Message {
        guild_id: Snowflake,
        channel_id: Snowflake,
        message_id: Snowflake,
        member: MemberRef,
        content: String,
    },
}
