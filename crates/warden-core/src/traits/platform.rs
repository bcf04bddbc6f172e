//! Platform trait (port) - the chat platform's member and message surface
//!
//! Everything the bot does against the platform outside of interaction
//! replies goes through here: direct messages, timeouts, kicks, bans,
//! member lookup, message removal. Replies to interactions travel back in
//! the HTTP response and are not part of this trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::value_objects::Snowflake;

/// Errors from platform calls
#[derive(Debug, Error)]
pub enum PlatformError {
    /// The platform refused the action (missing permission, role
    /// hierarchy, member not manageable)
    #[error("Platform refused the action: {0}")]
    Denied(String),

    /// The member or message no longer exists on the platform
    #[error("Unknown member or message")]
    NotFound,

    /// Transport or serialization failure
    #[error("Platform transport error: {0}")]
    Transport(String),
}

/// A member as the platform sees them right now
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberProfile {
    pub id: Snowflake,
    pub display_name: String,
    pub role_ids: Vec<Snowflake>,
    /// Set when the member currently has a platform-level timeout
    pub timed_out_until: Option<DateTime<Utc>>,
}

impl MemberProfile {
    #[inline]
    pub fn is_timed_out(&self, now: DateTime<Utc>) -> bool {
        self.timed_out_until.is_some_and(|until| until > now)
    }
}

/// Outcome of a best-effort notification
///
/// Notification failure never unwinds the operation that triggered it;
/// callers log a `Suppressed` outcome and move on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    Delivered,
    Suppressed(String),
}

impl Delivery {
    #[inline]
    pub fn is_delivered(&self) -> bool {
        matches!(self, Self::Delivered)
    }
}

#[async_trait]
pub trait Platform: Send + Sync {
    /// Send a direct message to a member
    async fn send_dm(&self, member: Snowflake, content: &str) -> Result<(), PlatformError>;

    /// Fetch a member's current profile, or None if they left the server
    async fn fetch_member(
        &self,
        guild: Snowflake,
        member: Snowflake,
    ) -> Result<Option<MemberProfile>, PlatformError>;

    /// Apply a timeout until the given instant
    async fn timeout_member(
        &self,
        guild: Snowflake,
        member: Snowflake,
        until: DateTime<Utc>,
        reason: &str,
    ) -> Result<(), PlatformError>;

    /// Lift a timeout early (or after expiry)
    async fn clear_timeout(&self, guild: Snowflake, member: Snowflake)
        -> Result<(), PlatformError>;

    /// Remove a member from the server
    async fn kick_member(
        &self,
        guild: Snowflake,
        member: Snowflake,
        reason: &str,
    ) -> Result<(), PlatformError>;

    /// Ban a member from the server
    async fn ban_member(
        &self,
        guild: Snowflake,
        member: Snowflake,
        reason: &str,
    ) -> Result<(), PlatformError>;

    /// Delete a message from a channel
    async fn delete_message(
        &self,
        channel: Snowflake,
        message: Snowflake,
    ) -> Result<(), PlatformError>;
}
