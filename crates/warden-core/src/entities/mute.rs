//! Mute record entity

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// The platform caps timeouts at 28 days
pub const MAX_MUTE_MINUTES: u32 = 40_320;

/// An active mute against a member
///
/// Created for both manual and auto-escalation mutes; deleted when the
/// expiry sweeper observes `now >= unmute_at` or an admin unmutes early.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MuteRecord {
    pub guild_id: Snowflake,
    pub reason: String,
    pub duration_minutes: u32,
    pub unmute_at: DateTime<Utc>,
    pub muted_by: Snowflake,
    pub muted_at: DateTime<Utc>,
}

impl MuteRecord {
    pub fn new(
        guild_id: Snowflake,
        reason: String,
        duration_minutes: u32,
        muted_by: Snowflake,
        muted_at: DateTime<Utc>,
    ) -> Self {
        Self {
            guild_id,
            reason,
            duration_minutes,
            unmute_at: muted_at + Duration::minutes(i64::from(duration_minutes)),
            muted_by,
            muted_at,
        }
    }

    #[inline]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.unmute_at
    }
}
