//! Pending request entities - proposals and divorce requests
//!
//! Both live until the counterparty responds or the expiry sweeper reaps
//! them 30 minutes after creation.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// How long a pending proposal or divorce request stays valid
pub const PENDING_REQUEST_TTL_MINUTES: i64 = 30;

/// A pending marriage proposal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proposal {
    pub proposer: Snowflake,
    pub target: Snowflake,
    pub created_at: DateTime<Utc>,
    pub guild_id: Snowflake,
}

impl Proposal {
    pub fn new(
        proposer: Snowflake,
        target: Snowflake,
        guild_id: Snowflake,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            proposer,
            target,
            created_at,
            guild_id,
        }
    }

    /// Composite id used as the store key and in button custom ids
    pub fn id(&self) -> String {
        format!(
            "{}_{}_{}",
            self.proposer,
            self.target,
            self.created_at.timestamp_millis()
        )
    }

    /// Does `member` appear on either side of this proposal?
    pub fn involves(&self, member: Snowflake) -> bool {
        self.proposer == member || self.target == member
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now - self.created_at > Duration::minutes(PENDING_REQUEST_TTL_MINUTES)
    }
}

/// A pending divorce request (mutual-consent policy only)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DivorceRequest {
    pub applicant: Snowflake,
    pub spouse: Snowflake,
    pub created_at: DateTime<Utc>,
    pub guild_id: Snowflake,
}

impl DivorceRequest {
    pub fn new(
        applicant: Snowflake,
        spouse: Snowflake,
        guild_id: Snowflake,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            applicant,
            spouse,
            created_at,
            guild_id,
        }
    }

    /// Composite id used as the store key and in button custom ids
    pub fn id(&self) -> String {
        format!(
            "{}_{}_{}",
            self.applicant,
            self.spouse,
            self.created_at.timestamp_millis()
        )
    }

    pub fn involves(&self, member: Snowflake) -> bool {
        self.applicant == member || self.spouse == member
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now - self.created_at > Duration::minutes(PENDING_REQUEST_TTL_MINUTES)
    }
}
