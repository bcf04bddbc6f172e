//! Marriage link entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// One member's side of a marriage
///
/// Links are symmetric: if A's link points at B, B's link points at A.
/// The store maintains the pairing with paired writes and deletes; a
/// member has at most one active link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarriageLink {
    pub spouse: Snowflake,
    pub married_at: DateTime<Utc>,
}

impl MarriageLink {
    pub fn new(spouse: Snowflake, married_at: DateTime<Utc>) -> Self {
        Self { spouse, married_at }
    }

    /// Whole days the marriage has lasted as of `now`
    pub fn days_together(&self, now: DateTime<Utc>) -> i64 {
        (now - self.married_at).num_days().max(0)
    }
}
