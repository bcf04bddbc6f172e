//! Warning entities - a member's moderation ledger

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// A single warning issued against a member
///
/// Immutable once created; only removable by explicit delete or bulk clear.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Warning {
    /// Creation-time milliseconds. Unique per record in practice,
    /// not enforced.
    pub id: i64,
    pub reason: String,
    pub moderator_id: Snowflake,
    pub issued_at: DateTime<Utc>,
}

impl Warning {
    /// Create a new Warning stamped with the given issue time
    pub fn new(reason: String, moderator_id: Snowflake, issued_at: DateTime<Utc>) -> Self {
        Self {
            id: issued_at.timestamp_millis(),
            reason,
            moderator_id,
            issued_at,
        }
    }
}

/// A member's accumulated warnings
///
/// Invariant: `count == warnings.len()` after every mutation. All mutation
/// goes through the methods below, which own the invariant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WarningRecord {
    pub count: u32,
    pub warnings: Vec<Warning>,
    pub last_warning_at: Option<DateTime<Utc>>,
}

impl WarningRecord {
    /// Append a warning, bumping the count and last-warning timestamp
    pub fn push(&mut self, warning: Warning) {
        self.last_warning_at = Some(warning.issued_at);
        self.warnings.push(warning);
        self.count = self.warnings.len() as u32;
    }

    /// Remove the warning with the given id, recomputing the count
    ///
    /// Returns the removed warning, or `None` if no warning with that id
    /// exists (the record is unchanged on that path).
    pub fn remove(&mut self, warning_id: i64) -> Option<Warning> {
        let pos = self.warnings.iter().position(|w| w.id == warning_id)?;
        let removed = self.warnings.remove(pos);
        self.count = self.warnings.len() as u32;
        Some(removed)
    }

    /// The most recent warnings, newest last
    pub fn recent(&self, n: usize) -> &[Warning] {
        let start = self.warnings.len().saturating_sub(n);
        &self.warnings[start..]
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }
}
