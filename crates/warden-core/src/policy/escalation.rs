//! Threshold-based escalation
//!
//! A pure function of the warning count; the caller executes the action
//! against the platform and treats failures as non-fatal.

use serde::{Deserialize, Serialize};

/// Warning counts at which each enforcement action becomes due
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thresholds {
    pub mute: u32,
    pub kick: u32,
    pub ban: u32,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            mute: 3,
            kick: 5,
            ban: 7,
        }
    }
}

/// Enforcement action due at a given warning count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EscalationAction {
    None,
    Mute,
    Kick,
    Ban,
}

impl Thresholds {
    /// Pick the action for a warning count, highest severity first.
    ///
    /// Crossing a higher threshold yields only the highest action: a count
    /// of 7 under defaults is a Ban, not a mute-then-kick-then-ban.
    pub fn action_for(&self, count: u32) -> EscalationAction {
        if count >= self.ban {
            EscalationAction::Ban
        } else if count >= self.kick {
            EscalationAction::Kick
        } else if count >= self.mute {
            EscalationAction::Mute
        } else {
            EscalationAction::None
        }
    }
}
