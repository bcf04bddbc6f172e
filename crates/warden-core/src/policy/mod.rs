//! Escalation policy - maps a warning count to an enforcement action

mod escalation;

pub use escalation::{EscalationAction, Thresholds};
