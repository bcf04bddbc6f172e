//! Domain entities

mod marriage;
mod mute;
mod proposal;
mod registration;
mod warning;

pub use marriage::MarriageLink;
pub use mute::{MuteRecord, MAX_MUTE_MINUTES};
pub use proposal::{DivorceRequest, Proposal, PENDING_REQUEST_TTL_MINUTES};
pub use registration::RegistrationEntry;
pub use warning::{Warning, WarningRecord};
