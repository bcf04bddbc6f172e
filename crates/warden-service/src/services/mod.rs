//! Service layer

mod context;
mod error;
mod moderation;
mod notify;
mod registration;
mod relationship;
mod warning;

pub use context::ServiceContext;
pub use error::{ServiceError, ServiceResult};
pub use moderation::ModerationService;
pub use registration::RegistrationService;
pub use relationship::{DivorceOutcome, RelationshipService};
pub use warning::{WarningIssued, WarningService};

pub(crate) use notify::notify_member;
