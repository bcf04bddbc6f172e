//! # warden-service
//!
//! Application layer: the warning ledger, moderation actions, the
//! relationship workflow, registration ingestion, and the expiry sweepers.

pub mod services;
pub mod sweeper;

pub use services::{
    DivorceOutcome, ModerationService, RegistrationService, RelationshipService, ServiceContext,
    ServiceError, ServiceResult, WarningIssued, WarningService,
};
pub use sweeper::{MuteSweeper, RequestSweeper};
