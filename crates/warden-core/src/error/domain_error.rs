//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::Snowflake;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Cannot target yourself")]
    SelfTarget,

    #[error("Warning reason must not be empty")]
    EmptyReason,

    #[error("Mute duration must be between 1 and {max} minutes")]
    InvalidMuteDuration { max: u32 },

    #[error("Message does not match the registration template")]
    MalformedRegistration,

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Member {0} is already married")]
    AlreadyMarried(Snowflake),

    #[error("One of the parties already has a pending proposal")]
    ProposalConflict,

    #[error("A divorce request is already pending for this marriage")]
    DivorceConflict,

    #[error("A registration already exists for {0}")]
    DuplicateRegistration(String),

    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Warning not found: {0}")]
    WarningNotFound(i64),

    #[error("Proposal not found or expired")]
    ProposalNotFound,

    #[error("Divorce request not found or expired")]
    DivorceNotFound,

    #[error("Member {0} is not married")]
    NotMarried(Snowflake),

    #[error("Member {0} is not muted")]
    NotMuted(Snowflake),

    /// A party married elsewhere while the proposal was pending; the
    /// proposal has been discarded instead of consummated.
    #[error("Proposal is no longer valid; one of the parties has married")]
    ProposalInvalidated,

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("This request is not addressed to you")]
    NotAddressee,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Storage error: {0}")]
    Storage(String),
}

impl DomainError {
    /// Get an error code string for logs and replies
    pub fn code(&self) -> &'static str {
        match self {
            // Validation
            Self::SelfTarget => "SELF_TARGET",
            Self::EmptyReason => "EMPTY_REASON",
            Self::InvalidMuteDuration { .. } => "INVALID_MUTE_DURATION",
            Self::MalformedRegistration => "MALFORMED_REGISTRATION",

            // Conflict
            Self::AlreadyMarried(_) => "ALREADY_MARRIED",
            Self::ProposalConflict => "PROPOSAL_CONFLICT",
            Self::DivorceConflict => "DIVORCE_CONFLICT",
            Self::DuplicateRegistration(_) => "DUPLICATE_REGISTRATION",

            // Not Found
            Self::WarningNotFound(_) => "UNKNOWN_WARNING",
            Self::ProposalNotFound => "UNKNOWN_PROPOSAL",
            Self::DivorceNotFound => "UNKNOWN_DIVORCE_REQUEST",
            Self::NotMarried(_) => "NOT_MARRIED",
            Self::NotMuted(_) => "NOT_MUTED",
            Self::ProposalInvalidated => "PROPOSAL_INVALIDATED",

            // Authorization
            Self::NotAddressee => "NOT_ADDRESSEE",

            // Infrastructure
            Self::Storage(_) => "STORAGE_ERROR",
        }
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::SelfTarget
                | Self::EmptyReason
                | Self::InvalidMuteDuration { .. }
                | Self::MalformedRegistration
        )
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::AlreadyMarried(_)
                | Self::ProposalConflict
                | Self::DivorceConflict
                | Self::DuplicateRegistration(_)
        )
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::WarningNotFound(_)
                | Self::ProposalNotFound
                | Self::DivorceNotFound
                | Self::NotMarried(_)
                | Self::NotMuted(_)
                | Self::ProposalInvalidated
        )
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(self, Self::NotAddressee)
    }
}
