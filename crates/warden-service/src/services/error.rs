//! Service layer error types
//!
//! Provides a unified error type for all service operations. Every variant
//! maps to a short human-readable reply; no rejected command leaves the
//! invoker without one.

use std::fmt;

use warden_core::DomainError;

/// Service layer error type
#[derive(Debug)]
pub enum ServiceError {
    /// Domain rule violation
    Domain(DomainError),

    /// The invoker may not use this command
    PermissionDenied,

    /// The platform refused a required action (not a notification leg)
    PlatformDenied(String),

    /// Internal error
    Internal(String),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Domain(e) => write!(f, "{e}"),
            Self::PermissionDenied => write!(f, "Permission denied"),
            Self::PlatformDenied(msg) => write!(f, "Platform refused the action: {msg}"),
            Self::Internal(msg) => write!(f, "Internal error: {msg}"),
        }
    }
}

impl std::error::Error for ServiceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Domain(e) => Some(e),
            _ => None,
        }
    }
}

impl ServiceError {
    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Get the error code for logs
    pub fn error_code(&self) -> &str {
        match self {
            Self::Domain(e) => e.code(),
            Self::PermissionDenied => "PERMISSION_DENIED",
            Self::PlatformDenied(_) => "PLATFORM_DENIED",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// The short reply shown to the invoking user
    pub fn user_message(&self) -> String {
        match self {
            Self::Domain(e) => match e {
                DomainError::SelfTarget => "You cannot target yourself!".to_string(),
                DomainError::EmptyReason => "A reason is required.".to_string(),
                DomainError::InvalidMuteDuration { max } => {
                    format!("Mute duration must be between 1 and {max} minutes.")
                }
                DomainError::MalformedRegistration => {
                    "Your registration does not match the template. Use: \
                     `profession: <name> level: <number> power: <number> time: <text>`"
                        .to_string()
                }
                DomainError::AlreadyMarried(_) => {
                    "One of you is already married!".to_string()
                }
                DomainError::ProposalConflict => {
                    "One of you already has a pending proposal. Settle that one first."
                        .to_string()
                }
                DomainError::DivorceConflict => {
                    "A divorce request is already pending for this marriage.".to_string()
                }
                DomainError::DuplicateRegistration(name) => {
                    format!("A registration for {name} already exists.")
                }
                DomainError::WarningNotFound(id) => {
                    format!("No warning with id {id}. Use check_warn to list warning ids.")
                }
                DomainError::ProposalNotFound => {
                    "This proposal has expired or no longer exists!".to_string()
                }
                DomainError::DivorceNotFound => {
                    "This divorce request has expired or no longer exists!".to_string()
                }
                DomainError::NotMarried(_) => "You are not married!".to_string(),
                DomainError::NotMuted(_) => "This member is not muted!".to_string(),
                DomainError::ProposalInvalidated => {
                    "The proposal is void; one of the parties has married in the meantime."
                        .to_string()
                }
                DomainError::NotAddressee => "This request is not addressed to you!".to_string(),
                DomainError::Storage(_) => "Something went wrong, try again later.".to_string(),
            },
            Self::PermissionDenied => "You do not have permission to use this command!".to_string(),
            Self::PlatformDenied(_) => {
                "The platform refused the action. Check the bot's permissions.".to_string()
            }
            Self::Internal(_) => "Something went wrong while running the command!".to_string(),
        }
    }
}

impl From<DomainError> for ServiceError {
    fn from(err: DomainError) -> Self {
        Self::Domain(err)
    }
}

impl ServiceError {
    /// Map a platform failure on a required (non-notification) action
    pub(crate) fn from_platform(err: warden_core::PlatformError) -> Self {
        match err {
            warden_core::PlatformError::Denied(msg) => Self::PlatformDenied(msg),
            other => Self::Internal(other.to_string()),
        }
    }
}

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;
