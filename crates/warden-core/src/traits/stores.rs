//! Store traits (ports) - define the interface for persisted documents
//!
//! Each store owns one JSON document mapping member-or-request ids to
//! records. Implementations serialize mutations per document; mutations on
//! different documents do not contend.

use async_trait::async_trait;

use crate::entities::{DivorceRequest, MarriageLink, MuteRecord, Proposal, WarningRecord};
use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Result type for store operations
pub type StoreResult<T> = Result<T, DomainError>;

// ============================================================================
// Warning Store
// ============================================================================

#[async_trait]
pub trait WarningStore: Send + Sync {
    /// Get a member's warning record, if any
    async fn get(&self, member: Snowflake) -> StoreResult<Option<WarningRecord>>;

    /// Write a member's warning record (whole-record replace)
    async fn put(&self, member: Snowflake, record: &WarningRecord) -> StoreResult<()>;

    /// Delete a member's record, returning it if it existed
    async fn delete(&self, member: Snowflake) -> StoreResult<Option<WarningRecord>>;
}

// ============================================================================
// Marriage Store
// ============================================================================

#[async_trait]
pub trait MarriageStore: Send + Sync {
    /// Get a member's marriage link, if any
    async fn get(&self, member: Snowflake) -> StoreResult<Option<MarriageLink>>;

    /// Write both sides of a marriage in one document mutation
    async fn link_pair(
        &self,
        a: Snowflake,
        b: Snowflake,
        married_at: chrono::DateTime<chrono::Utc>,
    ) -> StoreResult<()>;

    /// Delete both sides of a marriage in one document mutation
    async fn unlink_pair(&self, a: Snowflake, b: Snowflake) -> StoreResult<()>;
}

// ============================================================================
// Proposal Store
// ============================================================================

#[async_trait]
pub trait ProposalStore: Send + Sync {
    /// Get a proposal by composite id
    async fn get(&self, id: &str) -> StoreResult<Option<Proposal>>;

    /// Insert a proposal under its composite id
    async fn put(&self, proposal: &Proposal) -> StoreResult<()>;

    /// Delete a proposal by id
    async fn delete(&self, id: &str) -> StoreResult<()>;

    /// Does any pending proposal involve `member`, on either side?
    async fn any_involving(&self, member: Snowflake) -> StoreResult<bool>;

    /// All pending proposals (for the expiry sweeper)
    async fn all(&self) -> StoreResult<Vec<(String, Proposal)>>;
}

// ============================================================================
// Divorce Store
// ============================================================================

#[async_trait]
pub trait DivorceStore: Send + Sync {
    /// Get a divorce request by composite id
    async fn get(&self, id: &str) -> StoreResult<Option<DivorceRequest>>;

    /// Insert a divorce request under its composite id
    async fn put(&self, request: &DivorceRequest) -> StoreResult<()>;

    /// Delete a divorce request by id
    async fn delete(&self, id: &str) -> StoreResult<()>;

    /// Does any pending request involve `member`, on either side?
    async fn any_involving(&self, member: Snowflake) -> StoreResult<bool>;

    /// All pending requests (for the expiry sweeper)
    async fn all(&self) -> StoreResult<Vec<(String, DivorceRequest)>>;
}

// ============================================================================
// Mute Store
// ============================================================================

#[async_trait]
pub trait MuteStore: Send + Sync {
    /// Get a member's active mute, if any
    async fn get(&self, member: Snowflake) -> StoreResult<Option<MuteRecord>>;

    /// Write a member's mute record
    async fn put(&self, member: Snowflake, record: &MuteRecord) -> StoreResult<()>;

    /// Delete a member's mute record, returning it if it existed
    async fn delete(&self, member: Snowflake) -> StoreResult<Option<MuteRecord>>;

    /// All active mutes (for the expiry sweeper)
    async fn all(&self) -> StoreResult<Vec<(Snowflake, MuteRecord)>>;
}
