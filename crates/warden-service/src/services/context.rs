//! Service context - dependency container for services
//!
//! Holds the stores, the platform client, the optional sheet, and the
//! moderation settings. Constructed once at startup and passed to every
//! service and sweeper.

use std::sync::Arc;

use warden_common::DivorcePolicy;
use warden_core::{
    DivorceStore, MarriageStore, MuteStore, Platform, ProposalStore, Sheet, Thresholds,
    WarningStore,
};

/// Service context containing all dependencies
#[derive(Clone)]
pub struct ServiceContext {
    // Stores
    warning_store: Arc<dyn WarningStore>,
    marriage_store: Arc<dyn MarriageStore>,
    proposal_store: Arc<dyn ProposalStore>,
    divorce_store: Arc<dyn DivorceStore>,
    mute_store: Arc<dyn MuteStore>,

    // Collaborators
    platform: Arc<dyn Platform>,
    sheet: Option<Arc<dyn Sheet>>,

    // Moderation settings
    thresholds: Thresholds,
    auto_mute_minutes: u32,
    divorce_policy: DivorcePolicy,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        warning_store: Arc<dyn WarningStore>,
        marriage_store: Arc<dyn MarriageStore>,
        proposal_store: Arc<dyn ProposalStore>,
        divorce_store: Arc<dyn DivorceStore>,
        mute_store: Arc<dyn MuteStore>,
        platform: Arc<dyn Platform>,
        sheet: Option<Arc<dyn Sheet>>,
        thresholds: Thresholds,
        auto_mute_minutes: u32,
        divorce_policy: DivorcePolicy,
    ) -> Self {
        Self {
            warning_store,
            marriage_store,
            proposal_store,
            divorce_store,
            mute_store,
            platform,
            sheet,
            thresholds,
            auto_mute_minutes,
            divorce_policy,
        }
    }

    // === Stores ===

    /// Get the warning store
    pub fn warning_store(&self) -> &dyn WarningStore {
        self.warning_store.as_ref()
    }

    /// Get the marriage store
    pub fn marriage_store(&self) -> &dyn MarriageStore {
        self.marriage_store.as_ref()
    }

    /// Get the proposal store
    pub fn proposal_store(&self) -> &dyn ProposalStore {
        self.proposal_store.as_ref()
    }

    /// Get the divorce store
    pub fn divorce_store(&self) -> &dyn DivorceStore {
        self.divorce_store.as_ref()
    }

    /// Get the mute store
    pub fn mute_store(&self) -> &dyn MuteStore {
        self.mute_store.as_ref()
    }

    // === Collaborators ===

    /// Get the platform client
    pub fn platform(&self) -> &dyn Platform {
        self.platform.as_ref()
    }

    /// Get the sheet, if registration ingestion is enabled
    pub fn sheet(&self) -> Option<&dyn Sheet> {
        self.sheet.as_deref()
    }

    // === Settings ===

    /// Warning thresholds for escalation
    pub fn thresholds(&self) -> Thresholds {
        self.thresholds
    }

    /// Duration applied by threshold-triggered mutes
    pub fn auto_mute_minutes(&self) -> u32 {
        self.auto_mute_minutes
    }

    /// Active divorce consent policy
    pub fn divorce_policy(&self) -> DivorcePolicy {
        self.divorce_policy
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("stores", &"...")
            .field("sheet", &self.sheet.is_some())
            .field("thresholds", &self.thresholds)
            .field("auto_mute_minutes", &self.auto_mute_minutes)
            .field("divorce_policy", &self.divorce_policy)
            .finish()
    }
}
