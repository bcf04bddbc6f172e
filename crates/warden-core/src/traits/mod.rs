//! Ports - traits the domain is wired through
//!
//! The domain layer defines what it needs; the store and gateway layers
//! provide the implementations.

mod platform;
mod sheet;
mod stores;

pub use platform::{Delivery, MemberProfile, Platform, PlatformError};
pub use sheet::{Sheet, SheetError};
pub use stores::{
    DivorceStore, MarriageStore, MuteStore, ProposalStore, StoreResult, WarningStore,
};
