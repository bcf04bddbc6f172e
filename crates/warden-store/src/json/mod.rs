//! JSON file implementations of the store traits
//!
//! File layout under the data directory matches the original documents:
//! `warnings.json`, `marriages.json`, `proposals.json`, `divorces.json`,
//! `muted_members.json`.

mod divorces;
mod marriages;
mod mutes;
mod proposals;
mod warnings;

pub use divorces::JsonDivorceStore;
pub use marriages::JsonMarriageStore;
pub use mutes::JsonMuteStore;
pub use proposals::JsonProposalStore;
pub use warnings::JsonWarningStore;
