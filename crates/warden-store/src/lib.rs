//! # warden-store
//!
//! Persistence layer: one pretty-printed JSON document per domain, plus a
//! file-backed sheet for registration rows. In-memory implementations of
//! the same traits ship for tests.

mod document;
pub mod json;
pub mod memory;
pub mod sheet;

pub use json::{
    JsonDivorceStore, JsonMarriageStore, JsonMuteStore, JsonProposalStore, JsonWarningStore,
};
pub use memory::{
    MemoryDivorceStore, MemoryMarriageStore, MemoryMuteStore, MemoryProposalStore,
    MemoryWarningStore,
};
pub use sheet::{FileSheet, MemorySheet};
