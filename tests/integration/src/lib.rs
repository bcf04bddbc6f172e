//! Integration test utilities for the warden bot
//!
//! Provides the recording platform fake, fixed member ids, and a harness
//! that wires a full service context over the in-memory stores.


pub use fixtures::*;
pub use helpers::*;
