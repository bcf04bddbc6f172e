//! # warden-gateway
//!
//! Delivery layer: receives platform interaction events over HTTP, routes
//! them through the command dispatcher, and talks back to the platform
//! through the REST client.

pub mod dispatch;
pub mod payloads;
pub mod reply;
pub mod rest;
pub mod server;

pub use dispatch::Dispatcher;
pub use payloads::{CommandOptions, Event, MemberRef};
pub use reply::{ButtonSpec, InteractionReply};
pub use rest::RestPlatform;
pub use server::{create_app, create_dispatcher, create_router, run, AppState, SECRET_HEADER};
