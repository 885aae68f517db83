//! Core types and domain logic for the Volhub ecosystem.
//!
//! This crate provides everything shared between the CLI and the platform
//! client:
//! - `Event`, `User` and related document types
//! - `draft` for event submission validation
//! - `store` for the event store abstraction and membership transactions
//! - `browse` for the category/search/distance listing pipeline
//! - `geo` for distance math and geocoding candidate types
//! - `profile` for the per-user statistics

pub mod browse;
pub mod draft;
pub mod error;
pub mod event;
pub mod geo;
pub mod profile;
pub mod store;
pub mod user;

// Re-export the most used types at crate root for convenience
pub use error::{HubError, HubResult};
pub use event::{Event, EventCategory};
pub use user::User;
