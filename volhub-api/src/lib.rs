//! HTTP clients for the hosted Volhub platform and for geocoding.
//!
//! - `client`: typed client for the platform API (identity, users, uploads)
//! - `store`: the events collection, exposed as a `volhub_core` `EventStore`
//! - `session`: the persisted login session
//! - `geocode`: address suggestions via OpenStreetMap Nominatim

pub mod client;
pub mod geocode;
pub mod session;
pub mod store;

pub use client::{AuthPayload, DEFAULT_API_URL, HubClient};
pub use geocode::{DEFAULT_GEOCODER_URL, Geocoder};
pub use session::Session;
