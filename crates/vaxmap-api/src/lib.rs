// vaxmap-api: Async Rust client for the vaccine site locator backend

pub mod client;
pub mod error;
pub mod models;
mod sites;
pub mod transport;

pub use client::SiteClient;
pub use error::Error;
pub use models::{AvailabilityFilter, RawSite, SearchQuery, SearchResponse};
pub use transport::{TlsMode, TransportConfig};
