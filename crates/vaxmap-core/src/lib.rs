//! Reactive data layer between `vaxmap-api` and consumers (the CLI).
//!
//! This crate owns the business logic, domain model, and reactive data
//! infrastructure of the vaccine site locator:
//!
//! - **[`Normalizer`]** turns backend [`RawSite`](vaxmap_api::RawSite)
//!   records into canonical [`Site`]s: bare URLs become link fragments,
//!   millisecond timestamps become readable dates, and every site gets a
//!   [`PinCategory`].
//!
//! - **[`ReferenceTables`]** carries the venue and phrase lists the pin
//!   classifier matches against. The built-in lists are the default; the
//!   CLI can swap them from configuration.
//!
//! - **[`Coordinator`]** is the central facade: one fetch per user action
//!   ([`load_initial()`](Coordinator::load_initial),
//!   [`search()`](Coordinator::search)), wholesale replacement of the
//!   [`SiteStore`], and pin selection by id. Overlapping fetches are
//!   ordered by ticket according to [`FetchOrdering`].
//!
//! - **[`SiteStore`]** is `tokio::sync::watch`-backed storage vending
//!   whole-state snapshots through [`StateStream`].

pub mod classify;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod model;
pub mod normalize;
pub mod store;
pub mod stream;
pub mod zoom;

// ── Primary re-exports ──────────────────────────────────────────────
pub use classify::{MASS_VACCINATION_SITES, ReferenceTables, STATEWIDE_PHRASES};
pub use config::{FetchOrdering, LocatorConfig, TlsVerification};
pub use coordinator::{Coordinator, RefreshOutcome};
pub use error::CoreError;
pub use normalize::{DateFormatter, Normalizer, UNKNOWN_LAST_UPDATED};
pub use store::{MapState, SiteStore};
pub use stream::StateStream;
pub use zoom::{MAX_MILES_TO_ZOOM, zoom_for_radius};

// Re-export model types at the crate root for ergonomics.
pub use model::{
    DEFAULT_CENTER, DEFAULT_ZOOM, FocusPoint, Fragment, LinkedText, MapView, Marker,
    NO_AVAILABILITY_TEXT, PinCategory, Selection, Site, SitePopup,
};

// Wire types consumers need to build queries.
pub use vaxmap_api::{AvailabilityFilter, SearchQuery};
