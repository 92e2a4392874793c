// ── Domain model ──
//
// Canonical types consumed by renderers. Everything here is built from
// backend records by the normalizer and never mutated afterwards.

pub mod geo;
pub mod linked_text;
pub mod popup;
pub mod site;

pub use geo::{DEFAULT_CENTER, DEFAULT_ZOOM, FocusPoint, MapView};
pub use linked_text::{Fragment, LinkedText};
pub use popup::{NO_AVAILABILITY_TEXT, SitePopup};
pub use site::{Marker, PinCategory, Selection, Site};
