// ── Reactive site store ──
//
// Whole-state snapshots with push-based change notification.

mod refresh;
mod site_store;

pub use refresh::RefreshSnapshot;
pub use site_store::{MapState, SiteStore};
