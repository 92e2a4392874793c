// ── Refresh application logic ──
//
// Applies a fetched, normalized site list to the SiteStore. The list is
// replaced wholesale; the open popup is re-resolved against it.

use std::sync::Arc;

use chrono::Utc;
use tracing::debug;

use super::{MapState, SiteStore};
use crate::config::FetchOrdering;
use crate::model::{FocusPoint, Selection, Site};

/// Everything a single fetch produced.
#[derive(Debug, Clone)]
pub struct RefreshSnapshot {
    pub ticket: u64,
    pub sites: Vec<Site>,
    /// `None` for the initial load, the geocoded query for searches.
    pub focus: Option<FocusPoint>,
}

impl SiteStore {
    /// Apply a refresh. Returns `false` when the snapshot was discarded as
    /// stale under [`FetchOrdering::LatestRequest`].
    pub(crate) fn apply_snapshot(&self, snap: RefreshSnapshot, ordering: FetchOrdering) -> bool {
        let mut applied = None;

        self.state.send_if_modified(|state| {
            if ordering == FetchOrdering::LatestRequest && snap.ticket < state.ticket {
                return false;
            }
            let next = Arc::new(MapState {
                ticket: state.ticket.max(snap.ticket),
                sites: snap.sites,
                focus: snap.focus,
                refreshed_at: Some(Utc::now()),
            });
            applied = Some(Arc::clone(&next));
            *state = next;
            true
        });

        let Some(state) = applied else {
            debug!(
                ticket = snap.ticket,
                newest = self.state.borrow().ticket,
                "discarding stale site list"
            );
            return false;
        };

        self.selection.send_if_modified(|selection| {
            let Some(current) = selection.as_ref() else {
                return false;
            };
            *selection = state
                .find(&current.site.id)
                .map(|site| Arc::new(Selection::of(site)));
            true
        });

        true
    }
}
