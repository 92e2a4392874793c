// ── Central reactive site store ──
//
// Holds the last fetched site list, the focus point, the map view and
// the open popup. Every mutation is broadcast to subscribers via `watch`
// channels as a complete snapshot, so a reader never sees a half-applied
// refresh.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::watch;

use crate::model::{FocusPoint, MapView, Marker, Selection, Site};
use crate::stream::StateStream;

/// The result list and focus point of the last applied fetch.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MapState {
    pub sites: Vec<Site>,
    /// Set by location searches, cleared by the initial load.
    pub focus: Option<FocusPoint>,
    /// Ticket of the fetch that produced this state. 0 before any fetch.
    pub ticket: u64,
    pub refreshed_at: Option<DateTime<Utc>>,
}

impl MapState {
    /// Linear scan by site id.
    pub fn find(&self, id: &str) -> Option<&Site> {
        self.sites.iter().find(|s| s.id == id)
    }

    /// One marker per site that has a position, in list order.
    pub fn markers(&self) -> Vec<Marker> {
        self.sites.iter().filter_map(Site::marker).collect()
    }

    pub fn len(&self) -> usize {
        self.sites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }
}

/// Reactive store behind a `Coordinator`.
///
/// Reads are cheap `Arc` clones of the current snapshot. Writers go through
/// `send_if_modified` so subscribers only wake on real changes.
pub struct SiteStore {
    pub(crate) state: watch::Sender<Arc<MapState>>,
    pub(crate) view: watch::Sender<MapView>,
    pub(crate) selection: watch::Sender<Option<Arc<Selection>>>,
}

impl Default for SiteStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SiteStore {
    pub fn new() -> Self {
        let (state, _) = watch::channel(Arc::new(MapState::default()));
        let (view, _) = watch::channel(MapView::default());
        let (selection, _) = watch::channel(None);

        Self {
            state,
            view,
            selection,
        }
    }

    // ── Snapshot accessors ───────────────────────────────────────────

    pub fn state(&self) -> Arc<MapState> {
        self.state.borrow().clone()
    }

    pub fn view(&self) -> MapView {
        *self.view.borrow()
    }

    pub fn selection(&self) -> Option<Arc<Selection>> {
        self.selection.borrow().clone()
    }

    // ── Subscriptions ────────────────────────────────────────────────

    pub fn subscribe(&self) -> StateStream<Arc<MapState>> {
        StateStream::new(self.state.subscribe())
    }

    // ── Mutations ────────────────────────────────────────────────────

    /// Record the last map-change event.
    pub fn record_view(&self, view: MapView) {
        self.view.send_if_modified(|current| {
            if *current == view {
                return false;
            }
            *current = view;
            true
        });
    }

    /// Open the popup for site `id`, if it is in the current list.
    pub fn select(&self, id: &str) -> Option<Arc<Selection>> {
        let state = self.state();
        let selection = state.find(id).map(|site| Arc::new(Selection::of(site)));
        self.selection.send_replace(selection.clone());
        selection
    }

    pub fn clear_selection(&self) {
        self.selection.send_if_modified(|current| current.take().is_some());
    }
}
