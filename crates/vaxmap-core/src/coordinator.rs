// ── Result coordinator ──
//
// Owns the fetch-normalize-apply cycle behind the map. Each user action
// issues one fetch; the normalized result replaces the store's list
// wholesale. Pin selection and map movement never fetch.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::{debug, error, info};

use vaxmap_api::{RawSite, SearchQuery, SiteClient};

use crate::config::LocatorConfig;
use crate::error::CoreError;
use crate::model::{FocusPoint, MapView, Marker, Selection};
use crate::normalize::{DateFormatter, Normalizer};
use crate::store::{MapState, RefreshSnapshot, SiteStore};
use crate::stream::StateStream;

/// What happened to a successful fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// The result replaced the store's list.
    Applied { sites: usize },
    /// A newer request had already been applied.
    Discarded,
}

/// The main entry point for consumers.
///
/// Cheaply cloneable via `Arc<CoordinatorInner>`.
#[derive(Clone)]
pub struct Coordinator {
    inner: Arc<CoordinatorInner>,
}

struct CoordinatorInner {
    config: LocatorConfig,
    client: SiteClient,
    normalizer: Normalizer,
    store: SiteStore,
    last_ticket: AtomicU64,
}

impl Coordinator {
    /// Build a coordinator and its HTTP client from configuration.
    pub fn new(config: LocatorConfig) -> Result<Self, CoreError> {
        let client = SiteClient::new(config.backend_url.clone(), &config.transport())?;
        Self::with_client(config, client)
    }

    /// Build a coordinator around an existing client.
    pub fn with_client(config: LocatorConfig, client: SiteClient) -> Result<Self, CoreError> {
        let dates = DateFormatter::with_offset_minutes(config.utc_offset_minutes).ok_or_else(
            || CoreError::Config {
                message: format!(
                    "UTC offset of {} minutes is out of range",
                    config.utc_offset_minutes
                ),
            },
        )?;
        let normalizer = Normalizer::new(config.reference_tables.clone(), dates);

        Ok(Self {
            inner: Arc::new(CoordinatorInner {
                config,
                client,
                normalizer,
                store: SiteStore::new(),
                last_ticket: AtomicU64::new(0),
            }),
        })
    }

    pub fn config(&self) -> &LocatorConfig {
        &self.inner.config
    }

    pub fn store(&self) -> &SiteStore {
        &self.inner.store
    }

    pub fn normalizer(&self) -> &Normalizer {
        &self.inner.normalizer
    }

    // ── Fetching ─────────────────────────────────────────────────

    /// Load the full site list and clear the focus point.
    ///
    /// Sites without availability are dropped unless `include_unavailable`.
    pub async fn load_initial(&self, include_unavailable: bool) -> Result<RefreshOutcome, CoreError> {
        let ticket = self.next_ticket();
        debug!(ticket, include_unavailable, "loading initial site list");

        let mut raw = self
            .inner
            .client
            .initmap()
            .await
            .map_err(|e| self.fetch_failed("initial site list", e))?;

        if !include_unavailable {
            raw.retain(RawSite::has_availability);
        }

        Ok(self.apply(ticket, &raw, None))
    }

    /// Search around an address or coordinates.
    ///
    /// A query with no address and no coordinates is the initial load in
    /// disguise: it falls back to [`load_initial`](Self::load_initial),
    /// including unavailable sites only when the query asks for all.
    pub async fn search(&self, query: &SearchQuery) -> Result<RefreshOutcome, CoreError> {
        if !query.has_location() {
            debug!("search without a location, loading initial list instead");
            return self.load_initial(query.includes_unavailable()).await;
        }

        let ticket = self.next_ticket();
        debug!(ticket, ?query, "searching sites");

        let response = self
            .inner
            .client
            .search_query_location(query)
            .await
            .map_err(|e| self.fetch_failed("site search", e))?;

        let focus = FocusPoint::from_parts(response.lat, response.lng);
        Ok(self.apply(ticket, &response.site_data, focus))
    }

    fn fetch_failed(&self, what: &str, err: vaxmap_api::Error) -> CoreError {
        error!(error = %err, "failed to fetch {what}");
        match CoreError::from(err) {
            CoreError::Timeout { .. } => CoreError::Timeout {
                timeout_secs: self.inner.config.timeout.as_secs(),
            },
            other => other,
        }
    }

    fn next_ticket(&self) -> u64 {
        self.inner.last_ticket.fetch_add(1, Ordering::Relaxed) + 1
    }

    fn apply(&self, ticket: u64, raw: &[RawSite], focus: Option<FocusPoint>) -> RefreshOutcome {
        let sites = self.inner.normalizer.normalize(raw);
        let count = sites.len();
        let snapshot = RefreshSnapshot {
            ticket,
            sites,
            focus,
        };

        if self
            .inner
            .store
            .apply_snapshot(snapshot, self.inner.config.ordering)
        {
            info!(ticket, sites = count, focused = focus.is_some(), "site list refreshed");
            RefreshOutcome::Applied { sites: count }
        } else {
            RefreshOutcome::Discarded
        }
    }

    // ── Interaction ──────────────────────────────────────────────

    /// Open the popup of the site behind a clicked pin.
    pub fn select(&self, id: &str) -> Option<Arc<Selection>> {
        let selection = self.inner.store.select(id);
        if selection.is_none() {
            debug!(id, "selected site is not in the current list");
        }
        selection
    }

    /// Like [`select`](Self::select), but a missing site is an error.
    pub fn require(&self, id: &str) -> Result<Arc<Selection>, CoreError> {
        self.select(id)
            .ok_or_else(|| CoreError::SiteNotFound { id: id.to_owned() })
    }

    pub fn close_popup(&self) {
        self.inner.store.clear_selection();
    }

    /// Record a pan/zoom. Never triggers a fetch.
    pub fn on_map_change(&self, view: MapView) {
        self.inner.store.record_view(view);
    }

    // ── State observation ────────────────────────────────────────

    pub fn snapshot(&self) -> Arc<MapState> {
        self.inner.store.state()
    }

    pub fn markers(&self) -> Vec<Marker> {
        self.snapshot().markers()
    }

    pub fn selection(&self) -> Option<Arc<Selection>> {
        self.inner.store.selection()
    }

    pub fn map_view(&self) -> MapView {
        self.inner.store.view()
    }

    pub fn subscribe(&self) -> StateStream<Arc<MapState>> {
        self.inner.store.subscribe()
    }
}
