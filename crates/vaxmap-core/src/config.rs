// ── Runtime locator configuration ──
//
// Describes *how* to reach the site backend and how to present what it
// returns. Never touches disk: the CLI builds a `LocatorConfig` (usually
// via `vaxmap-config`) and hands it in.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use url::Url;

use vaxmap_api::{TlsMode, TransportConfig};

use crate::classify::ReferenceTables;

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(PathBuf),
    /// Skip verification (local test backends with self-signed certs).
    DangerAcceptInvalid,
}

/// Which response wins when fetches overlap.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum FetchOrdering {
    /// Responses to requests older than the newest applied one are
    /// discarded.
    #[default]
    LatestRequest,
    /// Whatever resolves last is applied.
    LastResolved,
}

/// Configuration for a `Coordinator`.
#[derive(Debug, Clone)]
pub struct LocatorConfig {
    /// Backend base URL (e.g., `https://vaccinatema.example/api/`).
    pub backend_url: Url,
    pub tls: TlsVerification,
    /// Request timeout.
    pub timeout: Duration,
    pub ordering: FetchOrdering,
    /// Classifier reference lists.
    pub reference_tables: ReferenceTables,
    /// Offset east of UTC, in minutes, for `last_updated` strings.
    pub utc_offset_minutes: i32,
}

impl LocatorConfig {
    pub fn new(backend_url: Url) -> Self {
        Self {
            backend_url,
            tls: TlsVerification::default(),
            timeout: Duration::from_secs(30),
            ordering: FetchOrdering::default(),
            reference_tables: ReferenceTables::default(),
            utc_offset_minutes: 0,
        }
    }

    /// Transport settings for the API client.
    pub fn transport(&self) -> TransportConfig {
        let tls = match &self.tls {
            TlsVerification::SystemDefaults => TlsMode::System,
            TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
            TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
        };
        TransportConfig {
            tls,
            timeout: self.timeout,
        }
    }
}
