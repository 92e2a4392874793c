//! Shared configuration for vaxmap.
//!
//! TOML profiles, global defaults, classification overrides, and
//! translation to `vaxmap_core::LocatorConfig`. The CLI adds
//! `GlobalOpts`-aware wrappers on top.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use vaxmap_core::{FetchOrdering, LocatorConfig, ReferenceTables, TlsVerification};

/// Environment variable prefix. Nested keys use `__`, e.g.
/// `VAXMAP_DEFAULTS__TIMEOUT=10`.
pub const ENV_PREFIX: &str = "VAXMAP_";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("profile '{name}' not found (available: {available})")]
    ProfileNotFound { name: String, available: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Config {
    /// Profile used when `--profile` is not given.
    pub default_profile: Option<String>,

    #[serde(default)]
    pub defaults: Defaults,

    /// Named backend profiles.
    #[serde(default)]
    pub profiles: BTreeMap<String, Profile>,

    #[serde(default)]
    pub classification: Classification,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: BTreeMap::new(),
            classification: Classification::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Keep sites without availability on the initial load.
    #[serde(default)]
    pub include_unavailable: bool,

    #[serde(default)]
    pub ordering: FetchOrdering,

    /// Offset east of UTC for "last updated" times.
    #[serde(default)]
    pub utc_offset_minutes: i32,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
            timeout: default_timeout(),
            include_unavailable: false,
            ordering: FetchOrdering::default(),
            utc_offset_minutes: 0,
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}
fn default_timeout() -> u64 {
    30
}

/// A named backend profile.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Profile {
    /// Backend base URL (e.g., "https://vaccinatema.example/api").
    pub backend: String,

    /// Override the default timeout.
    pub timeout: Option<u64>,

    /// Skip TLS verification.
    pub insecure: Option<bool>,

    /// Path to custom CA certificate.
    pub ca_cert: Option<PathBuf>,
}

impl Profile {
    pub fn new(backend: impl Into<String>) -> Self {
        Self {
            backend: backend.into(),
            timeout: None,
            insecure: None,
            ca_cert: None,
        }
    }
}

/// Replacement classifier lists. An absent list keeps the built-in one.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Classification {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mass_vaccination_sites: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statewide_phrases: Option<Vec<String>>,
}

impl Classification {
    pub fn reference_tables(&self) -> ReferenceTables {
        let builtin = ReferenceTables::default();
        ReferenceTables::new(
            self.mass_vaccination_sites
                .clone()
                .unwrap_or(builtin.mass_vaccination_sites),
            self.statewide_phrases
                .clone()
                .unwrap_or(builtin.statewide_phrases),
        )
    }
}

impl Config {
    /// `requested`, else `default_profile`, else `"default"`.
    pub fn profile_name<'a>(&'a self, requested: Option<&'a str>) -> &'a str {
        requested
            .or(self.default_profile.as_deref())
            .unwrap_or("default")
    }

    pub fn profile(&self, name: &str) -> Result<&Profile, ConfigError> {
        self.profiles
            .get(name)
            .ok_or_else(|| ConfigError::ProfileNotFound {
                name: name.into(),
                available: self.profile_names(),
            })
    }

    /// Comma-separated profile names, or `(none)`.
    pub fn profile_names(&self) -> String {
        if self.profiles.is_empty() {
            "(none)".into()
        } else {
            self.profiles.keys().cloned().collect::<Vec<_>>().join(", ")
        }
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("org", "vaccinatema", "vaxmap").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("vaxmap");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load from an explicit file + environment. A missing file is not an
/// error: defaults and environment still apply.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let config: Config = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
        .extract()?;
    Ok(config)
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    save_config_to(cfg, &config_path())
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Translation ─────────────────────────────────────────────────────

/// Parse and validate a backend URL.
pub fn parse_backend_url(raw: &str) -> Result<url::Url, ConfigError> {
    let url: url::Url = raw.parse().map_err(|_| ConfigError::Validation {
        field: "backend".into(),
        reason: format!("invalid URL: {raw}"),
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::Validation {
            field: "backend".into(),
            reason: format!("expected an http(s) URL, got '{raw}'"),
        });
    }
    Ok(url)
}

/// Build a `LocatorConfig` from a profile plus the global sections.
pub fn profile_to_locator_config(
    cfg: &Config,
    profile: &Profile,
) -> Result<LocatorConfig, ConfigError> {
    let backend_url = parse_backend_url(&profile.backend)?;

    let tls = if profile.insecure.unwrap_or(false) {
        TlsVerification::DangerAcceptInvalid
    } else if let Some(ref ca_path) = profile.ca_cert {
        TlsVerification::CustomCa(ca_path.clone())
    } else {
        TlsVerification::SystemDefaults
    };

    if vaxmap_core::DateFormatter::with_offset_minutes(cfg.defaults.utc_offset_minutes).is_none()
    {
        return Err(ConfigError::Validation {
            field: "defaults.utc_offset_minutes".into(),
            reason: format!(
                "{} is outside -1439..=1439",
                cfg.defaults.utc_offset_minutes
            ),
        });
    }

    Ok(LocatorConfig {
        backend_url,
        tls,
        timeout: Duration::from_secs(profile.timeout.unwrap_or(cfg.defaults.timeout)),
        ordering: cfg.defaults.ordering,
        reference_tables: cfg.classification.reference_tables(),
        utc_offset_minutes: cfg.defaults.utc_offset_minutes,
    })
}
