//! CLI configuration: thin wrapper around `vaxmap_config` shared types.
//!
//! Re-exports the shared types and adds CLI-specific resolution that
//! respects `GlobalOpts` flag overrides (--backend, --timeout, etc.).

use clap::ValueEnum;

use vaxmap_core::LocatorConfig;

use crate::cli::{ColorMode, GlobalOpts, OutputFormat};
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use vaxmap_config::{
    Config, Profile, config_path, load_config, parse_backend_url, profile_to_locator_config,
    save_config,
};

// ── CLI-specific helpers ────────────────────────────────────────────

/// Fill unset `--output` / `--color` from the `[defaults]` section.
///
/// Unparseable config values are ignored; the built-in defaults apply.
pub fn apply_defaults(global: &mut GlobalOpts, cfg: &Config) {
    if global.output.is_none() {
        global.output = OutputFormat::from_str(&cfg.defaults.output, true).ok();
    }
    if global.color.is_none() {
        global.color = ColorMode::from_str(&cfg.defaults.color, true).ok();
    }
}

/// Build a `LocatorConfig` from the config file, profile, and CLI overrides.
///
/// CLI flag overrides take priority over profile values. Without a
/// matching profile, `--backend` alone is enough; an explicitly requested
/// profile that does not exist is an error.
pub fn resolve_locator_config(global: &GlobalOpts, cfg: &Config) -> Result<LocatorConfig, CliError> {
    let profile_name = cfg.profile_name(global.profile.as_deref());

    let mut profile = if global.profile.is_some() || cfg.profiles.contains_key(profile_name) {
        cfg.profile(profile_name)?.clone()
    } else {
        let backend = global.backend.as_deref().ok_or_else(|| CliError::NoConfig {
            path: config_path().display().to_string(),
        })?;
        Profile::new(backend)
    };

    if let Some(ref backend) = global.backend {
        profile.backend.clone_from(backend);
    }
    if let Some(timeout) = global.timeout {
        profile.timeout = Some(timeout);
    }
    if global.insecure {
        profile.insecure = Some(true);
    }

    tracing::debug!(profile = profile_name, backend = %profile.backend, "resolved backend");
    Ok(profile_to_locator_config(cfg, &profile)?)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use clap::Parser;

    use super::*;
    use crate::cli::Cli;
    use vaxmap_core::TlsVerification;

    fn global(args: &[&str]) -> GlobalOpts {
        let mut argv = vec!["vaxmap"];
        argv.extend_from_slice(args);
        argv.push("zoom");
        Cli::try_parse_from(argv).unwrap().global
    }

    fn with_profile() -> Config {
        let mut cfg = Config::default();
        let mut profile = Profile::new("https://profile.example.org/");
        profile.timeout = Some(12);
        cfg.profiles.insert("default".into(), profile);
        cfg
    }

    #[test]
    fn backend_flag_alone_is_enough() {
        let locator = resolve_locator_config(
            &global(&["--backend", "http://localhost:8080/"]),
            &Config::default(),
        )
        .unwrap();
        assert_eq!(locator.backend_url.as_str(), "http://localhost:8080/");
        assert_eq!(locator.timeout, Duration::from_secs(30));
    }

    #[test]
    fn nothing_configured_is_no_config() {
        let err = resolve_locator_config(&global(&[]), &Config::default()).unwrap_err();
        assert!(matches!(err, CliError::NoConfig { .. }));
    }

    #[test]
    fn flags_override_profile() {
        let cfg = with_profile();
        let locator = resolve_locator_config(&global(&[]), &cfg).unwrap();
        assert_eq!(locator.backend_url.as_str(), "https://profile.example.org/");
        assert_eq!(locator.timeout, Duration::from_secs(12));
        assert_eq!(locator.tls, TlsVerification::SystemDefaults);

        let locator = resolve_locator_config(
            &global(&["--timeout", "3", "--insecure", "-b", "http://other.example.org/"]),
            &cfg,
        )
        .unwrap();
        assert_eq!(locator.backend_url.as_str(), "http://other.example.org/");
        assert_eq!(locator.timeout, Duration::from_secs(3));
        assert_eq!(locator.tls, TlsVerification::DangerAcceptInvalid);
    }

    #[test]
    fn missing_explicit_profile_lists_available() {
        let err = resolve_locator_config(&global(&["--profile", "staging"]), &with_profile())
            .unwrap_err();
        assert!(matches!(
            err,
            CliError::ProfileNotFound { ref name, ref available }
                if name == "staging" && available == "default"
        ));
    }

    #[test]
    fn defaults_fill_output_and_color() {
        let mut cfg = Config::default();
        cfg.defaults.output = "json".into();
        cfg.defaults.color = "bogus".into();

        let mut opts = global(&[]);
        apply_defaults(&mut opts, &cfg);
        assert_eq!(opts.output(), OutputFormat::Json);
        assert_eq!(opts.color(), ColorMode::Auto);

        let mut opts = global(&["-o", "yaml"]);
        apply_defaults(&mut opts, &cfg);
        assert_eq!(opts.output(), OutputFormat::Yaml);
    }
}
