//! Shared helpers for command handlers.

use std::future::Future;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use serde_json::{Map, Value};

use vaxmap_core::{PinCategory, Site};

use crate::cli::{CategoryFilter, GlobalOpts, OutputFormat};
use crate::error::CliError;

/// Run `fut` behind a spinner on stderr.
///
/// The spinner only shows for interactive table output, so piped JSON or
/// plain output stays clean.
pub async fn with_spinner<T, F>(global: &GlobalOpts, message: &str, fut: F) -> T
where
    F: Future<Output = T>,
{
    let show = !global.quiet
        && global.output() == OutputFormat::Table
        && std::io::IsTerminal::is_terminal(&std::io::stderr());
    if !show {
        return fut.await;
    }

    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(message.to_owned());
    spinner.enable_steady_tick(Duration::from_millis(100));

    let out = fut.await;
    spinner.finish_and_clear();
    out
}

pub fn category(filter: CategoryFilter) -> PinCategory {
    match filter {
        CategoryFilter::NoAvailability => PinCategory::NoAvailability,
        CategoryFilter::MassVaccinationSite => PinCategory::MassVaccinationSite,
        CategoryFilter::StatewideEligible => PinCategory::StatewideEligible,
        CategoryFilter::Other => PinCategory::Other,
    }
}

/// Keep only sites in the requested category, if any.
pub fn filter_sites(sites: &[Site], filter: Option<CategoryFilter>) -> Vec<Site> {
    let wanted = filter.map(category);
    sites
        .iter()
        .filter(|s| wanted.is_none_or(|c| s.pin_category == c))
        .cloned()
        .collect()
}

/// Parse repeated `KEY=VALUE` search filters.
///
/// Values that parse as JSON (numbers, booleans, arrays) are sent as such;
/// anything else is sent as a string.
pub fn parse_filters(raw: &[String]) -> Result<Map<String, Value>, CliError> {
    let mut filters = Map::new();
    for entry in raw {
        let (key, value) = entry.split_once('=').ok_or_else(|| CliError::Validation {
            field: "filter".into(),
            reason: format!("expected KEY=VALUE, got '{entry}'"),
        })?;
        let key = key.trim();
        if key.is_empty() {
            return Err(CliError::Validation {
                field: "filter".into(),
                reason: format!("empty key in '{entry}'"),
            });
        }
        let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.into()));
        filters.insert(key.into(), value);
    }
    Ok(filters)
}

/// Collapse multi-line text for a table cell.
pub fn one_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn filters_keep_json_types() {
        let filters = parse_filters(&[
            "pediatric=true".into(),
            "vaccineType=Moderna".into(),
            "maxDistance=15".into(),
        ])
        .unwrap();
        assert_eq!(Value::Object(filters), json!({
            "pediatric": true,
            "vaccineType": "Moderna",
            "maxDistance": 15,
        }));
    }

    #[test]
    fn filter_without_equals_is_rejected() {
        let err = parse_filters(&["pediatric".into()]).unwrap_err();
        assert!(matches!(err, CliError::Validation { ref field, .. } if field == "filter"));
        assert!(parse_filters(&["=x".into()]).is_err());
    }

    #[test]
    fn one_line_collapses_whitespace() {
        assert_eq!(one_line("Mon-Fri\n  9am\t5pm"), "Mon-Fri 9am 5pm");
    }
}
