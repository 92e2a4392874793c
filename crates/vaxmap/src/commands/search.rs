//! Site search command handler.

use serde::Serialize;
use vaxmap_core::{AvailabilityFilter, Coordinator, FocusPoint, SearchQuery, Site, zoom_for_radius};

use crate::cli::{GlobalOpts, OutputFormat, SearchArgs};
use crate::config::Config;
use crate::error::CliError;
use crate::output;

use super::{sites, util};

/// What a search shows: where the map centers and which sites it lists.
#[derive(Debug, Serialize)]
struct SearchResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    focus: Option<FocusPoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    zoom: Option<u8>,
    sites: Vec<Site>,
}

/// `include_unavailable` is `--all` or the configured default.
fn build_query(args: SearchArgs, include_unavailable: bool) -> Result<SearchQuery, CliError> {
    let mut query = match (args.address, args.lat, args.lng) {
        (Some(address), _, _) => SearchQuery::address(address),
        (None, Some(lat), Some(lng)) => SearchQuery::coordinates(lat, lng),
        _ => SearchQuery::default(),
    };

    if let Some(miles) = args.miles {
        if !miles.is_finite() || miles <= 0.0 {
            return Err(CliError::Validation {
                field: "miles".into(),
                reason: format!("expected a positive radius, got {miles}"),
            });
        }
        query.miles = Some(miles);
    }

    query.availability = Some(if include_unavailable {
        AvailabilityFilter::All
    } else {
        AvailabilityFilter::Available
    });
    query.filters = util::parse_filters(&args.filters)?;
    Ok(query)
}

pub async fn handle(
    coordinator: &Coordinator,
    args: SearchArgs,
    global: &GlobalOpts,
    cfg: &Config,
) -> Result<(), CliError> {
    let category = args.category;
    let include_unavailable = args.all || cfg.defaults.include_unavailable;
    let query = build_query(args, include_unavailable)?;

    util::with_spinner(global, "Searching vaccine sites…", coordinator.search(&query)).await?;

    let state = coordinator.snapshot();
    let result = SearchResult {
        focus: state.focus,
        zoom: query.miles.map(zoom_for_radius),
        sites: util::filter_sites(&state.sites, category),
    };

    if global.output() == OutputFormat::Table {
        if let (Some(focus), false) = (result.focus, global.quiet) {
            let zoom = result
                .zoom
                .map(|z| format!(", zoom {z}"))
                .unwrap_or_default();
            eprintln!("Centered on {:.5}, {:.5}{zoom}", focus.lat, focus.lng);
        }
        output::print_output(&sites::render(&result.sites, global)?, global.quiet);
        return Ok(());
    }

    let out = output::render_single(global.output(), &result, |_| String::new(), |r| {
        r.sites.iter().map(|s| s.id.as_str()).collect::<Vec<_>>().join("\n")
    })?;
    output::print_output(&out, global.quiet);
    Ok(())
}
