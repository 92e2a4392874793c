//! Site list command handler.

use tabled::Tabled;
use vaxmap_core::{Coordinator, RefreshOutcome, Site};

use crate::cli::{GlobalOpts, SitesArgs};
use crate::config::Config;
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
pub(super) struct SiteRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Availability")]
    availability: String,
    #[tabled(rename = "Last updated")]
    last_updated: String,
}

impl SiteRow {
    pub(super) fn new(site: &Site, color: bool) -> Self {
        Self {
            id: site.id.clone(),
            name: site.location_name.clone(),
            category: output::paint_category(site.pin_category, color),
            availability: site
                .vaccine_availability
                .as_ref()
                .map_or_else(|| "-".into(), |a| util::one_line(&a.to_string())),
            last_updated: site.last_updated.clone(),
        }
    }
}

/// Render a site list in the selected output format.
pub(super) fn render(sites: &[Site], global: &GlobalOpts) -> Result<String, CliError> {
    let color = output::should_color(global.color());
    output::render_list(
        global.output(),
        sites,
        |s| SiteRow::new(s, color),
        |s| s.id.clone(),
    )
}

pub async fn handle(
    coordinator: &Coordinator,
    args: &SitesArgs,
    global: &GlobalOpts,
    cfg: &Config,
) -> Result<(), CliError> {
    let include_unavailable = args.all || cfg.defaults.include_unavailable;
    let outcome = util::with_spinner(
        global,
        "Loading vaccine sites…",
        coordinator.load_initial(include_unavailable),
    )
    .await?;

    if outcome == RefreshOutcome::Discarded {
        tracing::warn!("site list was superseded by a newer request");
    }

    let sites = util::filter_sites(&coordinator.snapshot().sites, args.category);
    output::print_output(&render(&sites, global)?, global.quiet);
    Ok(())
}
