//! Map marker command handler.

use tabled::Tabled;
use vaxmap_core::{Coordinator, Marker};

use crate::cli::{GlobalOpts, SitesArgs};
use crate::config::Config;
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct MarkerRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Lat")]
    lat: String,
    #[tabled(rename = "Lng")]
    lng: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Pin")]
    pin: &'static str,
}

impl MarkerRow {
    fn new(marker: &Marker, color: bool) -> Self {
        Self {
            id: marker.id.clone(),
            lat: format!("{:.5}", marker.position.lat),
            lng: format!("{:.5}", marker.position.lng),
            category: output::paint_category(marker.pin_category, color),
            pin: marker.pin_category.pin_class(),
        }
    }
}

pub async fn handle(
    coordinator: &Coordinator,
    args: &SitesArgs,
    global: &GlobalOpts,
    cfg: &Config,
) -> Result<(), CliError> {
    let include_unavailable = args.all || cfg.defaults.include_unavailable;
    util::with_spinner(
        global,
        "Loading vaccine sites…",
        coordinator.load_initial(include_unavailable),
    )
    .await?;

    let wanted = args.category.map(util::category);
    let markers: Vec<Marker> = coordinator
        .markers()
        .into_iter()
        .filter(|m| wanted.is_none_or(|c| m.pin_category == c))
        .collect();

    let color = output::should_color(global.color());
    let out = output::render_list(
        global.output(),
        &markers,
        |m| MarkerRow::new(m, color),
        |m| format!("{}\t{}\t{}", m.id, m.position.lat, m.position.lng),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}
