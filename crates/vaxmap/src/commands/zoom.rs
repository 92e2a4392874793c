//! Search radius to map zoom lookup.

use serde::Serialize;
use tabled::Tabled;
use vaxmap_core::{MAX_MILES_TO_ZOOM, zoom_for_radius};

use crate::cli::{GlobalOpts, ZoomArgs};
use crate::error::CliError;
use crate::output;

#[derive(Debug, Serialize)]
struct ZoomEntry {
    miles: f64,
    zoom: u8,
}

#[derive(Tabled)]
struct ZoomRow {
    #[tabled(rename = "Miles")]
    miles: f64,
    #[tabled(rename = "Zoom")]
    zoom: u8,
}

pub fn handle(args: &ZoomArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let out = if let Some(miles) = args.miles {
        let entry = ZoomEntry {
            miles,
            zoom: zoom_for_radius(miles),
        };
        output::render_single(
            global.output(),
            &entry,
            |e| format!("{} miles → zoom {}", e.miles, e.zoom),
            |e| e.zoom.to_string(),
        )?
    } else {
        let table: Vec<ZoomEntry> = MAX_MILES_TO_ZOOM
            .iter()
            .map(|&(miles, zoom)| ZoomEntry { miles, zoom })
            .collect();
        output::render_list(
            global.output(),
            &table,
            |e| ZoomRow {
                miles: e.miles,
                zoom: e.zoom,
            },
            |e| format!("{}\t{}", e.miles, e.zoom),
        )?
    };
    output::print_output(&out, global.quiet);
    Ok(())
}
