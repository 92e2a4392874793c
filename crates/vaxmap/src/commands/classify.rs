//! Offline pin classification.

use serde::Serialize;
use vaxmap_core::PinCategory;

use crate::cli::{ClassifyArgs, GlobalOpts};
use crate::config::Config;
use crate::error::CliError;
use crate::output;

#[derive(Debug, Serialize)]
struct Classification {
    category: PinCategory,
    label: &'static str,
    pin_class: &'static str,
}

pub fn handle(args: &ClassifyArgs, global: &GlobalOpts, cfg: &Config) -> Result<(), CliError> {
    let tables = cfg.classification.reference_tables();
    let category = tables.classify(
        args.availability.as_deref(),
        args.serves.as_deref(),
        args.name.as_deref(),
    );
    tracing::debug!(%category, "classified site");

    let result = Classification {
        category,
        label: category.label(),
        pin_class: category.pin_class(),
    };

    let color = output::should_color(global.color());
    let out = output::render_single(
        global.output(),
        &result,
        |r| {
            format!(
                "Category: {}\nPin:      {}",
                output::paint_category(r.category, color),
                r.pin_class
            )
        },
        |r| r.category.to_string(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}
