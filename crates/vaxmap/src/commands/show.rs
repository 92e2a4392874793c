//! Site detail command handler.

use serde::Serialize;
use vaxmap_core::{Coordinator, FocusPoint, PinCategory, SearchQuery, SitePopup};

use crate::cli::{GlobalOpts, ShowArgs};
use crate::error::CliError;
use crate::output;

use super::util;

/// Popup contents plus where the pin sits.
#[derive(Debug, Serialize)]
struct SiteDetail {
    id: String,
    pin_category: PinCategory,
    #[serde(skip_serializing_if = "Option::is_none")]
    position: Option<FocusPoint>,
    #[serde(flatten)]
    popup: SitePopup,
}

fn detail(d: &SiteDetail, color: bool) -> String {
    let popup = d.popup.to_string();
    let (heading, body) = popup.split_once('\n').unwrap_or((popup.as_str(), ""));
    let mut lines = vec![
        output::paint_heading(heading, color),
        format!("Category: {}", output::paint_category(d.pin_category, color)),
    ];
    if let Some(pos) = d.position {
        lines.push(format!("Position: {:.5}, {:.5}", pos.lat, pos.lng));
    }
    lines.push(body.to_owned());
    lines.join("\n")
}

pub async fn handle(
    coordinator: &Coordinator,
    args: ShowArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let ShowArgs { id, near } = args;
    let fetch = async {
        match near {
            Some(address) => {
                let mut query = SearchQuery::address(address);
                query.availability = Some(vaxmap_core::AvailabilityFilter::All);
                coordinator.search(&query).await
            }
            None => coordinator.load_initial(true).await,
        }
    };
    util::with_spinner(global, "Loading vaccine sites…", fetch).await?;

    let selection = coordinator.require(&id)?;
    let detail_view = SiteDetail {
        id: selection.site.id.clone(),
        pin_category: selection.site.pin_category,
        position: selection.position,
        popup: selection.site.popup(),
    };

    let color = output::should_color(global.color());
    let out = output::render_single(
        global.output(),
        &detail_view,
        |d| detail(d, color),
        |d| d.id.clone(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use vaxmap_core::LinkedText;

    #[test]
    fn detail_puts_category_under_heading() {
        let d = SiteDetail {
            id: "s1".into(),
            pin_category: PinCategory::MassVaccinationSite,
            position: Some(FocusPoint::new(42.09, -71.26)),
            popup: SitePopup {
                heading: "Foxborough: Gillette Stadium".into(),
                details: LinkedText::parse("Eligible populations"),
                address: "1 Patriot Pl".into(),
                availability: LinkedText::parse("500 doses"),
                last_updated: "unknown".into(),
                appointment: LinkedText::parse("www.maimmunizations.org"),
                instructions: None,
            },
        };

        let text = detail(&d, false);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Foxborough: Gillette Stadium");
        assert_eq!(lines[1], "Category: mass vaccination site");
        assert_eq!(lines[2], "Position: 42.09000, -71.26000");
        assert_eq!(lines[3], "Details: Eligible populations");
        assert!(text.ends_with("Make an appointment: www.maimmunizations.org"));
    }
}
