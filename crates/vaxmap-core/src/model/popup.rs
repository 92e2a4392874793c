// ── Site details popup ──

use std::fmt;

use serde::Serialize;

use super::linked_text::LinkedText;
use super::site::Site;

/// Shown in place of availability text when a site reports none.
pub const NO_AVAILABILITY_TEXT: &str = "None";

/// Everything the details popup of a selected pin shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SitePopup {
    pub heading: String,
    pub details: LinkedText,
    pub address: String,
    /// Availability text, or [`NO_AVAILABILITY_TEXT`].
    pub availability: LinkedText,
    pub last_updated: String,
    pub appointment: LinkedText,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
}

impl From<&Site> for SitePopup {
    fn from(site: &Site) -> Self {
        Self {
            heading: site.location_name.clone(),
            details: site.populations_served.clone(),
            address: site.address.clone(),
            availability: site
                .vaccine_availability
                .clone()
                .unwrap_or_else(|| LinkedText::parse(NO_AVAILABILITY_TEXT)),
            last_updated: site.last_updated.clone(),
            appointment: site.book_appointment_information.clone(),
            instructions: site.instructions_at_site.clone(),
        }
    }
}

impl fmt::Display for SitePopup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.heading)?;
        writeln!(f, "Details: {}", self.details)?;
        writeln!(f, "Address: {}", self.address)?;
        writeln!(f, "Availability: {}", self.availability)?;
        writeln!(f, "(Availability last updated {})", self.last_updated)?;
        write!(f, "Make an appointment: {}", self.appointment)?;
        if let Some(ref instructions) = self.instructions {
            write!(f, "\nAt the site: {instructions}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PinCategory;
    use pretty_assertions::assert_eq;

    fn site() -> Site {
        Site {
            id: "s1".into(),
            location_name: "Natick: Natick Mall".into(),
            address: "1245 Worcester St, Natick, MA".into(),
            populations_served: LinkedText::parse("Eligible populations statewide"),
            vaccine_availability: None,
            last_updated: "unknown".into(),
            book_appointment_information: LinkedText::parse("www.maimmunizations.org"),
            instructions_at_site: None,
            latitude: Some(42.3),
            longitude: Some(-71.38),
            pin_category: PinCategory::NoAvailability,
        }
    }

    #[test]
    fn missing_availability_reads_none() {
        let popup = SitePopup::from(&site());
        assert_eq!(popup.availability.to_string(), "None");
    }

    #[test]
    fn renders_as_text_block() {
        let mut s = site();
        s.vaccine_availability = Some(LinkedText::parse("120 doses"));
        s.last_updated = "March 6, 2021, 3:06 AM".into();
        s.instructions_at_site = Some("Enter through Macy's".into());

        assert_eq!(
            s.popup().to_string(),
            "Natick: Natick Mall\n\
             Details: Eligible populations statewide\n\
             Address: 1245 Worcester St, Natick, MA\n\
             Availability: 120 doses\n\
             (Availability last updated March 6, 2021, 3:06 AM)\n\
             Make an appointment: www.maimmunizations.org\n\
             At the site: Enter through Macy's"
        );
    }
}
