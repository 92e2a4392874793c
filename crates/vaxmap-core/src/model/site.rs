// ── Site domain type ──

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

use super::geo::FocusPoint;
use super::linked_text::LinkedText;
use super::popup::SitePopup;

/// Visual classification of a site's map pin.
///
/// Exactly one applies per site. See
/// [`ReferenceTables::classify`](crate::classify::ReferenceTables::classify)
/// for the decision order.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PinCategory {
    /// No availability reported.
    NoAvailability,
    /// High-volume venue from the reference list.
    MassVaccinationSite,
    /// Open to every eligible resident of the state.
    StatewideEligible,
    Other,
}

impl PinCategory {
    /// CSS class of the pin the web front end draws for this category.
    pub fn pin_class(self) -> &'static str {
        match self {
            Self::NoAvailability => "dot",
            Self::MassVaccinationSite => "star star-red",
            Self::StatewideEligible => "star star-green",
            Self::Other => "star star-blue",
        }
    }

    /// Short human label.
    pub fn label(self) -> &'static str {
        match self {
            Self::NoAvailability => "no availability",
            Self::MassVaccinationSite => "mass vaccination site",
            Self::StatewideEligible => "statewide eligible",
            Self::Other => "other",
        }
    }
}

/// Canonical, rendering-ready view of a vaccine site.
///
/// Built fresh from a `RawSite` on every refresh and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Site {
    pub id: String,
    pub location_name: String,
    pub address: String,
    pub populations_served: LinkedText,
    /// `None` when the backend reported no availability. Distinct from an
    /// empty fragment list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vaccine_availability: Option<LinkedText>,
    /// Human-readable timestamp, or the `"unknown"` sentinel.
    pub last_updated: String,
    pub book_appointment_information: LinkedText,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions_at_site: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub pin_category: PinCategory,
}

impl Site {
    /// Map position, if the backend supplied both coordinates.
    pub fn position(&self) -> Option<FocusPoint> {
        FocusPoint::from_parts(self.latitude, self.longitude)
    }

    /// A marker for this site. Sites without a position cannot be placed.
    pub fn marker(&self) -> Option<Marker> {
        self.position().map(|position| Marker {
            id: self.id.clone(),
            position,
            pin_category: self.pin_category,
        })
    }

    /// Details shown when the site's pin is selected.
    pub fn popup(&self) -> SitePopup {
        SitePopup::from(self)
    }
}

/// A placeable pin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub id: String,
    pub position: FocusPoint,
    pub pin_category: PinCategory,
}

/// The site behind a selected pin, plus where its popup is anchored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    pub position: Option<FocusPoint>,
    pub site: Site,
}

impl Selection {
    pub fn of(site: &Site) -> Self {
        Self {
            position: site.position(),
            site: site.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn pin_classes_match_front_end() {
        assert_eq!(PinCategory::NoAvailability.pin_class(), "dot");
        assert_eq!(PinCategory::MassVaccinationSite.pin_class(), "star star-red");
        assert_eq!(PinCategory::StatewideEligible.pin_class(), "star star-green");
        assert_eq!(PinCategory::Other.pin_class(), "star star-blue");
    }

    #[test]
    fn category_names_round_trip_through_strum() {
        for category in PinCategory::iter() {
            let name = category.to_string();
            assert_eq!(PinCategory::from_str(&name).ok(), Some(category));
        }
        assert_eq!(
            PinCategory::MassVaccinationSite.to_string(),
            "mass_vaccination_site"
        );
    }

    fn site(lat: Option<f64>, lng: Option<f64>) -> Site {
        Site {
            id: "s1".into(),
            location_name: "Random Pharmacy".into(),
            address: String::new(),
            populations_served: LinkedText::default(),
            vaccine_availability: None,
            last_updated: "unknown".into(),
            book_appointment_information: LinkedText::default(),
            instructions_at_site: None,
            latitude: lat,
            longitude: lng,
            pin_category: PinCategory::NoAvailability,
        }
    }

    #[test]
    fn site_without_coordinates_has_no_marker() {
        assert!(site(None, Some(-71.0)).marker().is_none());
        assert!(site(Some(42.0), None).marker().is_none());

        let marker = site(Some(42.0), Some(-71.0)).marker();
        assert_eq!(
            marker.map(|m| m.position),
            Some(FocusPoint::new(42.0, -71.0))
        );
    }

    #[test]
    fn absent_availability_is_omitted_from_json() {
        let json = serde_json::to_value(site(None, None)).unwrap_or_default();
        assert!(json.get("vaccine_availability").is_none());
        assert_eq!(json["pin_category"], "no_availability");
    }
}
