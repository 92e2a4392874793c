// ── Pin classification ──
//
// Decides a site's pin category from its availability, served-population
// text and name. The reference lists are curated content: matching is
// exact, case-sensitive, after trimming the input only.

use serde::{Deserialize, Serialize};

use crate::model::PinCategory;

/// High-volume, large-venue sites.
pub const MASS_VACCINATION_SITES: &[&str] = &[
    "Foxborough: Gillette Stadium",
    "Danvers: Doubletree Hotel",
    "Springfield: Eastfield Mall",
    "Dartmouth: Former Circuit City",
    "Natick: Natick Mall",
    "Boston: Reggie Lewis Center (Roxbury Community College)",
    "Boston: Hynes Convention Center",
];

/// `serves` values meaning every eligible resident may book.
pub const STATEWIDE_PHRASES: &[&str] = &[
    "All eligible people statewide",
    "Eligible populations statewide",
];

/// Reference lists the classifier matches against.
///
/// Injected rather than global so callers (and tests) can classify against
/// their own lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceTables {
    pub mass_vaccination_sites: Vec<String>,
    pub statewide_phrases: Vec<String>,
}

impl Default for ReferenceTables {
    fn default() -> Self {
        Self {
            mass_vaccination_sites: MASS_VACCINATION_SITES
                .iter()
                .map(|s| (*s).to_owned())
                .collect(),
            statewide_phrases: STATEWIDE_PHRASES.iter().map(|s| (*s).to_owned()).collect(),
        }
    }
}

impl ReferenceTables {
    pub fn new(mass_vaccination_sites: Vec<String>, statewide_phrases: Vec<String>) -> Self {
        Self {
            mass_vaccination_sites,
            statewide_phrases,
        }
    }

    pub fn is_mass_vaccination_site(&self, location_name: &str) -> bool {
        let name = location_name.trim();
        self.mass_vaccination_sites.iter().any(|s| s == name)
    }

    pub fn serves_statewide(&self, serves: &str) -> bool {
        let serves = serves.trim();
        self.statewide_phrases.iter().any(|p| p == serves)
    }

    /// Classify a site. First match wins:
    ///
    /// 1. no (or empty) availability: [`PinCategory::NoAvailability`]
    /// 2. name on the venue list: [`PinCategory::MassVaccinationSite`]
    /// 3. `serves` on the phrase list: [`PinCategory::StatewideEligible`]
    /// 4. anything else: [`PinCategory::Other`]
    ///
    /// Availability is not trimmed: whitespace-only availability counts
    /// as reported.
    pub fn classify(
        &self,
        availability: Option<&str>,
        serves: Option<&str>,
        location_name: Option<&str>,
    ) -> PinCategory {
        if availability.is_none_or(str::is_empty) {
            PinCategory::NoAvailability
        } else if location_name.is_some_and(|n| self.is_mass_vaccination_site(n)) {
            PinCategory::MassVaccinationSite
        } else if serves.is_some_and(|s| self.serves_statewide(s)) {
            PinCategory::StatewideEligible
        } else {
            PinCategory::Other
        }
    }
}
