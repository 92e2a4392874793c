// Wire types for the site locator backend.
//
// Every site field is optional on the wire: the backend omits keys and
// sends explicit `null`s freely, and nothing here may fail on either.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A vaccine site record as the backend sends it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSite {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    /// Eligible populations, free text. May embed URLs.
    #[serde(default)]
    pub serves: Option<String>,
    /// Availability, free text. Empty or absent means no known availability.
    #[serde(default)]
    pub availability: Option<String>,
    /// Milliseconds since the Unix epoch.
    #[serde(default)]
    pub last_updated: Option<f64>,
    #[serde(default)]
    pub book_appointment_info: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub instructions_at_site: Option<String>,
}

impl RawSite {
    /// `true` when the backend reported some availability text.
    pub fn has_availability(&self) -> bool {
        self.availability.as_deref().is_some_and(|a| !a.is_empty())
    }
}

/// Availability filter sent with a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AvailabilityFilter {
    /// Include sites without known availability.
    All,
    /// Only sites reporting availability.
    Available,
}

/// Body of `POST /search_query_location`.
///
/// Unset fields are omitted from the JSON body. Extra backend filters
/// ride along in `filters` and are flattened into the top-level object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub availability: Option<AvailabilityFilter>,
    /// Search radius in miles.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub miles: Option<f64>,
    #[serde(flatten)]
    pub filters: Map<String, Value>,
}

impl SearchQuery {
    /// Query centered on a street address.
    pub fn address(address: impl Into<String>) -> Self {
        Self {
            address: Some(address.into()),
            ..Self::default()
        }
    }

    /// Query centered on explicit coordinates.
    pub fn coordinates(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude: Some(latitude),
            longitude: Some(longitude),
            ..Self::default()
        }
    }

    /// `true` when the query carries an address or any coordinate.
    ///
    /// An empty address counts as no address.
    pub fn has_location(&self) -> bool {
        self.address.as_deref().is_some_and(|a| !a.is_empty())
            || self.latitude.is_some()
            || self.longitude.is_some()
    }

    /// `true` when the caller asked for sites regardless of availability.
    pub fn includes_unavailable(&self) -> bool {
        self.availability == Some(AvailabilityFilter::All)
    }
}

/// Response of `POST /search_query_location`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    /// Latitude the backend geocoded the query to.
    #[serde(default)]
    pub lat: Option<f64>,
    /// Longitude the backend geocoded the query to.
    #[serde(default)]
    pub lng: Option<f64>,
    #[serde(default)]
    pub site_data: Vec<RawSite>,
}
