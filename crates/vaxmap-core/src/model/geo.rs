// ── Map geometry ──

use serde::{Deserialize, Serialize};

/// A latitude/longitude pair, in degrees.
///
/// Used both as a marker position and as the focus point a location
/// search centers the map on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FocusPoint {
    pub lat: f64,
    pub lng: f64,
}

impl FocusPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Both coordinates present, or nothing.
    pub fn from_parts(lat: Option<f64>, lng: Option<f64>) -> Option<Self> {
        match (lat, lng) {
            (Some(lat), Some(lng)) => Some(Self { lat, lng }),
            _ => None,
        }
    }
}

/// Geographic center of Massachusetts.
pub const DEFAULT_CENTER: FocusPoint = FocusPoint {
    lat: 42.4072,
    lng: -71.3824,
};

/// Zoom level that fits the whole state in a 400px map.
pub const DEFAULT_ZOOM: u8 = 8;

/// The map's visible region, as reported by pan/zoom events.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapView {
    pub center: FocusPoint,
    pub zoom: u8,
}

impl Default for MapView {
    fn default() -> Self {
        Self {
            center: DEFAULT_CENTER,
            zoom: DEFAULT_ZOOM,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_parts_needs_both_coordinates() {
        assert_eq!(
            FocusPoint::from_parts(Some(42.0), Some(-71.0)),
            Some(FocusPoint::new(42.0, -71.0))
        );
        assert!(FocusPoint::from_parts(Some(42.0), None).is_none());
        assert!(FocusPoint::from_parts(None, Some(-71.0)).is_none());
        assert!(FocusPoint::from_parts(None, None).is_none());
    }

    #[test]
    fn map_view_serializes_like_change_events() {
        let view = MapView {
            center: FocusPoint::new(42.36, -71.06),
            zoom: 12,
        };
        let json = serde_json::to_value(view).unwrap_or_default();
        assert_eq!(
            json,
            serde_json::json!({ "center": { "lat": 42.36, "lng": -71.06 }, "zoom": 12 })
        );
    }
}
