// ── Search radius to map zoom ──

/// `(miles, zoom)` pairs, tightest radius first. Calibrated for a 400px map.
pub const MAX_MILES_TO_ZOOM: &[(f64, u8)] = &[
    (0.25, 17),
    (0.5, 16),
    (1.0, 15),
    (5.0, 12),
    (10.0, 11),
    (25.0, 10),
];

const TIGHTEST_ZOOM: u8 = 17;
const WIDEST_ZOOM: u8 = 10;

/// Zoom level that fits a search radius of `miles` on the map.
///
/// Picks the smallest table radius that covers `miles`. Radii beyond the
/// table use the widest zoom; non-finite or non-positive radii the tightest.
pub fn zoom_for_radius(miles: f64) -> u8 {
    if !miles.is_finite() || miles <= 0.0 {
        return TIGHTEST_ZOOM;
    }
    MAX_MILES_TO_ZOOM
        .iter()
        .find(|(max, _)| miles <= *max)
        .map_or(WIDEST_ZOOM, |(_, zoom)| *zoom)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_table_entries() {
        for (miles, zoom) in MAX_MILES_TO_ZOOM {
            assert_eq!(zoom_for_radius(*miles), *zoom, "radius {miles}");
        }
    }

    #[test]
    fn rounds_up_to_next_radius() {
        assert_eq!(zoom_for_radius(0.1), 17);
        assert_eq!(zoom_for_radius(0.3), 16);
        assert_eq!(zoom_for_radius(2.0), 12);
        assert_eq!(zoom_for_radius(7.5), 11);
        assert_eq!(zoom_for_radius(20.0), 10);
    }

    #[test]
    fn out_of_table_radii() {
        assert_eq!(zoom_for_radius(100.0), 10);
        assert_eq!(zoom_for_radius(0.0), 17);
        assert_eq!(zoom_for_radius(-3.0), 17);
        assert_eq!(zoom_for_radius(f64::NAN), 17);
        assert_eq!(zoom_for_radius(f64::INFINITY), 17);
    }
}
