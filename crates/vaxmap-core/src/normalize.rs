// ── Backend-to-domain normalization ──
//
// Turns raw `vaxmap_api` site records into canonical `Site` view models.
// Pure and total: absent or malformed optional fields fall back to
// defaults, never to errors.

use chrono::{DateTime, FixedOffset, Offset, Utc};

use vaxmap_api::RawSite;

use crate::classify::ReferenceTables;
use crate::model::{LinkedText, Site};

/// Shown when a site carries no usable `lastUpdated` timestamp.
pub const UNKNOWN_LAST_UPDATED: &str = "unknown";

/// `March 6, 2021, 3:06 AM`
const LAST_UPDATED_FORMAT: &str = "%B %-d, %Y, %-I:%M %p";

// ── Date formatting ─────────────────────────────────────────────────

/// Formats backend millisecond timestamps in a fixed UTC offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateFormatter {
    offset: FixedOffset,
}

impl Default for DateFormatter {
    fn default() -> Self {
        Self::utc()
    }
}

impl DateFormatter {
    pub fn utc() -> Self {
        Self { offset: Utc.fix() }
    }

    /// Offset east of UTC in minutes. `None` when outside ±24h.
    pub fn with_offset_minutes(minutes: i32) -> Option<Self> {
        let offset = FixedOffset::east_opt(minutes.checked_mul(60)?)?;
        Some(Self { offset })
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// Human-readable form of a millisecond timestamp, or
    /// [`UNKNOWN_LAST_UPDATED`] when absent, non-finite or out of range.
    pub fn format(&self, millis: Option<f64>) -> String {
        millis
            .and_then(to_datetime)
            .map_or_else(
                || UNKNOWN_LAST_UPDATED.to_owned(),
                |dt| {
                    dt.with_timezone(&self.offset)
                        .format(LAST_UPDATED_FORMAT)
                        .to_string()
                },
            )
    }
}

#[allow(clippy::cast_possible_truncation, clippy::as_conversions)]
fn to_datetime(millis: f64) -> Option<DateTime<Utc>> {
    // i64::MAX is not representable as f64; stay well inside the range.
    const LIMIT: f64 = 9.0e15;
    if !millis.is_finite() || millis.abs() > LIMIT {
        return None;
    }
    DateTime::from_timestamp_millis(millis.trunc() as i64)
}

// ── Normalizer ──────────────────────────────────────────────────────

/// Builds canonical sites from raw backend records.
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    tables: ReferenceTables,
    dates: DateFormatter,
}

impl Normalizer {
    pub fn new(tables: ReferenceTables, dates: DateFormatter) -> Self {
        Self { tables, dates }
    }

    pub fn tables(&self) -> &ReferenceTables {
        &self.tables
    }

    pub fn dates(&self) -> &DateFormatter {
        &self.dates
    }

    /// One `Site` per record, same length, same order.
    pub fn normalize(&self, raw: &[RawSite]) -> Vec<Site> {
        raw.iter().map(|r| self.normalize_one(r)).collect()
    }

    pub fn normalize_one(&self, raw: &RawSite) -> Site {
        let availability = raw.availability.as_deref().filter(|a| !a.is_empty());

        Site {
            id: raw.id.clone(),
            location_name: raw.name.clone().unwrap_or_default(),
            address: raw.address.clone().unwrap_or_default(),
            populations_served: LinkedText::parse_optional(raw.serves.as_deref()),
            vaccine_availability: availability.map(LinkedText::parse),
            last_updated: self.dates.format(raw.last_updated),
            book_appointment_information: LinkedText::parse_optional(
                raw.book_appointment_info.as_deref(),
            ),
            instructions_at_site: raw
                .instructions_at_site
                .clone()
                .filter(|s| !s.trim().is_empty()),
            latitude: raw.latitude,
            longitude: raw.longitude,
            pin_category: self.tables.classify(
                availability,
                raw.serves.as_deref(),
                raw.name.as_deref(),
            ),
        }
    }
}
