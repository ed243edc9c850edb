use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use validator::Validate;

use crate::models::{CanonicalMeasurement, Coordinate, RawStationRecord};

/// Why a raw record never became a measurement. Not an error: rejected
/// records are counted and dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rejection {
    MissingCoordinates,
    InvalidCoordinates,
}

impl std::fmt::Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rejection::MissingCoordinates => write!(f, "missing latitude or longitude"),
            Rejection::InvalidCoordinates => write!(f, "coordinates out of range"),
        }
    }
}

pub struct Normalizer {
    default_parameter: String,
}

impl Normalizer {
    pub fn new(default_parameter: impl Into<String>) -> Self {
        Self {
            default_parameter: default_parameter.into(),
        }
    }

    /// Map a store record to canonical form.
    ///
    /// Value, unit and timestamp pass through untouched; an absent value stays
    /// absent.
    pub fn normalize(
        &self,
        raw: RawStationRecord,
    ) -> std::result::Result<CanonicalMeasurement, Rejection> {
        let (Some(latitude), Some(longitude)) = (raw.lat, raw.lon) else {
            return Err(Rejection::MissingCoordinates);
        };

        let parameter = raw
            .parameter
            .filter(|p| !p.trim().is_empty())
            .unwrap_or_else(|| self.default_parameter.clone());

        let measurement = CanonicalMeasurement {
            location: raw.location,
            city: raw.city,
            country: raw.country,
            coordinate: Coordinate::new(latitude, longitude),
            parameter,
            value: raw.value,
            unit: raw.unit,
            observed_at: raw.last_updated.as_deref().and_then(parse_timestamp),
            last_updated: raw.last_updated,
        };

        if measurement.coordinate.validate().is_err() {
            return Err(Rejection::InvalidCoordinates);
        }

        Ok(measurement)
    }
}

const NAIVE_LAYOUTS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// Accepts RFC 3339, the store's `YYYY-MM-DD HH:MM:SS.sssZ` layout and its
/// variants without seconds or zone, and bare dates. Zoneless text is UTC.
pub fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if let Ok(t) = DateTime::parse_from_rfc3339(text) {
        return Some(t.with_timezone(&Utc));
    }

    let naive = text.trim_end_matches('Z');
    NAIVE_LAYOUTS
        .iter()
        .find_map(|layout| NaiveDateTime::parse_from_str(naive, layout).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(naive, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
        .map(|t| t.and_utc())
}
