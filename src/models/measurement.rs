use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
pub struct Coordinate {
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,

    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// A station reading in canonical form. Only built by the normalizer, and
/// only from records carrying both coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct CanonicalMeasurement {
    pub location: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,

    #[validate(nested)]
    pub coordinate: Coordinate,

    #[validate(length(min = 1))]
    pub parameter: String,

    /// Absent means "no data", which is not the same as a zero reading.
    pub value: Option<f64>,
    pub unit: Option<String>,

    /// Timestamp text exactly as the store sent it.
    pub last_updated: Option<String>,
    /// `last_updated` read as UTC, when it is in a recognised layout.
    pub observed_at: Option<DateTime<Utc>>,
}
