use serde::{Deserialize, Serialize};

use crate::models::Coordinate;

/// Ordered PM severity categories, cleanest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SeverityBand {
    Green,
    Yellow,
    Orange,
    Red,
    Purple,
    DeepPurple,
}

impl SeverityBand {
    pub const ALL: [SeverityBand; 6] = [
        SeverityBand::Green,
        SeverityBand::Yellow,
        SeverityBand::Orange,
        SeverityBand::Red,
        SeverityBand::Purple,
        SeverityBand::DeepPurple,
    ];

    pub fn hex(&self) -> &'static str {
        match self {
            SeverityBand::Green => "#00e400",
            SeverityBand::Yellow => "#ffd700",
            SeverityBand::Orange => "#ff7e00",
            SeverityBand::Red => "#ff0000",
            SeverityBand::Purple => "#800080",
            SeverityBand::DeepPurple => "#7e0023",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SeverityBand::Green => "Good",
            SeverityBand::Yellow => "Moderate",
            SeverityBand::Orange => "Unhealthy for sensitive groups",
            SeverityBand::Red => "Unhealthy",
            SeverityBand::Purple => "Very unhealthy",
            SeverityBand::DeepPurple => "Hazardous",
        }
    }
}

impl std::fmt::Display for SeverityBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// A rendered point, rebuilt from scratch every cycle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayMarker {
    pub coordinate: Coordinate,
    pub color: SeverityBand,
    pub size: f64,
    pub value: f64,
    pub popup: String,
}

/// One row of the map legend: `from` up to `to` (open-ended when `None`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendEntry {
    pub from: f64,
    pub to: Option<f64>,
    pub band: SeverityBand,
    pub color: &'static str,
}
