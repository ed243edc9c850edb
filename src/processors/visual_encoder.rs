use maud::html;

use crate::models::{CanonicalMeasurement, DisplayMarker, LegendEntry, SeverityBand};
use crate::utils::constants::*;

/// Severity band for a concentration. A value must exceed a threshold to
/// enter its band; anything else (including NaN) is green.
pub fn color(value: f64) -> SeverityBand {
    if value > THRESHOLD_DEEP_PURPLE {
        SeverityBand::DeepPurple
    } else if value > THRESHOLD_PURPLE {
        SeverityBand::Purple
    } else if value > THRESHOLD_RED {
        SeverityBand::Red
    } else if value > THRESHOLD_ORANGE {
        SeverityBand::Orange
    } else if value > THRESHOLD_YELLOW {
        SeverityBand::Yellow
    } else {
        SeverityBand::Green
    }
}

/// Marker diameter: `4 + 2·sqrt(v)` capped at 30, or the minimum of 6 when
/// there is no positive value.
pub fn size(value: Option<f64>) -> f64 {
    match value {
        Some(v) if v > 0.0 => {
            (MARKER_SIZE_BASE + MARKER_SIZE_SCALE * v.sqrt()).min(MAX_MARKER_SIZE)
        }
        _ => MIN_MARKER_SIZE,
    }
}

pub fn legend() -> Vec<LegendEntry> {
    LEGEND_GRADES
        .iter()
        .enumerate()
        .map(|(i, &from)| {
            let band = color(from + 0.1);
            LegendEntry {
                from,
                to: LEGEND_GRADES.get(i + 1).copied(),
                band,
                color: band.hex(),
            }
        })
        .collect()
}

pub struct VisualEncoder {
    parameter_label: String,
}

impl VisualEncoder {
    pub fn new(parameter_label: impl Into<String>) -> Self {
        Self {
            parameter_label: parameter_label.into(),
        }
    }

    /// Build the marker for a measurement; `None` when it carries no value.
    pub fn encode(&self, measurement: &CanonicalMeasurement) -> Option<DisplayMarker> {
        let value = measurement.value?;

        Some(DisplayMarker {
            coordinate: measurement.coordinate,
            color: color(value),
            size: size(Some(value)),
            value,
            popup: self.popup(measurement, value),
        })
    }

    fn popup(&self, measurement: &CanonicalMeasurement, value: f64) -> String {
        let when = match (&measurement.observed_at, &measurement.last_updated) {
            (Some(t), _) => t.format("%Y-%m-%d %H:%M UTC").to_string(),
            (None, Some(text)) => text.clone(),
            (None, None) => "N/A".to_string(),
        };

        html! {
            strong { (measurement.location.as_deref().unwrap_or("Station")) }
            br;
            (measurement.city.as_deref().unwrap_or_default())
            " "
            (measurement.country.as_deref().unwrap_or_default())
            br;
            (self.parameter_label) ": " b { (value) } " "
            (measurement.unit.as_deref().unwrap_or_default())
            br;
            small { "Updated: " (when) }
        }
        .into_string()
    }
}
