use tracing::debug;

use crate::models::{DisplayMarker, RawStationRecord};
use crate::processors::{CycleReport, Normalizer, ParameterFilter, VisualEncoder};
use crate::utils::Settings;

/// Normalize, filter and encode one cycle's complete record set.
pub struct CyclePipeline {
    normalizer: Normalizer,
    filter: ParameterFilter,
    encoder: VisualEncoder,
}

impl CyclePipeline {
    pub fn new(normalizer: Normalizer, filter: ParameterFilter, encoder: VisualEncoder) -> Self {
        Self {
            normalizer,
            filter,
            encoder,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            Normalizer::new(settings.default_parameter.as_str()),
            ParameterFilter::new(&settings.target_parameter),
            VisualEncoder::new(settings.parameter_label.as_str()),
        )
    }

    pub fn build_markers(
        &self,
        records: Vec<RawStationRecord>,
    ) -> (Vec<DisplayMarker>, CycleReport) {
        let mut report = CycleReport {
            fetched: records.len(),
            ..Default::default()
        };

        let mut measurements = Vec::with_capacity(records.len());
        for record in records {
            let id = record.id.clone();
            match self.normalizer.normalize(record) {
                Ok(measurement) => measurements.push(measurement),
                Err(rejection) => {
                    debug!(id = ?id, %rejection, "record rejected");
                    report.record_rejection(rejection);
                }
            }
        }

        let normalized = measurements.len();
        let matched = self.filter.filter(measurements);
        report.matched = matched.len();
        report.parameter_mismatch = normalized - matched.len();

        let mut markers = Vec::with_capacity(matched.len());
        for measurement in &matched {
            match self.encoder.encode(measurement) {
                Some(marker) => {
                    report.record_band(marker.color);
                    markers.push(marker);
                }
                None => report.missing_value += 1,
            }
        }
        report.rendered = markers.len();

        (markers, report)
    }
}
