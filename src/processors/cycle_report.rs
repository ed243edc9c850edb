use std::collections::{BTreeMap, HashMap};

use crate::models::SeverityBand;
use crate::processors::normalizer::Rejection;

/// What happened to every fetched record during one cycle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CycleReport {
    pub fetched: usize,
    pub rejections: HashMap<Rejection, usize>,
    pub parameter_mismatch: usize,
    pub matched: usize,
    pub missing_value: usize,
    pub rendered: usize,
    pub band_counts: BTreeMap<SeverityBand, usize>,
}

impl CycleReport {
    pub fn record_rejection(&mut self, rejection: Rejection) {
        *self.rejections.entry(rejection).or_default() += 1;
    }

    pub fn record_band(&mut self, band: SeverityBand) {
        *self.band_counts.entry(band).or_default() += 1;
    }

    pub fn rejected(&self) -> usize {
        self.rejections.values().sum()
    }

    pub fn rejected_for(&self, rejection: Rejection) -> usize {
        self.rejections.get(&rejection).copied().unwrap_or(0)
    }

    /// Generate a summary report
    pub fn generate_summary(&self) -> String {
        let mut summary = String::new();

        summary.push_str("=== Refresh Cycle Report ===\n");
        summary.push_str(&format!("Fetched Records: {}\n", self.fetched));
        summary.push_str(&format!(
            "Rejected (missing coordinates): {}\n",
            self.rejected_for(Rejection::MissingCoordinates)
        ));
        summary.push_str(&format!(
            "Rejected (invalid coordinates): {}\n",
            self.rejected_for(Rejection::InvalidCoordinates)
        ));
        summary.push_str(&format!("Other Parameters: {}\n", self.parameter_mismatch));
        summary.push_str(&format!("Matched Parameter: {}\n", self.matched));
        summary.push_str(&format!("Without Value: {}\n", self.missing_value));
        summary.push_str(&format!("Rendered Markers: {}\n", self.rendered));

        if !self.band_counts.is_empty() {
            summary.push_str("\nSeverity Bands:\n");
            for (band, count) in &self.band_counts {
                let share = 100.0 * *count as f64 / self.rendered.max(1) as f64;
                summary.push_str(&format!(
                    "  {:<32} {:>6} ({:.1}%)\n",
                    band.display_name(),
                    count,
                    share
                ));
            }
        }

        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_and_summary() {
        let mut report = CycleReport {
            fetched: 4,
            ..Default::default()
        };
        report.record_rejection(Rejection::MissingCoordinates);
        report.record_rejection(Rejection::MissingCoordinates);
        report.matched = 2;
        report.rendered = 2;
        report.record_band(SeverityBand::Green);
        report.record_band(SeverityBand::Red);

        assert_eq!(report.rejected(), 2);
        assert_eq!(report.rejected_for(Rejection::InvalidCoordinates), 0);

        let summary = report.generate_summary();
        assert!(summary.contains("Fetched Records: 4"));
        assert!(summary.contains("Rejected (missing coordinates): 2"));
        assert!(summary.contains("Rendered Markers: 2"));
        assert!(summary.contains("Unhealthy"));
        assert!(summary.contains("(50.0%)"));
    }
}
