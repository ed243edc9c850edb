use crate::models::CanonicalMeasurement;

/// Keeps measurements whose parameter belongs to the target family.
///
/// Matching is a case-insensitive substring test, so `pm2` accepts `pm25`,
/// `PM2.5` and `pm2.5ATM` alike. Must not become an equality test.
pub struct ParameterFilter {
    token: String,
}

impl ParameterFilter {
    pub fn new(token: &str) -> Self {
        Self {
            token: normalize_token(token),
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn matches(&self, parameter: &str) -> bool {
        normalize_token(parameter).contains(&self.token)
    }

    /// Records with an absent value are kept; dropping them is the encoder's job.
    pub fn filter(&self, measurements: Vec<CanonicalMeasurement>) -> Vec<CanonicalMeasurement> {
        measurements
            .into_iter()
            .filter(|m| self.matches(&m.parameter))
            .collect()
    }
}

fn normalize_token(parameter: &str) -> String {
    parameter.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Coordinate;

    fn measurement(parameter: &str, value: Option<f64>) -> CanonicalMeasurement {
        CanonicalMeasurement {
            location: None,
            city: None,
            country: None,
            coordinate: Coordinate::new(45.0, 9.0),
            parameter: parameter.to_string(),
            value,
            unit: None,
            last_updated: None,
            observed_at: None,
        }
    }

    #[test]
    fn test_parameter_spellings() {
        let filter = ParameterFilter::new("pm2");

        assert!(filter.matches("PM2.5"));
        assert!(filter.matches("pm25"));
        assert!(filter.matches("PM2"));
        assert!(filter.matches("pm2.5ATM"));
        assert!(filter.matches(" Pm25 "));
        assert!(!filter.matches("pm10"));
        assert!(!filter.matches("no2"));
        assert!(!filter.matches("o3"));
    }

    #[test]
    fn test_token_is_normalized() {
        let filter = ParameterFilter::new(" PM2 ");
        assert_eq!(filter.token(), "pm2");
        assert!(filter.matches("pm25"));
    }

    #[test]
    fn test_filter_keeps_absent_values() {
        let filter = ParameterFilter::new("pm2");
        let kept = filter.filter(vec![
            measurement("pm25", Some(10.0)),
            measurement("pm10", Some(30.0)),
            measurement("PM2.5", None),
        ]);

        assert_eq!(kept.len(), 2);
        assert_eq!(kept[1].value, None);
    }
}
