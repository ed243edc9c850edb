use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::error::Result;
use crate::models::station::{lenient_f64, lenient_text};
use crate::models::NewStationRecord;

/// One row of an OpenAQ-style JSON dump.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DumpRow {
    #[serde(default, deserialize_with = "lenient_text")]
    pub location: Option<String>,

    #[serde(default, deserialize_with = "lenient_text")]
    pub city: Option<String>,

    #[serde(default, deserialize_with = "lenient_text")]
    pub country: Option<String>,

    #[serde(default)]
    pub coordinates: Option<DumpCoordinates>,

    #[serde(default, deserialize_with = "lenient_text")]
    pub measurements_parameter: Option<String>,

    #[serde(default, deserialize_with = "lenient_f64")]
    pub measurements_value: Option<f64>,

    #[serde(default, deserialize_with = "lenient_text")]
    pub measurements_unit: Option<String>,

    #[serde(default, deserialize_with = "lenient_text")]
    pub measurements_lastupdated: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DumpCoordinates {
    #[serde(default, alias = "latitude", deserialize_with = "lenient_f64")]
    pub lat: Option<f64>,

    #[serde(default, alias = "longitude", deserialize_with = "lenient_f64")]
    pub lon: Option<f64>,
}

impl DumpRow {
    /// Map the row onto the collection's create body. Rows without a full
    /// coordinate pair produce nothing.
    pub fn to_new_record(&self, default_parameter: &str) -> Option<NewStationRecord> {
        let coordinates = self.coordinates.as_ref()?;
        let (lat, lon) = (coordinates.lat?, coordinates.lon?);

        Some(NewStationRecord {
            location: self.location.clone(),
            city: self.city.clone(),
            country: self.country.clone(),
            lat,
            lon,
            parameter: self
                .measurements_parameter
                .clone()
                .unwrap_or_else(|| default_parameter.to_string()),
            value: self.measurements_value,
            unit: self.measurements_unit.clone(),
            last_updated: self.measurements_lastupdated.clone(),
        })
    }
}

pub struct DumpReader;

impl DumpReader {
    /// Read a JSON array of dump rows
    pub fn read_rows(path: &Path) -> Result<Vec<DumpRow>> {
        let file = File::open(path)?;
        let rows = serde_json::from_reader(BufReader::new(file))?;
        Ok(rows)
    }
}
