use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A station record exactly as the store returns it.
///
/// The store is fed from loosely typed dumps, so every field is optional and
/// numeric fields tolerate numbers encoded as strings.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawStationRecord {
    #[serde(default, deserialize_with = "lenient_text")]
    pub id: Option<String>,

    #[serde(default, deserialize_with = "lenient_text")]
    pub location: Option<String>,

    #[serde(default, deserialize_with = "lenient_text")]
    pub city: Option<String>,

    #[serde(default, deserialize_with = "lenient_text")]
    pub country: Option<String>,

    #[serde(default, deserialize_with = "lenient_f64")]
    pub lat: Option<f64>,

    #[serde(default, deserialize_with = "lenient_f64")]
    pub lon: Option<f64>,

    #[serde(default, deserialize_with = "lenient_text")]
    pub parameter: Option<String>,

    #[serde(default, deserialize_with = "lenient_f64")]
    pub value: Option<f64>,

    #[serde(default, deserialize_with = "lenient_text")]
    pub unit: Option<String>,

    #[serde(default, rename = "lastUpdated", deserialize_with = "lenient_text")]
    pub last_updated: Option<String>,
}

impl RawStationRecord {
    pub fn has_coordinates(&self) -> bool {
        self.lat.is_some() && self.lon.is_some()
    }
}

/// Body of a create call against the collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewStationRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    pub lat: f64,
    pub lon: f64,
    pub parameter: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(rename = "lastUpdated", skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
}

/// Numbers pass through, numeric strings are parsed, everything else is absent.
pub(crate) fn lenient_f64<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|v| v.is_finite()))
}

/// Strings and numbers become text; blank strings count as absent.
pub(crate) fn lenient_text<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}
