use chrono::Utc;
use serde_json::{json, Value};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

use crate::error::Result;
use crate::presentation::{MarkerLayer, RefreshCycleState, Viewport};
use crate::processors::visual_encoder::legend;
use crate::utils::constants::{MAP_TITLE_PREFIX, MARKERS_FILE, STATUS_FILE};
use crate::utils::LayerKind;

/// Publishes the displayed state for a map page to poll.
///
/// Each file is written to a temporary sibling and renamed into place, so a
/// reader sees either the previous snapshot or the new one.
pub struct SnapshotWriter {
    output_dir: PathBuf,
    parameter_label: String,
}

impl SnapshotWriter {
    pub fn new(output_dir: &Path, parameter_label: &str) -> Result<Self> {
        std::fs::create_dir_all(output_dir)?;
        Ok(Self {
            output_dir: output_dir.to_path_buf(),
            parameter_label: parameter_label.to_string(),
        })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn write_markers(&self, layer: &dyn MarkerLayer) -> Result<PathBuf> {
        self.write_atomic(MARKERS_FILE, &markers_geojson(layer))
    }

    pub fn write_status(&self, state: &RefreshCycleState, viewport: &Viewport) -> Result<PathBuf> {
        let document = json!({
            "title": format!("{} ({})", MAP_TITLE_PREFIX, self.parameter_label),
            "status": state.status,
            "text": state.status.to_string(),
            "loading": state.in_flight,
            "last_count": state.last_count,
            "last_error": state.last_error,
            "completed_cycles": state.completed_cycles,
            "viewport": viewport,
            "legend": legend(),
            "generated_at": Utc::now().to_rfc3339(),
        });
        self.write_atomic(STATUS_FILE, &document)
    }

    fn write_atomic(&self, file_name: &str, document: &Value) -> Result<PathBuf> {
        let target = self.output_dir.join(file_name);
        let mut temp = NamedTempFile::new_in(&self.output_dir)?;
        serde_json::to_writer(&mut temp, document)?;
        temp.flush()?;
        temp.persist(&target)?;
        Ok(target)
    }
}

/// GeoJSON FeatureCollection of the layer's markers. Clustering layers add
/// their groups as a `clusters` member.
pub fn markers_geojson(layer: &dyn MarkerLayer) -> Value {
    let features: Vec<Value> = layer
        .markers()
        .iter()
        .map(|m| {
            json!({
                "type": "Feature",
                "geometry": {
                    "type": "Point",
                    "coordinates": [m.coordinate.longitude, m.coordinate.latitude],
                },
                "properties": {
                    "value": m.value,
                    "band": m.color,
                    "color": m.color.hex(),
                    "size": m.size,
                    "popup": m.popup,
                },
            })
        })
        .collect();

    let mut collection = json!({
        "type": "FeatureCollection",
        "features": features,
    });

    if layer.kind() == LayerKind::Cluster {
        let clusters: Vec<Value> = layer
            .groups()
            .iter()
            .map(|g| {
                json!({
                    "center": [g.center.longitude, g.center.latitude],
                    "count": g.count,
                    "band": g.band,
                    "color": g.band.hex(),
                })
            })
            .collect();
        collection["clusters"] = Value::Array(clusters);
    }

    collection
}
