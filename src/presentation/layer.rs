use serde::Serialize;
use std::collections::BTreeMap;

use crate::models::{Coordinate, DisplayMarker, SeverityBand};
use crate::utils::coordinates::{grid_cell, Region};
use crate::utils::LayerKind;

/// A group of markers as the map draws it: a single marker on a flat layer,
/// a cluster bubble on a clustering one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerGroup {
    pub center: Coordinate,
    pub count: usize,
    /// Worst band among the members
    pub band: SeverityBand,
}

/// Storage for the displayed markers.
pub trait MarkerLayer {
    fn add(&mut self, marker: DisplayMarker);

    fn clear(&mut self);

    fn markers(&self) -> &[DisplayMarker];

    fn groups(&self) -> Vec<MarkerGroup>;

    fn kind(&self) -> LayerKind;

    fn bounds_of(&self) -> Option<Region> {
        Region::from_coordinates(self.markers().iter().map(|m| m.coordinate))
    }

    fn len(&self) -> usize {
        self.markers().len()
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Build the layer variant selected in configuration
pub fn make_layer(kind: LayerKind, cluster_cell_degrees: f64) -> Box<dyn MarkerLayer> {
    match kind {
        LayerKind::Flat => Box::new(FlatLayer::new()),
        LayerKind::Cluster => Box::new(ClusterLayer::new(cluster_cell_degrees)),
    }
}

#[derive(Debug, Default)]
pub struct FlatLayer {
    markers: Vec<DisplayMarker>,
}

impl FlatLayer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MarkerLayer for FlatLayer {
    fn add(&mut self, marker: DisplayMarker) {
        self.markers.push(marker);
    }

    fn clear(&mut self) {
        self.markers.clear();
    }

    fn markers(&self) -> &[DisplayMarker] {
        &self.markers
    }

    fn groups(&self) -> Vec<MarkerGroup> {
        self.markers
            .iter()
            .map(|m| MarkerGroup {
                center: m.coordinate,
                count: 1,
                band: m.color,
            })
            .collect()
    }

    fn kind(&self) -> LayerKind {
        LayerKind::Flat
    }
}

/// Grid clustering: markers sharing a square cell of `cell_degrees` collapse
/// into one group centered on their mean position.
#[derive(Debug)]
pub struct ClusterLayer {
    cell_degrees: f64,
    markers: Vec<DisplayMarker>,
}

impl ClusterLayer {
    pub fn new(cell_degrees: f64) -> Self {
        Self {
            cell_degrees,
            markers: Vec::new(),
        }
    }
}

impl MarkerLayer for ClusterLayer {
    fn add(&mut self, marker: DisplayMarker) {
        self.markers.push(marker);
    }

    fn clear(&mut self) {
        self.markers.clear();
    }

    fn markers(&self) -> &[DisplayMarker] {
        &self.markers
    }

    fn groups(&self) -> Vec<MarkerGroup> {
        // (lat sum, lon sum, count, worst band) per cell
        let mut cells: BTreeMap<(i64, i64), (f64, f64, usize, SeverityBand)> = BTreeMap::new();

        for marker in &self.markers {
            let cell = grid_cell(marker.coordinate, self.cell_degrees);
            let entry = cells
                .entry(cell)
                .or_insert((0.0, 0.0, 0, SeverityBand::Green));
            entry.0 += marker.coordinate.latitude;
            entry.1 += marker.coordinate.longitude;
            entry.2 += 1;
            entry.3 = entry.3.max(marker.color);
        }

        cells
            .into_values()
            .map(|(lat_sum, lon_sum, count, band)| MarkerGroup {
                center: Coordinate::new(lat_sum / count as f64, lon_sum / count as f64),
                count,
                band,
            })
            .collect()
    }

    fn kind(&self) -> LayerKind {
        LayerKind::Cluster
    }
}
