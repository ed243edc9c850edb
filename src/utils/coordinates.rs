use serde::Serialize;

use crate::models::Coordinate;

/// Geographic bounding box in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Region {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl Region {
    /// Degenerate region covering a single point
    pub fn around(point: Coordinate) -> Self {
        Self {
            south: point.latitude,
            west: point.longitude,
            north: point.latitude,
            east: point.longitude,
        }
    }

    pub fn extend(&mut self, point: Coordinate) {
        self.south = self.south.min(point.latitude);
        self.north = self.north.max(point.latitude);
        self.west = self.west.min(point.longitude);
        self.east = self.east.max(point.longitude);
    }

    /// Smallest region enclosing every point, or `None` for an empty set
    pub fn from_coordinates<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Coordinate>,
    {
        let mut points = points.into_iter();
        let mut region = Region::around(points.next()?);
        for point in points {
            region.extend(point);
        }
        Some(region)
    }
}

/// Grid cell of `point` for a square grid of `cell_degrees`
pub fn grid_cell(point: Coordinate, cell_degrees: f64) -> (i64, i64) {
    (
        ((point.latitude + 90.0) / cell_degrees).floor() as i64,
        ((point.longitude + 180.0) / cell_degrees).floor() as i64,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_from_coordinates() {
        let region = Region::from_coordinates([
            Coordinate::new(45.46, 9.19),  // Milano
            Coordinate::new(41.90, 12.50), // Roma
            Coordinate::new(40.85, 14.27), // Napoli
        ])
        .unwrap();

        assert_eq!(region.south, 40.85);
        assert_eq!(region.north, 45.46);
        assert_eq!(region.west, 9.19);
        assert_eq!(region.east, 14.27);
    }

    #[test]
    fn test_empty_region() {
        assert!(Region::from_coordinates(Vec::new()).is_none());
    }

    #[test]
    fn test_grid_cell() {
        assert_eq!(grid_cell(Coordinate::new(45.4, 9.1), 2.0), (67, 94));
        assert_eq!(grid_cell(Coordinate::new(45.9, 9.9), 2.0), (67, 94));
        assert_ne!(
            grid_cell(Coordinate::new(45.4, 9.1), 2.0),
            grid_cell(Coordinate::new(41.9, 12.5), 2.0)
        );
    }
}
