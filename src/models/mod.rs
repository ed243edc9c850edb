pub mod marker;
pub mod measurement;
pub mod page;
pub mod station;

pub use marker::{DisplayMarker, LegendEntry, SeverityBand};
pub use measurement::{CanonicalMeasurement, Coordinate};
pub use page::{PageResponse, RecordPage};
pub use station::{NewStationRecord, RawStationRecord};
