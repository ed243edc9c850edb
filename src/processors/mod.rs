pub mod cycle_report;
pub mod importer;
pub mod normalizer;
pub mod parameter_filter;
pub mod pipeline;
pub mod visual_encoder;

pub use cycle_report::CycleReport;
pub use importer::{ImportReport, Importer};
pub use normalizer::{Normalizer, Rejection};
pub use parameter_filter::ParameterFilter;
pub use pipeline::CyclePipeline;
pub use visual_encoder::VisualEncoder;
