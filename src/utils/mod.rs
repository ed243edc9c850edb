pub mod constants;
pub mod coordinates;
pub mod progress;
pub mod settings;

pub use constants::*;
pub use coordinates::Region;
pub use progress::ProgressReporter;
pub use settings::{LayerKind, Settings};
