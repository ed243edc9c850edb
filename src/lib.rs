pub mod cli;
pub mod error;
pub mod models;
pub mod presentation;
pub mod processors;
pub mod readers;
pub mod scheduler;
pub mod utils;
pub mod writers;

pub use error::{Result, SyncError};
pub use presentation::PresentationLayer;
pub use scheduler::Scheduler;
