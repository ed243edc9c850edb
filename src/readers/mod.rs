pub mod dump_reader;
pub mod record_source;

pub use dump_reader::{DumpCoordinates, DumpReader, DumpRow};
pub use record_source::{CacheBuster, HttpRecordSource, PageSource, RecordFetcher, RecordSink};
