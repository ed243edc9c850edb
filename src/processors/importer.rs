use tracing::{info, warn};

use crate::readers::{DumpRow, RecordSink};
use crate::utils::ProgressReporter;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub total: usize,
    pub skipped_no_coordinates: usize,
    pub created: usize,
    pub failed: usize,
}

impl ImportReport {
    pub fn summary(&self) -> String {
        format!(
            "Imported {} of {} rows ({} without coordinates, {} failed)",
            self.created, self.total, self.skipped_no_coordinates, self.failed
        )
    }
}

/// One-shot bulk load of a dump into the collection.
pub struct Importer<S> {
    sink: S,
    default_parameter: String,
}

impl<S: RecordSink> Importer<S> {
    pub fn new(sink: S, default_parameter: impl Into<String>) -> Self {
        Self {
            sink,
            default_parameter: default_parameter.into(),
        }
    }

    /// Create one record per row with coordinates. A failed create is logged
    /// and counted; it never stops the batch.
    pub async fn import(&self, rows: &[DumpRow], progress: &ProgressReporter) -> ImportReport {
        let mut report = ImportReport {
            total: rows.len(),
            ..Default::default()
        };

        info!(rows = rows.len(), "starting import");

        for row in rows {
            progress.increment(1);

            let Some(record) = row.to_new_record(&self.default_parameter) else {
                report.skipped_no_coordinates += 1;
                continue;
            };

            match self.sink.create(&record).await {
                Ok(()) => report.created += 1,
                Err(e) => {
                    warn!(location = ?record.location, error = %e, "record import failed");
                    report.failed += 1;
                }
            }
        }

        report
    }
}
