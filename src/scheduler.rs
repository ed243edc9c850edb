use std::future::Future;
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::error::{Result, SyncError};
use crate::models::RawStationRecord;
use crate::presentation::PresentationLayer;
use crate::processors::{CycleReport, CyclePipeline};
use crate::readers::{PageSource, RecordFetcher};
use crate::utils::Settings;

/// Drives refresh cycles: one immediately, then one per interval tick.
///
/// Cycles never overlap. A tick that comes due while a cycle is still running
/// waits for it, and the schedule shifts rather than bursting.
pub struct Scheduler<S> {
    fetcher: RecordFetcher<S>,
    pipeline: CyclePipeline,
    interval: Duration,
    cycle_timeout: Option<Duration>,
}

impl<S: PageSource> Scheduler<S> {
    pub fn new(fetcher: RecordFetcher<S>, pipeline: CyclePipeline, interval: Duration) -> Self {
        Self {
            fetcher,
            pipeline,
            interval,
            cycle_timeout: None,
        }
    }

    pub fn with_cycle_timeout(mut self, cycle_timeout: Option<Duration>) -> Self {
        self.cycle_timeout = cycle_timeout;
        self
    }

    pub fn from_settings(source: S, settings: &Settings) -> Self {
        let fetcher = RecordFetcher::new(source, settings.page_size, settings.max_pages);
        Self::new(
            fetcher,
            CyclePipeline::from_settings(settings),
            settings.refresh_interval(),
        )
        .with_cycle_timeout(settings.cycle_timeout())
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn fetcher(&self) -> &RecordFetcher<S> {
        &self.fetcher
    }

    /// One full fetch-normalize-filter-render pass.
    ///
    /// On failure the displayed markers stay as they were and the status
    /// shows the error.
    pub async fn run_cycle(&self, presentation: &mut PresentationLayer) -> Result<CycleReport> {
        presentation.state_mut().in_flight = true;
        presentation.report_status(None, true, None);
        debug!("refresh cycle fetching");

        let outcome = self
            .fetch()
            .await
            .map(|records| self.pipeline.build_markers(records));

        let result = match outcome {
            Ok((markers, report)) => {
                let count = markers.len();
                presentation.replace_all(markers);
                presentation.state_mut().in_flight = false;
                presentation.report_status(Some(count), false, None);
                info!(
                    fetched = report.fetched,
                    rejected = report.rejected(),
                    rendered = count,
                    "refresh cycle succeeded"
                );
                Ok(report)
            }
            Err(e) => {
                presentation.state_mut().in_flight = false;
                presentation.report_status(None, false, Some(&e.status_message()));
                warn!(error = %e, "refresh cycle failed");
                Err(e)
            }
        };

        presentation.state_mut().completed_cycles += 1;
        result
    }

    async fn fetch(&self) -> Result<Vec<RawStationRecord>> {
        match self.cycle_timeout {
            Some(limit) => tokio::time::timeout(limit, self.fetcher.fetch_all())
                .await
                .map_err(|_| SyncError::CycleTimeout(limit))?,
            None => self.fetcher.fetch_all().await,
        }
    }

    /// Run cycles until `shutdown` resolves. Shutdown is observed between
    /// cycles only.
    pub async fn run<F>(&self, presentation: &mut PresentationLayer, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tokio::pin!(shutdown);

        info!(interval = ?self.interval, "scheduler started");

        loop {
            tokio::select! {
                biased;
                _ = &mut shutdown => {
                    info!("scheduler stopping");
                    break;
                }
                _ = ticker.tick() => {
                    // Failures already reached the status widget and the log
                    let _ = self.run_cycle(presentation).await;
                }
            }
        }
    }
}
