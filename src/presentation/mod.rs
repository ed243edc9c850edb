pub mod layer;
pub mod state;

pub use layer::{make_layer, ClusterLayer, FlatLayer, MarkerGroup, MarkerLayer};
pub use state::{RefreshCycleState, StatusView, Viewport};

use tracing::{info, warn};

use crate::error::Result;
use crate::models::DisplayMarker;
use crate::utils::Settings;
use crate::writers::SnapshotWriter;

/// Owns the displayed markers, the status widget state and the viewport.
pub struct PresentationLayer {
    layer: Box<dyn MarkerLayer>,
    state: RefreshCycleState,
    viewport: Viewport,
    snapshot: Option<SnapshotWriter>,
}

impl PresentationLayer {
    pub fn new(layer: Box<dyn MarkerLayer>, fit_max_zoom: u8) -> Self {
        Self {
            layer,
            state: RefreshCycleState::default(),
            viewport: Viewport::new(fit_max_zoom),
            snapshot: None,
        }
    }

    pub fn with_snapshot_writer(mut self, writer: SnapshotWriter) -> Self {
        self.snapshot = Some(writer);
        self
    }

    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let layer = make_layer(settings.layer, settings.cluster_cell_degrees);
        let presentation = Self::new(layer, settings.fit_max_zoom);

        match &settings.output_dir {
            Some(dir) => Ok(presentation
                .with_snapshot_writer(SnapshotWriter::new(dir, &settings.parameter_label)?)),
            None => Ok(presentation),
        }
    }

    /// Discard every displayed marker, then install `markers`.
    ///
    /// The first call that leaves at least one marker fits the viewport to
    /// them; no later call touches the viewport again.
    pub fn replace_all(&mut self, markers: Vec<DisplayMarker>) {
        self.layer.clear();
        for marker in markers {
            self.layer.add(marker);
        }

        if !self.state.has_auto_fitted {
            if let Some(region) = self.layer.bounds_of() {
                self.viewport.set_bounds(region);
                self.state.has_auto_fitted = true;
                info!(?region, "viewport fitted to markers");
            }
        }

        if let Some(writer) = &self.snapshot {
            if let Err(e) = writer.write_markers(self.layer.as_ref()) {
                warn!(error = %e, "failed to publish marker snapshot");
            }
        }
    }

    /// Update the status widget. An error wins over loading, loading over a count.
    pub fn report_status(&mut self, count: Option<usize>, is_loading: bool, error: Option<&str>) {
        let status = match (error, is_loading, count) {
            (Some(message), _, _) => StatusView::Error {
                message: message.to_string(),
            },
            (None, true, _) => StatusView::Loading,
            (None, false, Some(count)) if count > 0 => StatusView::Populated { count },
            (None, false, _) => StatusView::Empty,
        };

        match &status {
            StatusView::Error { message } => self.state.last_error = Some(message.clone()),
            StatusView::Populated { count } => {
                self.state.last_count = Some(*count);
                self.state.last_error = None;
            }
            StatusView::Empty => {
                self.state.last_count = Some(0);
                self.state.last_error = None;
            }
            StatusView::Loading => {}
        }
        self.state.status = status;

        if let Some(writer) = &self.snapshot {
            if let Err(e) = writer.write_status(&self.state, &self.viewport) {
                warn!(error = %e, "failed to publish status snapshot");
            }
        }
    }

    pub fn layer(&self) -> &dyn MarkerLayer {
        self.layer.as_ref()
    }

    pub fn marker_count(&self) -> usize {
        self.layer.len()
    }

    pub fn state(&self) -> &RefreshCycleState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut RefreshCycleState {
        &mut self.state
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }
}
