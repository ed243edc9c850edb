use serde::Serialize;

use crate::utils::Region;

/// What the status widget shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum StatusView {
    Loading,
    Populated { count: usize },
    Empty,
    Error { message: String },
}

impl std::fmt::Display for StatusView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StatusView::Loading => write!(f, "Loading..."),
            StatusView::Populated { count } => write!(f, "{} stations", count),
            StatusView::Empty => write!(f, "No data"),
            StatusView::Error { message } => write!(f, "{}", message),
        }
    }
}

/// Process-wide refresh bookkeeping, owned by the presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub struct RefreshCycleState {
    pub in_flight: bool,
    pub last_count: Option<usize>,
    pub last_error: Option<String>,
    /// Set on the first non-empty cycle and never cleared: later cycles must
    /// leave the user's pan and zoom alone.
    pub has_auto_fitted: bool,
    pub status: StatusView,
    pub completed_cycles: u64,
}

impl Default for RefreshCycleState {
    fn default() -> Self {
        Self {
            in_flight: false,
            last_count: None,
            last_error: None,
            has_auto_fitted: false,
            status: StatusView::Empty,
            completed_cycles: 0,
        }
    }
}

/// Visible map area. `None` bounds is the initial world view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Viewport {
    bounds: Option<Region>,
    fit_max_zoom: u8,
}

impl Viewport {
    pub fn new(fit_max_zoom: u8) -> Self {
        Self {
            bounds: None,
            fit_max_zoom,
        }
    }

    pub fn bounds(&self) -> Option<Region> {
        self.bounds
    }

    pub fn fit_max_zoom(&self) -> u8 {
        self.fit_max_zoom
    }

    /// Move the view, either fitting it to data or following user pan/zoom.
    pub fn set_bounds(&mut self, region: Region) {
        self.bounds = Some(region);
    }
}
