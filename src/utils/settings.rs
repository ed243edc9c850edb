use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use validator::Validate;

use crate::error::Result;
use crate::utils::constants::*;

/// Marker layer variant, chosen once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LayerKind {
    Flat,
    #[default]
    Cluster,
}

impl std::fmt::Display for LayerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LayerKind::Flat => write!(f, "flat"),
            LayerKind::Cluster => write!(f, "cluster"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Settings {
    #[validate(url)]
    pub base_url: String,

    #[validate(length(min = 1))]
    pub collection: String,

    #[validate(range(min = 1))]
    pub refresh_interval_ms: u64,

    #[validate(range(min = 1, max = MAX_PAGE_SIZE))]
    pub page_size: u32,

    #[validate(range(min = 1))]
    pub max_pages: u32,

    /// Per-request HTTP timeout; 0 leaves reqwest's default (none)
    pub request_timeout_secs: u64,

    /// Whole-cycle timeout; 0 disables it
    pub cycle_timeout_secs: u64,

    #[validate(length(min = 1))]
    pub default_parameter: String,

    #[validate(length(min = 1))]
    pub target_parameter: String,

    pub parameter_label: String,

    pub layer: LayerKind,

    #[validate(range(min = 0.01, max = 90.0))]
    pub cluster_cell_degrees: f64,

    #[validate(range(max = 19))]
    pub fit_max_zoom: u8,

    #[serde(default)]
    pub output_dir: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            collection: DEFAULT_COLLECTION.to_string(),
            refresh_interval_ms: DEFAULT_REFRESH_INTERVAL_MS,
            page_size: DEFAULT_PAGE_SIZE,
            max_pages: DEFAULT_MAX_PAGES,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            cycle_timeout_secs: DEFAULT_CYCLE_TIMEOUT_SECS,
            default_parameter: DEFAULT_PARAMETER.to_string(),
            target_parameter: DEFAULT_TARGET_PARAMETER.to_string(),
            parameter_label: DEFAULT_PARAMETER_LABEL.to_string(),
            layer: LayerKind::default(),
            cluster_cell_degrees: DEFAULT_CLUSTER_CELL_DEGREES,
            fit_max_zoom: DEFAULT_FIT_MAX_ZOOM,
            output_dir: None,
        }
    }
}

impl Settings {
    /// Layer built-in defaults, the TOML file and `AIRQ_*` environment variables.
    ///
    /// An explicit `config_file` must exist; the default file is optional.
    pub fn load(config_file: Option<&Path>) -> Result<Self> {
        let file_source = match config_file {
            Some(path) => File::from(path).required(true),
            None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let settings: Settings = Config::builder()
            .set_default("base_url", DEFAULT_BASE_URL)?
            .set_default("collection", DEFAULT_COLLECTION)?
            .set_default("refresh_interval_ms", DEFAULT_REFRESH_INTERVAL_MS as i64)?
            .set_default("page_size", DEFAULT_PAGE_SIZE as i64)?
            .set_default("max_pages", DEFAULT_MAX_PAGES as i64)?
            .set_default("request_timeout_secs", DEFAULT_REQUEST_TIMEOUT_SECS as i64)?
            .set_default("cycle_timeout_secs", DEFAULT_CYCLE_TIMEOUT_SECS as i64)?
            .set_default("default_parameter", DEFAULT_PARAMETER)?
            .set_default("target_parameter", DEFAULT_TARGET_PARAMETER)?
            .set_default("parameter_label", DEFAULT_PARAMETER_LABEL)?
            .set_default("layer", LayerKind::default().to_string())?
            .set_default("cluster_cell_degrees", DEFAULT_CLUSTER_CELL_DEGREES)?
            .set_default("fit_max_zoom", DEFAULT_FIT_MAX_ZOOM as i64)?
            .add_source(file_source)
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        Ok(settings)
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_millis(self.refresh_interval_ms)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        (self.request_timeout_secs > 0).then(|| Duration::from_secs(self.request_timeout_secs))
    }

    pub fn cycle_timeout(&self) -> Option<Duration> {
        (self.cycle_timeout_secs > 0).then(|| Duration::from_secs(self.cycle_timeout_secs))
    }
}
