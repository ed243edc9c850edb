/// Record store defaults
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8090";
pub const DEFAULT_COLLECTION: &str = "stations";

/// Retrieval defaults
pub const DEFAULT_PAGE_SIZE: u32 = 500;
pub const MAX_PAGE_SIZE: u32 = 1000;
pub const DEFAULT_MAX_PAGES: u32 = 1000;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 15;

/// Scheduling defaults
pub const DEFAULT_REFRESH_INTERVAL_MS: u64 = 60_000;
pub const DEFAULT_CYCLE_TIMEOUT_SECS: u64 = 120;

/// Parameter handling
pub const DEFAULT_PARAMETER: &str = "pm25";
pub const DEFAULT_TARGET_PARAMETER: &str = "pm2";
pub const DEFAULT_PARAMETER_LABEL: &str = "PM2.5";

/// Severity thresholds in µg/m³; a value must exceed the threshold to enter the band
pub const THRESHOLD_YELLOW: f64 = 12.0;
pub const THRESHOLD_ORANGE: f64 = 35.0;
pub const THRESHOLD_RED: f64 = 55.0;
pub const THRESHOLD_PURPLE: f64 = 150.0;
pub const THRESHOLD_DEEP_PURPLE: f64 = 250.0;

/// Legend grade boundaries
pub const LEGEND_GRADES: [f64; 6] = [0.0, 12.0, 35.0, 55.0, 150.0, 250.0];

/// Marker sizing
pub const MIN_MARKER_SIZE: f64 = 6.0;
pub const MAX_MARKER_SIZE: f64 = 30.0;
pub const MARKER_SIZE_BASE: f64 = 4.0;
pub const MARKER_SIZE_SCALE: f64 = 2.0;

/// Presentation defaults
pub const DEFAULT_FIT_MAX_ZOOM: u8 = 4;
pub const DEFAULT_CLUSTER_CELL_DEGREES: f64 = 2.0;

/// Snapshot file names
pub const MARKERS_FILE: &str = "markers.geojson";
pub const STATUS_FILE: &str = "status.json";

/// Configuration sources
pub const DEFAULT_CONFIG_FILE: &str = "airq-map.toml";
pub const ENV_PREFIX: &str = "AIRQ";

/// Status widget heading
pub const MAP_TITLE_PREFIX: &str = "PocketBase";
