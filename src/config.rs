use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::Deserialize;

/// Config file looked up in the working directory at startup.
pub const CONFIG_FILE: &str = "stroke-dash.json";

/// Narrowest accepted histogram bucket, in years.
pub const MIN_BIN_WIDTH: f64 = 0.1;

// ---------------------------------------------------------------------------
// Dashboard configuration
// ---------------------------------------------------------------------------

/// Startup settings. Every field is optional in the file.
///
/// ```json
/// { "dataset_path": "data/stroke.csv", "histogram_bin_width": 10 }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DashboardConfig {
    /// Source table, read once at startup.
    pub dataset_path: PathBuf,
    /// Width of the age histogram buckets, in years.
    pub histogram_bin_width: f64,
    /// Initial window size `[width, height]`.
    pub window_size: [f32; 2],
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            dataset_path: PathBuf::from("healthcare-dataset-stroke-data.csv"),
            histogram_bin_width: 5.0,
            window_size: [1280.0, 860.0],
        }
    }
}

impl DashboardConfig {
    /// Read `path` if it exists, otherwise fall back to the defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: Self = serde_json::from_str(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        config.validate()?;
        log::info!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.histogram_bin_width.is_finite() || self.histogram_bin_width < MIN_BIN_WIDTH {
            bail!(
                "histogram_bin_width must be a number of at least {MIN_BIN_WIDTH}, got {}",
                self.histogram_bin_width
            );
        }
        if self.window_size.iter().any(|v| !v.is_finite() || *v <= 0.0) {
            bail!("window_size must be two positive numbers");
        }
        Ok(())
    }
}
