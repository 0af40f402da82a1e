//! Dashboard configuration.

use anyhow::Context;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Optional override file, looked up in the working directory.
pub const CONFIG_FILE: &str = "dashboard.json";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub plants_csv: PathBuf,
    pub cantons_geojson: PathBuf,
    /// Map centre as (lat, lon).
    pub map_center: (f64, f64),
    /// Douglas-Peucker tolerance for canton outlines, in degrees.
    pub simplify_tolerance: f64,
    pub window_size: [f32; 2],
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            plants_csv: PathBuf::from("../data/renewable_power_plants_CH.csv"),
            cantons_geojson: PathBuf::from("../data/georef-switzerland-kanton.geojson"),
            map_center: (46.818, 8.2275),
            simplify_tolerance: 0.001,
            window_size: [1400.0, 900.0],
        }
    }
}

impl DashboardConfig {
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
    }

    /// Defaults, overridden by [`CONFIG_FILE`] when present and valid.
    pub fn load_or_default() -> Self {
        let path = Path::new(CONFIG_FILE);
        if !path.is_file() {
            return Self::default();
        }
        match Self::from_file(path) {
            Ok(config) => {
                info!(path = %path.display(), "configuration loaded");
                config
            }
            Err(e) => {
                warn!(error = ?e, "ignoring configuration file");
                Self::default()
            }
        }
    }
}
