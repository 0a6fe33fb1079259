//! Startup configuration
//!
//! Everything here is fixed for the lifetime of the service: calibration
//! corners, which assets to load, and how big the marker is drawn. Any field
//! may be omitted from the JSON file and falls back to its default.

use crate::{
    core::{
        calibration::CalibrationCorners,
        constants::{DEFAULT_BASE_MAP, DEFAULT_MARKER, DEFAULT_MARKER_SIZE, DEFAULT_OUTPUT_DIR},
        mapper::check_corners,
    },
    MapError, Result,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub calibration: CalibrationCorners,
    pub assets: AssetConfig,
    /// Side of the square box the marker is scaled into, in pixels
    pub marker_size: u32,
}

impl MapConfig {
    /// Read a JSON configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            MapError::Configuration(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_json_str(&content)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let config: MapConfig = serde_json::from_str(content)
            .map_err(|e| MapError::Configuration(format!("invalid configuration: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject settings the service cannot start with
    pub fn validate(&self) -> Result<()> {
        if self.marker_size == 0 {
            return Err(MapError::Configuration(
                "marker_size must be positive".to_string(),
            ));
        }
        if let Some(corner) = self
            .calibration
            .as_array()
            .into_iter()
            .find(|c| !c.is_finite())
        {
            return Err(MapError::Configuration(format!(
                "calibration corner ({}, {}) is not finite",
                corner.lat, corner.lng
            )));
        }
        if self.assets.base_map.is_empty() || self.assets.marker.is_empty() {
            return Err(MapError::Configuration(
                "asset names must not be empty".to_string(),
            ));
        }
        check_corners(&self.calibration)
    }

    pub fn with_asset_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.assets.root = root.into();
        self
    }

    pub fn with_marker_size(mut self, marker_size: u32) -> Self {
        self.marker_size = marker_size;
        self
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            calibration: CalibrationCorners::default(),
            assets: AssetConfig::default(),
            marker_size: DEFAULT_MARKER_SIZE,
        }
    }
}

/// Where assets are read from and rendered output is written to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetConfig {
    pub root: PathBuf,
    pub base_map: String,
    pub marker: String,
    /// Relative paths are resolved against `root`
    pub output_dir: PathBuf,
}

impl AssetConfig {
    pub fn resolved_output_dir(&self) -> PathBuf {
        self.root.join(&self.output_dir)
    }
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            base_map: DEFAULT_BASE_MAP.to_string(),
            marker: DEFAULT_MARKER.to_string(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
        }
    }
}
