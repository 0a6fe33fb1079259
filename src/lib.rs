//! # mapmark
//!
//! Places a marker on a fixed, calibrated map image.
//!
//! A [`CoordinateMapper`] turns latitude/longitude into a position inside the
//! map using an affine fit of the map's corner coordinates, a
//! [`MarkerCompositor`] draws the marker there, and [`MapLocator`] ties both to
//! an [`AssetStore`](traits::AssetStore) that supplies the images and keeps the
//! rendered output.

pub mod assets;
pub mod core;
pub mod input;
pub mod layers;
pub mod locator;
pub mod prelude;
pub mod traits;
pub use crate::core::constants;

// Re-export public API
pub use crate::core::{
    calibration::CalibrationCorners,
    config::MapConfig,
    geo::{LatLng, NormalizedPoint, PixelPoint},
    mapper::CoordinateMapper,
};

pub use crate::assets::{fs::FsAssetStore, memory::MemoryAssetStore, OutputHandle};

pub use crate::layers::{image::BaseMap, marker::MarkerCompositor};

pub use crate::input::{
    events::{Command, Request},
    handler::{Reply, RequestHandler},
    parse::parse_coordinates,
};

pub use crate::locator::{MapLocator, Placement};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, MapError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Startup-time failure; the service cannot run with this setup
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Failed to load asset '{name}': {reason}")]
    AssetLoad { name: String, reason: String },

    #[error("Asset I/O error: {0}")]
    AssetIo(String),

    #[error("Parse error: {0}")]
    InputParse(String),
}

impl MapError {
    /// Whether the error concerns a single request rather than the setup
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, MapError::Configuration(_))
    }
}

/// Error type alias for convenience
pub type Error = MapError;
