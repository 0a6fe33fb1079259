//! Prelude module for common mapmark types and traits
//!
//! This module re-exports the most commonly used types, traits, and functions
//! for easy importing with `use mapmark::prelude::*;`

pub use crate::core::{
    calibration::CalibrationCorners,
    config::{AssetConfig, MapConfig},
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

pub use crate::traits::{AssetStore, MapProjection};

pub use crate::{MapError, Result};

pub use std::sync::Arc;
