//! Calibration corners tying the base map image to geographic coordinates

use crate::core::geo::LatLng;
use serde::{Deserialize, Serialize};

/// Geographic positions of the four corners of the base map image.
///
/// Only `up_left`, `up_right` and `down_left` define the transform; `down_right`
/// is kept to measure how far the map deviates from a parallelogram.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalibrationCorners {
    pub up_left: LatLng,
    pub up_right: LatLng,
    pub down_left: LatLng,
    pub down_right: LatLng,
}

impl CalibrationCorners {
    pub fn new(up_left: LatLng, up_right: LatLng, down_left: LatLng, down_right: LatLng) -> Self {
        Self {
            up_left,
            up_right,
            down_left,
            down_right,
        }
    }

    /// Corners in up-left, up-right, down-left, down-right order
    pub fn as_array(&self) -> [LatLng; 4] {
        [self.up_left, self.up_right, self.down_left, self.down_right]
    }

    /// Approximate ground size of the map as (height, width) in meters,
    /// measured along the left and top edges.
    pub fn extent_meters(&self) -> (f64, f64) {
        (
            self.up_left.distance_to(&self.down_left),
            self.up_left.distance_to(&self.up_right),
        )
    }
}

impl Default for CalibrationCorners {
    fn default() -> Self {
        Self::new(
            LatLng::new(60.227471, 29.726933),
            LatLng::new(60.222312, 29.784189),
            LatLng::new(60.208120, 29.719854),
            LatLng::new(60.203202, 29.776830),
        )
    }
}
