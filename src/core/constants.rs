//! Engine-wide defaults for marker placement and asset naming.

/// Side of the square box the marker is scaled into, in pixels.
pub const DEFAULT_MARKER_SIZE: u32 = 100;

/// The marker tip sits `marker_size / MARKER_TIP_DIVISOR` pixels above the
/// bottom edge of the marker box.
pub const MARKER_TIP_DIVISOR: u32 = 5;

/// Corner residual (in normalized units) above which the calibration is
/// reported as a poor fit for the affine model.
pub const CALIBRATION_RESIDUAL_WARN: f64 = 0.05;

/// Default base map asset name.
pub const DEFAULT_BASE_MAP: &str = "map.jpg";

/// Default marker asset name.
pub const DEFAULT_MARKER: &str = "marker.png";

/// Default directory (relative to the asset root) for rendered output.
pub const DEFAULT_OUTPUT_DIR: &str = "out";
