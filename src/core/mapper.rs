//! Geographic to map-space transform
//!
//! The map is treated as flat: a point is expressed as an affine combination
//! of the two edges leaving the up-left corner. This is only accurate for
//! areas small enough that Earth curvature can be ignored.

use crate::{
    core::{
        calibration::CalibrationCorners,
        constants::CALIBRATION_RESIDUAL_WARN,
        geo::{LatLng, NormalizedPoint},
    },
    traits::MapProjection,
    MapError, Result,
};
use nalgebra::{Matrix2, Vector2};

/// Converts latitude/longitude pairs into normalized map coordinates.
#[derive(Debug, Clone)]
pub struct CoordinateMapper {
    corners: CalibrationCorners,
    origin: Vector2<f64>,
    /// Columns are the down-left and up-right edge vectors
    basis: Matrix2<f64>,
    inverse: Matrix2<f64>,
}

impl CoordinateMapper {
    /// Build the mapper, inverting the edge matrix once.
    ///
    /// Fails if the up-left, up-right and down-left corners are collinear.
    pub fn new(corners: CalibrationCorners) -> Result<Self> {
        let (origin, basis) = edge_basis(&corners)?;
        let inverse = basis.try_inverse().ok_or_else(|| {
            MapError::Configuration("calibration matrix is not invertible".to_string())
        })?;

        let mapper = Self {
            corners,
            origin,
            basis,
            inverse,
        };

        let residual = mapper.corner_residual();
        if residual > CALIBRATION_RESIDUAL_WARN {
            log::warn!(
                "down-right corner is {:.4} off the affine fit; markers near it will drift",
                residual
            );
        } else {
            log::debug!("calibration residual {:.6}", residual);
        }

        Ok(mapper)
    }

    /// Normalized position of a geographic coordinate.
    ///
    /// Any input is accepted; points off the map land outside the unit
    /// square, and non-finite input yields a non-finite point.
    pub fn locate(&self, latitude: f64, longitude: f64) -> NormalizedPoint {
        let local = self.inverse * (Vector2::new(latitude, longitude) - self.origin);
        NormalizedPoint::new(local.x, local.y)
    }

    /// Geographic coordinate of a normalized map position
    pub fn unlocate(&self, point: NormalizedPoint) -> LatLng {
        let world = self.origin + self.basis * Vector2::new(point.u, point.v);
        LatLng::new(world.x, world.y)
    }

    /// How far the down-right corner lands from (1, 1)
    pub fn corner_residual(&self) -> f64 {
        let down_right = self.corners.down_right;
        self.locate(down_right.lat, down_right.lng)
            .distance_to(&NormalizedPoint::new(1.0, 1.0))
    }

    pub fn corners(&self) -> &CalibrationCorners {
        &self.corners
    }
}

impl MapProjection for CoordinateMapper {
    fn project(&self, lat_lng: LatLng) -> NormalizedPoint {
        self.locate(lat_lng.lat, lat_lng.lng)
    }

    fn unproject(&self, point: NormalizedPoint) -> LatLng {
        self.unlocate(point)
    }
}

/// Reject degenerate corners without building a mapper
pub fn check_corners(corners: &CalibrationCorners) -> Result<()> {
    edge_basis(corners).map(|_| ())
}

/// Origin and edge matrix, with a scale-aware degeneracy test.
/// `try_inverse` alone only rejects an exact zero determinant.
fn edge_basis(corners: &CalibrationCorners) -> Result<(Vector2<f64>, Matrix2<f64>)> {
    let origin = to_vector(corners.up_left);
    let down_edge = to_vector(corners.down_left) - origin;
    let right_edge = to_vector(corners.up_right) - origin;
    let basis = Matrix2::from_columns(&[down_edge, right_edge]);

    let scale = down_edge.norm() * right_edge.norm();
    if scale == 0.0 || basis.determinant().abs() <= scale * 1e-12 {
        return Err(MapError::Configuration(
            "calibration corners are degenerate: map edges are parallel or zero-length"
                .to_string(),
        ));
    }
    Ok((origin, basis))
}

fn to_vector(lat_lng: LatLng) -> Vector2<f64> {
    Vector2::new(lat_lng.lat, lat_lng.lng)
}
