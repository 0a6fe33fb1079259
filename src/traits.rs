//! Shared trait abstractions
//!
//! These are the seams between the geometric core and its collaborators:
//! how coordinates are projected, and where images come from and go to.

use crate::{
    assets::OutputHandle,
    core::geo::{LatLng, NormalizedPoint},
    Result,
};
use image::DynamicImage;

/// Transform between geographic coordinates and normalized map space
pub trait MapProjection {
    /// Geographic coordinates to map space
    fn project(&self, lat_lng: LatLng) -> NormalizedPoint;

    /// Map space back to geographic coordinates
    fn unproject(&self, point: NormalizedPoint) -> LatLng;
}

/// Source of read-only image assets and sink for rendered output.
///
/// Every call to [`store`](AssetStore::store) yields a fresh handle, so
/// concurrent requests never overwrite each other's output.
pub trait AssetStore: Send + Sync {
    /// Decode a named asset
    fn load(&self, name: &str) -> Result<DynamicImage>;

    /// Raw encoded bytes of a named asset, for passing it along untouched
    fn load_bytes(&self, name: &str) -> Result<Vec<u8>>;

    /// Encode and persist a rendered image under a new handle
    fn store(&self, image: &DynamicImage) -> Result<OutputHandle>;

    /// Encoded bytes of previously stored output
    fn fetch(&self, handle: &OutputHandle) -> Result<Vec<u8>>;

    /// Drop stored output once it has been delivered
    fn release(&self, handle: &OutputHandle) -> Result<()>;
}
