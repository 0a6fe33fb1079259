//! Request-level flow: locate, check bounds, render, store.

use crate::{
    assets::{fs::FsAssetStore, OutputHandle},
    core::{
        config::MapConfig,
        geo::{LatLng, NormalizedPoint},
        mapper::CoordinateMapper,
    },
    layers::{image::BaseMap, marker::MarkerCompositor},
    traits::AssetStore,
    MapError, Result,
};
use image::DynamicImage;
use std::sync::Arc;

/// Outcome of placing a coordinate on the map
#[derive(Debug, Clone, PartialEq)]
pub enum Placement {
    /// Marker rendered and stored
    OnMap {
        point: NormalizedPoint,
        handle: OutputHandle,
    },
    /// Coordinate falls outside the map; nothing was rendered
    OffMap(NormalizedPoint),
}

impl Placement {
    pub fn point(&self) -> NormalizedPoint {
        match self {
            Placement::OnMap { point, .. } => *point,
            Placement::OffMap(point) => *point,
        }
    }

    pub fn is_on_map(&self) -> bool {
        matches!(self, Placement::OnMap { .. })
    }
}

/// Holds everything a request needs, loaded once at startup.
///
/// Shared read-only between requests; each render goes to its own output
/// handle, so `&MapLocator` can serve concurrent callers.
pub struct MapLocator {
    mapper: CoordinateMapper,
    compositor: MarkerCompositor,
    base: BaseMap,
    store: Arc<dyn AssetStore>,
}

impl MapLocator {
    /// Build from configuration and a store holding the configured assets.
    ///
    /// Any failure here, including unreadable assets, is a configuration error.
    pub fn new(config: &MapConfig, store: Arc<dyn AssetStore>) -> Result<Self> {
        config.validate()?;
        let mapper = CoordinateMapper::new(config.calibration)?;
        let base = BaseMap::load(store.as_ref(), &config.assets.base_map).map_err(at_startup)?;
        let compositor =
            MarkerCompositor::load(store.as_ref(), &config.assets.marker, config.marker_size)
                .map_err(at_startup)?;

        let (height_m, width_m) = config.calibration.extent_meters();
        log::info!(
            "map covers about {:.0} m x {:.0} m, marker box {} px",
            width_m,
            height_m,
            config.marker_size
        );

        Ok(Self {
            mapper,
            compositor,
            base,
            store,
        })
    }

    /// Build with a filesystem store rooted at the configured asset directory
    pub fn from_config(config: &MapConfig) -> Result<Self> {
        let store = FsAssetStore::new(&config.assets.root, config.assets.resolved_output_dir())?;
        Self::new(config, Arc::new(store))
    }

    /// Normalized position of a coordinate, without rendering
    pub fn locate(&self, lat_lng: LatLng) -> NormalizedPoint {
        self.mapper.locate(lat_lng.lat, lat_lng.lng)
    }

    /// Locate the coordinate and, if it is on the map, render and store the
    /// marked map.
    pub fn place(&self, lat_lng: LatLng) -> Result<Placement> {
        let point = self.locate(lat_lng);
        log::debug!(
            "({}, {}) -> ({:.6}, {:.6})",
            lat_lng.lat,
            lat_lng.lng,
            point.u,
            point.v
        );

        if !point.is_on_map() {
            return Ok(Placement::OffMap(point));
        }

        let image = self.render(point);
        let handle = self.store.store(&image)?;
        Ok(Placement::OnMap { point, handle })
    }

    /// Composite the marker at an on-map point
    pub fn render(&self, point: NormalizedPoint) -> DynamicImage {
        self.compositor.render(point, self.base.image())
    }

    /// Encoded bytes of the unmarked base map asset
    pub fn map_bytes(&self) -> Result<Vec<u8>> {
        self.store.load_bytes(self.base.name())
    }

    pub fn store(&self) -> &dyn AssetStore {
        self.store.as_ref()
    }

    pub fn mapper(&self) -> &CoordinateMapper {
        &self.mapper
    }

    pub fn compositor(&self) -> &MarkerCompositor {
        &self.compositor
    }

    pub fn base_map(&self) -> &BaseMap {
        &self.base
    }
}

fn at_startup(err: MapError) -> MapError {
    match err {
        MapError::Configuration(_) => err,
        other => MapError::Configuration(format!("cannot start: {}", other)),
    }
}
