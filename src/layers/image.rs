use crate::{traits::AssetStore, Result};
use image::{DynamicImage, GenericImageView};
use std::sync::Arc;

/// The base map raster, decoded once and shared read-only.
#[derive(Debug, Clone)]
pub struct BaseMap {
    name: String,
    image: Arc<DynamicImage>,
}

impl BaseMap {
    pub fn new(name: impl Into<String>, image: DynamicImage) -> Self {
        Self {
            name: name.into(),
            image: Arc::new(image),
        }
    }

    /// Decode the named asset from a store
    pub fn load(store: &dyn AssetStore, name: &str) -> Result<Self> {
        let image = store.load(name)?;
        log::info!(
            "loaded base map '{}' ({}x{})",
            name,
            image.width(),
            image.height()
        );
        Ok(Self::new(name, image))
    }

    /// Asset name the map was loaded from
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn image(&self) -> &DynamicImage {
        &self.image
    }

    /// (width, height) in pixels
    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::memory::MemoryAssetStore;
    use image::{Rgb, RgbImage};

    #[test]
    fn test_load_from_store() {
        let store = MemoryAssetStore::new();
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(12, 7, Rgb([1, 1, 1])));
        store.insert_image("map.jpg", &img).unwrap();

        let map = BaseMap::load(&store, "map.jpg").unwrap();
        assert_eq!(map.name(), "map.jpg");
        assert_eq!(map.dimensions(), (12, 7));
    }

    #[test]
    fn test_clone_shares_pixels() {
        let map = BaseMap::new("m", DynamicImage::new_rgb8(4, 4));
        let other = map.clone();
        assert!(std::ptr::eq(map.image(), other.image()));
    }
}
