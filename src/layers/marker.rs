use crate::{
    core::{
        constants::MARKER_TIP_DIVISOR,
        geo::{NormalizedPoint, PixelPoint},
    },
    traits::AssetStore,
    MapError, Result,
};
use image::{imageops, imageops::FilterType, DynamicImage, GenericImageView, RgbaImage};

/// Draws the marker icon onto copies of the base map.
///
/// The icon is scaled once, at construction, to fit a `marker_size` square.
/// Its tip is assumed to sit horizontally centred, a fifth of the box above
/// the bottom edge.
#[derive(Debug, Clone)]
pub struct MarkerCompositor {
    marker: RgbaImage,
    marker_size: u32,
}

impl MarkerCompositor {
    pub fn new(marker: &DynamicImage, marker_size: u32) -> Result<Self> {
        if marker_size == 0 {
            return Err(MapError::Configuration(
                "marker size must be positive".to_string(),
            ));
        }

        Ok(Self {
            marker: fit_marker(marker, marker_size),
            marker_size,
        })
    }

    /// Decode the named marker asset from a store
    pub fn load(store: &dyn AssetStore, name: &str, marker_size: u32) -> Result<Self> {
        let marker = store.load(name)?;
        let compositor = Self::new(&marker, marker_size)?;
        let (width, height) = compositor.marker.dimensions();
        log::info!(
            "loaded marker '{}' ({}x{}, scaled to {}x{})",
            name,
            marker.width(),
            marker.height(),
            width,
            height
        );
        Ok(compositor)
    }

    /// Top-left pixel where the marker box goes so its tip lands on `point`.
    ///
    /// `u` selects the row and `v` the column.
    pub fn pixel_anchor(&self, point: NormalizedPoint, width: u32, height: u32) -> PixelPoint {
        let size = i64::from(self.marker_size);
        let y = (point.u * f64::from(height)).floor() as i64 - size
            + size / i64::from(MARKER_TIP_DIVISOR);
        let x = (point.v * f64::from(width)).floor() as i64 - size / 2;
        PixelPoint::new(x, y)
    }

    /// Composite the marker at `point` onto a fresh copy of `base`.
    ///
    /// `point` is expected to be on the map; parts of the marker that fall
    /// outside the canvas are clipped. `base` is left untouched. The result
    /// has an alpha channel only if `base` does.
    pub fn render(&self, point: NormalizedPoint, base: &DynamicImage) -> DynamicImage {
        let (width, height) = base.dimensions();
        let anchor = self.pixel_anchor(point, width, height);
        log::debug!(
            "placing marker at ({}, {}) on {}x{} map",
            anchor.x,
            anchor.y,
            width,
            height
        );

        let mut canvas = base.to_rgba8();
        imageops::overlay(&mut canvas, &self.marker, anchor.x, anchor.y);
        let marked = DynamicImage::ImageRgba8(canvas);
        if base.color().has_alpha() {
            marked
        } else {
            DynamicImage::ImageRgb8(marked.to_rgb8())
        }
    }

    /// The scaled marker icon
    pub fn marker(&self) -> &RgbaImage {
        &self.marker
    }

    pub fn marker_size(&self) -> u32 {
        self.marker_size
    }
}

/// Shrink the icon to fit the box, keeping aspect ratio. Smaller icons are
/// used as they are.
fn fit_marker(marker: &DynamicImage, marker_size: u32) -> RgbaImage {
    let (width, height) = marker.dimensions();
    if width <= marker_size && height <= marker_size {
        return marker.to_rgba8();
    }
    marker
        .resize(marker_size, marker_size, FilterType::Lanczos3)
        .to_rgba8()
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage, Rgba, RgbaImage};

    const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

    fn solid_marker(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_pixel(width, height, Rgba([255, 0, 0, 255])))
    }

    /// Left half transparent, right half opaque red
    fn half_marker(size: u32) -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_fn(size, size, |x, _| {
            if x < size / 2 {
                Rgba([0, 255, 0, 0])
            } else {
                Rgba([255, 0, 0, 255])
            }
        }))
    }

    fn white_map(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_pixel(width, height, WHITE))
    }

    #[test]
    fn test_pixel_anchor_center() {
        let compositor = MarkerCompositor::new(&solid_marker(100, 100), 100).unwrap();
        let anchor = compositor.pixel_anchor(NormalizedPoint::new(0.5, 0.5), 1000, 800);

        // y = floor(0.5 * 800) - 100 + 20, x = floor(0.5 * 1000) - 50
        assert_eq!(anchor, PixelPoint::new(450, 320));
    }

    #[test]
    fn test_pixel_anchor_axis_assignment() {
        let compositor = MarkerCompositor::new(&solid_marker(100, 100), 100).unwrap();
        let anchor = compositor.pixel_anchor(NormalizedPoint::new(0.25, 0.1), 1000, 800);

        assert_eq!(anchor, PixelPoint::new(100 - 50, 200 - 100 + 20));
    }

    #[test]
    fn test_pixel_anchor_floors() {
        let compositor = MarkerCompositor::new(&solid_marker(10, 10), 10).unwrap();
        let anchor = compositor.pixel_anchor(NormalizedPoint::new(0.999, 0.999), 3, 3);

        assert_eq!(anchor, PixelPoint::new(2 - 5, 2 - 10 + 2));
    }

    #[test]
    fn test_large_marker_is_scaled_down() {
        let compositor = MarkerCompositor::new(&solid_marker(400, 200), 100).unwrap();
        assert_eq!(compositor.marker().dimensions(), (100, 50));
    }

    #[test]
    fn test_small_marker_is_not_upscaled() {
        let compositor = MarkerCompositor::new(&solid_marker(40, 60), 100).unwrap();
        assert_eq!(compositor.marker().dimensions(), (40, 60));
    }

    #[test]
    fn test_zero_marker_size_rejected() {
        assert!(matches!(
            MarkerCompositor::new(&solid_marker(4, 4), 0),
            Err(MapError::Configuration(_))
        ));
    }

    #[test]
    fn test_alpha_masks_marker() {
        let compositor = MarkerCompositor::new(&half_marker(10), 10).unwrap();
        let out = compositor
            .render(NormalizedPoint::new(0.5, 0.5), &white_map(200, 200))
            .to_rgba8();

        // Marker box spans x 95..105, y 92..102
        let transparent = out.get_pixel(96, 95);
        let opaque = out.get_pixel(101, 95);
        let outside = out.get_pixel(94, 95);

        assert!(transparent.0.iter().all(|&c| c >= 254));
        assert!(opaque.0[0] >= 254 && opaque.0[1] <= 1 && opaque.0[2] <= 1);
        assert_eq!(outside, &WHITE);
    }

    #[test]
    fn test_render_keeps_dimensions_and_base() {
        let compositor = MarkerCompositor::new(&solid_marker(10, 10), 10).unwrap();
        let base = white_map(64, 48);
        let before = base.to_rgba8();

        let out = compositor.render(NormalizedPoint::new(0.3, 0.6), &base);
        assert_eq!(out.dimensions(), (64, 48));
        assert_eq!(base.to_rgba8(), before);
        assert_ne!(out.to_rgba8(), before);
    }

    #[test]
    fn test_render_keeps_base_channels() {
        let compositor = MarkerCompositor::new(&solid_marker(10, 10), 10).unwrap();
        let point = NormalizedPoint::new(0.5, 0.5);

        let rgb = DynamicImage::ImageRgb8(RgbImage::from_pixel(40, 40, Rgb([255, 255, 255])));
        let out = compositor.render(point, &rgb);
        assert!(matches!(out, DynamicImage::ImageRgb8(_)));
        // Box spans x 15..25, y 12..22
        let body = out.to_rgb8().get_pixel(20, 15).0;
        assert!(body[0] >= 254 && body[1] <= 1 && body[2] <= 1, "{:?}", body);
        assert_eq!(out.to_rgb8().get_pixel(5, 5), &Rgb([255, 255, 255]));

        let rgba = compositor.render(point, &white_map(40, 40));
        assert!(matches!(rgba, DynamicImage::ImageRgba8(_)));
    }

    #[test]
    fn test_render_is_deterministic() {
        let compositor = MarkerCompositor::new(&half_marker(30), 20).unwrap();
        let base = white_map(120, 90);
        let point = NormalizedPoint::new(0.42, 0.77);

        let first = compositor.render(point, &base);
        let second = compositor.render(point, &base);
        assert_eq!(first.as_bytes(), second.as_bytes());
    }

    #[test]
    fn test_marker_near_edge_is_clipped() {
        let compositor = MarkerCompositor::new(&solid_marker(10, 10), 10).unwrap();
        let out = compositor
            .render(NormalizedPoint::new(0.01, 0.01), &white_map(50, 50))
            .to_rgba8();

        assert_eq!(out.dimensions(), (50, 50));
        // Anchor is (-5, -8): only the bottom-right of the marker is visible
        assert!(out.get_pixel(0, 0).0[1] <= 1);
        assert_eq!(out.get_pixel(5, 0), &WHITE);
        assert_eq!(out.get_pixel(0, 2), &WHITE);
    }
}
