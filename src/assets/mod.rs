//! Image asset storage
//!
//! The core only ever sees decoded in-memory images; stores translate between
//! those and wherever the bytes actually live.

pub mod fs;
pub mod memory;

use crate::{MapError, Result};
use image::{DynamicImage, ImageOutputFormat};
use std::io::Cursor;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Identifies one rendered output image.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OutputHandle {
    id: Uuid,
    path: Option<PathBuf>,
}

impl OutputHandle {
    pub(crate) fn new(id: Uuid, path: Option<PathBuf>) -> Self {
        Self { id, path }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Filesystem location, for stores that write to disk
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

impl std::fmt::Display for OutputHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.path {
            Some(path) => write!(f, "{}", path.display()),
            None => write!(f, "{}", self.id),
        }
    }
}

/// Encode an image as PNG
pub fn encode_png(image: &DynamicImage) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut buf), ImageOutputFormat::Png)
        .map_err(|e| MapError::AssetIo(format!("failed to encode png: {}", e)))?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    #[test]
    fn test_encode_png_decodes_back() {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(3, 2, Rgba([1, 2, 3, 255])));
        let bytes = encode_png(&img).unwrap();

        let decoded = image::load_from_memory(&bytes).unwrap().to_rgba8();
        assert_eq!(decoded.dimensions(), (3, 2));
        assert_eq!(decoded.get_pixel(2, 1), &Rgba([1, 2, 3, 255]));
    }

    #[test]
    fn test_handle_display() {
        let id = Uuid::new_v4();
        assert_eq!(OutputHandle::new(id, None).to_string(), id.to_string());

        let handle = OutputHandle::new(id, Some(PathBuf::from("out/x.png")));
        assert_eq!(handle.to_string(), "out/x.png");
    }
}
