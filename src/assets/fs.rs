use super::{encode_png, OutputHandle};
use crate::{traits::AssetStore, MapError, Result};
use image::DynamicImage;
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Directory-backed asset store.
///
/// Assets are read from `root`; every rendered image is written to its own
/// `<uuid>.png` inside `output_dir`.
#[derive(Debug, Clone)]
pub struct FsAssetStore {
    root: PathBuf,
    output_dir: PathBuf,
}

impl FsAssetStore {
    /// Create the store, making sure the output directory exists
    pub fn new(root: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        let output_dir = output_dir.into();
        fs::create_dir_all(&output_dir).map_err(|e| {
            MapError::Configuration(format!(
                "cannot create output directory {}: {}",
                output_dir.display(),
                e
            ))
        })?;

        Ok(Self { root, output_dir })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Location of a named asset
    pub fn asset_path(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    fn output_path(&self, handle: &OutputHandle) -> PathBuf {
        handle
            .path()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.output_dir.join(format!("{}.png", handle.id())))
    }
}

impl AssetStore for FsAssetStore {
    fn load(&self, name: &str) -> Result<DynamicImage> {
        let path = self.asset_path(name);
        log::debug!("loading asset {}", path.display());
        image::open(&path).map_err(|e| MapError::AssetLoad {
            name: name.to_string(),
            reason: e.to_string(),
        })
    }

    fn load_bytes(&self, name: &str) -> Result<Vec<u8>> {
        fs::read(self.asset_path(name)).map_err(|e| MapError::AssetLoad {
            name: name.to_string(),
            reason: e.to_string(),
        })
    }

    fn store(&self, image: &DynamicImage) -> Result<OutputHandle> {
        let id = Uuid::new_v4();
        let path = self.output_dir.join(format!("{}.png", id));
        let bytes = encode_png(image)?;
        fs::write(&path, bytes)
            .map_err(|e| MapError::AssetIo(format!("failed to write {}: {}", path.display(), e)))?;

        log::info!("stored output {}", path.display());
        Ok(OutputHandle::new(id, Some(path)))
    }

    fn fetch(&self, handle: &OutputHandle) -> Result<Vec<u8>> {
        let path = self.output_path(handle);
        fs::read(&path)
            .map_err(|e| MapError::AssetIo(format!("failed to read {}: {}", path.display(), e)))
    }

    fn release(&self, handle: &OutputHandle) -> Result<()> {
        let path = self.output_path(handle);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(MapError::AssetIo(format!(
                "failed to remove {}: {}",
                path.display(),
                e
            ))),
        }
    }
}
