use super::{encode_png, OutputHandle};
use crate::{traits::AssetStore, MapError, Result};
use image::DynamicImage;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

/// In-memory asset store, for tests and for embedding without a filesystem.
///
/// Cloning shares the underlying storage.
#[derive(Debug, Clone, Default)]
pub struct MemoryAssetStore {
    assets: Arc<Mutex<HashMap<String, Arc<Vec<u8>>>>>,
    outputs: Arc<Mutex<HashMap<Uuid, Arc<Vec<u8>>>>>,
}

impl MemoryAssetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register encoded asset bytes under a name
    pub fn insert(&self, name: impl Into<String>, bytes: Vec<u8>) -> Result<()> {
        self.assets
            .lock()
            .map_err(|_| MapError::AssetIo("asset table lock poisoned".to_string()))?
            .insert(name.into(), Arc::new(bytes));
        Ok(())
    }

    /// Register an image as a PNG-encoded asset
    pub fn insert_image(&self, name: impl Into<String>, image: &DynamicImage) -> Result<()> {
        self.insert(name, encode_png(image)?)
    }

    /// Number of outputs currently held
    pub fn output_count(&self) -> usize {
        self.outputs.lock().map(|outputs| outputs.len()).unwrap_or(0)
    }

    fn asset(&self, name: &str) -> Result<Arc<Vec<u8>>> {
        let assets = self
            .assets
            .lock()
            .map_err(|_| MapError::AssetIo("asset table lock poisoned".to_string()))?;
        assets.get(name).cloned().ok_or_else(|| MapError::AssetLoad {
            name: name.to_string(),
            reason: "no such asset".to_string(),
        })
    }
}

impl AssetStore for MemoryAssetStore {
    fn load(&self, name: &str) -> Result<DynamicImage> {
        let bytes = self.asset(name)?;
        image::load_from_memory(&bytes).map_err(|e| MapError::AssetLoad {
            name: name.to_string(),
            reason: e.to_string(),
        })
    }

    fn load_bytes(&self, name: &str) -> Result<Vec<u8>> {
        Ok(self.asset(name)?.as_ref().clone())
    }

    fn store(&self, image: &DynamicImage) -> Result<OutputHandle> {
        let bytes = encode_png(image)?;
        let id = Uuid::new_v4();
        self.outputs
            .lock()
            .map_err(|_| MapError::AssetIo("output table lock poisoned".to_string()))?
            .insert(id, Arc::new(bytes));

        log::debug!("stored output {} in memory", id);
        Ok(OutputHandle::new(id, None))
    }

    fn fetch(&self, handle: &OutputHandle) -> Result<Vec<u8>> {
        let outputs = self
            .outputs
            .lock()
            .map_err(|_| MapError::AssetIo("output table lock poisoned".to_string()))?;
        outputs
            .get(&handle.id())
            .map(|bytes| bytes.as_ref().clone())
            .ok_or_else(|| MapError::AssetIo(format!("no output {}", handle.id())))
    }

    fn release(&self, handle: &OutputHandle) -> Result<()> {
        self.outputs
            .lock()
            .map_err(|_| MapError::AssetIo("output table lock poisoned".to_string()))?
            .remove(&handle.id());
        Ok(())
    }
}
