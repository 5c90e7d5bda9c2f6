//! Sprite asset sources
//!
//! Base bodies and overlays are looked up by file name. A directory source
//! decodes PNG files on each load; an in-memory source serves pre-decoded
//! images.

use crate::{RenderError, RgbaImage};
use image::ImageFormat;
use std::collections::HashMap;
use std::io::{Cursor, ErrorKind};
use std::path::{Component, Path, PathBuf};

/// Something that can produce sprite bitmaps by name
pub trait AssetSource: Send + Sync {
    /// Load an asset as RGBA; unknown names fail with [`RenderError::AssetNotFound`]
    fn load(&self, name: &str) -> Result<RgbaImage, RenderError>;
}

/// Assets read from a directory on disk
#[derive(Debug, Clone)]
pub struct DirectoryAssets {
    root: PathBuf,
}

impl DirectoryAssets {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve `name` under the root, refusing anything that would escape it
    fn resolve(&self, name: &str) -> Option<PathBuf> {
        let relative = Path::new(name);
        let plain = relative.components().all(|c| matches!(c, Component::Normal(_)));
        (plain && !name.is_empty()).then(|| self.root.join(relative))
    }
}

impl AssetSource for DirectoryAssets {
    fn load(&self, name: &str) -> Result<RgbaImage, RenderError> {
        let path = self
            .resolve(name)
            .ok_or_else(|| RenderError::AssetNotFound(name.to_string()))?;

        let bytes = match std::fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(RenderError::AssetNotFound(name.to_string()));
            }
            Err(e) => {
                return Err(RenderError::Io { name: name.to_string(), source: e });
            }
        };

        let decoded = image::load_from_memory(&bytes).map_err(|e| RenderError::Decode {
            name: name.to_string(),
            message: e.to_string(),
        })?;

        tracing::debug!(path = %path.display(), "Loaded sprite asset");
        Ok(decoded.into_rgba8())
    }
}

/// Pre-decoded assets held in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryAssets {
    images: HashMap<String, RgbaImage>,
}

impl MemoryAssets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, image: RgbaImage) {
        self.images.insert(name.into(), image);
    }

    /// Builder form of [`MemoryAssets::insert`]
    pub fn with(mut self, name: impl Into<String>, image: RgbaImage) -> Self {
        self.insert(name, image);
        self
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

impl AssetSource for MemoryAssets {
    fn load(&self, name: &str) -> Result<RgbaImage, RenderError> {
        self.images
            .get(name)
            .cloned()
            .ok_or_else(|| RenderError::AssetNotFound(name.to_string()))
    }
}

/// Encode an image as PNG bytes
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, RenderError> {
    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .map_err(|e| RenderError::Encode(e.to_string()))?;
    Ok(bytes)
}
