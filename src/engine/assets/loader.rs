// Asset loading functionality

use super::AssetError;
use std::path::{Path, PathBuf};

/// Supported asset types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetType {
    Texture,
    Config,
}

impl AssetType {
    /// Get the default directory for this asset type
    pub fn default_directory(&self) -> &'static str {
        match self {
            AssetType::Texture => "images",
            AssetType::Config => "config",
        }
    }
}

/// Asset loader responsible for finding and reading asset files
#[derive(Debug, Clone)]
pub struct AssetLoader {
    base_path: PathBuf,
}

impl AssetLoader {
    /// Create a new asset loader with the given base path
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    /// Get the full path for an asset
    pub fn resolve_path(&self, asset_type: AssetType, name: &str) -> PathBuf {
        self.base_path
            .join(asset_type.default_directory())
            .join(name)
    }

    /// Check if an asset exists
    pub fn exists(&self, asset_type: AssetType, name: &str) -> bool {
        self.resolve_path(asset_type, name).exists()
    }

    /// Load asset bytes from disk
    pub fn load_bytes(&self, asset_type: AssetType, name: &str) -> Result<Vec<u8>, AssetError> {
        let path = self.existing_path(asset_type, name)?;
        Ok(std::fs::read(path)?)
    }

    /// Load a UTF-8 asset, e.g. a configuration file
    pub fn read_to_string(&self, asset_type: AssetType, name: &str) -> Result<String, AssetError> {
        let path = self.existing_path(asset_type, name)?;
        Ok(std::fs::read_to_string(path)?)
    }

    /// Load and decode an image
    pub fn load_image(&self, name: &str) -> Result<image::DynamicImage, AssetError> {
        let bytes = self.load_bytes(AssetType::Texture, name)?;
        image::load_from_memory(&bytes).map_err(|source| AssetError::Decode {
            name: name.to_string(),
            source,
        })
    }

    fn existing_path(&self, asset_type: AssetType, name: &str) -> Result<PathBuf, AssetError> {
        let path = self.resolve_path(asset_type, name);
        if !path.exists() {
            return Err(AssetError::NotFound(path.to_string_lossy().to_string()));
        }
        Ok(path)
    }

    /// Get the base path
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }
}
