// Central asset management system

use super::{AssetError, AssetHandle, AssetId, AssetLoader, TextureHandle};
use crate::engine::renderer::Texture;
use glam::UVec2;
use log::{error, info};
use std::collections::HashMap;
use std::path::Path;

/// Pixel used when a texture cannot be loaded
const BLANK_PIXEL: [u8; 4] = [0, 0, 0, 0];

/// Owns every GPU texture and hands out typed handles to them
pub struct AssetManager {
    loader: AssetLoader,

    /// Loaded textures
    textures: HashMap<AssetId, Texture>,

    /// Path to ID mapping for textures
    texture_paths: HashMap<String, AssetId>,
}

impl AssetManager {
    /// Create a manager rooted at `asset_path`
    pub fn new<P: AsRef<Path>>(asset_path: P) -> Self {
        Self {
            loader: AssetLoader::new(asset_path),
            textures: HashMap::new(),
            texture_paths: HashMap::new(),
        }
    }

    /// Load a texture from disk, reusing it if it is already resident
    pub fn load_texture(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        name: &str,
    ) -> Result<TextureHandle, AssetError> {
        if let Some(&id) = self.texture_paths.get(name) {
            return Ok(AssetHandle::new(id));
        }

        let img = self.loader.load_image(name)?;
        let texture = Texture::from_image(device, queue, &img, Some(name));
        info!("Loaded texture {} ({}x{})", name, texture.width, texture.height);

        Ok(self.insert(name, texture))
    }

    /// Load a texture, substituting a blank 1x1 one on failure.
    ///
    /// The failure is logged and the game carries on; whatever draws with the
    /// handle simply shows nothing.
    pub fn load_texture_or_blank(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        name: &str,
    ) -> TextureHandle {
        match self.load_texture(device, queue, name) {
            Ok(handle) => handle,
            Err(err) => {
                error!("Failed to load texture {}: {}", name, err);
                let blank = Texture::from_color(device, queue, BLANK_PIXEL, Some(name));
                self.insert(name, blank)
            }
        }
    }

    fn insert(&mut self, name: &str, texture: Texture) -> TextureHandle {
        let id = AssetId::from_path(name);
        self.textures.insert(id, texture);
        self.texture_paths.insert(name.to_string(), id);
        AssetHandle::new(id)
    }

    /// Get a texture by handle
    pub fn get_texture(&self, handle: TextureHandle) -> Option<&Texture> {
        self.textures.get(&handle.id())
    }

    /// Pixel size of a loaded texture
    pub fn texture_size(&self, handle: TextureHandle) -> Option<UVec2> {
        self.get_texture(handle).map(Texture::size)
    }

    /// Handle for a texture that was loaded under `name`
    pub fn texture_handle(&self, name: &str) -> Option<TextureHandle> {
        self.texture_paths.get(name).map(|&id| AssetHandle::new(id))
    }

    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }

    /// Get the asset loader
    pub fn loader(&self) -> &AssetLoader {
        &self.loader
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Uploading needs a GPU device; these cover the bookkeeping around it.

    #[test]
    fn test_new_manager_is_empty() {
        let manager = AssetManager::new("assets");
        assert_eq!(manager.texture_count(), 0);
        assert_eq!(manager.loader().base_path(), Path::new("assets"));
    }

    #[test]
    fn test_unknown_handle_has_no_size() {
        let manager = AssetManager::new("assets");
        let handle: TextureHandle = AssetHandle::new(AssetId::from_path("missing.png"));
        assert!(manager.get_texture(handle).is_none());
        assert!(manager.texture_size(handle).is_none());
        assert!(manager.texture_handle("missing.png").is_none());
    }
}
