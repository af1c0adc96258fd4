// Asset management system
//
// Resolves files under the asset root, decodes images and caches the
// resulting GPU textures behind typed handles.

mod handle;
mod loader;
mod manager;

pub use handle::{AssetHandle, AssetId, TextureHandle};
pub use loader::{AssetLoader, AssetType};
pub use manager::AssetManager;

/// Asset loading errors
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("Asset not found: {0}")]
    NotFound(String),

    #[error("Failed to decode {name}: {source}")]
    Decode {
        name: String,
        #[source]
        source: image::ImageError,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
