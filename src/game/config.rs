// Game configuration, read from assets/config/game.ron

use glam::Vec2;
use log::{info, warn};
use serde::Deserialize;

use super::characters::PlayerStats;
use crate::engine::assets::{AssetError, AssetLoader, AssetType};

/// Name of the configuration file inside the config asset directory
pub const CONFIG_FILE: &str = "game.ron";

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read configuration: {0}")]
    Asset(#[from] AssetError),

    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] ron::error::SpannedError),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "I am not a hero".to_string(),
            width: 900,
            height: 600,
        }
    }
}

/// Image names, relative to the texture directory
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AssetPaths {
    pub idle: String,
    pub run: String,
    pub jump: String,
    pub attack: String,
    pub tileset: String,
}

impl Default for AssetPaths {
    fn default() -> Self {
        Self {
            idle: "character/player/knight/Idle.png".to_string(),
            run: "character/player/knight/Run.png".to_string(),
            jump: "character/player/knight/Jump.png".to_string(),
            attack: "character/player/knight/Attacks.png".to_string(),
            tileset: "tilesets/tx_tileset_ground.png".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub view_width: f32,
    pub view_height: f32,
    /// Fraction of the remaining distance covered each frame
    pub smoothing: f32,
    /// Pixels the target is pushed ahead in the facing direction
    pub look_ahead: f32,
}

impl CameraConfig {
    pub fn view_size(&self) -> Vec2 {
        Vec2::new(self.view_width, self.view_height)
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            view_width: 800.0,
            view_height: 600.0,
            smoothing: 0.1,
            look_ahead: 25.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// A straight run of tiles
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct PlatformConfig {
    pub orientation: Orientation,
    pub x: f32,
    pub y: f32,
    /// Number of tiles
    pub length: u32,
    /// Tileset cell drawn for every tile of the run
    pub tile_x: u32,
    pub tile_y: u32,
}

impl PlatformConfig {
    const fn horizontal(x: f32, y: f32, length: u32, tile_x: u32, tile_y: u32) -> Self {
        Self {
            orientation: Orientation::Horizontal,
            x,
            y,
            length,
            tile_x,
            tile_y,
        }
    }

    const fn vertical(x: f32, y: f32, length: u32, tile_x: u32, tile_y: u32) -> Self {
        Self {
            orientation: Orientation::Vertical,
            x,
            y,
            length,
            tile_x,
            tile_y,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LevelConfig {
    pub map_width: f32,
    pub map_height: f32,
    pub tile_width: f32,
    pub tile_height: f32,
    pub spawn: (f32, f32),
    pub platforms: Vec<PlatformConfig>,
}

impl LevelConfig {
    pub fn map_size(&self) -> Vec2 {
        Vec2::new(self.map_width, self.map_height)
    }

    pub fn tile_size(&self) -> Vec2 {
        Vec2::new(self.tile_width, self.tile_height)
    }

    pub fn spawn(&self) -> Vec2 {
        Vec2::new(self.spawn.0, self.spawn.1)
    }
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self {
            map_width: 1000.0,
            map_height: 1000.0,
            tile_width: 32.0,
            tile_height: 32.0,
            spawn: (100.0, 100.0),
            platforms: vec![
                // Floor and ceiling
                PlatformConfig::horizontal(0.0, 1000.0, 35, 1, 0),
                PlatformConfig::horizontal(0.0, 0.0, 35, 1, 0),
                // Side walls
                PlatformConfig::vertical(0.0, 0.0, 35, 2, 1),
                PlatformConfig::vertical(1000.0, 0.0, 35, 0, 1),
                // Floating platforms
                PlatformConfig::horizontal(200.0, 400.0, 8, 1, 0),
                PlatformConfig::horizontal(50.0, 300.0, 5, 1, 0),
                PlatformConfig::horizontal(500.0, 250.0, 6, 1, 0),
            ],
        }
    }
}

/// Everything tunable about the game
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub window: WindowConfig,
    pub assets: AssetPaths,
    pub player: PlayerStats,
    pub camera: CameraConfig,
    pub level: LevelConfig,
}

impl GameConfig {
    /// Parse a RON document; absent fields keep their defaults
    pub fn from_ron_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = ron::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse the configuration file
    pub fn load(loader: &AssetLoader) -> Result<Self, ConfigError> {
        let source = loader.read_to_string(AssetType::Config, CONFIG_FILE)?;
        Self::from_ron_str(&source)
    }

    /// Like `load`, but any failure yields the built-in defaults
    pub fn load_or_default(loader: &AssetLoader) -> Self {
        match Self::load(loader) {
            Ok(config) => {
                info!("Loaded configuration from {}", CONFIG_FILE);
                config
            }
            Err(ConfigError::Asset(AssetError::NotFound(path))) => {
                info!("No configuration at {}, using defaults", path);
                Self::default()
            }
            Err(e) => {
                warn!("{}. Using defaults.", e);
                Self::default()
            }
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        self.player.animations.to_table()?;

        let level = &self.level;
        if level.tile_width <= 0.0 || level.tile_height <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "tile size {}x{} must be positive",
                level.tile_width, level.tile_height
            )));
        }
        if self.window.width == 0 || self.window.height == 0 {
            return Err(ConfigError::Invalid("window size must be non-zero".to_string()));
        }
        Ok(())
    }
}
