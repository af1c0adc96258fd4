// Tile ground and the level built from it

use glam::{UVec2, Vec2};
use log::info;

use super::config::{LevelConfig, Orientation};
use crate::core::{color, Rect};
use crate::engine::assets::TextureHandle;
use crate::engine::physics::CollisionGeometry;
use crate::engine::renderer::Sprite;

/// One placed tile
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tile {
    /// Top-left corner in world space
    pub position: Vec2,
    /// Column and row within the tileset
    pub cell: UVec2,
}

/// Solid tiles; every tile contributes one collision box
#[derive(Debug, Clone)]
pub struct Ground {
    tileset: Option<TextureHandle>,
    tile_size: Vec2,
    tiles: Vec<Tile>,
    /// Same order as `tiles`
    collision_boxes: Vec<Rect>,
}

impl Ground {
    pub fn new(tile_size: Vec2) -> Self {
        Self {
            tileset: None,
            tile_size,
            tiles: Vec::new(),
            collision_boxes: Vec::new(),
        }
    }

    pub fn set_tileset(&mut self, tileset: Option<TextureHandle>) {
        self.tileset = tileset;
    }

    pub fn tile_size(&self) -> Vec2 {
        self.tile_size
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Place a tile with its top-left corner at `(x, y)`
    pub fn add_tile(&mut self, x: f32, y: f32, tile_x: u32, tile_y: u32) {
        let position = Vec2::new(x, y);
        self.tiles.push(Tile {
            position,
            cell: UVec2::new(tile_x, tile_y),
        });
        self.collision_boxes.push(Rect {
            position,
            size: self.tile_size,
        });
    }

    /// `length` tiles in a row going right from `start_x`
    pub fn create_horizontal_platform(
        &mut self,
        start_x: f32,
        y: f32,
        length: u32,
        tile_x: u32,
        tile_y: u32,
    ) {
        for i in 0..length {
            let x = start_x + i as f32 * self.tile_size.x;
            self.add_tile(x, y, tile_x, tile_y);
        }
    }

    /// `length` tiles in a column going down from `start_y`
    pub fn create_vertical_platform(
        &mut self,
        x: f32,
        start_y: f32,
        length: u32,
        tile_x: u32,
        tile_y: u32,
    ) {
        for i in 0..length {
            let y = start_y + i as f32 * self.tile_size.y;
            self.add_tile(x, y, tile_x, tile_y);
        }
    }

    pub fn clear(&mut self) {
        self.tiles.clear();
        self.collision_boxes.clear();
    }

    /// One sprite per tile, cut from the tileset; plain blocks without one
    pub fn sprites(&self) -> Vec<Sprite> {
        self.tiles
            .iter()
            .map(|tile| {
                let bounds = Rect {
                    position: tile.position,
                    size: self.tile_size,
                };
                match self.tileset {
                    Some(texture) => {
                        let source = Rect {
                            position: tile.cell.as_vec2() * self.tile_size,
                            size: self.tile_size,
                        };
                        Sprite::textured(bounds, texture, Some(source))
                    }
                    None => Sprite::solid(bounds, color::rgb8(110, 80, 50)),
                }
            })
            .collect()
    }
}

impl CollisionGeometry for Ground {
    fn collision_boxes(&self) -> &[Rect] {
        &self.collision_boxes
    }
}

/// The playable map: ground, bounds and spawn point
#[derive(Debug, Clone)]
pub struct Level {
    map_size: Vec2,
    spawn: Vec2,
    ground: Ground,
}

impl Level {
    pub fn from_config(config: &LevelConfig) -> Self {
        let mut ground = Ground::new(config.tile_size());
        for platform in &config.platforms {
            match platform.orientation {
                Orientation::Horizontal => ground.create_horizontal_platform(
                    platform.x,
                    platform.y,
                    platform.length,
                    platform.tile_x,
                    platform.tile_y,
                ),
                Orientation::Vertical => ground.create_vertical_platform(
                    platform.x,
                    platform.y,
                    platform.length,
                    platform.tile_x,
                    platform.tile_y,
                ),
            }
        }

        info!(
            "Level built: {} platforms, {} tiles, map {}x{}",
            config.platforms.len(),
            ground.tiles().len(),
            config.map_width,
            config.map_height
        );

        Self {
            map_size: config.map_size(),
            spawn: config.spawn(),
            ground,
        }
    }

    pub fn map_size(&self) -> Vec2 {
        self.map_size
    }

    pub fn tile_size(&self) -> Vec2 {
        self.ground.tile_size()
    }

    pub fn spawn(&self) -> Vec2 {
        self.spawn
    }

    pub fn ground(&self) -> &Ground {
        &self.ground
    }

    pub fn ground_mut(&mut self) -> &mut Ground {
        &mut self.ground
    }
}
