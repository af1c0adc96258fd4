// Player tuning, as loaded from the game configuration

use glam::Vec2;
use serde::Deserialize;

use super::animation::{AnimationConfig, AnimationTable};
use super::combat::AttackSettings;
use crate::core::Rect;
use crate::game::config::ConfigError;

/// Rectangle as written in configuration files
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct RectStats {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl RectStats {
    pub fn to_rect(self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

/// Grid and timing of one sprite sheet
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct SheetStats {
    pub columns: u32,
    pub rows: u32,
    pub frame_count: u32,
    /// Seconds per frame
    pub frame_interval: f32,
}

impl SheetStats {
    pub fn to_config(self) -> Result<AnimationConfig, ConfigError> {
        AnimationConfig::new(self.frame_count, self.columns, self.rows, self.frame_interval)
    }
}

/// Sheet layout for every animation state
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AnimationStats {
    pub idle: SheetStats,
    pub walk: SheetStats,
    pub jump: SheetStats,
    pub attack: SheetStats,
}

impl Default for AnimationStats {
    fn default() -> Self {
        // Knight sheets: 2x4 grids for movement, 8x5 for the swing
        let movement = SheetStats {
            columns: 2,
            rows: 4,
            frame_count: 8,
            frame_interval: 0.1,
        };
        Self {
            idle: movement,
            walk: movement,
            jump: movement,
            attack: SheetStats {
                columns: 8,
                rows: 5,
                frame_count: 9,
                frame_interval: 0.08,
            },
        }
    }
}

impl AnimationStats {
    /// Validate every sheet and build the per-state table
    pub fn to_table(&self) -> Result<AnimationTable, ConfigError> {
        Ok(AnimationTable::new(
            self.idle.to_config()?,
            self.walk.to_config()?,
            self.jump.to_config()?,
            self.attack.to_config()?,
        ))
    }
}

/// Movement, physics and combat tuning for the player
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PlayerStats {
    /// Horizontal speed in pixels per second
    pub speed: f32,
    /// Jump impulse magnitude; the sign is ignored
    pub jump_force: f32,
    /// Downward acceleration in pixels per second squared
    pub gravity: f32,
    /// Collision box relative to the player's anchor
    pub collision_box: RectStats,
    /// Seconds between swings
    pub attack_cooldown: f32,
    pub attack_hitbox_width: f32,
    pub attack_hitbox_height: f32,
    /// Distance of the hitbox centre in front of the anchor
    pub attack_hitbox_offset: f32,
    /// First and last attack frame with a live hitbox
    pub attack_active_frames: (u32, u32),
    pub animations: AnimationStats,
}

impl Default for PlayerStats {
    fn default() -> Self {
        Self {
            speed: 120.0,
            jump_force: 350.0,
            gravity: 900.0,
            collision_box: RectStats {
                x: -16.0,
                y: -29.0,
                width: 32.0,
                height: 58.0,
            },
            attack_cooldown: 0.5,
            attack_hitbox_width: 60.0,
            attack_hitbox_height: 40.0,
            attack_hitbox_offset: 40.0,
            attack_active_frames: (3, 5),
            animations: AnimationStats::default(),
        }
    }
}

impl PlayerStats {
    pub fn attack_settings(&self) -> AttackSettings {
        let (first, last) = self.attack_active_frames;
        AttackSettings {
            cooldown: self.attack_cooldown,
            hitbox_size: Vec2::new(self.attack_hitbox_width, self.attack_hitbox_height),
            hitbox_offset: self.attack_hitbox_offset,
            active_frames: first..=last,
        }
    }
}
