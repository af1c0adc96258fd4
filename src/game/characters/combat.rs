// Melee attack: cooldown, frame-windowed hitbox

use glam::Vec2;
use log::debug;
use std::ops::RangeInclusive;

use crate::core::Rect;

/// Fixed parameters of the player's swing
#[derive(Debug, Clone, PartialEq)]
pub struct AttackSettings {
    /// Seconds after a swing starts before another may start
    pub cooldown: f32,
    /// Size of the damage rectangle
    pub hitbox_size: Vec2,
    /// Horizontal distance from the player's anchor to the hitbox centre
    pub hitbox_offset: f32,
    /// Attack frames during which the hitbox is live
    pub active_frames: RangeInclusive<u32>,
}

impl Default for AttackSettings {
    fn default() -> Self {
        Self {
            cooldown: 0.5,
            hitbox_size: Vec2::new(60.0, 40.0),
            hitbox_offset: 40.0,
            active_frames: 3..=5,
        }
    }
}

/// Attack sub-state of the player
#[derive(Debug, Clone)]
pub struct Combat {
    settings: AttackSettings,
    attacking: bool,
    /// Counts down; may go negative, only `<= 0` matters
    cooldown_timer: f32,
    hitbox_active: bool,
    hitbox: Rect,
}

impl Combat {
    pub fn new(settings: AttackSettings) -> Self {
        Self {
            settings,
            attacking: false,
            cooldown_timer: 0.0,
            hitbox_active: false,
            hitbox: Rect::default(),
        }
    }

    /// Start a swing unless one is running or the cooldown has not elapsed.
    ///
    /// Returns whether a swing started. The hitbox stays inactive until the
    /// animation reaches the active window.
    pub fn try_attack(&mut self) -> bool {
        if self.attacking || self.cooldown_timer > 0.0 {
            return false;
        }

        self.attacking = true;
        self.cooldown_timer = self.settings.cooldown;
        self.hitbox_active = false;
        debug!("Attack started");
        true
    }

    /// Run the cooldown down by `dt` if it is still positive
    pub fn tick_cooldown(&mut self, dt: f32) {
        if self.cooldown_timer > 0.0 {
            self.cooldown_timer -= dt;
        }
    }

    /// React to the attack animation reaching `frame_index`.
    ///
    /// Returns true when the frame index has run past the end of the
    /// animation; the swing is over and the caller should rewind to frame 0.
    pub fn on_attack_frame(
        &mut self,
        frame_index: u32,
        frame_count: u32,
        position: Vec2,
        facing_right: bool,
    ) -> bool {
        self.hitbox_active = self.settings.active_frames.contains(&frame_index);
        if self.hitbox_active {
            self.hitbox = self.hitbox_at(position, facing_right);
        }

        if frame_index >= frame_count {
            self.finish();
            return true;
        }
        false
    }

    /// End the swing immediately
    pub fn finish(&mut self) {
        if self.attacking {
            debug!("Attack finished");
        }
        self.attacking = false;
        self.hitbox_active = false;
    }

    /// Damage rectangle for a player anchored at `position`
    pub fn hitbox_at(&self, position: Vec2, facing_right: bool) -> Rect {
        let offset = if facing_right {
            self.settings.hitbox_offset
        } else {
            -self.settings.hitbox_offset
        };
        Rect::centered(position + Vec2::new(offset, 0.0), self.settings.hitbox_size)
    }

    pub fn is_attacking(&self) -> bool {
        self.attacking
    }

    pub fn is_hitbox_active(&self) -> bool {
        self.hitbox_active
    }

    /// Last computed hitbox; only meaningful while active
    pub fn hitbox(&self) -> Rect {
        self.hitbox
    }

    pub fn cooldown_timer(&self) -> f32 {
        self.cooldown_timer
    }

    pub fn set_cooldown(&mut self, cooldown: f32) {
        self.settings.cooldown = cooldown;
    }
}

impl Default for Combat {
    fn default() -> Self {
        Self::new(AttackSettings::default())
    }
}
