// The player character: input, physics, animation and combat glued together

use glam::{UVec2, Vec2};

use super::animation::{AnimationConfig, AnimationTable, Animator};
use super::combat::Combat;
use super::state::{AnimationState, StateMachine};
use super::stats::PlayerStats;
use crate::core::Rect;
use crate::engine::assets::TextureHandle;
use crate::engine::input::{Action, InputState};
use crate::engine::physics::{BodyBuilder, CollisionGeometry, KinematicBody, StepContacts};
use crate::engine::renderer::Sprite;
use crate::game::config::ConfigError;

/// Buttons the player reacts to, sampled once per frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayerControls {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    pub attack: bool,
}

impl PlayerControls {
    /// Snapshot of the held actions
    pub fn from_input(input: &InputState) -> Self {
        Self {
            left: input.is_pressed(Action::MoveLeft),
            right: input.is_pressed(Action::MoveRight),
            jump: input.is_pressed(Action::Jump),
            attack: input.is_pressed(Action::Attack),
        }
    }
}

/// Texture and pixel size of one state's sprite sheet
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SheetInfo {
    pub texture: Option<TextureHandle>,
    pub size: UVec2,
}

/// The player-controlled knight
#[derive(Debug)]
pub struct Player {
    body: KinematicBody,
    speed: f32,
    /// Upward jump velocity, always stored negative
    jump_force: f32,
    gravity: f32,
    facing_right: bool,
    state: StateMachine,
    animator: Animator,
    animations: AnimationTable,
    /// Indexed by `AnimationState::index`
    sheets: [SheetInfo; 4],
    combat: Combat,
}

impl Player {
    /// Create a player anchored at `spawn`, airborne until the first landing
    pub fn new(spawn: Vec2, stats: &PlayerStats) -> Result<Self, ConfigError> {
        let body = BodyBuilder::new(spawn.x, spawn.y)
            .collision_box(stats.collision_box.to_rect())
            .build();

        Ok(Self {
            body,
            speed: stats.speed,
            jump_force: -stats.jump_force.abs(),
            gravity: stats.gravity,
            facing_right: true,
            state: StateMachine::new(),
            animator: Animator::default(),
            animations: stats.animations.to_table()?,
            sheets: [SheetInfo::default(); 4],
            combat: Combat::new(stats.attack_settings()),
        })
    }

    /// Attach the sprite sheet drawn while in `state`
    pub fn set_sheet(&mut self, state: AnimationState, texture: Option<TextureHandle>, size: UVec2) {
        self.sheets[state.index()] = SheetInfo { texture, size };
    }

    /// Apply this frame's controls and pick the animation state.
    ///
    /// Horizontal speed is instantaneous. When both directions are held the
    /// right one wins. Jumping needs the ground from the last physics step.
    pub fn handle_input(&mut self, controls: &PlayerControls) {
        self.body.velocity.x = 0.0;
        if controls.left {
            self.body.velocity.x = -self.speed;
            self.facing_right = false;
        }
        if controls.right {
            self.body.velocity.x = self.speed;
            self.facing_right = true;
        }

        if controls.jump && self.body.try_jump(self.jump_force) {
            log::debug!("Jump from ({:.1}, {:.1})", self.body.position.x, self.body.position.y);
        }

        if controls.attack {
            self.attack();
        }

        self.state.transition(AnimationState::decide(
            self.combat.is_attacking(),
            self.body.is_on_ground(),
            self.body.velocity.x,
        ));
    }

    /// Start a swing; ignored while swinging or cooling down
    pub fn attack(&mut self) {
        if self.combat.try_attack() {
            self.animator.reset();
        }
    }

    /// Advance one frame: cooldown, then physics, then animation
    pub fn update<G>(&mut self, dt: f32, geometry: &G) -> StepContacts
    where
        G: CollisionGeometry + ?Sized,
    {
        self.combat.tick_cooldown(dt);
        let contacts = self.body.step(dt, self.gravity, geometry);
        self.update_animation(dt);
        contacts
    }

    fn update_animation(&mut self, dt: f32) {
        if self.state.state_just_changed() {
            self.animator.reset();
        }

        let current = self.state.state();
        let config = *self.animations.get(current);
        if !self.animator.tick(dt, config.frame_interval()) {
            return;
        }

        if current.is_looping() {
            self.animator.advance_looping(config.frame_count());
            return;
        }

        let next = self.animator.frame_index() + 1;
        self.animator.set_frame_index(next);
        let finished = self.combat.on_attack_frame(
            next,
            config.frame_count(),
            self.body.position,
            self.facing_right,
        );
        if finished {
            self.animator.set_frame_index(0);
        }
    }

    // Accessors

    pub fn position(&self) -> Vec2 {
        self.body.position
    }

    pub fn velocity(&self) -> Vec2 {
        self.body.velocity
    }

    pub fn is_on_ground(&self) -> bool {
        self.body.is_on_ground()
    }

    pub fn is_jumping(&self) -> bool {
        self.body.is_jumping()
    }

    pub fn is_facing_right(&self) -> bool {
        self.facing_right
    }

    pub fn state(&self) -> AnimationState {
        self.state.state()
    }

    pub fn previous_state(&self) -> AnimationState {
        self.state.previous_state()
    }

    pub fn frame_index(&self) -> u32 {
        self.animator.frame_index()
    }

    pub fn is_attacking(&self) -> bool {
        self.combat.is_attacking()
    }

    pub fn attack_cooldown_timer(&self) -> f32 {
        self.combat.cooldown_timer()
    }

    /// Collision box in world space
    pub fn collision_hitbox(&self) -> Rect {
        self.body.collision_rect()
    }

    /// Damage rectangle from the last active attack frame
    pub fn attack_hitbox(&self) -> Rect {
        self.combat.hitbox()
    }

    pub fn is_attack_hitbox_active(&self) -> bool {
        self.combat.is_hitbox_active()
    }

    /// Pixel rectangle of the current frame within the current sheet
    pub fn frame_rect(&self) -> Rect {
        let current = self.state.state();
        let sheet = self.sheets[current.index()];
        self.animations
            .get(current)
            .frame_rect(self.animator.frame_index(), sheet.size)
    }

    /// Current frame as a sprite centred on the anchor, mirrored when facing left
    pub fn sprite(&self) -> Option<Sprite> {
        let sheet = self.sheets[self.state.state().index()];
        let texture = sheet.texture?;
        let source = self.frame_rect();

        Some(
            Sprite::textured(Rect::centered(self.body.position, source.size), texture, Some(source))
                .flipped(!self.facing_right),
        )
    }

    // Runtime configuration

    pub fn set_speed(&mut self, speed: f32) {
        self.speed = speed;
    }

    /// Only the magnitude is used; jumps always go up
    pub fn set_jump_force(&mut self, force: f32) {
        self.jump_force = -force.abs();
    }

    pub fn jump_force(&self) -> f32 {
        self.jump_force
    }

    pub fn set_gravity(&mut self, gravity: f32) {
        self.gravity = gravity;
    }

    /// Change a state's sheet grid, keeping its frame interval
    pub fn set_animation(
        &mut self,
        state: AnimationState,
        columns: u32,
        rows: u32,
        frame_count: u32,
    ) -> Result<(), ConfigError> {
        let interval = self.animations.get(state).frame_interval();
        let config = AnimationConfig::new(frame_count, columns, rows, interval)?;
        self.animations.set(state, config);

        if state == self.state.state() {
            self.animator.reset();
        }
        Ok(())
    }

    /// Seconds per frame of the attack animation
    pub fn set_attack_speed(&mut self, frame_interval: f32) -> Result<(), ConfigError> {
        let current = *self.animations.get(AnimationState::Attacking);
        let config = AnimationConfig::new(
            current.frame_count(),
            current.columns(),
            current.rows(),
            frame_interval,
        )?;
        self.animations.set(AnimationState::Attacking, config);
        Ok(())
    }

    pub fn set_attack_cooldown(&mut self, cooldown: f32) {
        self.combat.set_cooldown(cooldown);
    }
}
