use glam::Vec2;
use log::debug;

use super::collision::{self, CollisionGeometry, StepContacts};
use crate::core::Rect;

/// Builder for kinematic bodies with common configurations
pub struct BodyBuilder {
    position: Vec2,
    velocity: Vec2,
    collision_box: Rect,
}

impl BodyBuilder {
    /// Start a body anchored at `(x, y)`
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            position: Vec2::new(x, y),
            velocity: Vec2::ZERO,
            collision_box: Rect::new(0.0, 0.0, 1.0, 1.0),
        }
    }

    /// Set the initial velocity
    pub fn velocity(mut self, x: f32, y: f32) -> Self {
        self.velocity = Vec2::new(x, y);
        self
    }

    /// Collision box in local space, relative to the anchor
    pub fn collision_box(mut self, local: Rect) -> Self {
        self.collision_box = local;
        self
    }

    /// Collision box of the given size centred on the anchor
    pub fn centered_box(mut self, width: f32, height: f32) -> Self {
        self.collision_box = Rect::centered(Vec2::ZERO, Vec2::new(width, height));
        self
    }

    pub fn build(self) -> KinematicBody {
        KinematicBody {
            position: self.position,
            velocity: self.velocity,
            collision_box: self.collision_box,
            on_ground: false,
            jumping: false,
        }
    }
}

/// A single moving body resolved against static rectangles
#[derive(Debug, Clone)]
pub struct KinematicBody {
    /// World-space anchor
    pub position: Vec2,
    /// Units per second, y pointing down
    pub velocity: Vec2,
    /// Local-space box, fixed for the lifetime of the body
    collision_box: Rect,
    on_ground: bool,
    jumping: bool,
}

impl KinematicBody {
    /// Collision box in world space at the current position
    pub fn collision_rect(&self) -> Rect {
        self.collision_box.translated(self.position)
    }

    /// Whether the last vertical pass resolved a landing
    pub fn is_on_ground(&self) -> bool {
        self.on_ground
    }

    /// Set on jump, cleared only on landing
    pub fn is_jumping(&self) -> bool {
        self.jumping
    }

    /// Start a jump if grounded and not already jumping.
    ///
    /// `jump_velocity` is the (negative, upward) vertical velocity to apply.
    /// Grounding is cleared immediately; the next step corrects it if needed.
    pub fn try_jump(&mut self, jump_velocity: f32) -> bool {
        if !self.on_ground || self.jumping {
            return false;
        }

        self.velocity.y = jump_velocity;
        self.jumping = true;
        self.on_ground = false;
        true
    }

    /// Integrate and resolve one frame of motion.
    ///
    /// Gravity is applied first, then x and y are moved and resolved in
    /// separate passes. Horizontal velocity survives a wall hit; only the
    /// position is reverted.
    pub fn step<G>(&mut self, dt: f32, gravity: f32, geometry: &G) -> StepContacts
    where
        G: CollisionGeometry + ?Sized,
    {
        let boxes = geometry.collision_boxes();

        self.velocity.y += gravity * dt;
        let old_position = self.position;

        let (x, wall) = collision::resolve_horizontal(
            self.collision_box,
            old_position,
            self.position.x + self.velocity.x * dt,
            boxes,
        );
        self.position.x = x;

        let vertical = collision::resolve_vertical(
            self.collision_box,
            self.position.x,
            old_position.y,
            self.position.y + self.velocity.y * dt,
            self.velocity.y,
            boxes,
        );
        self.position.y = vertical.position_y;
        self.velocity.y = vertical.velocity_y;

        self.on_ground = vertical.landed;
        if vertical.landed {
            if self.jumping {
                debug!("Landed at ({:.1}, {:.1})", self.position.x, self.position.y);
            }
            self.jumping = false;
        }

        StepContacts {
            wall,
            landed: vertical.landed,
            ceiling: vertical.ceiling,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const GRAVITY: f32 = 900.0;

    fn body_at(x: f32, y: f32) -> KinematicBody {
        BodyBuilder::new(x, y).centered_box(32.0, 58.0).build()
    }

    fn floor_at(top: f32) -> Vec<Rect> {
        vec![Rect::new(0.0, top, 1000.0, 32.0)]
    }

    /// Drop a body onto the floor and let it settle
    fn grounded_body(floor: &[Rect]) -> KinematicBody {
        let mut body = body_at(100.0, floor[0].top() - 40.0);
        for _ in 0..60 {
            body.step(1.0 / 60.0, GRAVITY, floor);
        }
        assert!(body.is_on_ground());
        body
    }

    #[test]
    fn test_builder_defaults() {
        let body = BodyBuilder::new(10.0, 20.0).velocity(5.0, 0.0).build();
        assert_eq!(body.position, Vec2::new(10.0, 20.0));
        assert_eq!(body.velocity, Vec2::new(5.0, 0.0));
        assert!(!body.is_on_ground());
        assert!(!body.is_jumping());
    }

    #[test]
    fn test_collision_rect_follows_position() {
        let body = body_at(100.0, 100.0);
        assert_eq!(body.collision_rect(), Rect::new(84.0, 71.0, 32.0, 58.0));
    }

    #[test]
    fn test_free_fall_is_monotonic() {
        let mut body = body_at(0.0, 0.0);
        let empty: Vec<Rect> = Vec::new();
        let mut last_vy = body.velocity.y;
        let mut last_y = body.position.y;

        for dt in [0.016, 0.033, 0.001, 0.1, 0.05] {
            body.step(dt, GRAVITY, &empty);
            assert!(body.velocity.y > last_vy);
            assert!(body.position.y > last_y);
            assert!(!body.is_on_ground());
            last_vy = body.velocity.y;
            last_y = body.position.y;
        }
    }

    #[test]
    fn test_landing_scenario() {
        // Box bottom is 29 below the anchor: anchor 466 -> bottom 495
        let floor = floor_at(500.0);
        let mut body = BodyBuilder::new(100.0, 466.0)
            .centered_box(32.0, 58.0)
            .velocity(0.0, 50.0)
            .build();
        body.jumping = true;

        let contacts = body.step(0.2, 0.0, &floor);

        assert!(contacts.landed);
        assert_relative_eq!(body.collision_rect().bottom(), 500.0);
        assert_eq!(body.velocity.y, 0.0);
        assert!(body.is_on_ground());
        assert!(!body.is_jumping());
    }

    #[test]
    fn test_resting_is_idempotent() {
        let floor = floor_at(500.0);
        let mut body = grounded_body(&floor);
        let rest = body.position;

        for _ in 0..120 {
            body.step(1.0 / 60.0, GRAVITY, &floor);
            assert_eq!(body.position, rest);
            assert_eq!(body.velocity.y, 0.0);
            assert!(body.is_on_ground());
        }
    }

    #[test]
    fn test_side_overlap_is_not_a_landing() {
        // Block overlapping the body's right side from its left edge
        let block = vec![Rect::new(110.0, 80.0, 32.0, 32.0)];
        let mut body = body_at(100.0, 100.0);
        body.velocity.y = 30.0;

        let contacts = body.step(0.016, GRAVITY, &block);

        assert!(!contacts.landed);
        assert!(!body.is_on_ground());
    }

    #[test]
    fn test_wall_reverts_position_but_keeps_speed() {
        let wall = vec![Rect::new(120.0, 0.0, 32.0, 500.0)];
        let mut body = body_at(100.0, 100.0);
        body.velocity.x = 120.0;

        let contacts = body.step(0.1, 0.0, &wall);

        assert!(contacts.wall);
        assert_eq!(body.position.x, 100.0);
        assert_eq!(body.velocity.x, 120.0);
    }

    #[test]
    fn test_walking_on_floor_moves_freely() {
        let floor = floor_at(500.0);
        let mut body = grounded_body(&floor);
        let start_x = body.position.x;
        body.velocity.x = 120.0;

        let contacts = body.step(0.1, GRAVITY, &floor);

        assert!(!contacts.wall);
        assert_relative_eq!(body.position.x, start_x + 12.0);
        assert!(body.is_on_ground());
    }

    #[test]
    fn test_jump_requires_ground() {
        let mut body = body_at(0.0, 0.0);
        assert!(!body.try_jump(-350.0));
        assert_eq!(body.velocity.y, 0.0);
    }

    #[test]
    fn test_jump_sets_flags_immediately() {
        let floor = floor_at(500.0);
        let mut body = grounded_body(&floor);

        assert!(body.try_jump(-350.0));
        assert_eq!(body.velocity.y, -350.0);
        assert!(body.is_jumping());
        assert!(!body.is_on_ground());

        // Second attempt while airborne is ignored
        assert!(!body.try_jump(-350.0));
    }

    #[test]
    fn test_ceiling_stops_rise() {
        let ceiling = vec![Rect::new(0.0, 0.0, 1000.0, 32.0)];
        let mut body = body_at(100.0, 62.0);
        body.velocity.y = -100.0;

        let contacts = body.step(0.05, 0.0, &ceiling);

        assert!(contacts.ceiling);
        assert_relative_eq!(body.collision_rect().top(), 32.0);
        assert_eq!(body.velocity.y, 0.0);
        assert!(!body.is_on_ground());
    }

    #[test]
    fn test_jump_then_land_clears_jumping() {
        let floor = floor_at(500.0);
        let mut body = grounded_body(&floor);
        body.try_jump(-350.0);

        let mut frames = 0;
        while !body.is_on_ground() && frames < 600 {
            body.step(1.0 / 60.0, GRAVITY, &floor);
            frames += 1;
        }

        assert!(body.is_on_ground());
        assert!(!body.is_jumping());
        assert_relative_eq!(body.collision_rect().bottom(), 500.0);
    }
}
