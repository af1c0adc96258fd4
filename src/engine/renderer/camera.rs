// Camera and view maths for 2D rendering

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec2};

use crate::core::math::{clamp, lerp};
use crate::core::Rect;

/// 2D camera looking at a rectangle of world space, y pointing down
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Centre of the view in world space
    center: Vec2,
    /// World units covered by the view
    view_size: Vec2,
}

impl Camera {
    pub fn new(center: Vec2, view_size: Vec2) -> Self {
        Self { center, view_size }
    }

    /// Camera whose view covers `(0, 0)..size`, e.g. a window's pixels
    pub fn screen(size: Vec2) -> Self {
        Self::new(size / 2.0, size)
    }

    pub fn center(&self) -> Vec2 {
        self.center
    }

    pub fn view_size(&self) -> Vec2 {
        self.view_size
    }

    /// Change how much world the camera covers
    pub fn resize(&mut self, view_size: Vec2) {
        self.view_size = view_size;
    }

    /// Visible world rectangle
    pub fn bounds(&self) -> Rect {
        Rect::centered(self.center, self.view_size)
    }

    /// Ease towards a target, placed `look_ahead` units ahead of it
    /// horizontally in the direction it faces.
    ///
    /// `smoothing` is the fraction of the remaining distance covered per call
    /// and is applied once per frame regardless of frame time.
    pub fn follow(&mut self, target: Vec2, facing_right: bool, look_ahead: f32, smoothing: f32) {
        let offset = if facing_right { look_ahead } else { -look_ahead };
        let goal = Vec2::new(target.x + offset, target.y);

        self.center = Vec2::new(
            lerp(self.center.x, goal.x, smoothing),
            lerp(self.center.y, goal.y, smoothing),
        );
    }

    /// Keep the view inside the map.
    ///
    /// The upper bound includes one extra tile, so a right or bottom wall
    /// placed at the map edge stays visible. If the map is smaller than the
    /// view the lower bound wins.
    pub fn clamp_to_map(&mut self, map_size: Vec2, tile_size: Vec2) {
        let half = self.view_size / 2.0;
        let max = map_size - half + tile_size;

        self.center = Vec2::new(
            clamp(self.center.x, half.x, max.x),
            clamp(self.center.y, half.y, max.y),
        );
    }

    /// Map a position in window pixels to world space
    pub fn screen_to_world(&self, screen_pos: Vec2, screen_size: Vec2) -> Vec2 {
        let normalized = screen_pos / screen_size;
        self.bounds().position + normalized * self.view_size
    }

    /// Orthographic projection with +y pointing down the screen
    pub fn view_proj_matrix(&self) -> Mat4 {
        let bounds = self.bounds();
        Mat4::orthographic_rh(
            bounds.left(),
            bounds.right(),
            bounds.bottom(),
            bounds.top(),
            -100.0,
            100.0,
        )
    }
}

/// Camera uniform for GPU
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
}

impl CameraUniform {
    pub fn new(camera: &Camera) -> Self {
        Self {
            view_proj: camera.view_proj_matrix().to_cols_array_2d(),
        }
    }
}
