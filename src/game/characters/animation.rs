// Sprite-sheet animation

use glam::UVec2;

use super::state::AnimationState;
use crate::core::Rect;
use crate::game::config::ConfigError;

/// Layout and timing of one state's sprite sheet
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationConfig {
    frame_count: u32,
    columns: u32,
    rows: u32,
    /// Seconds each frame stays on screen
    frame_interval: f32,
}

impl AnimationConfig {
    /// Validated configuration: the grid must be non-empty and hold every
    /// frame, and the interval must be positive.
    pub fn new(
        frame_count: u32,
        columns: u32,
        rows: u32,
        frame_interval: f32,
    ) -> Result<Self, ConfigError> {
        if columns == 0 || rows == 0 {
            return Err(ConfigError::Invalid(format!(
                "animation grid {}x{} is empty",
                columns, rows
            )));
        }
        let capacity = columns.checked_mul(rows).ok_or_else(|| {
            ConfigError::Invalid(format!("animation grid {}x{} is too large", columns, rows))
        })?;
        if frame_count == 0 || frame_count > capacity {
            return Err(ConfigError::Invalid(format!(
                "animation has {} frames but its grid holds {}",
                frame_count, capacity
            )));
        }
        if frame_interval.is_nan() || frame_interval <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "frame interval must be positive, got {}",
                frame_interval
            )));
        }

        Ok(Self {
            frame_count,
            columns,
            rows,
            frame_interval,
        })
    }

    pub fn frame_count(&self) -> u32 {
        self.frame_count
    }

    pub fn columns(&self) -> u32 {
        self.columns
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn frame_interval(&self) -> f32 {
        self.frame_interval
    }

    /// Pixel size of one frame of a sheet with this layout
    pub fn frame_size(&self, sheet_size: UVec2) -> UVec2 {
        UVec2::new(sheet_size.x / self.columns, sheet_size.y / self.rows)
    }

    /// Pixel rectangle of `frame_index` within the sheet, row-major
    pub fn frame_rect(&self, frame_index: u32, sheet_size: UVec2) -> Rect {
        let size = self.frame_size(sheet_size);
        let column = frame_index % self.columns;
        let row = frame_index / self.columns;

        Rect::new(
            (column * size.x) as f32,
            (row * size.y) as f32,
            size.x as f32,
            size.y as f32,
        )
    }
}

/// One animation configuration per state
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationTable {
    configs: [AnimationConfig; 4],
}

impl AnimationTable {
    pub fn new(
        idle: AnimationConfig,
        walk: AnimationConfig,
        jump: AnimationConfig,
        attack: AnimationConfig,
    ) -> Self {
        Self {
            configs: [idle, walk, jump, attack],
        }
    }

    pub fn get(&self, state: AnimationState) -> &AnimationConfig {
        &self.configs[state.index()]
    }

    pub fn set(&mut self, state: AnimationState, config: AnimationConfig) {
        self.configs[state.index()] = config;
    }
}

/// Frame index and timer of whatever animation is playing
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Animator {
    frame_index: u32,
    timer: f32,
}

impl Animator {
    pub fn frame_index(&self) -> u32 {
        self.frame_index
    }

    pub fn set_frame_index(&mut self, frame_index: u32) {
        self.frame_index = frame_index;
    }

    /// Back to frame 0 with a fresh timer
    pub fn reset(&mut self) {
        self.frame_index = 0;
        self.timer = 0.0;
    }

    /// Accumulate time; returns true when a frame boundary was reached.
    ///
    /// At most one boundary per call, and the overshoot is dropped rather
    /// than carried into the next frame.
    pub fn tick(&mut self, dt: f32, frame_interval: f32) -> bool {
        self.timer += dt;
        if self.timer >= frame_interval {
            self.timer = 0.0;
            true
        } else {
            false
        }
    }

    /// Step a looping animation one frame, wrapping at `frame_count`
    pub fn advance_looping(&mut self, frame_count: u32) {
        self.frame_index = (self.frame_index + 1) % frame_count;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn knight_idle() -> AnimationConfig {
        AnimationConfig::new(8, 2, 4, 0.1).unwrap()
    }

    #[test]
    fn test_frame_five_of_two_columns() {
        let config = knight_idle();
        let rect = config.frame_rect(5, UVec2::new(240, 320));

        // 120x80 frames, column 1 row 2
        assert_eq!(rect, Rect::new(120.0, 160.0, 120.0, 80.0));
    }

    #[test]
    fn test_frame_size_uses_integer_division() {
        let config = AnimationConfig::new(9, 8, 5, 0.08).unwrap();
        assert_eq!(config.frame_size(UVec2::new(1001, 503)), UVec2::new(125, 100));
    }

    #[test]
    fn test_config_rejects_too_many_frames() {
        assert!(matches!(
            AnimationConfig::new(9, 2, 4, 0.1),
            Err(ConfigError::Invalid(_))
        ));
        assert!(AnimationConfig::new(8, 2, 4, 0.1).is_ok());
    }

    #[test]
    fn test_config_rejects_empty_grid_and_bad_interval() {
        assert!(AnimationConfig::new(1, 0, 4, 0.1).is_err());
        assert!(AnimationConfig::new(0, 2, 4, 0.1).is_err());
        assert!(AnimationConfig::new(1, 1, 1, 0.0).is_err());
        assert!(AnimationConfig::new(1, 1, 1, f32::NAN).is_err());
    }

    #[test]
    fn test_config_rejects_grid_that_overflows() {
        assert!(matches!(
            AnimationConfig::new(8, 65536, 65536, 0.1),
            Err(ConfigError::Invalid(_))
        ));
        assert!(AnimationConfig::new(8, u32::MAX, 1, 0.1).is_ok());
    }

    #[test]
    fn test_table_lookup_by_state() {
        let attack = AnimationConfig::new(9, 8, 5, 0.08).unwrap();
        let mut table = AnimationTable::new(knight_idle(), knight_idle(), knight_idle(), attack);

        assert_eq!(table.get(AnimationState::Attacking).frame_count(), 9);
        assert_eq!(table.get(AnimationState::Walking).columns(), 2);

        let slow = AnimationConfig::new(8, 2, 4, 0.5).unwrap();
        table.set(AnimationState::Jumping, slow);
        assert_relative_eq!(table.get(AnimationState::Jumping).frame_interval(), 0.5);
        assert_relative_eq!(table.get(AnimationState::Idle).frame_interval(), 0.1);
    }

    #[test]
    fn test_tick_advances_once_and_drops_overshoot() {
        let mut animator = Animator::default();
        assert!(!animator.tick(0.06, 0.1));
        assert!(animator.tick(0.06, 0.1));
        // Overshoot discarded: another full interval is needed
        assert!(!animator.tick(0.09, 0.1));
        // A huge dt still only yields one boundary
        assert!(animator.tick(5.0, 0.1));
    }

    #[test]
    fn test_looping_wraps() {
        let mut animator = Animator::default();
        for _ in 0..8 {
            animator.advance_looping(8);
        }
        assert_eq!(animator.frame_index(), 0);

        animator.advance_looping(8);
        assert_eq!(animator.frame_index(), 1);
    }

    #[test]
    fn test_reset() {
        let mut animator = Animator::default();
        animator.tick(0.05, 0.1);
        animator.advance_looping(8);
        animator.reset();
        assert_eq!(animator, Animator::default());
    }
}
