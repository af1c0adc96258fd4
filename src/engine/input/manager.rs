// Input manager - Main coordination system for all input

use super::action::{Action, InputSource};
use super::config::InputConfig;
use super::state::InputState;
use glam::Vec2;
use winit::dpi::PhysicalPosition;
use winit::event::{ElementState, KeyEvent, MouseButton};
use winit::keyboard::PhysicalKey;

/// Turns window events into polled action state and a cursor position
pub struct InputManager {
    /// Key and button bindings
    config: InputConfig,

    /// Action state for the current frame
    state: InputState,

    /// Last cursor position in window pixels
    cursor: Vec2,
}

impl InputManager {
    pub fn new(config: InputConfig) -> Self {
        Self {
            config,
            state: InputState::new(),
            cursor: Vec2::ZERO,
        }
    }

    /// Process a keyboard event from winit
    pub fn process_keyboard_event(&mut self, event: &KeyEvent) {
        // Only process physical key presses
        if let PhysicalKey::Code(key_code) = event.physical_key {
            if event.repeat {
                return;
            }
            self.apply(InputSource::key(key_code), event.state);
        }
    }

    /// Process a mouse button event from winit
    pub fn process_mouse_button(&mut self, button: MouseButton, state: ElementState) {
        self.apply(InputSource::mouse(button), state);
    }

    /// Track the cursor, in physical window pixels
    pub fn process_cursor_moved(&mut self, position: PhysicalPosition<f64>) {
        self.cursor = Vec2::new(position.x as f32, position.y as f32);
    }

    fn apply(&mut self, source: InputSource, element_state: ElementState) {
        match element_state {
            ElementState::Pressed => {
                if let Some(action) = self.config.get_action(source) {
                    self.state.press(source, action);
                }
            }
            ElementState::Released => self.state.release(source),
        }
    }

    /// Clear per-frame edges; call once per frame after the game update
    pub fn update(&mut self) {
        self.state.update();
    }

    /// Action state for this frame
    pub fn state(&self) -> &InputState {
        &self.state
    }

    /// Shorthand for `state().is_pressed(action)`
    pub fn is_pressed(&self, action: Action) -> bool {
        self.state.is_pressed(action)
    }

    /// Last known cursor position in window pixels
    pub fn cursor_position(&self) -> Vec2 {
        self.cursor
    }

    /// Get mutable binding table for remapping
    pub fn config_mut(&mut self) -> &mut InputConfig {
        &mut self.config
    }

    /// Release everything, e.g. when the window loses focus
    pub fn reset_all(&mut self) {
        self.state.reset();
    }
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new(InputConfig::default())
    }
}
