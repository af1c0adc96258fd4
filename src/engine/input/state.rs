// Per-frame action state

use super::action::{Action, InputSource};
use std::collections::{HashMap, HashSet};

/// Held/pressed/released state of every action for the current frame.
///
/// An action counts as held while any source bound to it is held, so
/// releasing `A` does not cancel `MoveLeft` while the left arrow is still down.
#[derive(Debug, Default)]
pub struct InputState {
    /// Sources currently held, with the action each one drives
    held_sources: HashMap<InputSource, Action>,

    /// Actions that went from released to held this frame
    just_pressed: HashSet<Action>,

    /// Actions that went from held to released this frame
    just_released: HashSet<Action>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if an action is currently held
    pub fn is_pressed(&self, action: Action) -> bool {
        self.held_sources.values().any(|held| *held == action)
    }

    /// Check if an action was just pressed this frame
    pub fn just_pressed(&self, action: Action) -> bool {
        self.just_pressed.contains(&action)
    }

    /// Check if an action was just released this frame
    pub fn just_released(&self, action: Action) -> bool {
        self.just_released.contains(&action)
    }

    /// Register a source going down
    pub(crate) fn press(&mut self, source: InputSource, action: Action) {
        if self.held_sources.contains_key(&source) {
            return;
        }

        let was_pressed = self.is_pressed(action);
        self.held_sources.insert(source, action);
        if !was_pressed {
            self.just_pressed.insert(action);
        }
    }

    /// Register a source going up
    pub(crate) fn release(&mut self, source: InputSource) {
        if let Some(action) = self.held_sources.remove(&source) {
            if !self.is_pressed(action) {
                self.just_released.insert(action);
            }
        }
    }

    /// Clear per-frame edges. Call once per frame after the update.
    pub(crate) fn update(&mut self) {
        self.just_pressed.clear();
        self.just_released.clear();
    }

    /// Release everything without reporting edges
    pub fn reset(&mut self) {
        self.held_sources.clear();
        self.just_pressed.clear();
        self.just_released.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::keyboard::KeyCode;

    const A: InputSource = InputSource::Keyboard(KeyCode::KeyA);
    const LEFT: InputSource = InputSource::Keyboard(KeyCode::ArrowLeft);

    #[test]
    fn test_press_action() {
        let mut input = InputState::new();
        input.press(A, Action::MoveLeft);
        assert!(input.is_pressed(Action::MoveLeft));
        assert!(input.just_pressed(Action::MoveLeft));
    }

    #[test]
    fn test_release_action() {
        let mut input = InputState::new();
        input.press(A, Action::MoveLeft);
        input.update();
        input.release(A);
        assert!(!input.is_pressed(Action::MoveLeft));
        assert!(input.just_released(Action::MoveLeft));
    }

    #[test]
    fn test_just_pressed_cleared_on_update() {
        let mut input = InputState::new();
        input.press(A, Action::MoveLeft);
        input.update();
        assert!(input.is_pressed(Action::MoveLeft));
        assert!(!input.just_pressed(Action::MoveLeft));
    }

    #[test]
    fn test_second_source_keeps_action_held() {
        let mut input = InputState::new();
        input.press(A, Action::MoveLeft);
        input.update();
        input.press(LEFT, Action::MoveLeft);
        assert!(!input.just_pressed(Action::MoveLeft));

        input.release(A);
        assert!(input.is_pressed(Action::MoveLeft));
        assert!(!input.just_released(Action::MoveLeft));

        input.release(LEFT);
        assert!(!input.is_pressed(Action::MoveLeft));
        assert!(input.just_released(Action::MoveLeft));
    }

    #[test]
    fn test_repeated_press_is_ignored() {
        let mut input = InputState::new();
        input.press(A, Action::MoveLeft);
        input.update();
        input.press(A, Action::MoveLeft);
        assert!(!input.just_pressed(Action::MoveLeft));
    }

    #[test]
    fn test_release_unpressed_source() {
        let mut input = InputState::new();
        input.release(A);
        assert!(!input.just_released(Action::MoveLeft));
    }

    #[test]
    fn test_press_and_release_same_frame() {
        let mut input = InputState::new();
        input.press(A, Action::Select);
        input.release(A);
        assert!(input.just_pressed(Action::Select));
        assert!(input.just_released(Action::Select));
        assert!(!input.is_pressed(Action::Select));
    }

    #[test]
    fn test_reset() {
        let mut input = InputState::new();
        input.press(A, Action::MoveLeft);
        input.reset();
        assert!(!input.is_pressed(Action::MoveLeft));
        assert!(!input.just_pressed(Action::MoveLeft));
    }
}
