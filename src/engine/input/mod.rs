// Input handling system
//
// Window events are folded into polled action state once per frame; game code
// only ever asks "is this action held / did it just change".
//
// ## Architecture
//
// - `action`: Defines game actions and default key bindings
// - `config`: Binding table and remapping
// - `state`: Held / just-pressed / just-released tracking
// - `manager`: Event intake and cursor tracking
//
// ## Usage Example
//
// ```rust
// use engine::input::{Action, InputManager};
//
// let mut input = InputManager::default();
//
// // In your event loop, process keyboard events
// input.process_keyboard_event(&key_event);
//
// // Query input state during the update
// if input.is_pressed(Action::Jump) {
//     // try to jump
// }
//
// // At the end of each frame, clear the edges
// input.update();
// ```

pub mod action;
pub mod config;
pub mod manager;
pub mod state;

// Re-export commonly used types
pub use action::Action;
#[allow(unused_imports)]
pub use action::InputSource;
pub use manager::InputManager;
pub use state::InputState;
