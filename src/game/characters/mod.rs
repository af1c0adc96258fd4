// Character system
//
// The player knight and the pieces it is built from:
// - animation state machine and per-state sprite sheets
// - melee combat with a frame-windowed hitbox
// - tunable stats loaded from configuration

pub mod animation;
pub mod combat;
pub mod player;
pub mod state;
pub mod stats;

pub use player::{Player, PlayerControls};
pub use state::AnimationState;
pub use stats::PlayerStats;
