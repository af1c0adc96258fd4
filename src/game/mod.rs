// Game layer: the knight, the level, the menu and the session tying them together

pub mod characters;
pub mod config;
pub mod level;
pub mod menu;
pub mod session;

pub use config::GameConfig;
pub use session::{Game, GameCommand};
