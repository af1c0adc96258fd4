// Engine modules: rendering, physics, input, assets and the frame clock

pub mod assets;
pub mod game_loop;
pub mod input;
pub mod physics;
pub mod renderer;
