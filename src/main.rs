use std::sync::Arc;

use anyhow::Result;
use glam::Vec2;
use log::{error, info};
use winit::{
    event::{Event, WindowEvent},
    event_loop::EventLoop,
    window::WindowBuilder,
};

mod core;
mod engine;
mod game;

use engine::assets::{AssetLoader, AssetManager};
use engine::game_loop::FrameClock;
use engine::input::InputManager;
use engine::renderer::Renderer;
use game::characters::AnimationState;
use game::{Game, GameCommand, GameConfig};

const ASSET_ROOT: &str = "assets";

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let config = GameConfig::load_or_default(&AssetLoader::new(ASSET_ROOT));
    info!("Starting {}...", config.window.title);

    // Create event loop and window
    let event_loop = EventLoop::new()?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title(config.window.title.as_str())
            .with_inner_size(winit::dpi::LogicalSize::new(
                config.window.width,
                config.window.height,
            ))
            .with_resizable(true)
            .build(&event_loop)?,
    );
    info!("Window created successfully");

    let mut renderer = pollster::block_on(Renderer::new(window.clone()))?;
    let mut assets = AssetManager::new(ASSET_ROOT);
    let mut game = Game::new(&config)?;

    // Sprite sheets, one per animation state
    let sheets = [
        (AnimationState::Idle, &config.assets.idle),
        (AnimationState::Walking, &config.assets.run),
        (AnimationState::Jumping, &config.assets.jump),
        (AnimationState::Attacking, &config.assets.attack),
    ];
    for (state, name) in sheets {
        let handle = assets.load_texture_or_blank(renderer.device(), renderer.queue(), name);
        let size = assets.texture_size(handle).unwrap_or_default();
        game.player_mut().set_sheet(state, Some(handle), size);
    }
    let tileset =
        assets.load_texture_or_blank(renderer.device(), renderer.queue(), &config.assets.tileset);
    game.level_mut().ground_mut().set_tileset(Some(tileset));
    info!("Loaded {} textures", assets.texture_count());

    let mut input = InputManager::default();
    let mut clock = FrameClock::new();

    // Main event loop
    event_loop
        .run(move |event, elwt| match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => {
                    info!("Close requested, shutting down...");
                    elwt.exit();
                }
                WindowEvent::Resized(physical_size) => {
                    renderer.resize(physical_size);
                }
                WindowEvent::KeyboardInput { event, .. } => {
                    input.process_keyboard_event(&event);
                }
                WindowEvent::MouseInput { state, button, .. } => {
                    input.process_mouse_button(button, state);
                }
                WindowEvent::CursorMoved { position, .. } => {
                    input.process_cursor_moved(position);
                }
                WindowEvent::Focused(false) => {
                    input.reset_all();
                    game.focus_lost();
                }
                WindowEvent::RedrawRequested => {
                    let dt = clock.begin_frame();
                    let size = renderer.size();
                    let screen = Vec2::new(size.width as f32, size.height as f32);

                    if let Some(GameCommand::Quit) = game.update(dt, &input, screen) {
                        elwt.exit();
                        return;
                    }

                    if let Err(e) = renderer.render(&game.render_frame(), &assets) {
                        error!("Render error: {}", e);
                    }
                    input.update();
                }
                _ => {}
            },
            Event::AboutToWait => {
                // Request redraw on next frame
                window.request_redraw();
            }
            _ => {}
        })
        .map_err(|e| anyhow::anyhow!("Event loop error: {}", e))?;

    Ok(())
}
