// Game session: menu or gameplay, one update and one render frame per tick

use glam::Vec2;
use log::info;

use super::characters::{Player, PlayerControls};
use super::config::{CameraConfig, ConfigError, GameConfig};
use super::level::Level;
use super::menu::{Menu, MenuAction};
use crate::core::color;
use crate::engine::input::{Action, InputManager};
use crate::engine::renderer::{Camera, DebugRect, RenderFrame};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Menu,
    Playing,
}

/// Requests from the session to the window loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameCommand {
    Quit,
}

pub struct Game {
    state: GameState,
    menu: Menu,
    level: Level,
    player: Player,
    /// Follows the player over the level
    camera: Camera,
    /// Fixed over the window for the menu
    ui_camera: Camera,
    camera_config: CameraConfig,
    debug_overlay: bool,
}

impl Game {
    /// Build the level and the player from configuration
    pub fn new(config: &GameConfig) -> Result<Self, ConfigError> {
        let level = Level::from_config(&config.level);
        let player = Player::new(level.spawn(), &config.player)?;
        let window_size = Vec2::new(config.window.width as f32, config.window.height as f32);

        let mut camera = Camera::new(level.spawn(), config.camera.view_size());
        camera.clamp_to_map(level.map_size(), level.tile_size());

        Ok(Self {
            state: GameState::Menu,
            menu: Menu::new(window_size),
            level,
            player,
            camera,
            ui_camera: Camera::screen(window_size),
            camera_config: config.camera,
            debug_overlay: true,
        })
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    pub fn level_mut(&mut self) -> &mut Level {
        &mut self.level
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn debug_overlay(&self) -> bool {
        self.debug_overlay
    }

    /// Drop a half-finished menu click; call when the window loses focus
    pub fn focus_lost(&mut self) {
        self.menu.cancel_press();
    }

    /// Advance one frame. `screen_size` is the window size in the same
    /// pixels as the input manager's cursor.
    pub fn update(&mut self, dt: f32, input: &InputManager, screen_size: Vec2) -> Option<GameCommand> {
        match self.state {
            GameState::Menu => self.update_menu(input, screen_size),
            GameState::Playing => {
                self.update_playing(dt, input);
                None
            }
        }
    }

    fn update_menu(&mut self, input: &InputManager, screen_size: Vec2) -> Option<GameCommand> {
        let cursor = self
            .ui_camera
            .screen_to_world(input.cursor_position(), screen_size);
        self.menu.handle_mouse_move(cursor);

        let actions = input.state();
        if actions.just_pressed(Action::Select) {
            self.menu.handle_mouse_press(cursor);
        }
        if !actions.just_released(Action::Select) {
            return None;
        }

        match self.menu.handle_mouse_release()? {
            MenuAction::Play => {
                info!("Starting game");
                self.state = GameState::Playing;
                None
            }
            MenuAction::Options => {
                info!("Options are not available yet");
                None
            }
            MenuAction::Exit => {
                info!("Exit requested");
                Some(GameCommand::Quit)
            }
        }
    }

    fn update_playing(&mut self, dt: f32, input: &InputManager) {
        if input.state().just_pressed(Action::ToggleDebug) {
            self.debug_overlay = !self.debug_overlay;
            info!("Debug overlay {}", if self.debug_overlay { "on" } else { "off" });
        }

        let controls = PlayerControls::from_input(input.state());
        self.player.handle_input(&controls);
        self.player.update(dt, self.level.ground());

        let camera = &self.camera_config;
        self.camera.follow(
            self.player.position(),
            self.player.is_facing_right(),
            camera.look_ahead,
            camera.smoothing,
        );
        self.camera
            .clamp_to_map(self.level.map_size(), self.level.tile_size());
    }

    /// Everything the renderer needs for this frame
    pub fn render_frame(&self) -> RenderFrame {
        match self.state {
            GameState::Menu => RenderFrame {
                camera: self.ui_camera.clone(),
                clear_color: self.menu.background_color(),
                sprites: self.menu.sprites(),
                debug_rects: Vec::new(),
            },
            GameState::Playing => {
                let mut sprites = self.level.ground().sprites();
                sprites.extend(self.player.sprite());

                let mut debug_rects = Vec::new();
                if self.debug_overlay {
                    debug_rects.push(DebugRect::new(self.player.collision_hitbox(), color::GREEN));
                    if self.player.is_attack_hitbox_active() {
                        debug_rects.push(DebugRect::new(self.player.attack_hitbox(), color::RED));
                    }
                }

                RenderFrame {
                    camera: self.camera.clone(),
                    clear_color: color::rgb8(135, 206, 235),
                    sprites,
                    debug_rects,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::characters::AnimationState;
    use approx::assert_relative_eq;
    use winit::dpi::PhysicalPosition;
    use winit::event::{ElementState, MouseButton};

    const SCREEN: Vec2 = Vec2::new(900.0, 600.0);

    fn game() -> Game {
        Game::new(&GameConfig::default()).unwrap()
    }

    fn click(game: &mut Game, input: &mut InputManager, x: f64, y: f64) -> Option<GameCommand> {
        input.process_cursor_moved(PhysicalPosition::new(x, y));
        input.process_mouse_button(MouseButton::Left, ElementState::Pressed);
        let first = game.update(0.016, input, SCREEN);
        input.update();
        input.process_mouse_button(MouseButton::Left, ElementState::Released);
        let second = game.update(0.016, input, SCREEN);
        input.update();
        first.or(second)
    }

    #[test]
    fn test_starts_in_menu() {
        let game = game();
        assert_eq!(game.state(), GameState::Menu);
        assert!(game.debug_overlay());

        let frame = game.render_frame();
        assert!(frame.debug_rects.is_empty());
        assert_eq!(frame.clear_color, color::rgb8(30, 30, 50));
    }

    #[test]
    fn test_play_button_starts_game() {
        let mut game = game();
        let mut input = InputManager::default();
        assert_eq!(click(&mut game, &mut input, 450.0, 330.0), None);
        assert_eq!(game.state(), GameState::Playing);
    }

    #[test]
    fn test_options_stays_in_menu() {
        let mut game = game();
        let mut input = InputManager::default();
        assert_eq!(click(&mut game, &mut input, 450.0, 410.0), None);
        assert_eq!(game.state(), GameState::Menu);
    }

    #[test]
    fn test_exit_button_quits() {
        let mut game = game();
        let mut input = InputManager::default();
        assert_eq!(click(&mut game, &mut input, 450.0, 490.0), Some(GameCommand::Quit));
    }

    #[test]
    fn test_focus_loss_cancels_pending_click() {
        let mut game = game();
        let mut input = InputManager::default();
        input.process_cursor_moved(PhysicalPosition::new(450.0, 330.0));
        input.process_mouse_button(MouseButton::Left, ElementState::Pressed);
        game.update(0.016, &input, SCREEN);
        input.update();

        // The release happens while unfocused and never arrives
        input.reset_all();
        game.focus_lost();

        // Press on the background, drag onto PLAY and let go there
        input.process_cursor_moved(PhysicalPosition::new(100.0, 100.0));
        input.process_mouse_button(MouseButton::Left, ElementState::Pressed);
        game.update(0.016, &input, SCREEN);
        input.update();
        input.process_cursor_moved(PhysicalPosition::new(450.0, 330.0));
        input.process_mouse_button(MouseButton::Left, ElementState::Released);
        assert_eq!(game.update(0.016, &input, SCREEN), None);
        input.update();
        assert_eq!(game.state(), GameState::Menu);

        // A full click still works afterwards
        assert_eq!(click(&mut game, &mut input, 450.0, 330.0), None);
        assert_eq!(game.state(), GameState::Playing);
    }

    #[test]
    fn test_cursor_scales_with_window() {
        let mut game = game();
        let mut input = InputManager::default();
        // Window at double size; (900, 660) maps back to (450, 330)
        input.process_cursor_moved(PhysicalPosition::new(900.0, 660.0));
        input.process_mouse_button(MouseButton::Left, ElementState::Pressed);
        game.update(0.016, &input, SCREEN * 2.0);
        input.update();
        input.process_mouse_button(MouseButton::Left, ElementState::Released);
        game.update(0.016, &input, SCREEN * 2.0);

        assert_eq!(game.state(), GameState::Playing);
    }

    #[test]
    fn test_player_does_not_move_in_menu() {
        let mut game = game();
        let input = InputManager::default();
        let spawn = game.player().position();
        for _ in 0..10 {
            game.update(0.016, &input, SCREEN);
        }
        assert_eq!(game.player().position(), spawn);
    }

    #[test]
    fn test_playing_frame_has_level_and_overlay() {
        let mut game = game();
        game.state = GameState::Playing;
        let input = InputManager::default();
        game.update(0.016, &input, SCREEN);

        let frame = game.render_frame();
        assert_eq!(frame.clear_color, color::rgb8(135, 206, 235));
        assert_eq!(frame.sprites.len(), game.level().ground().tiles().len());
        assert_eq!(frame.debug_rects.len(), 1);
        assert_eq!(frame.debug_rects[0].color, color::GREEN);
    }

    #[test]
    fn test_debug_toggle() {
        use crate::engine::input::InputSource;

        let mut game = game();
        game.state = GameState::Playing;
        let mut input = InputManager::default();
        // Keyboard events cannot be built outside winit; drive the action by mouse
        input
            .config_mut()
            .bind(InputSource::mouse(MouseButton::Right), Action::ToggleDebug);

        input.process_mouse_button(MouseButton::Right, ElementState::Pressed);
        game.update(0.016, &input, SCREEN);
        input.update();
        assert!(!game.debug_overlay());
        assert!(game.render_frame().debug_rects.is_empty());

        // Holding does not toggle again
        game.update(0.016, &input, SCREEN);
        assert!(!game.debug_overlay());

        input.process_mouse_button(MouseButton::Right, ElementState::Released);
        input.update();
        input.process_mouse_button(MouseButton::Right, ElementState::Pressed);
        game.update(0.016, &input, SCREEN);
        assert!(game.debug_overlay());
    }

    #[test]
    fn test_camera_follows_player_within_map() {
        let mut game = game();
        game.state = GameState::Playing;
        let input = InputManager::default();

        for _ in 0..600 {
            game.update(1.0 / 60.0, &input, SCREEN);
        }

        assert!(game.player().is_on_ground());
        assert_eq!(game.player().state(), AnimationState::Idle);
        let center = game.camera().center();
        // Clamped at the left and top edges of the map
        assert_relative_eq!(center.x, 400.0);
        assert_relative_eq!(center.y, 300.0);
    }
}
