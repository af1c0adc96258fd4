// Main menu screen

use glam::{Vec2, Vec4};
use log::info;

use super::button::{Button, MenuAction};
use crate::core::{color, Rect};
use crate::engine::renderer::{centered_text_sprites, Sprite};

pub const TITLE: &str = "I am not a hero";
/// Vertical centre of the title
pub const TITLE_Y: f32 = 150.0;
pub const TITLE_PIXEL: f32 = 6.0;
pub const BUTTON_SIZE: Vec2 = Vec2::new(200.0, 60.0);

/// Title, background and a column of buttons centred in the window
#[derive(Debug, Clone)]
pub struct Menu {
    size: Vec2,
    background: Vec4,
    buttons: Vec<Button>,
}

impl Menu {
    /// Menu with PLAY, OPTIONS and EXIT
    pub fn new(window_size: Vec2) -> Self {
        let mut menu = Self::empty(window_size);
        menu.add_button("PLAY", 300.0, MenuAction::Play);
        menu.add_button("OPTIONS", 380.0, MenuAction::Options);
        menu.add_button("EXIT", 460.0, MenuAction::Exit);
        menu
    }

    pub fn empty(window_size: Vec2) -> Self {
        Self {
            size: window_size,
            background: color::rgb8(30, 30, 50),
            buttons: Vec::new(),
        }
    }

    /// Add a button horizontally centred with its top edge at `y`
    pub fn add_button(&mut self, label: &str, y: f32, action: MenuAction) -> &mut Button {
        let x = self.size.x / 2.0 - BUTTON_SIZE.x / 2.0;
        let bounds = Rect {
            position: Vec2::new(x, y),
            size: BUTTON_SIZE,
        };
        info!("Menu button {} at ({}, {})", label, x, y);

        self.buttons.push(Button::new(bounds, label, action));
        let last = self.buttons.len() - 1;
        &mut self.buttons[last]
    }

    pub fn buttons(&self) -> &[Button] {
        &self.buttons
    }

    pub fn background_color(&self) -> Vec4 {
        self.background
    }

    pub fn handle_mouse_move(&mut self, cursor: Vec2) {
        for button in &mut self.buttons {
            button.handle_mouse_move(cursor);
        }
    }

    pub fn handle_mouse_press(&mut self, cursor: Vec2) {
        for button in &mut self.buttons {
            button.handle_mouse_press(cursor);
        }
    }

    /// Drop any pending press so the next release clicks nothing
    pub fn cancel_press(&mut self) {
        for button in &mut self.buttons {
            button.cancel();
        }
    }

    /// Release every button; returns the action of the one that was clicked
    pub fn handle_mouse_release(&mut self) -> Option<MenuAction> {
        let mut fired = None;
        for button in &mut self.buttons {
            if let Some(action) = button.handle_mouse_release() {
                info!("{} clicked", button.label());
                fired = fired.or(Some(action));
            }
        }
        fired
    }

    /// Title text centred at the top of the window
    pub fn title_sprites(&self) -> Vec<Sprite> {
        let center = Vec2::new(self.size.x / 2.0, TITLE_Y);
        centered_text_sprites(TITLE, center, TITLE_PIXEL, color::WHITE)
    }

    /// Background first, then the title, then each button
    pub fn sprites(&self) -> Vec<Sprite> {
        let mut sprites = vec![Sprite::solid(
            Rect {
                position: Vec2::ZERO,
                size: self.size,
            },
            self.background,
        )];
        sprites.extend(self.title_sprites());
        for button in &self.buttons {
            sprites.extend(button.sprites());
        }
        sprites
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn menu() -> Menu {
        Menu::new(Vec2::new(900.0, 600.0))
    }

    fn click(menu: &mut Menu, at: Vec2) -> Option<MenuAction> {
        menu.handle_mouse_move(at);
        menu.handle_mouse_press(at);
        menu.handle_mouse_release()
    }

    #[test]
    fn test_buttons_are_centred_and_stacked() {
        let menu = menu();
        let tops: Vec<f32> = menu.buttons().iter().map(|b| b.bounds().top()).collect();
        assert_eq!(tops, vec![300.0, 380.0, 460.0]);
        for button in menu.buttons() {
            assert_eq!(button.bounds().left(), 350.0);
            assert_eq!(button.bounds().size, BUTTON_SIZE);
        }
    }

    #[test]
    fn test_click_each_button() {
        let mut menu = menu();
        assert_eq!(click(&mut menu, Vec2::new(450.0, 330.0)), Some(MenuAction::Play));
        assert_eq!(click(&mut menu, Vec2::new(450.0, 410.0)), Some(MenuAction::Options));
        assert_eq!(click(&mut menu, Vec2::new(450.0, 490.0)), Some(MenuAction::Exit));
    }

    #[test]
    fn test_click_on_background_does_nothing() {
        let mut menu = menu();
        assert_eq!(click(&mut menu, Vec2::new(100.0, 100.0)), None);
    }

    #[test]
    fn test_drag_off_cancels() {
        let mut menu = menu();
        let play = Vec2::new(450.0, 330.0);
        menu.handle_mouse_move(play);
        menu.handle_mouse_press(play);
        menu.handle_mouse_move(Vec2::new(450.0, 490.0));
        assert_eq!(menu.handle_mouse_release(), None);
    }

    #[test]
    fn test_sprites_start_with_background() {
        let menu = menu();
        let sprites = menu.sprites();
        assert_eq!(sprites[0].bounds, Rect::new(0.0, 0.0, 900.0, 600.0));
        assert_eq!(sprites[0].color, menu.background_color());

        let title = menu.title_sprites();
        let buttons: usize = menu.buttons().iter().map(|b| b.sprites().len()).sum();
        assert_eq!(sprites.len(), 1 + title.len() + buttons);
        assert_eq!(sprites[1..=title.len()], title[..]);
    }

    #[test]
    fn test_title_centred_above_buttons() {
        let menu = menu();
        let title = menu.title_sprites();
        assert!(!title.is_empty());

        let left = title.iter().map(|s| s.bounds.left()).fold(f32::MAX, f32::min);
        let right = title.iter().map(|s| s.bounds.right()).fold(f32::MIN, f32::max);
        assert!(left > 0.0 && right < 900.0);
        assert!(title.iter().all(|s| s.bounds.bottom() < 300.0));
        assert!(title.iter().all(|s| (s.bounds.center().y - TITLE_Y).abs() <= 21.0));
    }

    #[test]
    fn test_cancel_press_stops_click() {
        let mut menu = menu();
        let play = Vec2::new(450.0, 330.0);
        menu.handle_mouse_move(play);
        menu.handle_mouse_press(play);
        menu.cancel_press();
        assert!(menu.buttons().iter().all(|b| !b.is_pressed()));
        assert_eq!(menu.handle_mouse_release(), None);
    }
}
