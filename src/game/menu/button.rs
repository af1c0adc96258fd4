// Clickable menu button

use glam::{Vec2, Vec4};

use crate::core::{color, Rect};
use crate::engine::renderer::{centered_text_sprites, Sprite};

/// What a button does when clicked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Play,
    Options,
    Exit,
}

/// Fill colours for each interaction state, plus the label's
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ButtonColors {
    pub normal: Vec4,
    pub hover: Vec4,
    pub pressed: Vec4,
    pub text: Vec4,
    pub text_hover: Vec4,
}

impl Default for ButtonColors {
    fn default() -> Self {
        Self {
            normal: color::rgb8(70, 70, 100),
            hover: color::rgb8(100, 100, 150),
            pressed: color::rgb8(50, 50, 80),
            text: color::WHITE,
            text_hover: color::YELLOW,
        }
    }
}

pub const OUTLINE_THICKNESS: f32 = 3.0;
/// World units per font pixel of the label
pub const LABEL_PIXEL: f32 = 4.0;

#[derive(Debug, Clone)]
pub struct Button {
    bounds: Rect,
    label: String,
    action: MenuAction,
    colors: ButtonColors,
    fill: Vec4,
    hovered: bool,
    pressed: bool,
}

impl Button {
    pub fn new(bounds: Rect, label: impl Into<String>, action: MenuAction) -> Self {
        let colors = ButtonColors::default();
        Self {
            bounds,
            label: label.into(),
            action,
            colors,
            fill: colors.normal,
            hovered: false,
            pressed: false,
        }
    }

    /// Area that reacts to the mouse, outline included
    pub fn hit_area(&self) -> Rect {
        let t = Vec2::splat(OUTLINE_THICKNESS);
        Rect {
            position: self.bounds.position - t,
            size: self.bounds.size + t * 2.0,
        }
    }

    pub fn is_mouse_over(&self, cursor: Vec2) -> bool {
        self.hit_area().contains(cursor)
    }

    /// Track hover; a pressed button keeps its pressed colour
    pub fn handle_mouse_move(&mut self, cursor: Vec2) {
        let was_hovered = self.hovered;
        self.hovered = self.is_mouse_over(cursor);

        if self.pressed || self.hovered == was_hovered {
            return;
        }
        self.fill = if self.hovered {
            self.colors.hover
        } else {
            self.colors.normal
        };
    }

    /// Returns whether the press landed on this button
    pub fn handle_mouse_press(&mut self, cursor: Vec2) -> bool {
        if !self.is_mouse_over(cursor) {
            return false;
        }
        self.pressed = true;
        self.fill = self.colors.pressed;
        true
    }

    /// Fires the action only when released while still hovered
    pub fn handle_mouse_release(&mut self) -> Option<MenuAction> {
        if !self.pressed {
            return None;
        }
        self.pressed = false;

        if self.hovered {
            self.fill = self.colors.hover;
            Some(self.action)
        } else {
            self.fill = self.colors.normal;
            None
        }
    }

    /// Drop a press without firing, e.g. when the window loses focus
    pub fn cancel(&mut self) {
        if !self.pressed {
            return;
        }
        self.pressed = false;
        self.fill = if self.hovered {
            self.colors.hover
        } else {
            self.colors.normal
        };
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn fill_color(&self) -> Vec4 {
        self.fill
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    pub fn text_color(&self) -> Vec4 {
        if self.hovered {
            self.colors.text_hover
        } else {
            self.colors.text
        }
    }

    /// White outline, then the fill, then the label centred on top
    pub fn sprites(&self) -> Vec<Sprite> {
        let mut sprites = vec![
            Sprite::solid(self.hit_area(), color::WHITE),
            Sprite::solid(self.bounds, self.fill),
        ];
        sprites.extend(centered_text_sprites(
            &self.label,
            self.bounds.center(),
            LABEL_PIXEL,
            self.text_color(),
        ));
        sprites
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn button() -> Button {
        Button::new(Rect::new(350.0, 300.0, 200.0, 60.0), "PLAY", MenuAction::Play)
    }

    const INSIDE: Vec2 = Vec2::new(450.0, 330.0);
    const OUTSIDE: Vec2 = Vec2::new(10.0, 10.0);

    #[test]
    fn test_hover_changes_colour() {
        let mut b = button();
        let colors = ButtonColors::default();
        assert_eq!(b.fill_color(), colors.normal);

        b.handle_mouse_move(INSIDE);
        assert!(b.is_hovered());
        assert_eq!(b.fill_color(), colors.hover);

        b.handle_mouse_move(OUTSIDE);
        assert!(!b.is_hovered());
        assert_eq!(b.fill_color(), colors.normal);
    }

    #[test]
    fn test_click_fires_action() {
        let mut b = button();
        b.handle_mouse_move(INSIDE);
        assert!(b.handle_mouse_press(INSIDE));
        assert!(b.is_pressed());
        assert_eq!(b.fill_color(), ButtonColors::default().pressed);

        assert_eq!(b.handle_mouse_release(), Some(MenuAction::Play));
        assert!(!b.is_pressed());
        assert_eq!(b.fill_color(), ButtonColors::default().hover);
    }

    #[test]
    fn test_release_outside_cancels() {
        let mut b = button();
        b.handle_mouse_move(INSIDE);
        b.handle_mouse_press(INSIDE);
        b.handle_mouse_move(OUTSIDE);
        // Still pressed, so the colour does not change on leave
        assert_eq!(b.fill_color(), ButtonColors::default().pressed);

        assert_eq!(b.handle_mouse_release(), None);
        assert_eq!(b.fill_color(), ButtonColors::default().normal);
    }

    #[test]
    fn test_press_outside_is_ignored() {
        let mut b = button();
        assert!(!b.handle_mouse_press(OUTSIDE));
        assert_eq!(b.handle_mouse_release(), None);
    }

    #[test]
    fn test_outline_counts_as_inside() {
        let b = button();
        assert!(b.is_mouse_over(Vec2::new(347.0, 297.0)));
        assert!(!b.is_mouse_over(Vec2::new(346.0, 330.0)));
        assert!(!b.is_mouse_over(Vec2::new(553.0, 330.0)));
    }

    #[test]
    fn test_sprites_draw_outline_first() {
        let b = button();
        let sprites = b.sprites();
        assert_eq!(sprites[0].bounds, Rect::new(347.0, 297.0, 206.0, 66.0));
        assert_eq!(sprites[0].color, color::WHITE);
        assert_eq!(sprites[1].bounds, b.bounds());
        assert!(sprites.len() > 2);
    }

    #[test]
    fn test_label_drawn_inside_button() {
        let b = button();
        let sprites = b.sprites();
        let label = &sprites[2..];
        assert!(!label.is_empty());
        for sprite in label {
            assert!(b.bounds().contains(sprite.bounds.position));
            assert!(sprite.bounds.right() <= b.bounds().right());
            assert!(sprite.bounds.bottom() <= b.bounds().bottom());
            assert_eq!(sprite.color, color::WHITE);
        }
    }

    #[test]
    fn test_labels_differ_between_buttons() {
        let bounds = Rect::new(350.0, 300.0, 200.0, 60.0);
        let play = Button::new(bounds, "PLAY", MenuAction::Play).sprites();
        let exit = Button::new(bounds, "EXIT", MenuAction::Exit).sprites();
        assert_ne!(play[2..], exit[2..]);
    }

    #[test]
    fn test_label_turns_yellow_on_hover() {
        let mut b = button();
        b.handle_mouse_move(INSIDE);
        assert_eq!(b.text_color(), color::YELLOW);
        assert!(b.sprites()[2..].iter().all(|s| s.color == color::YELLOW));

        b.handle_mouse_move(OUTSIDE);
        assert_eq!(b.text_color(), color::WHITE);
    }

    #[test]
    fn test_cancel_drops_press_without_firing() {
        let mut b = button();
        b.handle_mouse_move(INSIDE);
        b.handle_mouse_press(INSIDE);
        b.cancel();
        assert!(!b.is_pressed());
        assert_eq!(b.fill_color(), ButtonColors::default().hover);

        // The release that follows no longer clicks
        assert_eq!(b.handle_mouse_release(), None);
        assert_eq!(b.fill_color(), ButtonColors::default().hover);
    }

    #[test]
    fn test_cancel_without_press_keeps_colour() {
        let mut b = button();
        b.cancel();
        assert_eq!(b.fill_color(), ButtonColors::default().normal);
    }
}
