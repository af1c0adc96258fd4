// Built-in 5x7 bitmap font, drawn as solid quads through the sprite batch

use glam::{Vec2, Vec4};

use super::Sprite;
use crate::core::Rect;

pub const GLYPH_WIDTH: u32 = 5;
pub const GLYPH_HEIGHT: u32 = 7;
/// Columns from one glyph to the next, one blank column included
const ADVANCE: u32 = GLYPH_WIDTH + 1;

/// Rows of a glyph, top first; bit 4 is the leftmost column.
/// Letters only, lowercase drawn as uppercase, anything else blank.
fn glyph(c: char) -> [u8; GLYPH_HEIGHT as usize] {
    match c.to_ascii_uppercase() {
        'A' => [0x0E, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11],
        'B' => [0x1E, 0x11, 0x11, 0x1E, 0x11, 0x11, 0x1E],
        'C' => [0x0E, 0x11, 0x10, 0x10, 0x10, 0x11, 0x0E],
        'D' => [0x1E, 0x11, 0x11, 0x11, 0x11, 0x11, 0x1E],
        'E' => [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x1F],
        'F' => [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x10],
        'G' => [0x0E, 0x11, 0x10, 0x17, 0x11, 0x11, 0x0F],
        'H' => [0x11, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11],
        'I' => [0x0E, 0x04, 0x04, 0x04, 0x04, 0x04, 0x0E],
        'J' => [0x07, 0x02, 0x02, 0x02, 0x02, 0x12, 0x0C],
        'K' => [0x11, 0x12, 0x14, 0x18, 0x14, 0x12, 0x11],
        'L' => [0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x1F],
        'M' => [0x11, 0x1B, 0x15, 0x15, 0x11, 0x11, 0x11],
        'N' => [0x11, 0x11, 0x19, 0x15, 0x13, 0x11, 0x11],
        'O' => [0x0E, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E],
        'P' => [0x1E, 0x11, 0x11, 0x1E, 0x10, 0x10, 0x10],
        'Q' => [0x0E, 0x11, 0x11, 0x11, 0x15, 0x12, 0x0D],
        'R' => [0x1E, 0x11, 0x11, 0x1E, 0x14, 0x12, 0x11],
        'S' => [0x0F, 0x10, 0x10, 0x0E, 0x01, 0x01, 0x1E],
        'T' => [0x1F, 0x04, 0x04, 0x04, 0x04, 0x04, 0x04],
        'U' => [0x11, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E],
        'V' => [0x11, 0x11, 0x11, 0x11, 0x11, 0x0A, 0x04],
        'W' => [0x11, 0x11, 0x11, 0x15, 0x15, 0x15, 0x0A],
        'X' => [0x11, 0x11, 0x0A, 0x04, 0x0A, 0x11, 0x11],
        'Y' => [0x11, 0x11, 0x11, 0x0A, 0x04, 0x04, 0x04],
        'Z' => [0x1F, 0x01, 0x02, 0x04, 0x08, 0x10, 0x1F],
        _ => [0; GLYPH_HEIGHT as usize],
    }
}

fn is_lit(row: u8, column: u32) -> bool {
    row & (1 << (GLYPH_WIDTH - 1 - column)) != 0
}

/// Size of `text` when every font pixel covers `pixel` world units
pub fn text_size(text: &str, pixel: f32) -> Vec2 {
    let count = text.chars().count() as u32;
    if count == 0 {
        return Vec2::ZERO;
    }
    let columns = count * ADVANCE - 1;
    Vec2::new(columns as f32, GLYPH_HEIGHT as f32) * pixel
}

/// Quads for `text` with its top-left corner at `origin`.
///
/// Each horizontal run of lit pixels becomes one sprite.
pub fn text_sprites(text: &str, origin: Vec2, pixel: f32, color: Vec4) -> Vec<Sprite> {
    let mut sprites = Vec::new();
    for (i, c) in text.chars().enumerate() {
        let left = origin.x + (i as u32 * ADVANCE) as f32 * pixel;
        for (y, row) in glyph(c).into_iter().enumerate() {
            let top = origin.y + y as f32 * pixel;
            let mut column = 0;
            while column < GLYPH_WIDTH {
                if !is_lit(row, column) {
                    column += 1;
                    continue;
                }
                let start = column;
                while column < GLYPH_WIDTH && is_lit(row, column) {
                    column += 1;
                }
                let bounds = Rect::new(
                    left + start as f32 * pixel,
                    top,
                    (column - start) as f32 * pixel,
                    pixel,
                );
                sprites.push(Sprite::solid(bounds, color));
            }
        }
    }
    sprites
}

/// Like `text_sprites`, centred on `center`
pub fn centered_text_sprites(text: &str, center: Vec2, pixel: f32, color: Vec4) -> Vec<Sprite> {
    let origin = center - text_size(text, pixel) / 2.0;
    text_sprites(text, origin, pixel, color)
}
