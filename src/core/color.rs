// Colour helpers

use glam::Vec4;

/// Convert one 8-bit sRGB channel to linear light
fn channel_to_linear(c: u8) -> f32 {
    let c = c as f32 / 255.0;
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Opaque colour from 8-bit sRGB components, as linear RGBA.
///
/// Render targets are sRGB surfaces, so vertex colours and clear colours have
/// to be handed over in linear space.
pub fn rgb8(r: u8, g: u8, b: u8) -> Vec4 {
    rgba8(r, g, b, 255)
}

/// Colour from 8-bit sRGB components plus alpha, as linear RGBA
pub fn rgba8(r: u8, g: u8, b: u8, a: u8) -> Vec4 {
    Vec4::new(
        channel_to_linear(r),
        channel_to_linear(g),
        channel_to_linear(b),
        a as f32 / 255.0,
    )
}

pub const WHITE: Vec4 = Vec4::ONE;
pub const GREEN: Vec4 = Vec4::new(0.0, 1.0, 0.0, 1.0);
pub const RED: Vec4 = Vec4::new(1.0, 0.0, 0.0, 1.0);
pub const YELLOW: Vec4 = Vec4::new(1.0, 1.0, 0.0, 1.0);

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_extremes_are_preserved() {
        assert_eq!(rgb8(0, 0, 0), Vec4::new(0.0, 0.0, 0.0, 1.0));
        assert_eq!(rgb8(255, 255, 255), WHITE);
    }

    #[test]
    fn test_midtone_is_darker_in_linear() {
        let grey = rgb8(128, 128, 128);
        assert_relative_eq!(grey.x, 0.2158605, epsilon = 1e-4);
        assert_eq!(grey.x, grey.y);
    }

    #[test]
    fn test_alpha_is_linear() {
        assert_relative_eq!(rgba8(10, 20, 30, 51).w, 0.2);
    }
}
