// Shared maths and colour types

pub mod color;
pub mod math;

pub use math::Rect;
