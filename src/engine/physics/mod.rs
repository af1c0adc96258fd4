// Kinematic platformer physics: gravity integration and axis-separated
// resolution against static axis-aligned rectangles

pub mod body;
mod collision;

pub use body::{BodyBuilder, KinematicBody};
pub use collision::{CollisionGeometry, StepContacts};
