use glam::Vec2;

use crate::core::Rect;

/// Tolerance used by the crossing test: a body only lands on (or bumps into)
/// a rectangle if, at the start of the frame, its edge was no further than
/// this past the rectangle's surface.
pub const CROSSING_EPSILON: f32 = 1.0;

/// Read-only source of solid rectangles for the resolver.
///
/// The returned slice is ordered and must stay unchanged for the duration of
/// a physics step.
pub trait CollisionGeometry {
    fn collision_boxes(&self) -> &[Rect];
}

impl CollisionGeometry for [Rect] {
    fn collision_boxes(&self) -> &[Rect] {
        self
    }
}

impl CollisionGeometry for Vec<Rect> {
    fn collision_boxes(&self) -> &[Rect] {
        self
    }
}

/// What the resolver ran into during one step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepContacts {
    /// Horizontal movement was reverted this frame
    pub wall: bool,
    /// Body came down onto a rectangle this frame
    pub landed: bool,
    /// Body hit the underside of a rectangle this frame
    pub ceiling: bool,
}

/// Outcome of the vertical pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct VerticalResolution {
    pub position_y: f32,
    pub velocity_y: f32,
    pub landed: bool,
    pub ceiling: bool,
}

/// Horizontal pass. Returns the x the body should end the pass at.
///
/// The first intersecting rectangle reverts the move; the scan stops there.
pub(crate) fn resolve_horizontal(
    local_box: Rect,
    old_position: Vec2,
    new_x: f32,
    boxes: &[Rect],
) -> (f32, bool) {
    let moved = local_box.translated(Vec2::new(new_x, old_position.y));

    if boxes.iter().any(|ground| moved.intersects(ground)) {
        (old_position.x, true)
    } else {
        (new_x, false)
    }
}

/// Vertical pass over every rectangle, in order.
///
/// The intersection test always uses the bounds computed before the loop and
/// there is no minimum-penetration selection. A snap zeroes the velocity, so
/// rectangles scanned after a landing or ceiling hit no longer match either
/// branch.
pub(crate) fn resolve_vertical(
    local_box: Rect,
    x: f32,
    old_y: f32,
    new_y: f32,
    velocity_y: f32,
    boxes: &[Rect],
) -> VerticalResolution {
    let bounds = local_box.translated(Vec2::new(x, new_y));
    let old_bottom = old_y + local_box.bottom();
    let old_top = old_y + local_box.top();

    let mut resolution = VerticalResolution {
        position_y: new_y,
        velocity_y,
        landed: false,
        ceiling: false,
    };

    for ground in boxes {
        if !bounds.intersects(ground) {
            continue;
        }

        if resolution.velocity_y > 0.0 {
            let ground_top = ground.top();
            if bounds.bottom() > ground_top && old_bottom <= ground_top + CROSSING_EPSILON {
                resolution.position_y = ground_top - local_box.bottom();
                resolution.velocity_y = 0.0;
                resolution.landed = true;
            }
        } else if resolution.velocity_y < 0.0 {
            let ground_bottom = ground.bottom();
            if bounds.top() < ground_bottom && old_top >= ground_bottom - CROSSING_EPSILON {
                resolution.position_y = ground_bottom - local_box.top();
                resolution.velocity_y = 0.0;
                resolution.ceiling = true;
            }
        }
    }

    resolution
}
