//! Mapping between diagram space (y-up, unit grid) and screen space
//! (y-down, pixels).
//!
//! All functions are pure; the scale factor is fixed for the lifetime of the
//! process. `from_screen(to_screen(p)) == p` up to f32 rounding.

use crate::model::{Rect, Vec2};

/// Pixels between (0,0) and (1,0) at 100% zoom. Divisible by 8 so grid
/// snapping lands on whole pixels.
pub const SCREEN_SCALE: f32 = 40.0;

pub fn to_screen(p: Vec2) -> Vec2 {
    Vec2::new(p.x * SCREEN_SCALE, -p.y * SCREEN_SCALE)
}

pub fn from_screen(p: Vec2) -> Vec2 {
    Vec2::new(p.x / SCREEN_SCALE, -p.y / SCREEN_SCALE)
}

/// The y flip means the screen rect's top edge corresponds to the diagram
/// rect's top (max-y) edge, so the screen origin is derived from `y + h`.
pub fn rect_to_screen(r: Rect) -> Rect {
    let r = r.normalized();
    Rect::new(
        r.x * SCREEN_SCALE,
        -(r.y + r.h) * SCREEN_SCALE,
        r.w * SCREEN_SCALE,
        r.h * SCREEN_SCALE,
    )
}

pub fn rect_from_screen(r: Rect) -> Rect {
    let r = r.normalized();
    Rect::new(
        r.x / SCREEN_SCALE,
        -(r.y + r.h) / SCREEN_SCALE,
        r.w / SCREEN_SCALE,
        r.h / SCREEN_SCALE,
    )
}
