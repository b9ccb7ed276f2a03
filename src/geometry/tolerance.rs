// Centralized tolerances and helpers for robust geometry

pub const EPS_POS: f32 = 1e-4; // point coincidence threshold (diagram units)
pub const EPS_LEN: f32 = 1e-6; // zero-length vector threshold
pub const EPS_GEOM: f32 = 1e-3; // slack for geometric invariants in tests

#[inline]
pub fn near_zero(x: f32, eps: f32) -> bool {
    x.abs() <= eps
}

#[inline]
pub fn approx_eq(a: f32, b: f32, eps: f32) -> bool {
    (a - b).abs() <= eps
}
