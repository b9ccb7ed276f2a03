// Centralized ingestion limits to harden against untrusted snapshots

// Scene size caps. Ids are slot indices, so these also bound the arena
// allocation a snapshot can request.
pub const MAX_NODES: usize = 200_000;
pub const MAX_EDGES: usize = 300_000;

// Numeric bounds
pub const COORD_MIN: f32 = -10_000_000.0;
pub const COORD_MAX: f32 = 10_000_000.0;
pub const LOOSENESS_MAX: f32 = 1_000.0;

#[inline]
pub fn in_coord_bounds(x: f32) -> bool {
    x.is_finite() && x >= COORD_MIN && x <= COORD_MAX
}

#[inline]
pub fn in_looseness_bounds(l: f32) -> bool {
    l.is_finite() && l >= 0.0 && l <= LOOSENESS_MAX
}
