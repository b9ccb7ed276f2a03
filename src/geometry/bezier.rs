//! Cubic Bézier evaluation used for edge paths.
//!
//! Edges are always a single cubic; the parametric midpoint anchors labels
//! and the center drag handle.

use crate::model::Vec2;

/// Control points of a cubic Bézier curve.
#[derive(Clone, Copy, Debug)]
pub struct CubicBezier {
    pub p0: Vec2, // Start point
    pub p1: Vec2, // First control point
    pub p2: Vec2, // Second control point
    pub p3: Vec2, // End point
}

impl CubicBezier {
    pub fn new(p0: Vec2, p1: Vec2, p2: Vec2, p3: Vec2) -> Self {
        Self { p0, p1, p2, p3 }
    }

    /// Evaluate the curve at parameter t ∈ [0, 1].
    pub fn eval(&self, t: f32) -> Vec2 {
        let t2 = t * t;
        let t3 = t2 * t;
        let mt = 1.0 - t;
        let mt2 = mt * mt;
        let mt3 = mt2 * mt;

        Vec2 {
            x: mt3 * self.p0.x + 3.0 * mt2 * t * self.p1.x + 3.0 * mt * t2 * self.p2.x + t3 * self.p3.x,
            y: mt3 * self.p0.y + 3.0 * mt2 * t * self.p1.y + 3.0 * mt * t2 * self.p2.y + t3 * self.p3.y,
        }
    }

    /// Parametric midpoint (t = 0.5). Not the chord midpoint.
    pub fn mid(&self) -> Vec2 {
        self.eval(0.5)
    }

    /// Evaluate the tangent (derivative) at parameter t.
    pub fn tangent(&self, t: f32) -> Vec2 {
        let t2 = t * t;
        let mt = 1.0 - t;
        let mt2 = mt * mt;

        Vec2 {
            x: 3.0 * mt2 * (self.p1.x - self.p0.x)
                + 6.0 * mt * t * (self.p2.x - self.p1.x)
                + 3.0 * t2 * (self.p3.x - self.p2.x),
            y: 3.0 * mt2 * (self.p1.y - self.p0.y)
                + 6.0 * mt * t * (self.p2.y - self.p1.y)
                + 3.0 * t2 * (self.p3.y - self.p2.y),
        }
    }
}
