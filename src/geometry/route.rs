//! Derivation of an edge's cubic control points from its routing parameters.
//!
//! In bend mode the control points are a pure function of the endpoints, the
//! signed bend angle and the looseness factor; in manual mode they come from
//! stored offsets. Either way the result is a `CurveGeometry` value that the
//! rendering layer turns into a path, so there is no mutable control-point
//! state to go stale.

use crate::geometry::bezier::CubicBezier;
use crate::geometry::tolerance::EPS_LEN;
use crate::model::{EdgeRouting, Vec2};

/// Fraction of the edge length a control point sits from its endpoint at
/// looseness 1.0.
pub const K_SHAPE: f32 = 0.4;

/// Angular spread (degrees) between the baseline and each control ray of a
/// self-loop. Keeps the two control points apart when tail == head.
pub const LOOP_SPREAD_DEG: f32 = 30.0;

/// Smallest control radius a self-loop may collapse to, regardless of
/// looseness, so the loop stays visible and pickable.
pub const MIN_LOOP_RADIUS: f32 = K_SHAPE * 0.25;

/// An edge's curve, fully derived: endpoints plus the two cubic control
/// points in diagram space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CurveGeometry {
    pub tail: Vec2,
    pub head: Vec2,
    pub cp1: Vec2,
    pub cp2: Vec2,
}

impl CurveGeometry {
    pub fn bezier(&self) -> CubicBezier {
        CubicBezier::new(self.tail, self.cp1, self.cp2, self.head)
    }

    /// Parametric midpoint of the curve (t = 0.5), used for label placement
    /// and the center drag handle.
    pub fn mid(&self) -> Vec2 {
        self.bezier().mid()
    }

    /// Greater of the two control-point distances from their endpoints.
    /// The interactive layer sizes selection handles from this.
    pub fn cp_distance(&self) -> f32 {
        let d1 = (self.cp1 - self.tail).length();
        let d2 = (self.cp2 - self.head).length();
        d1.max(d2)
    }
}

/// Compute the curve for an edge from tail to head under the given routing.
pub fn derive_curve(tail: Vec2, head: Vec2, routing: &EdgeRouting) -> CurveGeometry {
    match *routing {
        EdgeRouting::Manual { cp1, cp2 } => CurveGeometry {
            tail,
            head,
            cp1: tail + cp1,
            cp2: head + cp2,
        },
        EdgeRouting::Bend { bend, looseness } => {
            let d = head - tail;
            let len = d.length();
            let theta = bend.to_radians();

            let (radius, out_angle, in_angle) = if len <= EPS_LEN {
                // Self-loop: no baseline to bend against. Fan the control
                // rays out symmetrically around the bend direction at a
                // fallback radius; looseness still scales the loop.
                let spread = LOOP_SPREAD_DEG.to_radians();
                let r = (K_SHAPE * looseness).max(MIN_LOOP_RADIUS);
                (r, theta + spread, theta + std::f32::consts::PI - spread)
            } else {
                let base = d.y.atan2(d.x);
                let r = len * looseness * K_SHAPE;
                (r, base + theta, base + std::f32::consts::PI - theta)
            };

            CurveGeometry {
                tail,
                head,
                cp1: tail + Vec2::new(radius * out_angle.cos(), radius * out_angle.sin()),
                cp2: head + Vec2::new(radius * in_angle.cos(), radius * in_angle.sin()),
            }
        }
    }
}
