use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Vec2 { x, y }
    }

    pub fn length(self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl std::ops::Add for Vec2 {
    type Output = Vec2;
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::Sub for Vec2 {
    type Output = Vec2;
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Axis-aligned rectangle. `w`/`h` are kept non-negative by `normalized`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Rect { x, y, w, h }
    }

    pub fn normalized(self) -> Rect {
        let (x, w) = if self.w < 0.0 {
            (self.x + self.w, -self.w)
        } else {
            (self.x, self.w)
        };
        let (y, h) = if self.h < 0.0 {
            (self.y + self.h, -self.h)
        } else {
            (self.y, self.h)
        };
        Rect { x, y, w, h }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Node {
    pub x: f32,
    pub y: f32,
    /// Name of the node style applied to this node, if any. Resolved against a
    /// `StyleRegistry` at read time; a name with no match renders unstyled.
    pub style: Option<String>,
}

/// How an edge's two cubic control points are produced.
///
/// The two modes are mutually exclusive: bend parameters do not survive a
/// switch to `Manual` and explicit offsets do not survive a switch back.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum EdgeRouting {
    /// Symbolic bend: signed angle in degrees off the tail->head baseline,
    /// plus a dimensionless looseness factor (1.0 = default shape).
    Bend { bend: f32, looseness: f32 },
    /// Explicit control points, stored as offsets from tail and head so the
    /// curve follows its endpoints when nodes move.
    Manual { cp1: Vec2, cp2: Vec2 },
}

impl Default for EdgeRouting {
    fn default() -> Self {
        EdgeRouting::Bend {
            bend: 0.0,
            looseness: 1.0,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Edge {
    pub a: u32,
    pub b: u32,
    pub routing: EdgeRouting,
    /// Name of the edge style applied to this edge, if any.
    pub style: Option<String>,
}
