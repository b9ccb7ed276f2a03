//! Core of a TikZ-style graph diagram editor: the edge curve engine, the
//! diagram/screen coordinate mapping, and the named-style resolution model.
//! No GUI code lives here; the interactive layer drives `Graph` and
//! `StyleRegistry` and re-derives geometry before each paint.

pub mod model;
pub mod geometry {
    pub mod bezier;
    pub mod limits;
    pub mod route;
    pub mod tolerance;
    pub mod transform;
}
pub mod styles {
    pub mod color;
    pub mod properties;
    pub mod registry;
    pub mod style;
}
mod json;

use std::cell::RefCell;
use std::collections::HashMap;

use geometry::route::{derive_curve, CurveGeometry};
use geometry::tolerance::EPS_POS;
use model::{Edge, EdgeRouting, Node, Vec2};
use styles::registry::StyleRegistry;
use styles::style::{Style, RESERVED_NONE};

/// The diagram: nodes and edges with stable ids (slot index), plus a derived
/// curve cache keyed by the geometry version.
///
/// Every geometry-affecting mutation bumps `geom_ver`; `edge_geometry` only
/// trusts cache entries stamped with the current version, so control points
/// can never be observed stale relative to their inputs.
pub struct Graph {
    pub(crate) nodes: Vec<Option<Node>>, // id is index
    pub(crate) edges: Vec<Option<Edge>>, // id is index
    pub(crate) geom_ver: u64,
    pub(crate) curve_cache: RefCell<HashMap<u32, (u64, CurveGeometry)>>,
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}

impl Graph {
    pub fn new() -> Self {
        Graph {
            nodes: Vec::new(),
            edges: Vec::new(),
            geom_ver: 1,
            curve_cache: RefCell::new(HashMap::new()),
        }
    }

    pub fn geom_version(&self) -> u64 {
        self.geom_ver
    }

    fn bump(&mut self) {
        self.geom_ver += 1;
    }

    // Nodes

    /// Add a node, returning its id. Rejects non-finite coordinates, like
    /// every other mutator.
    pub fn add_node(&mut self, x: f32, y: f32) -> Option<u32> {
        if !x.is_finite() || !y.is_finite() {
            return None;
        }
        let id = self.nodes.len() as u32;
        self.nodes.push(Some(Node { x, y, style: None }));
        self.bump();
        Some(id)
    }

    pub fn move_node(&mut self, id: u32, x: f32, y: f32) -> bool {
        if !x.is_finite() || !y.is_finite() {
            return false;
        }
        let (oldx, oldy) = match self.nodes.get(id as usize).and_then(|n| n.as_ref()) {
            Some(n) => (n.x, n.y),
            None => return false,
        };
        let dx = x - oldx;
        let dy = y - oldy;
        if (dx * dx + dy * dy) <= EPS_POS * EPS_POS {
            return true;
        }
        if let Some(Some(n)) = self.nodes.get_mut(id as usize) {
            n.x = x;
            n.y = y;
        } else {
            return false;
        }
        self.bump();
        true
    }

    pub fn get_node(&self, id: u32) -> Option<(f32, f32)> {
        self.nodes
            .get(id as usize)
            .and_then(|n| n.as_ref())
            .map(|n| (n.x, n.y))
    }

    pub fn remove_node(&mut self, id: u32) -> bool {
        if self.nodes.get(id as usize).and_then(|n| n.as_ref()).is_none() {
            return false;
        }
        let mut incident: Vec<usize> = Vec::new();
        for (eid, e) in self.edges.iter().enumerate() {
            if let Some(edge) = e {
                if edge.a == id || edge.b == id {
                    incident.push(eid);
                }
            }
        }
        if let Some(slot) = self.nodes.get_mut(id as usize) {
            *slot = None;
        }
        for eid in incident {
            if let Some(slot) = self.edges.get_mut(eid) {
                *slot = None;
            }
        }
        self.bump();
        true
    }

    pub fn node_count(&self) -> u32 {
        self.nodes.iter().filter(|n| n.is_some()).count() as u32
    }

    pub fn node_ids(&self) -> Vec<u32> {
        self.nodes
            .iter()
            .enumerate()
            .filter_map(|(i, n)| n.as_ref().map(|_| i as u32))
            .collect()
    }

    // Edges

    /// Add an edge from `a` to `b`. Self-loops are allowed; their geometry
    /// uses the loop fallback in `geometry::route`.
    pub fn add_edge(&mut self, a: u32, b: u32) -> Option<u32> {
        self.nodes.get(a as usize).and_then(|n| n.as_ref())?;
        self.nodes.get(b as usize).and_then(|n| n.as_ref())?;
        let id = self.edges.len() as u32;
        self.edges.push(Some(Edge {
            a,
            b,
            routing: EdgeRouting::default(),
            style: None,
        }));
        self.bump();
        Some(id)
    }

    pub fn remove_edge(&mut self, id: u32) -> bool {
        if let Some(slot) = self.edges.get_mut(id as usize) {
            if slot.is_some() {
                *slot = None;
                self.bump();
                return true;
            }
        }
        false
    }

    pub fn edge_count(&self) -> u32 {
        self.edges.iter().filter(|e| e.is_some()).count() as u32
    }

    pub fn edge_ids(&self) -> Vec<u32> {
        self.edges
            .iter()
            .enumerate()
            .filter_map(|(i, e)| e.as_ref().map(|_| i as u32))
            .collect()
    }

    pub fn edge_endpoints(&self, id: u32) -> Option<(u32, u32)> {
        self.edges
            .get(id as usize)
            .and_then(|e| e.as_ref())
            .map(|e| (e.a, e.b))
    }

    pub fn edge_routing(&self, id: u32) -> Option<EdgeRouting> {
        self.edges
            .get(id as usize)
            .and_then(|e| e.as_ref())
            .map(|e| e.routing)
    }

    /// Set the bend angle (degrees) of a bend-mode edge. Rejects non-finite
    /// angles and edges currently in manual mode; the previous geometry is
    /// retained on rejection.
    pub fn set_edge_bend(&mut self, id: u32, bend: f32) -> bool {
        if !bend.is_finite() {
            return false;
        }
        let edge = match self.edges.get_mut(id as usize).and_then(|e| e.as_mut()) {
            Some(e) => e,
            None => return false,
        };
        match &mut edge.routing {
            EdgeRouting::Bend { bend: b, .. } => {
                *b = bend;
            }
            EdgeRouting::Manual { .. } => return false,
        }
        self.bump();
        true
    }

    /// Set the looseness of a bend-mode edge. Negative or non-finite values
    /// are rejected, keeping the last valid geometry.
    pub fn set_edge_looseness(&mut self, id: u32, looseness: f32) -> bool {
        if !looseness.is_finite() || looseness < 0.0 {
            return false;
        }
        let edge = match self.edges.get_mut(id as usize).and_then(|e| e.as_mut()) {
            Some(e) => e,
            None => return false,
        };
        match &mut edge.routing {
            EdgeRouting::Bend { looseness: l, .. } => {
                *l = looseness;
            }
            EdgeRouting::Manual { .. } => return false,
        }
        self.bump();
        true
    }

    /// Enter manual mode with explicit control points given in absolute
    /// diagram coordinates; they are stored as offsets from the endpoints.
    /// Passing the currently derived control points makes the switch
    /// seamless on screen.
    pub fn set_control_points(&mut self, id: u32, cp1: Vec2, cp2: Vec2) -> bool {
        if !cp1.is_finite() || !cp2.is_finite() {
            return false;
        }
        let (a, b) = match self.edge_endpoints(id) {
            Some(ep) => ep,
            None => return false,
        };
        let (ax, ay) = match self.get_node(a) {
            Some(p) => p,
            None => return false,
        };
        let (bx, by) = match self.get_node(b) {
            Some(p) => p,
            None => return false,
        };
        if let Some(Some(e)) = self.edges.get_mut(id as usize) {
            e.routing = EdgeRouting::Manual {
                cp1: cp1 - Vec2::new(ax, ay),
                cp2: cp2 - Vec2::new(bx, by),
            };
        }
        self.bump();
        true
    }

    /// Return an edge to bend mode with fresh parameters. Nothing from a
    /// previous stint in either mode is carried over.
    pub fn to_bend_mode(&mut self, id: u32, bend: f32, looseness: f32) -> bool {
        if !bend.is_finite() || !looseness.is_finite() || looseness < 0.0 {
            return false;
        }
        let edge = match self.edges.get_mut(id as usize).and_then(|e| e.as_mut()) {
            Some(e) => e,
            None => return false,
        };
        edge.routing = EdgeRouting::Bend { bend, looseness };
        self.bump();
        true
    }

    /// Derived curve for an edge, cached per geometry version. A cache entry
    /// from any earlier version is ignored and recomputed.
    pub fn edge_geometry(&self, id: u32) -> Option<CurveGeometry> {
        let edge = self.edges.get(id as usize).and_then(|e| e.as_ref())?;
        if let Some((ver, geo)) = self.curve_cache.borrow().get(&id) {
            if *ver == self.geom_ver {
                return Some(*geo);
            }
        }
        let (ax, ay) = self.get_node(edge.a)?;
        let (bx, by) = self.get_node(edge.b)?;
        let geo = derive_curve(Vec2::new(ax, ay), Vec2::new(bx, by), &edge.routing);
        self.curve_cache
            .borrow_mut()
            .insert(id, (self.geom_ver, geo));
        Some(geo)
    }

    // Style references (by name; resolved through an injected registry so a
    // registry reload can never leave a dangling pointer).

    pub fn set_node_style_name(&mut self, id: u32, name: Option<&str>) -> bool {
        if let Some(Some(n)) = self.nodes.get_mut(id as usize) {
            n.style = normalize_style_name(name);
            return true;
        }
        false
    }

    pub fn node_style_name(&self, id: u32) -> Option<&str> {
        self.nodes
            .get(id as usize)
            .and_then(|n| n.as_ref())
            .and_then(|n| n.style.as_deref())
    }

    pub fn set_edge_style_name(&mut self, id: u32, name: Option<&str>) -> bool {
        if let Some(Some(e)) = self.edges.get_mut(id as usize) {
            e.style = normalize_style_name(name);
            return true;
        }
        false
    }

    pub fn edge_style_name(&self, id: u32) -> Option<&str> {
        self.edges
            .get(id as usize)
            .and_then(|e| e.as_ref())
            .and_then(|e| e.style.as_deref())
    }

    /// Resolve a node's style against the given registry. `None` covers "no
    /// style set", "name no longer present", and the reserved sentinel alike.
    pub fn node_style_of<'r>(&self, id: u32, registry: &'r StyleRegistry) -> Option<&'r Style> {
        self.node_style_name(id)
            .and_then(|name| registry.node_style(name))
    }

    pub fn edge_style_of<'r>(&self, id: u32, registry: &'r StyleRegistry) -> Option<&'r Style> {
        self.edge_style_name(id)
            .and_then(|name| registry.edge_style(name))
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.edges.clear();
        self.curve_cache.borrow_mut().clear();
        self.bump();
    }

    // JSON snapshots

    pub fn to_json_value(&self) -> serde_json::Value {
        json::to_json_impl(self)
    }

    pub fn from_json_value(&mut self, v: serde_json::Value) -> bool {
        json::from_json_impl(self, v)
    }
}

/// The reserved sentinel never persists as a real style reference.
fn normalize_style_name(name: Option<&str>) -> Option<String> {
    match name {
        Some(n) if !n.is_empty() && n != RESERVED_NONE => Some(n.to_string()),
        _ => None,
    }
}
