//! JSON snapshots of the diagram: nodes, edges, routings and style names.
//!
//! Loading is all-or-nothing: the incoming value is fully validated into a
//! fresh node/edge arena before the graph is touched, so a malformed snapshot
//! leaves the current document intact.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::geometry::limits;
use crate::model::{Edge, EdgeRouting, Node};
use crate::Graph;

const DOC_VERSION: u32 = 1;

#[derive(Serialize, Deserialize)]
struct NodeSer {
    id: u32,
    x: f32,
    y: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    style: Option<String>,
}

#[derive(Serialize, Deserialize)]
struct EdgeSer {
    id: u32,
    a: u32,
    b: u32,
    #[serde(flatten)]
    routing: EdgeRouting,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    style: Option<String>,
}

#[derive(Serialize, Deserialize)]
struct Doc {
    version: u32,
    nodes: Vec<NodeSer>,
    edges: Vec<EdgeSer>,
}

pub fn to_json_impl(g: &Graph) -> Value {
    let mut nodes = Vec::new();
    for (i, n) in g.nodes.iter().enumerate() {
        if let Some(n) = n {
            nodes.push(NodeSer {
                id: i as u32,
                x: n.x,
                y: n.y,
                style: n.style.clone(),
            });
        }
    }
    let mut edges = Vec::new();
    for (i, e) in g.edges.iter().enumerate() {
        if let Some(e) = e {
            edges.push(EdgeSer {
                id: i as u32,
                a: e.a,
                b: e.b,
                routing: e.routing,
                style: e.style.clone(),
            });
        }
    }
    serde_json::to_value(Doc {
        version: DOC_VERSION,
        nodes,
        edges,
    })
    .unwrap_or(Value::Null)
}

pub fn from_json_impl(g: &mut Graph, v: Value) -> bool {
    let doc: Doc = match serde_json::from_value(v) {
        Ok(d) => d,
        Err(_) => return false,
    };
    if doc.version != DOC_VERSION {
        return false;
    }

    // Caps first: ids are slot indices, so they must stay under the scene
    // caps before any arena is sized from them.
    if doc.nodes.len() > limits::MAX_NODES || doc.edges.len() > limits::MAX_EDGES {
        return false;
    }
    for n in &doc.nodes {
        if n.id as usize >= limits::MAX_NODES {
            return false;
        }
        if !limits::in_coord_bounds(n.x) || !limits::in_coord_bounds(n.y) {
            return false;
        }
    }
    for e in &doc.edges {
        if e.id as usize >= limits::MAX_EDGES {
            return false;
        }
        if !routing_in_bounds(&e.routing) {
            return false;
        }
    }

    let max_node = doc.nodes.iter().map(|n| n.id).max().map_or(0, |m| m + 1);
    let mut nodes: Vec<Option<Node>> = vec![None; max_node as usize];
    for n in doc.nodes {
        let slot = &mut nodes[n.id as usize];
        if slot.is_some() {
            return false;
        }
        *slot = Some(Node {
            x: n.x,
            y: n.y,
            style: n.style,
        });
    }

    let max_edge = doc.edges.iter().map(|e| e.id).max().map_or(0, |m| m + 1);
    let mut edges: Vec<Option<Edge>> = vec![None; max_edge as usize];
    for e in doc.edges {
        let a_ok = nodes.get(e.a as usize).map_or(false, |n| n.is_some());
        let b_ok = nodes.get(e.b as usize).map_or(false, |n| n.is_some());
        if !a_ok || !b_ok {
            return false;
        }
        let slot = &mut edges[e.id as usize];
        if slot.is_some() {
            return false;
        }
        *slot = Some(Edge {
            a: e.a,
            b: e.b,
            routing: e.routing,
            style: e.style,
        });
    }

    g.nodes = nodes;
    g.edges = edges;
    g.curve_cache.borrow_mut().clear();
    g.geom_ver += 1;
    true
}

fn routing_in_bounds(r: &EdgeRouting) -> bool {
    match *r {
        EdgeRouting::Bend { bend, looseness } => {
            bend.is_finite() && limits::in_looseness_bounds(looseness)
        }
        // Offsets: absolute control points stay in bounds if endpoints are.
        EdgeRouting::Manual { cp1, cp2 } => {
            limits::in_coord_bounds(cp1.x)
                && limits::in_coord_bounds(cp1.y)
                && limits::in_coord_bounds(cp2.x)
                && limits::in_coord_bounds(cp2.y)
        }
    }
}
