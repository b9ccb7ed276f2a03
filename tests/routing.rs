use camber::geometry::route::{derive_curve, K_SHAPE};
use camber::geometry::tolerance::EPS_GEOM;
use camber::model::{EdgeRouting, Vec2};
use camber::Graph;

fn bend(bend: f32, looseness: f32) -> EdgeRouting {
    EdgeRouting::Bend { bend, looseness }
}

#[test]
fn zero_bend_degenerates_to_segment() {
    let g = derive_curve(Vec2::new(-1.0, 2.0), Vec2::new(3.0, 2.0), &bend(0.0, 1.0));
    // Both control points on the tail->head segment.
    assert!((g.cp1.y - 2.0).abs() < EPS_GEOM);
    assert!((g.cp2.y - 2.0).abs() < EPS_GEOM);
    assert!(g.cp1.x > -1.0 && g.cp1.x < 3.0);
    assert!(g.cp2.x > -1.0 && g.cp2.x < 3.0);
    // And the parametric midpoint is the chord midpoint.
    let mid = g.mid();
    assert!((mid.x - 1.0).abs() < EPS_GEOM);
    assert!((mid.y - 2.0).abs() < EPS_GEOM);
}

#[test]
fn thirty_degree_bend_is_symmetric_and_bulges_up() {
    let g = derive_curve(Vec2::new(0.0, 0.0), Vec2::new(2.0, 0.0), &bend(30.0, 1.0));
    assert!(g.mid().y > 0.0);
    // Control points equidistant from the baseline (y = 0).
    assert!((g.cp1.y - g.cp2.y).abs() < EPS_GEOM);
    // Mirror symmetry about x = 1.
    assert!((g.cp1.x - (2.0 - g.cp2.x)).abs() < EPS_GEOM);
    // Expected control distance: len * looseness * K_SHAPE.
    assert!((g.cp_distance() - 2.0 * K_SHAPE).abs() < EPS_GEOM);
}

#[test]
fn negative_bend_bulges_down() {
    let g = derive_curve(Vec2::new(0.0, 0.0), Vec2::new(2.0, 0.0), &bend(-30.0, 1.0));
    assert!(g.mid().y < 0.0);
}

#[test]
fn bend_respects_baseline_direction() {
    // Same bend on a reversed edge bulges to the other side of the plane.
    let fwd = derive_curve(Vec2::new(0.0, 0.0), Vec2::new(2.0, 0.0), &bend(30.0, 1.0));
    let rev = derive_curve(Vec2::new(2.0, 0.0), Vec2::new(0.0, 0.0), &bend(30.0, 1.0));
    assert!(fwd.mid().y > 0.0);
    assert!(rev.mid().y < 0.0);
}

#[test]
fn self_loop_is_visible_and_scales_with_looseness() {
    let p = Vec2::new(0.5, -0.5);
    let small = derive_curve(p, p, &bend(0.0, 1.0));
    assert!((small.cp1 - p).length() > EPS_GEOM);
    assert!((small.cp2 - p).length() > EPS_GEOM);
    assert!((small.cp1 - small.cp2).length() > EPS_GEOM);

    let big = derive_curve(p, p, &bend(0.0, 2.0));
    assert!(big.cp_distance() > small.cp_distance());
}

#[test]
fn cp_distance_takes_the_greater_side() {
    let g = derive_curve(
        Vec2::new(0.0, 0.0),
        Vec2::new(2.0, 0.0),
        &EdgeRouting::Manual {
            cp1: Vec2::new(0.0, 0.5),
            cp2: Vec2::new(0.0, 2.0),
        },
    );
    assert!((g.cp_distance() - 2.0).abs() < EPS_GEOM);
}

#[test]
fn mode_switch_does_not_resurrect_stale_state() {
    let mut g = Graph::new();
    let a = g.add_node(0.0, 0.0).unwrap();
    let b = g.add_node(2.0, 0.0).unwrap();
    let e = g.add_edge(a, b).unwrap();

    g.set_edge_bend(e, 45.0);
    let bent = g.edge_geometry(e).unwrap();

    // Drag into manual mode somewhere else entirely.
    g.set_control_points(e, Vec2::new(1.0, -3.0), Vec2::new(1.0, -3.5));
    let manual = g.edge_geometry(e).unwrap();
    assert!((manual.cp1 - bent.cp1).length() > EPS_GEOM);

    // Back to bend mode with fresh parameters: the old 45-degree curve is
    // gone, not restored.
    g.to_bend_mode(e, 0.0, 1.0);
    let back = g.edge_geometry(e).unwrap();
    assert!(back.cp1.y.abs() < EPS_GEOM);
    assert!(back.cp2.y.abs() < EPS_GEOM);
    assert_eq!(
        g.edge_routing(e),
        Some(EdgeRouting::Bend {
            bend: 0.0,
            looseness: 1.0
        })
    );
}

#[test]
fn manual_mode_follows_moving_endpoints() {
    let mut g = Graph::new();
    let a = g.add_node(0.0, 0.0).unwrap();
    let b = g.add_node(2.0, 0.0).unwrap();
    let e = g.add_edge(a, b).unwrap();
    g.set_control_points(e, Vec2::new(0.5, 1.0), Vec2::new(1.5, 1.0));

    g.move_node(a, 1.0, 1.0);
    let geo = g.edge_geometry(e).unwrap();
    // Offset preserved relative to the moved tail.
    assert!((geo.cp1 - Vec2::new(1.5, 2.0)).length() < EPS_GEOM);
}

#[test]
fn midpoint_is_parametric_not_chordal() {
    let g = derive_curve(Vec2::new(0.0, 0.0), Vec2::new(2.0, 0.0), &bend(60.0, 1.5));
    let chord_mid = Vec2::new(1.0, 0.0);
    assert!((g.mid() - chord_mid).length() > EPS_GEOM);
    assert_eq!(g.mid(), g.bezier().eval(0.5));
}
