use super::*;
use crate::doc::TraceColor;

fn g(gx: i64, gy: i64) -> GridPoint {
    GridPoint::new(gx, gy)
}

fn black() -> Rgb {
    TraceColor::Black.rgb()
}

// =============================================================
// ActiveTrace
// =============================================================

#[test]
fn active_trace_starts_with_one_point() {
    let t = ActiveTrace::new(g(2, 3), black());
    assert_eq!(t.points(), &[g(2, 3)]);
}

#[test]
fn push_cell_suppresses_adjacent_duplicates() {
    let mut t = ActiveTrace::new(g(0, 0), black());
    let added: Vec<bool> = [g(0, 0), g(1, 0), g(1, 0), g(1, 1)]
        .into_iter()
        .map(|c| t.push_cell(c))
        .collect();
    assert_eq!(added, vec![false, true, false, true]);
    assert_eq!(t.points(), &[g(0, 0), g(1, 0), g(1, 1)]);
}

#[test]
fn push_cell_allows_revisiting_non_adjacent_cell() {
    let mut t = ActiveTrace::new(g(0, 0), black());
    t.push_cell(g(1, 0));
    t.push_cell(g(0, 0));
    assert_eq!(t.points(), &[g(0, 0), g(1, 0), g(0, 0)]);
}

#[test]
fn finish_single_point_discards() {
    let mut t = ActiveTrace::new(g(4, 4), black());
    t.push_cell(g(4, 4));
    assert!(t.finish().is_none());
}

#[test]
fn finish_keeps_id_points_and_color() {
    let mut t = ActiveTrace::new(g(0, 0), TraceColor::Red.rgb());
    t.push_cell(g(0, 1));
    let id = t.id();
    let trace = t.finish().unwrap();
    assert_eq!(trace.id, id);
    assert_eq!(trace.points, vec![g(0, 0), g(0, 1)]);
    assert_eq!(trace.color, TraceColor::Red.rgb());
}

// =============================================================
// smart_route
// =============================================================

#[test]
fn route_horizontal_dominant() {
    assert_eq!(smart_route(g(0, 0), g(3, 1)), vec![g(0, 0), g(3, 0), g(3, 1)]);
}

#[test]
fn route_vertical_dominant() {
    assert_eq!(smart_route(g(0, 0), g(1, 3)), vec![g(0, 0), g(0, 3), g(1, 3)]);
}

#[test]
fn route_tie_goes_horizontal_first() {
    assert_eq!(smart_route(g(0, 0), g(2, 2)), vec![g(0, 0), g(2, 0), g(2, 2)]);
    assert_eq!(smart_route(g(0, 0), g(-2, 2)), vec![g(0, 0), g(-2, 0), g(-2, 2)]);
}

#[test]
fn route_negative_directions() {
    assert_eq!(smart_route(g(5, 5), g(1, 4)), vec![g(5, 5), g(1, 5), g(1, 4)]);
    assert_eq!(smart_route(g(5, 5), g(4, 0)), vec![g(5, 5), g(5, 0), g(4, 0)]);
}

#[test]
fn route_colinear_is_straight() {
    assert_eq!(smart_route(g(0, 0), g(4, 0)), vec![g(0, 0), g(4, 0)]);
    assert_eq!(smart_route(g(0, 0), g(0, -4)), vec![g(0, 0), g(0, -4)]);
}

#[test]
fn routed_trace_rejects_same_cell() {
    assert!(routed_trace(g(1, 1), g(1, 1), black()).is_none());
}

#[test]
fn routed_trace_uses_route_points() {
    let t = routed_trace(g(0, 0), g(3, 1), TraceColor::Blue.rgb()).unwrap();
    assert_eq!(t.points, vec![g(0, 0), g(3, 0), g(3, 1)]);
    assert_eq!(t.color, TraceColor::Blue.rgb());
}
