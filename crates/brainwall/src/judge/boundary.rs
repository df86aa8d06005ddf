//! Containment of figure edges inside the hole.
//!
//! The hole is walked as consecutive triples `(p1, p2, p3)`; each figure edge
//! is tested against hole edge `(p1, p2)` with knowledge of the turn at `p2`.
//! "Inside" of a hole edge is the right-turn side, so holes are expected in
//! counterclockwise order.
//!
//! The corner rule is asymmetric: a figure edge running through a
//! convex corner must have both endpoints inside edge `(p1, p2)`, while at a
//! reflex corner each endpoint only needs to be inside one of the two adjacent
//! hole edges. This is the judging contract, not a geometric identity; keep
//! both branches as they are.

use serde::Serialize;
use tracing::debug;

use super::types::Edge;
use crate::error::{Result, ValidationError};
use crate::geom::{between, right_turn, segments_cross, segments_touch, Point};

/// Which rule rejected a figure edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum BoundaryCause {
    /// Runs through a convex hole corner with an endpoint outside.
    ConvexCorner,
    /// Runs through a reflex hole corner with an endpoint outside both sides.
    ReflexCorner,
    /// Touches a hole edge at one point from outside.
    Touch,
    /// Crosses a hole edge.
    Crossing,
}

impl std::fmt::Display for BoundaryCause {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            BoundaryCause::ConvexCorner => "through convex corner",
            BoundaryCause::ReflexCorner => "through reflex corner",
            BoundaryCause::Touch => "touches from outside",
            BoundaryCause::Crossing => "crosses hole edge",
        };
        f.write_str(s)
    }
}

/// Judge figure edge `[a, b]` against hole edge `(p1, p2)` with corner `p2`.
pub fn corner_violation(
    p1: Point,
    p2: Point,
    p3: Point,
    a: Point,
    b: Point,
) -> Option<BoundaryCause> {
    if between(a, p2, b) {
        let a_in = right_turn(p1, p2, a);
        let b_in = right_turn(p1, p2, b);
        if right_turn(p1, p2, p3) {
            if !(a_in && b_in) {
                return Some(BoundaryCause::ConvexCorner);
            }
        } else {
            let a_in_next = right_turn(a, p2, p3);
            let b_in_next = right_turn(b, p2, p3);
            if !((a_in || a_in_next) && (b_in || b_in_next)) {
                return Some(BoundaryCause::ReflexCorner);
            }
        }
        None
    } else if between(a, p1, b) {
        // handled by the previous triple, whose corner is p1
        None
    } else if segments_touch(p1, p2, a, b) {
        if right_turn(p1, p2, a) && right_turn(p1, p2, b) {
            None
        } else {
            Some(BoundaryCause::Touch)
        }
    } else if segments_cross(p1, p2, a, b) {
        Some(BoundaryCause::Crossing)
    } else {
        None
    }
}

/// Check all `edges` of `pose` against every hole triple.
///
/// Edges incident to `exempt` are skipped entirely.
pub fn check_containment(
    hole: &[Point],
    edges: &[Edge],
    pose: &[Point],
    exempt: Option<usize>,
) -> Result<()> {
    let n = hole.len();
    for i in 0..n {
        let p1 = hole[i];
        let p2 = hole[(i + 1) % n];
        let p3 = hole[(i + 2) % n];
        for &edge in edges {
            if exempt.is_some_and(|v| edge.touches(v)) {
                continue;
            }
            if let Some(cause) = corner_violation(p1, p2, p3, pose[edge.0], pose[edge.1]) {
                return Err(ValidationError::OutOfBoundary {
                    corner: (i + 1) % n,
                    edge,
                    cause,
                });
            }
        }
    }
    Ok(())
}

/// Containment with one vertex allowed outside.
///
/// Runs the plain check first; on failure tries exempting each vertex in index
/// order and accepts on the first exemption that passes. Returns the exempted
/// vertex, if one was needed. The error of the plain check is reported when no
/// single exemption helps.
pub fn check_containment_wallhack(
    hole: &[Point],
    edges: &[Edge],
    pose: &[Point],
) -> Result<Option<usize>> {
    let first = match check_containment(hole, edges, pose, None) {
        Ok(()) => return Ok(None),
        Err(e) => e,
    };
    for v in 0..pose.len() {
        if check_containment(hole, edges, pose, Some(v)).is_ok() {
            debug!(vertex = v, "wallhack exemption accepted");
            return Ok(Some(v));
        }
        debug!(vertex = v, "wallhack exemption rejected");
    }
    Err(first)
}
