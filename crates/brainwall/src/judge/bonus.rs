//! Bonus engine: request verification, the BREAK_A_LEG figure transform,
//! modifier-to-mode mapping, and bonus collection.

use serde::Serialize;

use super::length::LengthMode;
use super::types::{BonusSpec, Edge, Figure, Problem, Solution};
use crate::doc::BonusKind;
use crate::error::{Result, ValidationError};
use crate::geom::Point;

/// An active rule modifier for one validation call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Modifier {
    Globalist,
    /// Split this problem edge at its midpoint.
    BreakALeg(Edge),
    Wallhack,
    Superflex,
}

impl Modifier {
    pub fn kind(&self) -> BonusKind {
        match self {
            Modifier::Globalist => BonusKind::Globalist,
            Modifier::BreakALeg(_) => BonusKind::BreakALeg,
            Modifier::Wallhack => BonusKind::Wallhack,
            Modifier::Superflex => BonusKind::Superflex,
        }
    }
}

/// Length mode selected by the active modifier.
pub fn length_mode(modifier: Option<Modifier>) -> LengthMode {
    match modifier {
        Some(Modifier::Globalist) => LengthMode::Global,
        Some(Modifier::Superflex) => LengthMode::Superflex,
        _ => LengthMode::PerEdge,
    }
}

/// Turn the solution's request, if any, into a modifier.
///
/// The requested kind and target must match a bonus listed by the problem
/// whose position is occupied by one of the solution's vertices.
pub fn resolve_request(problem: &Problem, solution: &Solution) -> Result<Option<Modifier>> {
    let Some(req) = solution.request else {
        return Ok(None);
    };
    let mut offered = problem
        .bonuses
        .iter()
        .filter(|b| b.kind == req.kind && b.target == req.target)
        .peekable();
    if offered.peek().is_none() {
        return Err(ValidationError::InvalidBonusRequest(format!(
            "{} for problem {} is not offered here",
            req.kind, req.target
        )));
    }
    if !offered.any(|b| solution.vertices.contains(&b.position)) {
        return Err(ValidationError::InvalidBonusRequest(format!(
            "{} for problem {} was not collected by this solution",
            req.kind, req.target
        )));
    }
    let modifier = match req.kind {
        BonusKind::Globalist => Modifier::Globalist,
        BonusKind::Wallhack => Modifier::Wallhack,
        BonusKind::Superflex => Modifier::Superflex,
        BonusKind::BreakALeg => {
            let edge = req.edge.ok_or_else(|| {
                ValidationError::InvalidBonusRequest("BREAK_A_LEG request names no edge".into())
            })?;
            Modifier::BreakALeg(edge)
        }
    };
    Ok(Some(modifier))
}

/// Derived figure for a BREAK_A_LEG call.
pub fn break_a_leg(figure: &Figure, edge: Edge) -> Result<Figure> {
    let at = figure.position_of(edge).ok_or_else(|| {
        ValidationError::InvalidBonusRequest(format!("edge {edge} is not in the figure"))
    })?;
    Ok(figure.split_edge(at))
}

/// Bonuses whose position coincides with a vertex of `pose`.
pub fn collect<'a>(bonuses: &'a [BonusSpec], pose: &[Point]) -> Vec<&'a BonusSpec> {
    bonuses
        .iter()
        .filter(|b| pose.contains(&b.position))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::judge::types::BonusRequest;

    fn spec(kind: BonusKind, at: (i64, i64), target: u32) -> BonusSpec {
        BonusSpec {
            kind,
            position: Point::new(at.0, at.1),
            target,
            edge: None,
        }
    }

    fn problem(bonuses: Vec<BonusSpec>) -> Problem {
        Problem {
            hole: vec![Point::new(0, 0), Point::new(20, 0), Point::new(0, 20)],
            epsilon: 0,
            figure: Figure {
                vertices: vec![Point::new(2, 2), Point::new(6, 2)],
                edges: vec![Edge(0, 1)],
            },
            bonuses,
        }
    }

    fn solution(request: Option<BonusRequest>) -> Solution {
        Solution {
            vertices: vec![Point::new(2, 2), Point::new(6, 2)],
            request,
        }
    }

    fn request(kind: BonusKind, target: u32) -> Option<BonusRequest> {
        Some(BonusRequest {
            kind,
            target,
            edge: None,
        })
    }

    #[test]
    fn no_request_means_no_modifier() {
        assert_eq!(resolve_request(&problem(vec![]), &solution(None)), Ok(None));
    }

    #[test]
    fn collected_request_is_granted() {
        let p = problem(vec![spec(BonusKind::Wallhack, (6, 2), 9)]);
        let s = solution(request(BonusKind::Wallhack, 9));
        assert_eq!(resolve_request(&p, &s), Ok(Some(Modifier::Wallhack)));
    }

    #[test]
    fn unknown_or_uncollected_request_is_refused() {
        let p = problem(vec![spec(BonusKind::Globalist, (4, 4), 9)]);
        // wrong target
        let s = solution(request(BonusKind::Globalist, 8));
        assert!(matches!(
            resolve_request(&p, &s),
            Err(ValidationError::InvalidBonusRequest(_))
        ));
        // right target, but no vertex on (4, 4)
        let s = solution(request(BonusKind::Globalist, 9));
        assert!(matches!(
            resolve_request(&p, &s),
            Err(ValidationError::InvalidBonusRequest(msg)) if msg.contains("not collected")
        ));
    }

    #[test]
    fn break_a_leg_request_needs_an_edge() {
        let p = problem(vec![spec(BonusKind::BreakALeg, (2, 2), 4)]);
        let s = solution(request(BonusKind::BreakALeg, 4));
        assert!(resolve_request(&p, &s).is_err());
        let s = solution(Some(BonusRequest {
            kind: BonusKind::BreakALeg,
            target: 4,
            edge: Some(Edge(1, 0)),
        }));
        assert_eq!(
            resolve_request(&p, &s),
            Ok(Some(Modifier::BreakALeg(Edge(1, 0))))
        );
    }

    #[test]
    fn split_adds_midpoint_vertex_and_one_edge() {
        let f = Figure {
            vertices: vec![Point::new(0, 0), Point::new(6, 2), Point::new(0, 8)],
            edges: vec![Edge(0, 1), Edge(1, 2), Edge(2, 0)],
        };
        let g = break_a_leg(&f, Edge(2, 1)).unwrap();
        assert_eq!(g.vertices.len(), 4);
        assert_eq!(g.edges.len(), 4);
        assert_eq!(g.vertices[3], Point::new(3, 5));
        assert_eq!(g.edges, vec![Edge(0, 1), Edge(1, 3), Edge(2, 0), Edge(2, 3)]);
    }

    #[test]
    fn split_of_missing_edge_is_refused() {
        let f = problem(vec![]).figure;
        assert!(matches!(
            break_a_leg(&f, Edge(0, 5)),
            Err(ValidationError::InvalidBonusRequest(_))
        ));
    }

    #[test]
    fn collection_matches_exact_positions() {
        let bonuses = vec![
            spec(BonusKind::Globalist, (2, 2), 1),
            spec(BonusKind::Superflex, (3, 2), 2),
        ];
        let got = collect(&bonuses, &[Point::new(2, 2), Point::new(6, 2)]);
        assert_eq!(got, vec![&bonuses[0]]);
        assert!(collect(&bonuses, &[Point::new(0, 0)]).is_empty());
    }

    #[test]
    fn modes_follow_modifiers() {
        assert_eq!(length_mode(None), LengthMode::PerEdge);
        assert_eq!(length_mode(Some(Modifier::Wallhack)), LengthMode::PerEdge);
        assert_eq!(length_mode(Some(Modifier::Globalist)), LengthMode::Global);
        assert_eq!(length_mode(Some(Modifier::Superflex)), LengthMode::Superflex);
        assert_eq!(Modifier::BreakALeg(Edge(0, 1)).kind(), BonusKind::BreakALeg);
    }
}
