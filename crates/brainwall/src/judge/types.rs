//! Scaled internal model.
//!
//! Every coordinate from a document is multiplied by `COORD_SCALE` on the way
//! in, so that splitting an edge at its midpoint stays on the integer grid.
//! Squared lengths therefore grow by `SCORE_SCALE`, and the problem's epsilon
//! is stored multiplied by `EPS_SCALE`.

use serde::Serialize;

use crate::doc::{BonusDoc, BonusKind, BonusRequestDoc, ProblemDoc, SolutionDoc};
use crate::error::{Result, ValidationError};
use crate::geom::{sq_dist, Point};

pub const COORD_SCALE: i64 = 2;
pub const EPS_SCALE: i64 = 4;
pub const SCORE_SCALE: u64 = 4;

/// Largest absolute document coordinate accepted. Keeps squared distances
/// between scaled points inside `i64`.
pub const MAX_COORD: i64 = 1 << 28;

#[inline]
pub fn scale_point(p: [i64; 2]) -> Point {
    Point::new(p[0] * COORD_SCALE, p[1] * COORD_SCALE)
}

#[inline]
pub fn unscale_point(p: Point) -> [i64; 2] {
    [p.x / COORD_SCALE, p.y / COORD_SCALE]
}

/// Scale document points, rejecting coordinates beyond `MAX_COORD`.
pub fn ingest_points(points: &[[i64; 2]], what: &str) -> Result<Vec<Point>> {
    let range = -MAX_COORD..=MAX_COORD;
    points
        .iter()
        .map(|&p| {
            if range.contains(&p[0]) && range.contains(&p[1]) {
                Ok(scale_point(p))
            } else {
                Err(ValidationError::Parse(format!(
                    "{what} point [{}, {}] is out of range",
                    p[0], p[1]
                )))
            }
        })
        .collect()
}

/// Unordered pair of figure vertex indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Edge(pub usize, pub usize);

impl Edge {
    #[inline]
    pub fn touches(&self, v: usize) -> bool {
        self.0 == v || self.1 == v
    }
    #[inline]
    pub fn same_as(&self, other: Edge) -> bool {
        (self.0 == other.0 && self.1 == other.1) || (self.0 == other.1 && self.1 == other.0)
    }
}

impl From<[usize; 2]> for Edge {
    fn from(e: [usize; 2]) -> Self {
        Edge(e[0], e[1])
    }
}

impl std::fmt::Display for Edge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.0, self.1)
    }
}

/// Figure graph with problem-side positions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Figure {
    pub vertices: Vec<Point>,
    pub edges: Vec<Edge>,
}

impl Figure {
    /// Nominal squared length of `edge`.
    #[inline]
    pub fn sq_len(&self, edge: Edge) -> i64 {
        sq_dist(self.vertices[edge.0], self.vertices[edge.1])
    }

    pub fn position_of(&self, edge: Edge) -> Option<usize> {
        self.edges.iter().position(|e| e.same_as(edge))
    }

    /// Derived figure with edge `at` replaced by two halves meeting at a new
    /// vertex placed on its exact midpoint.
    ///
    /// The first half takes the original edge's slot; the second is appended.
    pub fn split_edge(&self, at: usize) -> Figure {
        let Edge(u, v) = self.edges[at];
        let mid = (self.vertices[u] + self.vertices[v]) / 2;
        let new = self.vertices.len();
        let mut vertices = self.vertices.clone();
        vertices.push(mid);
        let mut edges = self.edges.clone();
        edges[at] = Edge(u, new);
        edges.push(Edge(v, new));
        Figure { vertices, edges }
    }
}

/// Bonus available for harvesting on a problem.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BonusSpec {
    pub kind: BonusKind,
    pub position: Point,
    pub target: u32,
    pub edge: Option<Edge>,
}

impl BonusSpec {
    pub fn to_doc(&self) -> BonusDoc {
        BonusDoc {
            bonus: self.kind,
            position: unscale_point(self.position),
            problem: self.target,
            edge: self.edge.map(|Edge(u, v)| [u, v]),
        }
    }
}

impl From<&BonusDoc> for BonusSpec {
    fn from(doc: &BonusDoc) -> Self {
        Self {
            kind: doc.bonus,
            position: scale_point(doc.position),
            target: doc.problem,
            edge: doc.edge.map(Edge::from),
        }
    }
}

/// Solver's claim to spend a bonus on this problem.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BonusRequest {
    pub kind: BonusKind,
    pub target: u32,
    pub edge: Option<Edge>,
}

impl From<&BonusRequestDoc> for BonusRequest {
    fn from(doc: &BonusRequestDoc) -> Self {
        Self {
            kind: doc.bonus,
            target: doc.problem,
            edge: doc.edge.map(Edge::from),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Problem {
    pub hole: Vec<Point>,
    /// Tolerance in ppm, already multiplied by `EPS_SCALE`.
    pub epsilon: i64,
    pub figure: Figure,
    pub bonuses: Vec<BonusSpec>,
}

impl Problem {
    /// Scale a problem document and reject structurally broken ones.
    pub fn from_doc(doc: &ProblemDoc) -> Result<Self> {
        if doc.hole.len() < 3 {
            return Err(ValidationError::Parse(format!(
                "hole has {} vertices, need at least 3",
                doc.hole.len()
            )));
        }
        if doc.figure.vertices.is_empty() {
            return Err(ValidationError::Parse("figure has no vertices".into()));
        }
        let epsilon = i64::try_from(doc.epsilon)
            .ok()
            .and_then(|e| e.checked_mul(EPS_SCALE))
            .ok_or_else(|| ValidationError::Parse(format!("epsilon {} too large", doc.epsilon)))?;
        let figure = Figure {
            vertices: ingest_points(&doc.figure.vertices, "figure")?,
            edges: doc.figure.edges.iter().copied().map(Edge::from).collect(),
        };
        let n = figure.vertices.len();
        for &edge in &figure.edges {
            if edge.0 >= n || edge.1 >= n {
                return Err(ValidationError::Parse(format!(
                    "edge {edge} references a vertex outside 0..{n}"
                )));
            }
            if figure.sq_len(edge) == 0 {
                return Err(ValidationError::Parse(format!("edge {edge} has zero length")));
            }
        }
        let positions: Vec<[i64; 2]> = doc.bonuses.iter().map(|b| b.position).collect();
        ingest_points(&positions, "bonus")?;
        Ok(Self {
            hole: ingest_points(&doc.hole, "hole")?,
            epsilon,
            figure,
            bonuses: doc.bonuses.iter().map(BonusSpec::from).collect(),
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Solution {
    pub vertices: Vec<Point>,
    pub request: Option<BonusRequest>,
}

impl Solution {
    pub fn from_doc(doc: &SolutionDoc) -> Result<Self> {
        if doc.bonuses.len() > 1 {
            return Err(ValidationError::InvalidBonusRequest(format!(
                "{} bonuses requested, at most one allowed",
                doc.bonuses.len()
            )));
        }
        Ok(Self {
            vertices: ingest_points(&doc.vertices, "solution")?,
            request: doc.bonuses.first().map(BonusRequest::from),
        })
    }
}
