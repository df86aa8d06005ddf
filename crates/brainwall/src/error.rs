use num_rational::BigRational;
use thiserror::Error;

use crate::judge::{BoundaryCause, Edge, Stage};

/// Why a problem/solution pair was not accepted.
///
/// The first three variants mean the input itself is unusable; the rest are
/// ordinary geometric rejections of a well-formed placement.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("malformed input: {0}")]
    Parse(String),

    #[error("solution has {actual} vertices, expected {expected}")]
    VertexCountMismatch { expected: usize, actual: usize },

    #[error("invalid bonus request: {0}")]
    InvalidBonusRequest(String),

    #[error("edge {edge} stretched by {deviation}, limit is {limit}")]
    EdgeLengthViolation {
        edge: Edge,
        /// `|s/p - 1|` for the offending edge.
        deviation: BigRational,
        limit: BigRational,
    },

    #[error("total stretch {total} exceeds {limit}")]
    GlobalToleranceExceeded {
        total: BigRational,
        limit: BigRational,
    },

    #[error("edge {edge} leaves the hole at corner {corner} ({cause})")]
    OutOfBoundary {
        /// Index of the hole vertex at the middle of the offending triple.
        corner: usize,
        edge: Edge,
        cause: BoundaryCause,
    },
}

impl ValidationError {
    /// Stable name of the failure kind, used in machine-readable reports.
    pub fn kind(&self) -> &'static str {
        match self {
            ValidationError::Parse(_) => "ParseError",
            ValidationError::VertexCountMismatch { .. } => "VertexCountMismatch",
            ValidationError::InvalidBonusRequest(_) => "InvalidBonusRequest",
            ValidationError::EdgeLengthViolation { .. } => "EdgeLengthViolation",
            ValidationError::GlobalToleranceExceeded { .. } => "GlobalToleranceExceeded",
            ValidationError::OutOfBoundary { .. } => "OutOfBoundary",
        }
    }

    /// The stage whose check produced this rejection.
    pub fn stage(&self) -> Stage {
        match self {
            ValidationError::Parse(_) => Stage::Parsed,
            ValidationError::VertexCountMismatch { .. }
            | ValidationError::InvalidBonusRequest(_) => Stage::BonusApplied,
            ValidationError::EdgeLengthViolation { .. }
            | ValidationError::GlobalToleranceExceeded { .. } => Stage::EdgeChecked,
            ValidationError::OutOfBoundary { .. } => Stage::BoundaryChecked,
        }
    }

    /// True for rejections of a well-formed placement.
    pub fn is_geometric(&self) -> bool {
        matches!(
            self,
            ValidationError::EdgeLengthViolation { .. }
                | ValidationError::GlobalToleranceExceeded { .. }
                | ValidationError::OutOfBoundary { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, ValidationError>;
