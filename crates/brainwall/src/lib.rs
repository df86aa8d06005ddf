//! Judge for the hole-and-figure placement puzzle.
//!
//! Given a problem (a polygonal hole plus a flexible figure whose edges carry
//! squared-length tolerances) and a proposed placement of the figure's
//! vertices, decide whether the placement is admissible and, if so, score it.
//!
//! Layout
//! - `doc`: wire documents exactly as the surrounding tooling exchanges them.
//! - `geom`: exact integer arithmetic and segment predicates.
//! - `judge`: the scaled internal model, the individual checkers, the bonus
//!   engine and the orchestrating `validate` entry points.
//!
//! All arithmetic is exact. Coordinates are doubled on ingestion so that a
//! split edge's midpoint stays integral; this never leaks out of `judge`.

pub mod doc;
pub mod error;
pub mod geom;
pub mod judge;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use doc::{BonusDoc, BonusKind, BonusRequestDoc, FigureDoc, ProblemDoc, SolutionDoc};
pub use error::{Result, ValidationError};
pub use judge::{
    collected_bonuses, validate, validate_with, JudgeCfg, Judgement, Modifier, Stage,
    ValidationResult,
};

/// Common exports for callers that judge documents.
pub mod prelude {
    pub use crate::doc::{BonusDoc, BonusKind, ProblemDoc, SolutionDoc};
    pub use crate::error::ValidationError;
    pub use crate::geom::Point;
    pub use crate::judge::{
        validate, validate_with, JudgeCfg, Judgement, Modifier, ValidationResult,
    };
}
