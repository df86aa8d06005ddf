//! Wire documents exchanged with the surrounding tooling.
//!
//! These mirror the JSON layout one-to-one and carry unscaled coordinates.
//! Structural checks beyond what serde enforces (index ranges, degenerate
//! edges) happen when a document is ingested by `judge::types`.

use serde::{Deserialize, Serialize};

use crate::error::{Result, ValidationError};

/// The four rule modifiers a problem can hand out.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BonusKind {
    Globalist,
    BreakALeg,
    Wallhack,
    Superflex,
}

impl std::fmt::Display for BonusKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            BonusKind::Globalist => "GLOBALIST",
            BonusKind::BreakALeg => "BREAK_A_LEG",
            BonusKind::Wallhack => "WALLHACK",
            BonusKind::Superflex => "SUPERFLEX",
        };
        f.write_str(name)
    }
}

/// A bonus that can be harvested on this problem for use on `problem`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BonusDoc {
    pub bonus: BonusKind,
    pub position: [i64; 2],
    pub problem: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edge: Option<[usize; 2]>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FigureDoc {
    pub vertices: Vec<[i64; 2]>,
    pub edges: Vec<[usize; 2]>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProblemDoc {
    pub hole: Vec<[i64; 2]>,
    pub epsilon: u64,
    pub figure: FigureDoc,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bonuses: Vec<BonusDoc>,
}

/// A claim that the solver spends a previously earned bonus.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BonusRequestDoc {
    pub bonus: BonusKind,
    pub problem: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edge: Option<[usize; 2]>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolutionDoc {
    pub vertices: Vec<[i64; 2]>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bonuses: Vec<BonusRequestDoc>,
}

impl ProblemDoc {
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| ValidationError::Parse(format!("problem: {e}")))
    }
}

impl SolutionDoc {
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| ValidationError::Parse(format!("solution: {e}")))
    }
}
