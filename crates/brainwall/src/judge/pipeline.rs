//! Validation orchestrator.
//!
//! `Parsed → BonusApplied → EdgeChecked → BoundaryChecked → Scored`, stopping
//! at the first failing check. Each call is a pure function of its inputs.

use std::borrow::Cow;

use serde::Serialize;
use tracing::debug;

use super::bonus::{self, Modifier};
use super::boundary::{check_containment, check_containment_wallhack};
use super::length::check_lengths;
use super::score::dislike;
use super::types::{ingest_points, BonusSpec, Problem, Solution};
use crate::doc::{BonusDoc, ProblemDoc, SolutionDoc};
use crate::error::{Result, ValidationError};

/// Orchestrator states, in order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum Stage {
    Parsed,
    BonusApplied,
    EdgeChecked,
    BoundaryChecked,
    Scored,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(self, f)
    }
}

/// Per-call configuration.
#[derive(Clone, Copy, Debug)]
pub struct JudgeCfg {
    /// Apply this modifier regardless of the solution's request. The request,
    /// if any, is then not verified.
    pub forced: Option<Modifier>,
    /// Run the bonus-collection pass on acceptance.
    pub collect_bonuses: bool,
}

impl Default for JudgeCfg {
    fn default() -> Self {
        Self {
            forced: None,
            collect_bonuses: true,
        }
    }
}

/// Outcome of an accepted placement.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Judgement {
    pub score: u64,
    /// Problem bonuses whose position is covered by a solution vertex.
    pub collected: Vec<BonusDoc>,
}

/// Judge documents using the solution's own bonus request.
pub fn validate(problem: &ProblemDoc, solution: &SolutionDoc) -> Result<Judgement> {
    validate_with(problem, solution, JudgeCfg::default())
}

pub fn validate_with(
    problem: &ProblemDoc,
    solution: &SolutionDoc,
    cfg: JudgeCfg,
) -> Result<Judgement> {
    let problem = Problem::from_doc(problem)?;
    let solution = Solution::from_doc(solution)?;
    judge(&problem, &solution, cfg)
}

/// Judge already-ingested (scaled) inputs.
pub fn judge(problem: &Problem, solution: &Solution, cfg: JudgeCfg) -> Result<Judgement> {
    let outcome = run(problem, solution, cfg);
    if let Err(e) = &outcome {
        debug!(stage = %e.stage(), kind = e.kind(), "rejected: {e}");
    }
    outcome
}

fn run(problem: &Problem, solution: &Solution, cfg: JudgeCfg) -> Result<Judgement> {
    let modifier = match cfg.forced {
        Some(m) => Some(m),
        None => bonus::resolve_request(problem, solution)?,
    };
    let figure = match modifier {
        Some(Modifier::BreakALeg(edge)) => Cow::Owned(bonus::break_a_leg(&problem.figure, edge)?),
        _ => Cow::Borrowed(&problem.figure),
    };
    if solution.vertices.len() != figure.vertices.len() {
        return Err(ValidationError::VertexCountMismatch {
            expected: figure.vertices.len(),
            actual: solution.vertices.len(),
        });
    }
    debug!(stage = %Stage::BonusApplied, modifier = ?modifier, "advance");

    let pose = &solution.vertices;
    let report = check_lengths(&figure, pose, problem.epsilon, bonus::length_mode(modifier))?;
    debug!(stage = %Stage::EdgeChecked, forgiven = ?report.forgiven, "advance");

    if modifier == Some(Modifier::Wallhack) {
        let exempt = check_containment_wallhack(&problem.hole, &figure.edges, pose)?;
        debug!(stage = %Stage::BoundaryChecked, exempt = ?exempt, "advance");
    } else {
        check_containment(&problem.hole, &figure.edges, pose, None)?;
        debug!(stage = %Stage::BoundaryChecked, "advance");
    }

    let score = dislike(&problem.hole, pose)?;
    debug!(stage = %Stage::Scored, score, "advance");

    let collected = if cfg.collect_bonuses {
        bonus::collect(&problem.bonuses, pose)
            .into_iter()
            .map(BonusSpec::to_doc)
            .collect()
    } else {
        Vec::new()
    };
    Ok(Judgement { score, collected })
}

/// Bonuses of `problem` covered by a vertex of `solution`, without judging
/// the placement itself. Out-of-range solution points cover nothing.
pub fn collected_bonuses(problem: &ProblemDoc, solution: &SolutionDoc) -> Vec<BonusDoc> {
    let Ok(pose) = ingest_points(&solution.vertices, "solution") else {
        return Vec::new();
    };
    let specs: Vec<BonusSpec> = problem
        .bonuses
        .iter()
        .filter(|b| ingest_points(&[b.position], "bonus").is_ok())
        .map(BonusSpec::from)
        .collect();
    bonus::collect(&specs, &pose)
        .into_iter()
        .map(BonusSpec::to_doc)
        .collect()
}

/// Flat, serializable record of one validation call.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ValidationResult {
    pub accepted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<u64>,
    pub collected_bonuses: Vec<BonusDoc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure_reason: Option<FailureReason>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FailureReason {
    pub kind: &'static str,
    pub stage: Stage,
    pub message: String,
}

impl From<&ValidationError> for FailureReason {
    fn from(e: &ValidationError) -> Self {
        Self {
            kind: e.kind(),
            stage: e.stage(),
            message: e.to_string(),
        }
    }
}

impl From<&Result<Judgement>> for ValidationResult {
    fn from(outcome: &Result<Judgement>) -> Self {
        match outcome {
            Ok(j) => Self {
                accepted: true,
                score: Some(j.score),
                collected_bonuses: j.collected.clone(),
                failure_reason: None,
            },
            Err(e) => Self {
                accepted: false,
                score: None,
                collected_bonuses: Vec::new(),
                failure_reason: Some(e.into()),
            },
        }
    }
}
