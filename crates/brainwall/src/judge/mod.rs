//! The judge: ingestion, checkers, bonus engine and orchestration.
//!
//! Purpose
//! - Turn a problem/solution document pair into an accept (with score and
//!   collected bonuses) or a structured rejection.
//!
//! Conventions
//! - Everything here works in the doubled coordinate space of `types`;
//!   documents going in and bonuses coming out are unscaled.
//! - Rejections are ordinary `Err` values; nothing here panics on bad input.
//!
//! Code cross-refs: `geom::{between,right_turn,segments_cross,segments_touch}`,
//! `geom::ratio` for the tolerance arithmetic.

pub mod bonus;
pub mod boundary;
pub mod length;
mod pipeline;
pub mod score;
pub mod types;

pub use bonus::Modifier;
pub use boundary::BoundaryCause;
pub use length::LengthMode;
pub use pipeline::{
    collected_bonuses, judge, validate, validate_with, FailureReason, JudgeCfg, Judgement, Stage,
    ValidationResult,
};
pub use types::{BonusRequest, BonusSpec, Edge, Figure, Problem, Solution};
