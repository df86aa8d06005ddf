//! Exact 2D geometry over integer points.
//!
//! Purpose
//! - Provide the handful of predicates the boundary check is built from
//!   (`between`, `right_turn`, `segments_cross`, `segments_touch`) and the
//!   rational comparisons used by the length checks.
//!
//! Conventions
//! - Points are `Vector2<i64>`; products are widened to `i128` so no predicate
//!   can overflow for coordinates of realistic puzzle sizes.
//! - `cross(a, b) > 0` means `b` is counterclockwise of `a`. `right_turn`
//!   includes the straight case.
//! - No tolerances anywhere: every comparison is exact.

pub mod predicates;
pub mod ratio;

pub use predicates::{
    between, cross, dot, right_turn, segments_cross, segments_touch, sq_dist, vector,
    CrossingStats,
};
pub use ratio::{cmp_ratio, deviation, exceeds_ppm, ppm, PPM};

use nalgebra::Vector2;

/// Integer point (also used for difference vectors).
pub type Point = Vector2<i64>;

#[cfg(test)]
mod tests;
