//! Exact ratio arithmetic for tolerance checks.
//!
//! Single comparisons use `i128` cross-multiplication. Sums of ratios with
//! unrelated denominators grow without bound, so those use `BigRational`.

use std::cmp::Ordering;

use num_bigint::BigInt;
use num_rational::BigRational;

/// Tolerances are expressed in parts per million.
pub const PPM: i64 = 1_000_000;

/// Compares `a / b` against `c / d`. Both denominators must be positive.
#[inline]
pub fn cmp_ratio(a: i128, b: i128, c: i128, d: i128) -> Ordering {
    debug_assert!(b > 0 && d > 0, "denominators must be positive");
    (a * d).cmp(&(c * b))
}

/// True iff `|s/p - 1| > eps / PPM`. `p` must be positive.
#[inline]
pub fn exceeds_ppm(s: i64, p: i64, eps: i64) -> bool {
    let stretch = (i128::from(s) - i128::from(p)).abs();
    cmp_ratio(stretch, i128::from(p), i128::from(eps), i128::from(PPM)) == Ordering::Greater
}

/// `|s/p - 1|` as an exact rational. `p` must be positive.
pub fn deviation(s: i64, p: i64) -> BigRational {
    BigRational::new(BigInt::from((s - p).abs()), BigInt::from(p))
}

/// `eps / PPM` as an exact rational.
pub fn ppm(eps: i64) -> BigRational {
    BigRational::new(BigInt::from(eps), BigInt::from(PPM))
}
