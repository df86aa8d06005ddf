use super::types::SCORE_SCALE;
use crate::error::{Result, ValidationError};
use crate::geom::{sq_dist, Point};

/// Sum over hole vertices of the squared distance to the nearest pose
/// vertex, in unscaled units. Lower is better.
///
/// Each term fits `u64`; the sum is taken in `u128` and refused if the
/// final score does not fit.
pub fn dislike(hole: &[Point], pose: &[Point]) -> Result<u64> {
    let total: u128 = hole
        .iter()
        .filter_map(|&h| pose.iter().map(|&v| sq_dist(h, v).unsigned_abs()).min())
        .map(u128::from)
        .sum();
    u64::try_from(total / u128::from(SCORE_SCALE))
        .map_err(|_| ValidationError::Parse(format!("dislike {total} does not fit in 64 bits")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perfect_cover_scores_zero() {
        let hole = [Point::new(0, 0), Point::new(4, 0), Point::new(0, 4)];
        assert_eq!(dislike(&hole, &hole), Ok(0));
    }

    #[test]
    fn nearest_vertex_is_used_and_scale_removed() {
        // scaled coordinates: every squared distance is a multiple of 4
        let hole = [Point::new(0, 0), Point::new(10, 0)];
        let pose = [Point::new(0, 2), Point::new(0, 40), Point::new(10, 4)];
        // (4 + 16) / 4
        assert_eq!(dislike(&hole, &pose), Ok(5));
    }

    #[test]
    fn far_corners_sum_past_u64() {
        // eight terms of 2 * (2^30)^2 = 2^61 sum to 2^64
        let corner = Point::new(1 << 29, 1 << 29);
        let hole = [corner; 8];
        let pose = [-corner];
        assert_eq!(dislike(&hole, &pose), Ok(1 << 62));
    }
}
