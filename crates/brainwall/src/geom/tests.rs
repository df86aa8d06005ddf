use super::*;

fn p(x: i64, y: i64) -> Point {
    Point::new(x, y)
}

#[test]
fn between_is_inclusive_of_endpoints() {
    assert!(between(p(0, 0), p(1, 0), p(2, 0)));
    assert!(between(p(0, 0), p(1, 1), p(2, 2)));
    assert!(between(p(0, 0), p(0, 0), p(2, 2)));
    assert!(!between(p(0, 0), p(-1, -1), p(2, 2)));
    assert!(!between(p(0, 0), p(1, 2), p(2, 2)));
}

#[test]
fn right_turn_sign_convention() {
    assert!(right_turn(p(10, 5), p(10, 10), p(0, 0)));
    assert!(right_turn(p(10, 10), p(10, 5), p(12, 4)));
    // straight counts as a right turn
    assert!(right_turn(p(0, 0), p(1, 0), p(2, 0)));
    assert!(!right_turn(p(0, 0), p(10, 0), p(10, -10)));
}

#[test]
fn interior_crossing_is_not_a_touch() {
    assert!(segments_cross(p(1, 1), p(3, 3), p(1, 3), p(3, 1)));
    assert!(!segments_touch(p(1, 1), p(3, 3), p(1, 3), p(3, 1)));
}

#[test]
fn disjoint_parallels_neither_cross_nor_touch() {
    assert!(!segments_cross(p(1, 3), p(3, 3), p(1, 1), p(3, 1)));
    assert!(!segments_touch(p(1, 3), p(3, 3), p(1, 1), p(3, 1)));
}

#[test]
fn single_point_contact_is_seen_by_both() {
    assert!(segments_cross(p(1, 1), p(3, 3), p(2, 2), p(3, 1)));
    assert!(segments_touch(p(1, 1), p(3, 3), p(2, 2), p(3, 1)));
}

#[test]
fn endpoint_on_extension_is_not_contact() {
    // (4,4) is on the line through the first segment but beyond its end
    assert!(!segments_cross(p(1, 1), p(3, 3), p(4, 4), p(5, 0)));
    assert!(!segments_touch(p(1, 1), p(3, 3), p(4, 4), p(5, 0)));
}

#[test]
fn crossing_stats_signs() {
    let s = CrossingStats::of(p(0, 0), p(4, 0), p(2, -1), p(2, 1));
    assert_eq!(s, CrossingStats { first: -1, second: -1 });
    let s = CrossingStats::of(p(0, 0), p(4, 0), p(2, 0), p(2, 1));
    assert_eq!(s.first, 0);
}

#[test]
fn wide_coordinates_do_not_overflow() {
    let big = 2_000_000_000;
    assert!(segments_cross(p(-big, -big), p(big, big), p(-big, big), p(big, -big)));
    assert_eq!(cross(p(big, 0), p(0, big)), i128::from(big) * i128::from(big));
}

#[test]
fn squared_distance_and_dot() {
    assert_eq!(sq_dist(p(1, 1), p(4, 5)), 25);
    assert_eq!(dot(p(1, 2), p(3, 4)), 11);
    assert_eq!(vector(p(1, 1), p(4, 5)), p(3, 4));
}
