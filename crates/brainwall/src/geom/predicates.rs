use super::Point;

/// Vector from `from` to `to`.
#[inline]
pub fn vector(from: Point, to: Point) -> Point {
    to - from
}

/// z-component of `a × b`; positive when `b` is counterclockwise of `a`.
#[inline]
pub fn cross(a: Point, b: Point) -> i128 {
    i128::from(a.x) * i128::from(b.y) - i128::from(a.y) * i128::from(b.x)
}

#[inline]
pub fn dot(a: Point, b: Point) -> i128 {
    i128::from(a.x) * i128::from(b.x) + i128::from(a.y) * i128::from(b.y)
}

/// Squared Euclidean distance.
#[inline]
pub fn sq_dist(a: Point, b: Point) -> i64 {
    let d = b - a;
    d.x * d.x + d.y * d.y
}

/// True iff `m` lies on the closed segment `[a, b]`.
#[inline]
pub fn between(a: Point, m: Point, b: Point) -> bool {
    let to_a = vector(m, a);
    let to_b = vector(m, b);
    cross(to_a, to_b) == 0 && dot(to_a, to_b) <= 0
}

/// True iff turning from `m→a` to `m→b` is clockwise or straight.
#[inline]
pub fn right_turn(a: Point, m: Point, b: Point) -> bool {
    cross(vector(m, a), vector(m, b)) <= 0
}

/// Side tests of two segments against each other's supporting lines.
///
/// `first` is the sign of the product of the signed areas of segment 2's
/// endpoints relative to segment 1 (`<= 0`: they straddle or touch line 1),
/// `second` the same with roles swapped. Only signs matter, so products are
/// taken over `signum` and cannot overflow.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CrossingStats {
    pub first: i128,
    pub second: i128,
}

impl CrossingStats {
    pub fn of(p1b: Point, p1e: Point, p2b: Point, p2e: Point) -> Self {
        let v1 = vector(p1e, p1b);
        let v2 = vector(p2e, p2b);
        let first = cross(v1, vector(p2b, p1b)).signum() * cross(v1, vector(p2e, p1b)).signum();
        let second = cross(v2, vector(p1b, p2b)).signum() * cross(v2, vector(p1e, p2b)).signum();
        Self { first, second }
    }
}

/// Closed segments `[p1b, p1e]` and `[p2b, p2e]` meet (each straddles or
/// touches the other's line).
pub fn segments_cross(p1b: Point, p1e: Point, p2b: Point, p2e: Point) -> bool {
    let s = CrossingStats::of(p1b, p1e, p2b, p2e);
    s.first <= 0 && s.second <= 0
}

/// Contact where at least one segment has an endpoint on the other's line.
///
/// Collinear pairs report `true`; callers resolve them by endpoint sides.
pub fn segments_touch(p1b: Point, p1e: Point, p2b: Point, p2e: Point) -> bool {
    let s = CrossingStats::of(p1b, p1e, p2b, p2e);
    (s.first == 0 && s.second <= 0) || (s.second == 0 && s.first <= 0)
}
