use super::Point;

/// Ordered triple of points.
///
/// No winding or non-degeneracy invariant: a zero-area triangle is valid and
/// simply rasterizes to nothing.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Triangle {
    pub a: Point,
    pub b: Point,
    pub c: Point,
}

impl Triangle {
    /// Root triangle spanning the viewport.
    pub const ROOT: Triangle = Triangle::new(
        Point::new(-1.0, -1.0),
        Point::new(1.0, -1.0),
        Point::new(0.0, 1.0),
    );

    #[inline]
    pub const fn new(a: Point, b: Point, c: Point) -> Self {
        Self { a, b, c }
    }

    #[inline]
    pub fn vertices(self) -> [Point; 3] {
        [self.a, self.b, self.c]
    }

    /// Signed area (shoelace). Positive for counter-clockwise winding.
    #[inline]
    pub fn signed_area(self) -> f32 {
        let (a, b, c) = (self.a, self.b, self.c);
        ((b.x - a.x) * (c.y - a.y) - (c.x - a.x) * (b.y - a.y)) * 0.5
    }

    #[inline]
    pub fn area(self) -> f32 {
        self.signed_area().abs()
    }

    /// Point-in-triangle test, inclusive of edges up to `eps`.
    ///
    /// Works for either winding. For a degenerate triangle only points on the
    /// segment hull pass.
    pub fn contains(self, p: Point, eps: f32) -> bool {
        let edge = |u: Point, v: Point| (v.x - u.x) * (p.y - u.y) - (p.x - u.x) * (v.y - u.y);

        let d0 = edge(self.a, self.b);
        let d1 = edge(self.b, self.c);
        let d2 = edge(self.c, self.a);

        let has_neg = d0 < -eps || d1 < -eps || d2 < -eps;
        let has_pos = d0 > eps || d1 > eps || d2 > eps;

        if has_neg && has_pos {
            return false;
        }

        // Collinear vertices: the sign test passes for the whole line, so
        // clamp to the bounding box.
        let min_x = self.a.x.min(self.b.x).min(self.c.x) - eps;
        let max_x = self.a.x.max(self.b.x).max(self.c.x) + eps;
        let min_y = self.a.y.min(self.b.y).min(self.c.y) - eps;
        let max_y = self.a.y.max(self.b.y).max(self.c.y) + eps;
        p.x >= min_x && p.x <= max_x && p.y >= min_y && p.y <= max_y
    }

    /// Splits into the three corner triangles, dropping the central one.
    ///
    /// Order: A-corner, C-corner, B-corner. Each child keeps its corner vertex
    /// first.
    pub fn corners(self) -> [Triangle; 3] {
        let ab = self.a.midpoint(self.b);
        let ac = self.a.midpoint(self.c);
        let bc = self.b.midpoint(self.c);

        [
            Triangle::new(self.a, ab, ac),
            Triangle::new(self.c, ac, bc),
            Triangle::new(self.b, bc, ab),
        ]
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.a.is_finite() && self.b.is_finite() && self.c.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f32, y: f32) -> Point {
        Point::new(x, y)
    }

    // ── area ──────────────────────────────────────────────────────────────

    #[test]
    fn root_area_is_two() {
        assert_eq!(Triangle::ROOT.area(), 2.0);
        assert!(Triangle::ROOT.signed_area() > 0.0);
    }

    #[test]
    fn clockwise_has_negative_signed_area() {
        let t = Triangle::new(p(-1.0, -1.0), p(0.0, 1.0), p(1.0, -1.0));
        assert_eq!(t.signed_area(), -2.0);
        assert_eq!(t.area(), 2.0);
    }

    #[test]
    fn degenerate_has_zero_area() {
        let t = Triangle::new(p(0.0, 0.0), p(0.5, 0.5), p(1.0, 1.0));
        assert_eq!(t.area(), 0.0);
    }

    // ── contains ──────────────────────────────────────────────────────────

    #[test]
    fn contains_vertices_and_centroid() {
        let t = Triangle::ROOT;
        for v in t.vertices() {
            assert!(t.contains(v, 1e-6));
        }
        assert!(t.contains(p(0.0, -1.0 / 3.0), 1e-6));
    }

    #[test]
    fn excludes_outside_points() {
        let t = Triangle::ROOT;
        assert!(!t.contains(p(0.9, 0.9), 1e-6));
        assert!(!t.contains(p(0.0, -1.1), 1e-6));
        assert!(!t.contains(p(-1.01, -1.0), 1e-6));
    }

    #[test]
    fn contains_ignores_winding() {
        let t = Triangle::new(p(-1.0, -1.0), p(0.0, 1.0), p(1.0, -1.0));
        assert!(t.contains(p(0.0, 0.0), 1e-6));
    }

    #[test]
    fn degenerate_contains_only_segment() {
        let t = Triangle::new(p(0.0, 0.0), p(0.5, 0.5), p(1.0, 1.0));
        assert!(t.contains(p(0.25, 0.25), 1e-6));
        assert!(!t.contains(p(2.0, 2.0), 1e-6));
        assert!(!t.contains(p(0.5, 0.0), 1e-6));
    }

    // ── corners ───────────────────────────────────────────────────────────

    #[test]
    fn corners_of_root() {
        let [ta, tc, tb] = Triangle::ROOT.corners();
        assert_eq!(ta, Triangle::new(p(-1.0, -1.0), p(0.0, -1.0), p(-0.5, 0.0)));
        assert_eq!(tc, Triangle::new(p(0.0, 1.0), p(-0.5, 0.0), p(0.5, 0.0)));
        assert_eq!(tb, Triangle::new(p(1.0, -1.0), p(0.5, 0.0), p(0.0, -1.0)));
    }

    #[test]
    fn corners_each_have_quarter_area() {
        let t = Triangle::new(p(-0.8, -0.6), p(0.9, -0.2), p(0.1, 0.7));
        let quarter = t.area() / 4.0;
        for child in t.corners() {
            assert!((child.area() - quarter).abs() < 1e-6);
        }
    }

    #[test]
    fn corners_never_include_center() {
        let t = Triangle::ROOT;
        let center = Triangle::new(
            t.a.midpoint(t.b),
            t.b.midpoint(t.c),
            t.c.midpoint(t.a),
        );
        let centroid = p(
            (center.a.x + center.b.x + center.c.x) / 3.0,
            (center.a.y + center.b.y + center.c.y) / 3.0,
        );
        for child in t.corners() {
            assert!(!child.contains(centroid, 1e-6));
        }
    }
}
