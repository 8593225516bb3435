/// 2D point in normalized device coordinates ([-1, 1], +Y up).
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Arithmetic mean of both coordinates.
    #[inline]
    pub fn midpoint(self, other: Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<Point> for [f32; 2] {
    #[inline]
    fn from(p: Point) -> Self {
        [p.x, p.y]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f32, y: f32) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn midpoint_is_mean() {
        assert_eq!(p(-1.0, -1.0).midpoint(p(1.0, -1.0)), p(0.0, -1.0));
        assert_eq!(p(-1.0, -1.0).midpoint(p(0.0, 1.0)), p(-0.5, 0.0));
    }

    #[test]
    fn midpoint_is_symmetric() {
        let pairs = [
            (p(0.3, -0.7), p(-0.9, 0.25)),
            (p(1.0, 1.0), p(-1.0, -1.0)),
            (p(0.125, 0.5), p(0.125, 0.5)),
        ];
        for (a, b) in pairs {
            assert_eq!(a.midpoint(b), b.midpoint(a));
        }
    }

    #[test]
    fn midpoint_of_same_point_is_that_point() {
        let a = p(0.4, -0.2);
        assert_eq!(a.midpoint(a), a);
    }

    #[test]
    fn into_array() {
        let arr: [f32; 2] = p(0.5, -0.25).into();
        assert_eq!(arr, [0.5, -0.25]);
    }
}
