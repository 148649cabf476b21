//! Static shape descriptions for the objects drawn on the pixel display.

use glam::IVec2;

/// Maximum number of offset points a [`Geometry`] can hold
pub const MAX_POINTS: usize = 32;

/// Signed pixel offset that fits in one byte
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i8,
    pub y: i8,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0, y: 0 };

    pub const fn new(x: i8, y: i8) -> Self {
        Self { x, y }
    }

    pub fn as_ivec2(self) -> IVec2 {
        IVec2::new(self.x as i32, self.y as i32)
    }
}

/// Straight segment between two points (both ends inclusive)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line {
    pub p0: Point,
    pub p1: Point,
}

impl Line {
    pub const fn new(p0: Point, p1: Point) -> Self {
        Self { p0, p1 }
    }
}

/// Rectangle outline: top-left origin plus width/height offsets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub origin: Point,
    pub dimen: Point,
}

impl Rect {
    pub const fn new(origin: Point, dimen: Point) -> Self {
        Self { origin, dimen }
    }
}

/// Pixel shape of an object, relative to its anchor.
///
/// `size` is the bounding box used for collisions. It is declared by hand and
/// does not have to match the extent of the point set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Geometry {
    num_points: usize,
    size: IVec2,
    points: [Point; MAX_POINTS],
}

impl Geometry {
    /// Build a geometry from a point list. Unused slots stay at the origin.
    ///
    /// Panics (at compile time for `const` items) if `points` exceeds
    /// [`MAX_POINTS`].
    pub const fn new(size_x: i32, size_y: i32, points: &[Point]) -> Self {
        assert!(points.len() <= MAX_POINTS, "geometry exceeds MAX_POINTS");

        let mut slots = [Point::ORIGIN; MAX_POINTS];
        let mut i = 0;
        while i < points.len() {
            slots[i] = points[i];
            i += 1;
        }

        Self {
            num_points: points.len(),
            size: IVec2::new(size_x, size_y),
            points: slots,
        }
    }

    pub fn num_points(&self) -> usize {
        self.num_points
    }

    /// Declared bounding box `(size_x, size_y)`
    pub fn size(&self) -> IVec2 {
        self.size
    }

    /// The declared shape, `num_points` long
    pub fn points(&self) -> &[Point] {
        &self.points[..self.num_points]
    }

    /// Every slot of the fixed-capacity array, including unused ones
    pub fn slots(&self) -> &[Point; MAX_POINTS] {
        &self.points
    }
}

const fn p(x: i8, y: i8) -> Point {
    Point::new(x, y)
}

/// 4x4 rounded ball
pub static BALL: Geometry = Geometry::new(
    4,
    4,
    &[
        p(0, 1), p(0, 2),
        p(1, 0), p(1, 1), p(1, 2), p(1, 3),
        p(2, 0), p(2, 1), p(2, 2), p(2, 3),
        p(3, 1), p(3, 2),
    ],
);

/// Hollow 5x9 paddle with a short centre bar. The collision box is 5x8.
pub static PADDLE: Geometry = Geometry::new(
    5,
    8,
    &[
        // top
        p(0, 0), p(1, 0), p(2, 0), p(3, 0), p(4, 0),
        // left
        p(0, 0), p(0, 1), p(0, 2), p(0, 3), p(0, 4), p(0, 5), p(0, 6), p(0, 7), p(0, 8),
        // right
        p(4, 0), p(4, 1), p(4, 2), p(4, 3), p(4, 4), p(4, 5), p(4, 6), p(4, 7), p(4, 8),
        // bottom
        p(0, 8), p(1, 8), p(2, 8), p(3, 8), p(4, 8),
        // centre
        p(2, 3), p(2, 4), p(2, 5),
    ],
);
