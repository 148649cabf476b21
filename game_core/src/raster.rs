//! Software rasterizer on top of a [`PixelSurface`].
//!
//! Nothing here clamps coordinates: the surface is required to ignore
//! pixels outside its bounds. Degenerate shapes draw what they cover (a
//! zero-length line is its one endpoint, a polyline with fewer than two
//! points is nothing) and no function reports failure.

use glam::IVec2;

use crate::components::Body;
use crate::geometry::{Line, Point, Rect};
use crate::hal::PixelSurface;

/// Pixels of a line in Bresenham order.
///
/// Steep lines are walked along y, and the walk always runs from the
/// smaller to the larger major coordinate, so the sequence may be reversed
/// relative to `p0 -> p1`.
#[derive(Debug, Clone)]
pub struct LinePixels {
    steep: bool,
    x: i32,
    x_end: i32,
    y: i32,
    y_step: i32,
    delta_x: i32,
    delta_y: i32,
    error: i32,
}

impl LinePixels {
    pub fn new(line: Line) -> Self {
        let (mut x0, mut y0) = (line.p0.x as i32, line.p0.y as i32);
        let (mut x1, mut y1) = (line.p1.x as i32, line.p1.y as i32);

        let steep = (y1 - y0).abs() > (x1 - x0).abs();
        if steep {
            std::mem::swap(&mut x0, &mut y0);
            std::mem::swap(&mut x1, &mut y1);
        }
        if x0 > x1 {
            std::mem::swap(&mut x0, &mut x1);
            std::mem::swap(&mut y0, &mut y1);
        }

        Self {
            steep,
            x: x0,
            x_end: x1,
            y: y0,
            y_step: if y0 < y1 { 1 } else { -1 },
            delta_x: x1 - x0,
            delta_y: (y1 - y0).abs(),
            error: 0,
        }
    }
}

impl Iterator for LinePixels {
    type Item = IVec2;

    fn next(&mut self) -> Option<IVec2> {
        if self.x > self.x_end {
            return None;
        }

        let pixel = if self.steep {
            IVec2::new(self.y, self.x)
        } else {
            IVec2::new(self.x, self.y)
        };

        self.error += self.delta_y;
        if self.error >= self.delta_x {
            self.y += self.y_step;
            self.error -= self.delta_x;
        }
        self.x += 1;

        Some(pixel)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = (self.x_end - self.x + 1).max(0) as usize;
        (left, Some(left))
    }
}

impl ExactSizeIterator for LinePixels {}

/// Lazy pixel sequence of `line`
pub fn line_pixels(line: Line) -> LinePixels {
    LinePixels::new(line)
}

pub fn draw_line<S: PixelSurface>(surface: &mut S, line: Line) {
    for pixel in line_pixels(line) {
        surface.set_pixel(pixel.x, pixel.y);
    }
}

/// Outline of `rect`; corners are shared by neighbouring edges
pub fn draw_rect<S: PixelSurface>(surface: &mut S, rect: Rect) {
    let Rect { origin, dimen } = rect;
    let left = origin.x;
    let top = origin.y;
    let right = origin.x.wrapping_add(dimen.x);
    let bottom = origin.y.wrapping_add(dimen.y);

    let top_left = Point::new(left, top);
    let top_right = Point::new(right, top);
    let bottom_right = Point::new(right, bottom);
    let bottom_left = Point::new(left, bottom);

    draw_line(surface, Line::new(top_left, top_right));
    draw_line(surface, Line::new(top_right, bottom_right));
    draw_line(surface, Line::new(bottom_left, bottom_right));
    draw_line(surface, Line::new(bottom_left, top_left));
}

/// Open polyline through `points`
pub fn draw_poly<S, I>(surface: &mut S, points: I)
where
    S: PixelSurface,
    I: IntoIterator<Item = Point>,
{
    let mut points = points.into_iter();
    let Some(mut from) = points.next() else {
        return;
    };
    for to in points {
        draw_line(surface, Line::new(from, to));
        from = to;
    }
}

/// Absolute positions of every geometry slot of `body`.
///
/// All [`MAX_POINTS`](crate::geometry::MAX_POINTS) slots are visited, so the
/// unused ones land on the anchor pixel.
pub fn object_pixels(body: &Body) -> impl Iterator<Item = IVec2> + '_ {
    body.geometry
        .slots()
        .iter()
        .map(move |offset| body.pos + offset.as_ivec2())
}

pub fn draw_object<S: PixelSurface>(surface: &mut S, body: &Body) {
    for pixel in object_pixels(body) {
        surface.set_pixel(pixel.x, pixel.y);
    }
}

pub fn clear_object<S: PixelSurface>(surface: &mut S, body: &Body) {
    for pixel in object_pixels(body) {
        surface.clear_pixel(pixel.x, pixel.y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{BALL, MAX_POINTS, PADDLE};
    use crate::hal::memory::FrameBuffer;

    /// Surface that records every call in order
    #[derive(Default)]
    struct PixelLog {
        set: Vec<(i32, i32)>,
        cleared: Vec<(i32, i32)>,
    }

    impl PixelSurface for PixelLog {
        fn set_pixel(&mut self, x: i32, y: i32) {
            self.set.push((x, y));
        }

        fn clear_pixel(&mut self, x: i32, y: i32) {
            self.cleared.push((x, y));
        }

        fn clear_surface(&mut self) {
            self.set.clear();
        }
    }

    fn line(x0: i8, y0: i8, x1: i8, y1: i8) -> Line {
        Line::new(Point::new(x0, y0), Point::new(x1, y1))
    }

    #[test]
    fn test_diagonal_line() {
        let mut log = PixelLog::default();
        draw_line(&mut log, line(0, 0, 5, 5));
        assert_eq!(
            log.set,
            vec![(0, 0), (1, 1), (2, 2), (3, 3), (4, 4), (5, 5)]
        );
    }

    #[test]
    fn test_shallow_lines_emit_dx_plus_one_points() {
        let ends = [
            (0, 0, 10, 3),
            (10, 3, 0, 0),
            (5, 20, 40, 2),
            (-4, 7, 9, 7),
            (3, 3, 3, 3),
            (0, 0, 7, -7),
            (100, 60, 20, 10),
        ];
        for (x0, y0, x1, y1) in ends {
            let pixels: Vec<IVec2> = line_pixels(line(x0, y0, x1, y1)).collect();
            let dx = (x1 as i32 - x0 as i32).abs();
            assert_eq!(pixels.len() as i32, dx + 1, "line {x0},{y0} -> {x1},{y1}");

            for pair in pixels.windows(2) {
                assert_eq!(pair[1].x - pair[0].x, 1, "x advances by one");
                assert!((pair[1].y - pair[0].y).abs() <= 1, "y moves at most one step");
            }
            assert_eq!(pixels.first().map(|p| p.x), Some(x0.min(x1) as i32));
            assert_eq!(pixels.last().map(|p| p.x), Some(x0.max(x1) as i32));
        }
    }

    #[test]
    fn test_steep_line_walks_along_y() {
        let pixels: Vec<IVec2> = line_pixels(line(2, 9, 4, 0)).collect();
        assert_eq!(pixels.len(), 10);
        assert_eq!(pixels.first(), Some(&IVec2::new(4, 0)));
        assert_eq!(pixels.last(), Some(&IVec2::new(2, 9)));
        for pair in pixels.windows(2) {
            assert_eq!(pair[1].y - pair[0].y, 1);
            assert!((pair[1].x - pair[0].x).abs() <= 1);
        }
    }

    #[test]
    fn test_line_size_hint() {
        let mut pixels = line_pixels(line(0, 0, 4, 1));
        assert_eq!(pixels.len(), 5);
        pixels.next();
        assert_eq!(pixels.len(), 4);
    }

    #[test]
    fn test_line_is_not_clamped() {
        let mut log = PixelLog::default();
        draw_line(&mut log, line(-2, 0, 0, 0));
        assert_eq!(log.set, vec![(-2, 0), (-1, 0), (0, 0)]);
    }

    #[test]
    fn test_rect_outline() {
        let mut fb = FrameBuffer::new();
        draw_rect(&mut fb, Rect::new(Point::new(10, 5), Point::new(4, 3)));

        // Perimeter of a 5x4 pixel box
        assert_eq!(fb.lit_count(), 14);
        for (x, y) in [(10, 5), (14, 5), (14, 8), (10, 8)] {
            assert!(fb.get(x, y), "corner {x},{y} should be lit");
        }
        assert!(!fb.get(12, 6), "inside stays dark");
    }

    #[test]
    fn test_poly_connects_consecutive_points() {
        let mut fb = FrameBuffer::new();
        draw_poly(
            &mut fb,
            [Point::new(0, 0), Point::new(3, 0), Point::new(3, 3)],
        );
        assert_eq!(fb.lit_count(), 7);
        assert!(!fb.get(0, 3), "polyline is not closed");
    }

    #[test]
    fn test_degenerate_polys_draw_nothing() {
        let mut log = PixelLog::default();
        draw_poly(&mut log, Vec::<Point>::new());
        draw_poly(&mut log, [Point::new(4, 4)]);
        assert!(log.set.is_empty());
    }

    #[test]
    fn test_object_covers_every_slot() {
        let ball = Body::new(&BALL, IVec2::new(20, 10), IVec2::ZERO);
        let mut log = PixelLog::default();
        draw_object(&mut log, &ball);
        assert_eq!(log.set.len(), MAX_POINTS);
        // Unused slots hit the anchor
        let anchor_hits = log.set.iter().filter(|&&p| p == (20, 10)).count();
        assert_eq!(anchor_hits, MAX_POINTS - BALL.num_points());

        clear_object(&mut log, &ball);
        assert_eq!(log.cleared, log.set, "Clear visits the same pixels in order");
    }

    #[test]
    fn test_clear_undoes_draw() {
        let mut fb = FrameBuffer::new();
        let paddle = Body::new(&PADDLE, IVec2::new(110, 30), IVec2::ZERO);
        draw_object(&mut fb, &paddle);
        assert!(fb.get(110, 30) && fb.get(114, 38) && fb.get(112, 34));
        clear_object(&mut fb, &paddle);
        assert!(fb.is_blank());
    }
}
