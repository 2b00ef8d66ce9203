// THEORY:
// Spatial moments of the region enclosed by a contour, computed from the boundary alone
// using Green's theorem. For a closed polygon with vertices (x_i, y_i):
//
//   m00 = 1/2 * Σ (x_{i-1} y_i - x_i y_{i-1})
//   m10 = 1/6 * Σ (x_{i-1} y_i - x_i y_{i-1}) (x_{i-1} + x_i)
//   m01 = 1/6 * Σ (x_{i-1} y_i - x_i y_{i-1}) (y_{i-1} + y_i)
//
// The vertices are pixel centres, so a filled w x h rectangle measures (w-1)(h-1).
// Tracing direction only flips the sign; results are normalised to a positive area.

use crate::core_modules::contour::Point;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Moments {
    /// Zeroth moment: enclosed area.
    pub m00: f64,
    pub m10: f64,
    pub m01: f64,
}

impl Moments {
    pub fn from_polygon(points: &[Point<i32>]) -> Self {
        if points.len() < 3 {
            return Self::default();
        }

        let mut a00 = 0.0;
        let mut a10 = 0.0;
        let mut a01 = 0.0;

        let mut previous = points[points.len() - 1];
        for &current in points {
            let (xp, yp) = (previous.x as f64, previous.y as f64);
            let (xc, yc) = (current.x as f64, current.y as f64);
            let cross = xp * yc - xc * yp;
            a00 += cross;
            a10 += cross * (xp + xc);
            a01 += cross * (yp + yc);
            previous = current;
        }

        if a00 < 0.0 {
            a00 = -a00;
            a10 = -a10;
            a01 = -a01;
        }

        Self {
            m00: a00 / 2.0,
            m10: a10 / 6.0,
            m01: a01 / 6.0,
        }
    }

    pub fn area(&self) -> f64 {
        self.m00
    }

    /// Centroid truncated toward zero. `None` for a region with no area.
    pub fn centroid(&self) -> Option<(i32, i32)> {
        if self.m00 <= 0.0 || !self.m00.is_finite() {
            return None;
        }
        Some(((self.m10 / self.m00) as i32, (self.m01 / self.m00) as i32))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rectangle(x0: i32, y0: i32, x1: i32, y1: i32) -> Vec<Point<i32>> {
        vec![
            Point::new(x0, y0),
            Point::new(x1, y0),
            Point::new(x1, y1),
            Point::new(x0, y1),
        ]
    }

    #[test]
    fn square_area_and_centroid() {
        let moments = Moments::from_polygon(&rectangle(10, 20, 40, 50));
        assert_eq!(moments.area(), 900.0);
        assert_eq!(moments.centroid(), Some((25, 35)));
    }

    #[test]
    fn orientation_does_not_change_the_sign() {
        let mut points = rectangle(0, 0, 8, 4);
        let forward = Moments::from_polygon(&points);
        points.reverse();
        let backward = Moments::from_polygon(&points);
        assert_eq!(forward, backward);
        assert_eq!(forward.area(), 32.0);
    }

    #[test]
    fn degenerate_shapes_have_no_centroid() {
        let line = vec![Point::new(0, 0), Point::new(5, 0), Point::new(9, 0)];
        assert_eq!(Moments::from_polygon(&line).area(), 0.0);
        assert_eq!(Moments::from_polygon(&line).centroid(), None);
        assert_eq!(Moments::from_polygon(&[Point::new(3, 3)]).centroid(), None);
    }
}
