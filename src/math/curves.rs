//! Closed-form cable curves fitted through known points

use serde::{Deserialize, Serialize};

use crate::error::{BridgeError, BridgeResult};

/// Straight line `A*x + B*y = C` through two points
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl Line {
    /// Fit the line through `(x1, y1)` and `(x2, y2)`
    ///
    /// The points must have distinct x so the line can be solved for y.
    pub fn through(p1: (f64, f64), p2: (f64, f64)) -> BridgeResult<Self> {
        let (x1, y1) = p1;
        let (x2, y2) = p2;

        if (x2 - x1).abs() < 1e-12 {
            return Err(BridgeError::InvalidGeometry(format!(
                "cable line endpoints share x = {}",
                x1
            )));
        }

        Ok(Self {
            a: y1 - y2,
            b: x2 - x1,
            c: y1 * x2 - x1 * y2,
        })
    }

    /// Evaluate y at `x`
    pub fn y_at(&self, x: f64) -> f64 {
        (self.c - self.a * x) / self.b
    }
}

/// Quadratic `y = a*x^2 + b*x + c`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Parabola {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl Parabola {
    /// Fit the quadratic through three points with distinct x
    ///
    /// Subtracting the equations pairwise removes `c`; one more elimination
    /// step removes `b`.
    pub fn through(p1: (f64, f64), p2: (f64, f64), p3: (f64, f64)) -> BridgeResult<Self> {
        let (x1, y1) = p1;
        let (x2, y2) = p2;
        let (x3, y3) = p3;

        let a1 = x2 * x2 - x1 * x1;
        let b1 = x2 - x1;
        let d1 = y2 - y1;
        let a2 = x3 * x3 - x2 * x2;
        let b2 = x3 - x2;
        let d2 = y3 - y2;

        if b1.abs() < 1e-12 || b2.abs() < 1e-12 || (x3 - x1).abs() < 1e-12 {
            return Err(BridgeError::InvalidGeometry(format!(
                "cable parabola needs distinct x, got {}, {}, {}",
                x1, x2, x3
            )));
        }

        let b_mult = -(b2 / b1);
        let a3 = b_mult * a1 + a2;
        let d3 = b_mult * d1 + d2;

        let a = d3 / a3;
        let b = (d1 - a1 * a) / b1;
        let c = y1 - a * x1 * x1 - b * x1;

        Ok(Self { a, b, c })
    }

    /// Evaluate y at `x`
    pub fn y_at(&self, x: f64) -> f64 {
        self.a * x * x + self.b * x + self.c
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_side_span_line() {
        // Reference side span: abutment at 78 m, tower top at 230 m
        let tower_x = 355.0;
        let line = Line::through((0.0, 78.0), (tower_x, 230.0)).unwrap();
        assert_relative_eq!(line.y_at(0.0), 78.0, epsilon = 1e-9);
        assert_relative_eq!(line.y_at(tower_x), 230.0, epsilon = 1e-9);
        assert_relative_eq!(line.y_at(tower_x / 2.0), 154.0, epsilon = 1e-9);
    }

    #[test]
    fn test_line_right_to_left() {
        let line = Line::through((1635.0, 230.0), (1980.0, 78.0)).unwrap();
        assert_relative_eq!(line.y_at(1635.0), 230.0, epsilon = 1e-9);
        assert_relative_eq!(line.y_at(1980.0), 78.0, epsilon = 1e-9);
    }

    #[test]
    fn test_vertical_line_rejected() {
        assert!(Line::through((5.0, 0.0), (5.0, 10.0)).is_err());
    }

    #[test]
    fn test_main_cable_parabola() {
        let p = Parabola::through((355.0, 230.0), (995.0, 79.0), (1635.0, 230.0)).unwrap();
        assert_relative_eq!(p.y_at(355.0), 230.0, epsilon = 1e-6);
        assert_relative_eq!(p.y_at(995.0), 79.0, epsilon = 1e-6);
        assert_relative_eq!(p.y_at(1635.0), 230.0, epsilon = 1e-6);
        assert!(p.a > 0.0);
    }

    #[test]
    fn test_parabola_recovers_known_coefficients() {
        let f = |x: f64| 0.5 * x * x - 3.0 * x + 2.0;
        let p = Parabola::through((-1.0, f(-1.0)), (2.0, f(2.0)), (7.0, f(7.0))).unwrap();
        assert_relative_eq!(p.a, 0.5, epsilon = 1e-12);
        assert_relative_eq!(p.b, -3.0, epsilon = 1e-12);
        assert_relative_eq!(p.c, 2.0, epsilon = 1e-12);
    }
}
