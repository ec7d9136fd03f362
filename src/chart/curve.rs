//! SVG path construction
//!
//! Series lines use monotone cubic interpolation in x: the curve passes
//! through every point and never overshoots between two neighbours, so a
//! record line never appears to dip below or rise above an actual record.
//! The overview strip is a plain linear area.

use std::fmt::Write;

/// Accumulates SVG path commands
#[derive(Debug, Default)]
pub struct PathBuilder {
    d: String,
}

/// Compact number formatting for path data
pub(crate) fn num(value: f64) -> String {
    let rounded = (value * 1000.0).round() / 1000.0;
    // avoid "-0"
    if rounded == 0.0 {
        return "0".to_string();
    }
    let mut s = format!("{:.3}", rounded);
    while s.ends_with('0') {
        s.pop();
    }
    if s.ends_with('.') {
        s.pop();
    }
    s
}

impl PathBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_to(&mut self, x: f64, y: f64) -> &mut Self {
        let _ = write!(self.d, "M{},{}", num(x), num(y));
        self
    }

    pub fn line_to(&mut self, x: f64, y: f64) -> &mut Self {
        let _ = write!(self.d, "L{},{}", num(x), num(y));
        self
    }

    pub fn curve_to(&mut self, c1: (f64, f64), c2: (f64, f64), to: (f64, f64)) -> &mut Self {
        let _ = write!(
            self.d,
            "C{},{},{},{},{},{}",
            num(c1.0),
            num(c1.1),
            num(c2.0),
            num(c2.1),
            num(to.0),
            num(to.1)
        );
        self
    }

    pub fn close(&mut self) -> &mut Self {
        self.d.push('Z');
        self
    }

    pub fn is_empty(&self) -> bool {
        self.d.is_empty()
    }

    pub fn finish(self) -> String {
        self.d
    }
}

fn sign(x: f64) -> f64 {
    if x < 0.0 {
        -1.0
    } else {
        1.0
    }
}

/// Tangent at `p1` from its two neighbours (Steffen's method)
fn slope3(p0: (f64, f64), p1: (f64, f64), p2: (f64, f64)) -> f64 {
    let h0 = p1.0 - p0.0;
    let h1 = p2.0 - p1.0;
    if h0 == 0.0 || h1 == 0.0 {
        return 0.0;
    }
    let s0 = (p1.1 - p0.1) / h0;
    let s1 = (p2.1 - p1.1) / h1;
    let p = (s0 * h1 + s1 * h0) / (h0 + h1);
    let t = (sign(s0) + sign(s1)) * s0.abs().min(s1.abs()).min(0.5 * p.abs());
    if t.is_finite() {
        t
    } else {
        0.0
    }
}

/// Tangent at an end point from the segment and the other end's tangent
fn slope2(p0: (f64, f64), p1: (f64, f64), t: f64) -> f64 {
    let h = p1.0 - p0.0;
    if h == 0.0 {
        t
    } else {
        (3.0 * (p1.1 - p0.1) / h - t) / 2.0
    }
}

fn hermite(path: &mut PathBuilder, p0: (f64, f64), p1: (f64, f64), t0: f64, t1: f64) {
    let dx = (p1.0 - p0.0) / 3.0;
    path.curve_to(
        (p0.0 + dx, p0.1 + dx * t0),
        (p1.0 - dx, p1.1 - dx * t1),
        p1,
    );
}

/// Path through points sorted by x, monotone between neighbours
///
/// Returns `None` for fewer than two points; two points give a straight
/// segment.
pub fn monotone_x(points: &[(f64, f64)]) -> Option<String> {
    let mut path = PathBuilder::new();
    match points {
        [] | [_] => return None,
        [a, b] => {
            path.move_to(a.0, a.1).line_to(b.0, b.1);
        }
        _ => {
            let first = points[0];
            path.move_to(first.0, first.1);

            let tangents: Vec<f64> = points
                .windows(3)
                .map(|w| slope3(w[0], w[1], w[2]))
                .collect();

            let n = points.len();
            let t_first = slope2(points[0], points[1], tangents[0]);
            let t_last = slope2(points[n - 2], points[n - 1], tangents[n - 3]);

            for i in 0..n - 1 {
                let t0 = if i == 0 { t_first } else { tangents[i - 1] };
                let t1 = if i == n - 2 { t_last } else { tangents[i] };
                hermite(&mut path, points[i], points[i + 1], t0, t1);
            }
        }
    }
    Some(path.finish())
}

/// Closed area between a baseline and points sorted by x
pub fn linear_area(points: &[(f64, f64)], baseline: f64) -> Option<String> {
    let (first, rest) = points.split_first()?;
    let mut path = PathBuilder::new();

    path.move_to(first.0, first.1);
    for p in rest {
        path.line_to(p.0, p.1);
    }
    for p in points.iter().rev() {
        path.line_to(p.0, baseline);
    }
    path.close();

    Some(path.finish())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_num_formatting() {
        assert_eq!(num(12.0), "12");
        assert_eq!(num(12.5), "12.5");
        assert_eq!(num(1.23456), "1.235");
        assert_eq!(num(-0.0001), "0");
    }

    #[test]
    fn test_too_few_points() {
        assert_eq!(monotone_x(&[]), None);
        assert_eq!(monotone_x(&[(1.0, 2.0)]), None);
    }

    #[test]
    fn test_two_points_is_straight() {
        let d = monotone_x(&[(0.0, 10.0), (100.0, 20.0)]).unwrap();
        assert_eq!(d, "M0,10L100,20");
    }

    #[test]
    fn test_curve_passes_through_points() {
        let points = [(0.0, 100.0), (10.0, 80.0), (20.0, 85.0), (30.0, 40.0)];
        let d = monotone_x(&points).unwrap();

        assert!(d.starts_with("M0,100C"));
        assert_eq!(d.matches('C').count(), 3);
        assert!(d.ends_with(",30,40"));
        assert!(d.contains(",10,80C"));
        assert!(d.contains(",20,85C"));
    }

    #[test]
    fn test_flat_run_has_flat_tangent() {
        // peaks and plateau edges get a flat tangent
        assert_eq!(slope3((0.0, 0.0), (1.0, 5.0), (2.0, 0.0)), 0.0);
        assert_eq!(slope3((0.0, 0.0), (1.0, 5.0), (2.0, 5.0)), 0.0);
    }

    #[test]
    fn test_monotone_controls_stay_in_range() {
        let points = [(0.0, 0.0), (10.0, 50.0), (20.0, 52.0), (30.0, 100.0)];
        let t = slope3(points[0], points[1], points[2]);
        let dx = 10.0 / 3.0;

        // control points around the middle segment stay between its ends
        assert!(points[1].1 + dx * t <= 52.0);
        assert!(points[1].1 + dx * t >= 50.0);
    }

    #[test]
    fn test_linear_area() {
        let d = linear_area(&[(0.0, 10.0), (5.0, 20.0)], 60.0).unwrap();
        assert_eq!(d, "M0,10L5,20L5,60L0,60Z");
        assert_eq!(linear_area(&[], 60.0), None);
    }
}
