use crate::error::CharterError;
use crate::spline::CubicSpline;
use ndarray::Array1;

/// A user-placed anchor in editing-surface coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ControlPoint {
    pub x: f64,
    pub y: f64,
}

impl ControlPoint {
    pub fn new(x: f64, y: f64) -> Self {
        ControlPoint { x, y }
    }
}

/// One resampled point of a fitted curve.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CurvePoint {
    pub x: f64,
    pub y: f64,
}

/// Fit a smooth curve through `points` and resample it evenly.
///
/// For each consecutive pair a synthetic midpoint is inserted, with its
/// x shifted by `(x1 - x0) * (shape - 0.5)`; shape 0.5 leaves the
/// midpoints on the straight line, values toward 0 or 1 bias the curve
/// toward the start or end of each segment. A cubic spline is fitted
/// through the interleaved sequence and sampled at `density * (n - 1)`
/// evenly spaced x-values spanning the control range, so the samples
/// land exactly on the first and last control point.
///
/// Fewer than two points is not an error: there is nothing to place, so
/// the curve is empty. Control x-values must be strictly increasing;
/// anything else (including duplicates) fails with
/// [`CharterError::DegenerateFit`].
pub fn generate(
    points: &[ControlPoint],
    density: usize,
    shape: f64,
) -> Result<Vec<CurvePoint>, CharterError> {
    if points.len() < 2 {
        return Ok(Vec::new());
    }

    let n = points.len();
    let mut knot_xs = Array1::zeros(2 * n - 1);
    let mut knot_ys = Array1::zeros(2 * n - 1);

    for i in 0..n - 1 {
        let (p0, p1) = (points[i], points[i + 1]);
        knot_xs[2 * i] = p0.x;
        knot_ys[2 * i] = p0.y;
        knot_xs[2 * i + 1] = (p0.x + p1.x) / 2.0 + (p1.x - p0.x) * (shape - 0.5);
        knot_ys[2 * i + 1] = (p0.y + p1.y) / 2.0;
    }
    knot_xs[2 * n - 2] = points[n - 1].x;
    knot_ys[2 * n - 2] = points[n - 1].y;

    let spline = CubicSpline::fit(knot_xs, knot_ys)?;

    let count = density * (n - 1);
    let sample_xs = Array1::linspace(points[0].x, points[n - 1].x, count);
    Ok(sample_xs
        .iter()
        .map(|&x| CurvePoint { x, y: spline.eval(x) })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(raw: &[(f64, f64)]) -> Vec<ControlPoint> {
        raw.iter().map(|&(x, y)| ControlPoint::new(x, y)).collect()
    }

    #[test]
    fn test_too_few_points_yields_empty_curve() {
        assert!(generate(&[], 16, 0.5).unwrap().is_empty());
        assert!(generate(&pts(&[(1.0, 2.0)]), 16, 0.5).unwrap().is_empty());
    }

    #[test]
    fn test_sample_count_and_span() {
        let points = pts(&[(0.0, 0.0), (10.0, 2.0), (20.0, 0.0)]);
        let curve = generate(&points, 4, 0.5).unwrap();

        assert_eq!(curve.len(), 8);
        assert!((curve[0].x - 0.0).abs() < 1e-12);
        assert!((curve[7].x - 20.0).abs() < 1e-12);
        // Endpoints lie on the control points
        assert!(curve[0].y.abs() < 1e-9);
        assert!(curve[7].y.abs() < 1e-9);

        // Near the middle anchor the curve should be close to its y
        let nearest = curve
            .iter()
            .min_by(|a, b| {
                (a.x - 10.0).abs().partial_cmp(&(b.x - 10.0).abs()).unwrap()
            })
            .unwrap();
        assert!(nearest.y > 1.4, "got {}", nearest.y);
    }

    #[test]
    fn test_linear_shape_keeps_straight_line() {
        // Collinear anchors with shape 0.5: every sample stays on the line
        let points = pts(&[(0.0, 0.0), (5.0, 5.0), (10.0, 10.0)]);
        let curve = generate(&points, 8, 0.5).unwrap();
        assert_eq!(curve.len(), 16);
        for p in &curve {
            assert!((p.y - p.x).abs() < 1e-9, "({}, {})", p.x, p.y);
        }
    }

    #[test]
    fn test_shape_factor_shifts_midpoints() {
        let points = pts(&[(0.0, 0.0), (10.0, 10.0)]);
        // shape 0.9 pushes the segment midpoint from x=5 to x=9 while its
        // y stays 5, so the curve rises slowly and then jumps
        let curve = generate(&points, 10, 0.9).unwrap();
        let early = curve.iter().find(|p| (p.x - 4.4).abs() < 0.2).unwrap();
        assert!(early.y < 4.0, "got {}", early.y);
    }

    #[test]
    fn test_duplicate_x_fails_fit() {
        let points = pts(&[(0.0, 0.0), (0.0, 5.0), (10.0, 1.0)]);
        assert!(matches!(
            generate(&points, 4, 0.5),
            Err(CharterError::DegenerateFit(_))
        ));
    }

    #[test]
    fn test_decreasing_x_fails_fit() {
        let points = pts(&[(10.0, 0.0), (0.0, 5.0)]);
        assert!(matches!(
            generate(&points, 4, 0.5),
            Err(CharterError::DegenerateFit(_))
        ));
    }
}
