use crate::error::CharterError;
use ndarray::Array1;

/// Natural cubic interpolating spline over strictly increasing knots.
///
/// The fit solves the tridiagonal system for the second derivatives at
/// the knots (zero at both ends); evaluation clamps to the knot range,
/// so sampling at the exact endpoints is safe.
#[derive(Clone, Debug)]
pub struct CubicSpline {
    xs: Array1<f64>,
    ys: Array1<f64>,
    /// Second derivative at each knot.
    second: Array1<f64>,
}

impl CubicSpline {
    /// Fit a spline through `(xs[i], ys[i])`.
    ///
    /// Fails with [`CharterError::DegenerateFit`] when fewer than two
    /// knots are given or the x-values are not strictly increasing.
    pub fn fit(xs: Array1<f64>, ys: Array1<f64>) -> Result<Self, CharterError> {
        let n = xs.len();
        if n < 2 || ys.len() != n {
            return Err(CharterError::DegenerateFit(0));
        }
        for i in 1..n {
            if xs[i] <= xs[i - 1] {
                return Err(CharterError::DegenerateFit(i));
            }
        }

        let mut second = Array1::zeros(n);
        let m = n - 2;
        if m > 0 {
            // Thomas algorithm over the interior knots
            let mut sub = Array1::zeros(m);
            let mut diag = Array1::zeros(m);
            let mut sup = Array1::zeros(m);
            let mut rhs = Array1::zeros(m);

            for k in 0..m {
                let j = k + 1;
                let h0 = xs[j] - xs[j - 1];
                let h1 = xs[j + 1] - xs[j];
                sub[k] = h0;
                diag[k] = 2.0 * (h0 + h1);
                sup[k] = h1;
                rhs[k] = 6.0 * ((ys[j + 1] - ys[j]) / h1 - (ys[j] - ys[j - 1]) / h0);
            }

            for k in 1..m {
                let w = sub[k] / diag[k - 1];
                diag[k] -= w * sup[k - 1];
                rhs[k] -= w * rhs[k - 1];
            }

            second[m] = rhs[m - 1] / diag[m - 1];
            for k in (0..m - 1).rev() {
                second[k + 1] = (rhs[k] - sup[k] * second[k + 2]) / diag[k];
            }
        }

        Ok(CubicSpline { xs, ys, second })
    }

    /// Evaluate the spline at `x`, clamped to the knot range.
    pub fn eval(&self, x: f64) -> f64 {
        let n = self.xs.len();
        let x = x.clamp(self.xs[0], self.xs[n - 1]);

        // Binary search for the segment containing x
        let mut lo = 0;
        let mut hi = n - 1;
        while hi - lo > 1 {
            let mid = (lo + hi) / 2;
            if self.xs[mid] <= x {
                lo = mid;
            } else {
                hi = mid;
            }
        }

        let h = self.xs[lo + 1] - self.xs[lo];
        let t = x - self.xs[lo];
        let slope = (self.ys[lo + 1] - self.ys[lo]) / h
            - h * (2.0 * self.second[lo] + self.second[lo + 1]) / 6.0;

        self.ys[lo]
            + slope * t
            + self.second[lo] / 2.0 * t * t
            + (self.second[lo + 1] - self.second[lo]) / (6.0 * h) * t * t * t
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_two_knots_is_linear() {
        let spline = CubicSpline::fit(array![0.0, 10.0], array![0.0, 5.0]).unwrap();
        assert!((spline.eval(5.0) - 2.5).abs() < 1e-9);
        assert!((spline.eval(0.0) - 0.0).abs() < 1e-9);
        assert!((spline.eval(10.0) - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_interpolates_through_knots() {
        let xs = array![0.0, 1.0, 2.5, 4.0, 6.0];
        let ys = array![1.0, -2.0, 0.5, 3.0, -1.0];
        let spline = CubicSpline::fit(xs.clone(), ys.clone()).unwrap();
        for (x, y) in xs.iter().zip(ys.iter()) {
            assert!((spline.eval(*x) - y).abs() < 1e-9);
        }
    }

    #[test]
    fn test_eval_clamps_outside_range() {
        let spline = CubicSpline::fit(array![0.0, 1.0, 2.0], array![0.0, 1.0, 0.0]).unwrap();
        assert!((spline.eval(-5.0) - spline.eval(0.0)).abs() < 1e-12);
        assert!((spline.eval(99.0) - spline.eval(2.0)).abs() < 1e-12);
    }

    #[test]
    fn test_non_increasing_knots_rejected() {
        let err = CubicSpline::fit(array![0.0, 2.0, 2.0], array![0.0, 1.0, 2.0]).unwrap_err();
        assert_eq!(err, CharterError::DegenerateFit(2));

        let err = CubicSpline::fit(array![1.0], array![1.0]).unwrap_err();
        assert_eq!(err, CharterError::DegenerateFit(0));
    }

    #[test]
    fn test_smooth_hump_peaks_between_knots() {
        // Symmetric tent: the spline should bulge smoothly through the top
        let spline =
            CubicSpline::fit(array![0.0, 5.0, 10.0, 15.0, 20.0], array![0.0, 1.0, 2.0, 1.0, 0.0])
                .unwrap();
        let near_top = spline.eval(9.0);
        assert!(near_top > 1.5 && near_top <= 2.1, "got {near_top}");
    }
}
