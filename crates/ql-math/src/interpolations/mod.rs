//! 1D and 2D interpolation traits and implementations (translates
//! `ql/math/interpolation.hpp`, `ql/math/interpolation2d.hpp` and
//! `ql/math/interpolations/`).

use ql_core::{ensure_in_range, errors::Result, Real};

/// Bicubic spline surfaces.
pub mod bicubic;
/// Bilinear surfaces.
pub mod bilinear;
/// Natural cubic spline.
pub mod cubic;
/// 2D interpolation trait and factories.
pub mod interpolation_2d;

pub use bicubic::BicubicSpline;
pub use bilinear::BilinearInterpolation;
pub use cubic::CubicNaturalSpline;
pub use interpolation_2d::{Bicubic, Bilinear, Interpolation2D, Interpolator2D};

/// A 1D interpolation function `f: R → R` defined by a set of known points.
///
/// Corresponds to `QuantLib::Interpolation`.
pub trait Interpolation1D: std::fmt::Debug {
    /// Evaluate the interpolation at `x`, extrapolating outside the nodes.
    fn operator(&self, x: Real) -> Real;

    /// Return the lower bound of the interpolation domain.
    fn x_min(&self) -> Real;

    /// Return the upper bound of the interpolation domain.
    fn x_max(&self) -> Real;

    /// Return `true` if `x` is within the interpolation range.
    fn is_in_range(&self, x: Real) -> bool {
        x >= self.x_min() && x <= self.x_max()
    }

    /// Evaluate at `x`, failing outside `[x_min, x_max]` unless
    /// `allow_extrapolation` is set.
    fn value(&self, x: Real, allow_extrapolation: bool) -> Result<Real> {
        ensure_in_range!(
            allow_extrapolation || self.is_in_range(x),
            "interpolation range is [{}, {}]: extrapolation at {x} not allowed",
            self.x_min(),
            self.x_max()
        );
        Ok(self.operator(x))
    }
}

/// Binary search: find `k` such that `vs[k] <= v < vs[k+1]`, clamped to
/// the first and last interval.
pub(crate) fn locate(vs: &[Real], v: Real) -> usize {
    vs.partition_point(|&node| node <= v).clamp(1, vs.len() - 1) - 1
}

/// Check that `xs` is strictly increasing and matches `ys` in length.
pub(crate) fn check_nodes(xs: &[Real], ys: &[Real], min_points: usize) -> Result<()> {
    ql_core::ensure!(
        xs.len() >= min_points,
        "need at least {min_points} points for interpolation, got {}",
        xs.len()
    );
    ql_core::ensure!(
        xs.len() == ys.len(),
        "xs and ys must have the same length ({} vs {})",
        xs.len(),
        ys.len()
    );
    for (i, w) in xs.windows(2).enumerate() {
        ql_core::ensure!(
            w[1] > w[0],
            "unsorted x values: x[{i}] = {}, x[{}] = {}",
            w[0],
            i + 1,
            w[1]
        );
    }
    Ok(())
}

// ── Linear ────────────────────────────────────────────────────────────────────

/// Linear interpolation.
///
/// `f(x) = y[i] + (y[i+1] - y[i]) * (x - x[i]) / (x[i+1] - x[i])`
#[derive(Debug, Clone)]
pub struct LinearInterpolation {
    xs: Vec<Real>,
    ys: Vec<Real>,
}

impl LinearInterpolation {
    /// Construct a linear interpolation from sorted `xs` and corresponding `ys`.
    ///
    /// # Errors
    /// Returns an error if the slices have different lengths, fewer than 2
    /// points, or `xs` is not strictly increasing.
    pub fn new(xs: &[Real], ys: &[Real]) -> Result<Self> {
        check_nodes(xs, ys, 2)?;
        Ok(Self {
            xs: xs.to_vec(),
            ys: ys.to_vec(),
        })
    }
}

impl Interpolation1D for LinearInterpolation {
    fn x_min(&self) -> Real {
        self.xs[0]
    }

    fn x_max(&self) -> Real {
        self.xs[self.xs.len() - 1]
    }

    fn operator(&self, x: Real) -> Real {
        let i = locate(&self.xs, x);
        let dx = self.xs[i + 1] - self.xs[i];
        self.ys[i] + (x - self.xs[i]) * (self.ys[i + 1] - self.ys[i]) / dx
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn linear_interpolation() {
        let xs = [0.0, 1.0, 2.0];
        let ys = [0.0, 1.0, 4.0];
        let interp = LinearInterpolation::new(&xs, &ys).unwrap();
        assert_abs_diff_eq!(interp.operator(0.5), 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(interp.operator(1.5), 2.5, epsilon = 1e-12);
    }

    #[test]
    fn linear_extrapolation_is_guarded() {
        let interp = LinearInterpolation::new(&[0.0, 1.0], &[1.0, 3.0]).unwrap();
        assert!(interp.value(1.5, false).is_err());
        assert_abs_diff_eq!(interp.value(1.5, true).unwrap(), 4.0, epsilon = 1e-12);
        assert_abs_diff_eq!(interp.value(-1.0, true).unwrap(), -1.0, epsilon = 1e-12);
    }

    #[test]
    fn unsorted_nodes_rejected() {
        assert!(LinearInterpolation::new(&[0.0, 2.0, 1.0], &[0.0, 1.0, 2.0]).is_err());
        assert!(LinearInterpolation::new(&[0.0], &[0.0]).is_err());
        assert!(LinearInterpolation::new(&[0.0, 1.0], &[0.0]).is_err());
    }
}
