//! Bicubic spline interpolation on a 2D grid
//! (translates `ql/math/interpolations/bicubicsplineinterpolation.hpp`).
//!
//! For each row of the grid, a 1D natural cubic spline is built along `x`.
//! Then, for any query `(x, y)`, the row splines are evaluated at `x` to
//! produce an intermediate column of values, which is itself interpolated
//! along `y` with another natural cubic spline.

use ql_core::{errors::Result, Real};

use super::{
    cubic::natural_spline_value, interpolation_2d::check_grid, CubicNaturalSpline,
    Interpolation1D, Interpolation2D,
};
use crate::matrix::Matrix;

/// Bicubic spline interpolation on a rectangular grid.
///
/// `z[(j, i)]` = f(xs\[i\], ys\[j\]).
///
/// Corresponds to `QuantLib::BicubicSpline`.
#[derive(Debug, Clone)]
pub struct BicubicSpline {
    xs: Vec<Real>,
    ys: Vec<Real>,
    /// One cubic spline per y-row, interpolating along x.
    row_splines: Vec<CubicNaturalSpline>,
}

impl BicubicSpline {
    /// Build a bicubic spline on the grid `(xs × ys → z)`.
    ///
    /// Both `xs` and `ys` must be strictly increasing and have at least 3
    /// elements.
    pub fn new(xs: &[Real], ys: &[Real], z: &Matrix) -> Result<Self> {
        check_grid(xs, ys, z, 3)?;
        let row_splines = (0..ys.len())
            .map(|j| CubicNaturalSpline::new(xs, &z.row(j)))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            xs: xs.to_vec(),
            ys: ys.to_vec(),
            row_splines,
        })
    }
}

impl Interpolation2D for BicubicSpline {
    fn x_min(&self) -> Real {
        self.xs[0]
    }

    fn x_max(&self) -> Real {
        self.xs[self.xs.len() - 1]
    }

    fn y_min(&self) -> Real {
        self.ys[0]
    }

    fn y_max(&self) -> Real {
        self.ys[self.ys.len() - 1]
    }

    fn operator(&self, x: Real, y: Real) -> Real {
        let column: Vec<Real> = self.row_splines.iter().map(|s| s.operator(x)).collect();
        natural_spline_value(&self.ys, &column, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn grid(f: impl Fn(Real, Real) -> Real) -> (Vec<Real>, Vec<Real>, Matrix) {
        let xs = vec![0.0, 1.0, 2.0, 3.0];
        let ys = vec![0.0, 1.0, 2.0, 3.0];
        let mut z = Matrix::zeros(ys.len(), xs.len());
        for (j, &y) in ys.iter().enumerate() {
            for (i, &x) in xs.iter().enumerate() {
                z[(j, i)] = f(x, y);
            }
        }
        (xs, ys, z)
    }

    #[test]
    fn bicubic_exact_on_grid() {
        let (xs, ys, z) = grid(|x, y| x * x - y);
        let interp = BicubicSpline::new(&xs, &ys, &z).unwrap();
        for &y in &ys {
            for &x in &xs {
                assert_abs_diff_eq!(interp.operator(x, y), x * x - y, epsilon = 1e-10);
            }
        }
    }

    #[test]
    fn bicubic_reproduces_linear_function() {
        let (xs, ys, z) = grid(|x, y| 2.0 * x + 3.0 * y + 1.0);
        let interp = BicubicSpline::new(&xs, &ys, &z).unwrap();
        assert_abs_diff_eq!(interp.operator(1.5, 2.5), 2.0 * 1.5 + 3.0 * 2.5 + 1.0, epsilon = 1e-10);
    }

    #[test]
    fn bicubic_smooth_interior() {
        let (xs, ys, z) = grid(|x, y| x * y);
        let interp = BicubicSpline::new(&xs, &ys, &z).unwrap();
        // x*y is linear along each axis
        assert_abs_diff_eq!(interp.operator(1.5, 1.5), 2.25, epsilon = 1e-10);
    }

    #[test]
    fn bicubic_needs_three_points_per_axis() {
        let z = Matrix::zeros(2, 3);
        assert!(BicubicSpline::new(&[0.0, 1.0, 2.0], &[0.0, 1.0], &z).is_err());
    }
}
