//! Bilinear 2D interpolation between discrete grid points
//! (translates `ql/math/interpolations/bilinearinterpolation.hpp`).
//!
//! Standard bilinear interpolation on a rectangular grid `(xs × ys → z)`.
//! Outside the grid the edge cell's bilinear form is continued.

use ql_core::{errors::Result, Real};

use super::{interpolation_2d::check_grid, locate, Interpolation2D};
use crate::matrix::Matrix;

/// Bilinear interpolation on a rectangular grid.
///
/// `z[(j, i)]` = f(xs\[i\], ys\[j\]).
///
/// Corresponds to `QuantLib::BilinearInterpolation`.
#[derive(Debug, Clone)]
pub struct BilinearInterpolation {
    xs: Vec<Real>,
    ys: Vec<Real>,
    z: Matrix,
}

impl BilinearInterpolation {
    /// Build a bilinear interpolation on the grid `(xs × ys → z)`.
    ///
    /// Both `xs` and `ys` must be strictly increasing with at least 2 points.
    pub fn new(xs: &[Real], ys: &[Real], z: &Matrix) -> Result<Self> {
        check_grid(xs, ys, z, 2)?;
        Ok(Self {
            xs: xs.to_vec(),
            ys: ys.to_vec(),
            z: z.clone(),
        })
    }
}

impl Interpolation2D for BilinearInterpolation {
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
        let (i, j) = (locate(&self.xs, x), locate(&self.ys, y));
        let t = (x - self.xs[i]) / (self.xs[i + 1] - self.xs[i]);
        let u = (y - self.ys[j]) / (self.ys[j + 1] - self.ys[j]);
        // along x on the two bracketing rows, then along y
        let lower = lerp(self.z[(j, i)], self.z[(j, i + 1)], t);
        let upper = lerp(self.z[(j + 1, i)], self.z[(j + 1, i + 1)], t);
        lerp(lower, upper, u)
    }
}

fn lerp(a: Real, b: Real, w: Real) -> Real {
    a + w * (b - a)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use proptest::prelude::*;

    #[test]
    fn bilinear_exact_on_grid() {
        let xs = vec![0.0, 1.0, 2.0];
        let ys = vec![0.0, 1.0];
        // row 0: [1, 2, 3], row 1: [4, 5, 6]
        let z = Matrix::from_row_slice(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let interp = BilinearInterpolation::new(&xs, &ys, &z).unwrap();
        assert_abs_diff_eq!(interp.operator(0.0, 0.0), 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(interp.operator(2.0, 0.0), 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(interp.operator(1.0, 1.0), 5.0, epsilon = 1e-12);
        assert_abs_diff_eq!(interp.operator(2.0, 1.0), 6.0, epsilon = 1e-12);
    }

    #[test]
    fn continues_the_edge_cell_outside_the_grid() {
        // z = 1 + x + 3y on [0, 1] x [0, 1]
        let z = Matrix::from_row_slice(2, 2, &[1.0, 2.0, 4.0, 5.0]);
        let interp = BilinearInterpolation::new(&[0.0, 1.0], &[0.0, 1.0], &z).unwrap();
        assert_abs_diff_eq!(interp.operator(0.5, 0.5), 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(interp.operator(2.0, -1.0), 0.0, epsilon = 1e-12);
        assert!(interp.value(2.0, 0.5, false).is_err());
        assert!(interp.value(2.0, 0.5, true).is_ok());
    }

    #[test]
    fn bilinear_edge_interpolation() {
        let z = Matrix::from_row_slice(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let interp = BilinearInterpolation::new(&[0.0, 1.0, 2.0], &[0.0, 1.0], &z).unwrap();
        assert_abs_diff_eq!(interp.operator(0.5, 0.0), 1.5, epsilon = 1e-12);
        assert_abs_diff_eq!(interp.operator(2.0, 0.5), 4.5, epsilon = 1e-12);
    }

    #[test]
    fn bilinear_rejects_single_column() {
        let z = Matrix::from_row_slice(2, 1, &[1.0, 2.0]);
        assert!(BilinearInterpolation::new(&[0.0], &[0.0, 1.0], &z).is_err());
    }

    proptest! {
        #[test]
        fn inside_the_grid_values_stay_between_the_nodes(x in 0.0f64..=2.0, y in 0.0f64..=1.0) {
            let z = Matrix::from_row_slice(2, 3, &[0.2, 0.35, 0.3, 0.4, 0.6, 0.45]);
            let interp = BilinearInterpolation::new(&[0.0, 1.0, 2.0], &[0.0, 1.0], &z).unwrap();
            let v = interp.value(x, y, false).unwrap();
            prop_assert!((0.2 - 1e-12..=0.6 + 1e-12).contains(&v));
        }
    }
}
