//! 2D interpolation trait and the interpolator factories used by grid-based
//! surfaces (translates `ql/math/interpolation2d.hpp` and the `Bilinear` /
//! `Bicubic` traits classes).
//!
//! Grid convention: `z[(j, i)] = f(xs[i], ys[j])`, i.e. rows follow `y` and
//! columns follow `x`.

use ql_core::{ensure_in_range, errors::Result, Real};

use super::{BicubicSpline, BilinearInterpolation};
use crate::matrix::Matrix;

/// 2D interpolation trait.
///
/// Corresponds to `QuantLib::Interpolation2D`.
pub trait Interpolation2D: std::fmt::Debug {
    /// Evaluate the surface at `(x, y)`, extrapolating outside the grid.
    fn operator(&self, x: Real, y: Real) -> Real;
    /// Lower bound of the x domain.
    fn x_min(&self) -> Real;
    /// Upper bound of the x domain.
    fn x_max(&self) -> Real;
    /// Lower bound of the y domain.
    fn y_min(&self) -> Real;
    /// Upper bound of the y domain.
    fn y_max(&self) -> Real;

    /// Return `true` if `(x, y)` lies inside the grid.
    fn is_in_range(&self, x: Real, y: Real) -> bool {
        x >= self.x_min() && x <= self.x_max() && y >= self.y_min() && y <= self.y_max()
    }

    /// Evaluate at `(x, y)`, failing outside the grid unless
    /// `allow_extrapolation` is set.
    fn value(&self, x: Real, y: Real, allow_extrapolation: bool) -> Result<Real> {
        ensure_in_range!(
            allow_extrapolation || self.is_in_range(x, y),
            "interpolation range is [{}, {}] x [{}, {}]: extrapolation at ({x}, {y}) not allowed",
            self.x_min(),
            self.x_max(),
            self.y_min(),
            self.y_max()
        );
        Ok(self.operator(x, y))
    }
}

/// Factory building a 2D interpolation over a grid.
///
/// Surfaces are generic over the interpolator and rebuild their
/// interpolation whenever the underlying grid changes.
pub trait Interpolator2D: std::fmt::Debug {
    /// The interpolation produced by this factory.
    type Output: Interpolation2D;

    /// Build the interpolation; `z` has one row per `ys` entry and one
    /// column per `xs` entry.
    fn interpolate(&self, xs: &[Real], ys: &[Real], z: &Matrix) -> Result<Self::Output>;
}

/// Bilinear interpolation factory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Bilinear;

impl Interpolator2D for Bilinear {
    type Output = BilinearInterpolation;

    fn interpolate(&self, xs: &[Real], ys: &[Real], z: &Matrix) -> Result<BilinearInterpolation> {
        BilinearInterpolation::new(xs, ys, z)
    }
}

/// Bicubic (natural) spline factory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Bicubic;

impl Interpolator2D for Bicubic {
    type Output = BicubicSpline;

    fn interpolate(&self, xs: &[Real], ys: &[Real], z: &Matrix) -> Result<BicubicSpline> {
        BicubicSpline::new(xs, ys, z)
    }
}

/// Check grid axes against the matrix shape.
pub(crate) fn check_grid(xs: &[Real], ys: &[Real], z: &Matrix, min_points: usize) -> Result<()> {
    ql_core::ensure!(
        xs.len() >= min_points,
        "need at least {min_points} x points, got {}",
        xs.len()
    );
    ql_core::ensure!(
        ys.len() >= min_points,
        "need at least {min_points} y points, got {}",
        ys.len()
    );
    ql_core::ensure!(
        z.rows() == ys.len() && z.cols() == xs.len(),
        "grid is {}x{} but axes have {} y and {} x points",
        z.rows(),
        z.cols(),
        ys.len(),
        xs.len()
    );
    for axis in [xs, ys] {
        ql_core::ensure!(
            axis.windows(2).all(|w| w[1] > w[0]),
            "grid axis must be strictly increasing"
        );
    }
    Ok(())
}
