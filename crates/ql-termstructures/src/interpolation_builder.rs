//! 1D interpolation factories used by interpolated curves.
//!
//! Curves are built from `(time, value)` nodes; the factory lets callers
//! choose the interpolation scheme without the curve knowing the concrete
//! type.

use ql_core::{errors::Result, Real};
use ql_math::Interpolation1D;

/// Trait for creating an interpolation from `(xs, ys)` slices.
pub trait InterpolationBuilder: std::fmt::Debug {
    /// Build an interpolation from the given x and y values.
    fn build(&self, xs: &[Real], ys: &[Real]) -> Result<Box<dyn Interpolation1D>>;
}

/// Linear interpolation builder.
#[derive(Debug, Clone, Copy, Default)]
pub struct Linear;

impl InterpolationBuilder for Linear {
    fn build(&self, xs: &[Real], ys: &[Real]) -> Result<Box<dyn Interpolation1D>> {
        Ok(Box::new(ql_math::LinearInterpolation::new(xs, ys)?))
    }
}

/// Cubic natural spline interpolation builder.
#[derive(Debug, Clone, Copy, Default)]
pub struct CubicNatural;

impl InterpolationBuilder for CubicNatural {
    fn build(&self, xs: &[Real], ys: &[Real]) -> Result<Box<dyn Interpolation1D>> {
        Ok(Box::new(ql_math::CubicNaturalSpline::new(xs, ys)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn builders_pass_through_nodes() {
        let xs = [0.0, 1.0, 3.0];
        let ys = [0.02, 0.025, 0.021];
        for builder in [&Linear as &dyn InterpolationBuilder, &CubicNatural] {
            let f = builder.build(&xs, &ys).unwrap();
            for (&x, &y) in xs.iter().zip(ys.iter()) {
                assert_abs_diff_eq!(f.operator(x), y, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn builders_propagate_errors() {
        assert!(Linear.build(&[0.0], &[1.0]).is_err());
        assert!(CubicNatural.build(&[1.0, 0.0], &[1.0, 2.0]).is_err());
    }
}
