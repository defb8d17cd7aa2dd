//! # ql-math
//!
//! Mathematical utilities for the market-curve crates: floating-point
//! comparison, a matrix newtype over nalgebra, and 1D/2D interpolation
//! schemes.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Floating-point comparison utilities.
pub mod comparison;

/// 1D and 2D interpolation schemes.
pub mod interpolations;

/// Dense matrix newtype.
pub mod matrix;

pub use comparison::close;
pub use interpolations::{
    Bicubic, BicubicSpline, Bilinear, BilinearInterpolation, CubicNaturalSpline,
    Interpolation1D, Interpolation2D, Interpolator2D, LinearInterpolation,
};
pub use matrix::Matrix;
