//! Floating-point comparison helpers (translates `ql/math/comparison.hpp`).

use ql_core::Real;

/// Absolute tolerance below which a quantity is treated as zero.
pub const EPSILON: Real = 1e-10;

/// `|a − b| ≤ tolerance`.
#[inline]
pub fn close(a: Real, b: Real, tolerance: Real) -> bool {
    (a - b).abs() <= tolerance
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absolute_tolerance() {
        assert!(close(1.0, 1.0 + 1e-11, EPSILON));
        assert!(!close(1.0, 1.0 + 1e-9, EPSILON));
        assert!(close(0.0, -5e-11, EPSILON));
    }
}
