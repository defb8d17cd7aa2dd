//! Error types for the market-curve crates.
//!
//! QuantLib's exception hierarchy (rooted in `std::exception`) collapses to a
//! single `thiserror`-derived enum.  The C++ macros `QL_REQUIRE`, `QL_ENSURE`,
//! and `QL_FAIL` map to the `ensure!`, `ensure_post!` and `fail!` macros
//! defined here.

use thiserror::Error;

/// The top-level error type used throughout the workspace.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// General runtime error (maps to `QL_FAIL`).
    #[error("{0}")]
    Runtime(String),

    /// Precondition violated (maps to `QL_REQUIRE`).
    #[error("precondition not satisfied: {0}")]
    Precondition(String),

    /// Postcondition violated (maps to `QL_ENSURE`).
    #[error("postcondition not satisfied: {0}")]
    Postcondition(String),

    /// Date-related error.
    #[error("date error: {0}")]
    Date(String),

    /// Invalid argument.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A date, time or coordinate outside the valid range of a curve or
    /// interpolation, requested without extrapolation.
    #[error("out of range: {0}")]
    OutOfRange(String),

    /// A seasonality adjustment that does not fit the term structure it is
    /// attached to.
    #[error("seasonality error: {0}")]
    Seasonality(String),

    /// A lookup on a term structure whose two-phase initialisation has not
    /// been completed.
    #[error("term structure not finalized: {0}")]
    NotFinalized(String),
}

/// Shorthand `Result` type used throughout the workspace.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Equivalent to C++ `QL_REQUIRE(condition, message)`.
///
/// Returns `Err(Error::Precondition(...))` if `$cond` is false.
///
/// # Example
/// ```
/// use ql_core::{ensure, errors::Error};
/// fn positive(x: f64) -> ql_core::errors::Result<f64> {
///     ensure!(x > 0.0, "x must be positive, got {x}");
///     Ok(x)
/// }
/// assert!(positive(1.0).is_ok());
/// assert!(positive(-1.0).is_err());
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::errors::Error::Precondition(
                format!($($msg)*)
            ));
        }
    };
}

/// Equivalent to C++ `QL_ENSURE(condition, message)`.
///
/// Returns `Err(Error::Postcondition(...))` if `$cond` is false.
///
/// # Example
/// ```
/// use ql_core::{ensure_post, errors::Error};
/// fn compute(x: f64) -> ql_core::errors::Result<f64> {
///     let result = x * 2.0;
///     ensure_post!(result > 0.0, "result must be positive, got {result}");
///     Ok(result)
/// }
/// assert!(compute(1.0).is_ok());
/// assert!(compute(-1.0).is_err());
/// ```
#[macro_export]
macro_rules! ensure_post {
    ($cond:expr, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::errors::Error::Postcondition(
                format!($($msg)*)
            ));
        }
    };
}

/// Equivalent to C++ `QL_FAIL(message)`.
///
/// Returns `Err(Error::Runtime(...))` immediately.
///
/// # Example
/// ```
/// use ql_core::{fail, errors::Error};
/// fn always_err() -> ql_core::errors::Result<()> {
///     fail!("something went wrong");
/// }
/// assert!(always_err().is_err());
/// ```
#[macro_export]
macro_rules! fail {
    ($($msg:tt)*) => {
        return Err($crate::errors::Error::Runtime(format!($($msg)*)))
    };
}

/// Range check used by curve and interpolation lookups.
///
/// Returns `Err(Error::OutOfRange(...))` if `$cond` is false.
///
/// # Example
/// ```
/// use ql_core::{ensure_in_range, errors::Error};
/// fn lookup(t: f64, max: f64) -> ql_core::errors::Result<f64> {
///     ensure_in_range!(t <= max, "time ({t}) is past max curve time ({max})");
///     Ok(t)
/// }
/// assert!(lookup(1.0, 2.0).is_ok());
/// assert!(matches!(lookup(3.0, 2.0), Err(Error::OutOfRange(_))));
/// ```
#[macro_export]
macro_rules! ensure_in_range {
    ($cond:expr, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::errors::Error::OutOfRange(
                format!($($msg)*)
            ));
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checked(x: i32) -> Result<i32> {
        crate::ensure!(x >= 0, "negative input {x}");
        crate::ensure_in_range!(x < 10, "{x} past the end");
        Ok(x)
    }

    #[test]
    fn macros_map_to_variants() {
        assert_eq!(checked(3), Ok(3));
        assert!(matches!(checked(-1), Err(Error::Precondition(_))));
        assert!(matches!(checked(12), Err(Error::OutOfRange(_))));
    }

    #[test]
    fn display_carries_message() {
        let e = Error::Seasonality("factors differ".into());
        assert_eq!(e.to_string(), "seasonality error: factors differ");
    }
}
