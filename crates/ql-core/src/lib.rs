//! # ql-core
//!
//! What every curve crate shares: numeric aliases, the [`Error`] enum and
//! its precondition macros, observer wiring for quote-driven rebuilds, and
//! the thread-local evaluation date.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Error types and the `ensure!` / `fail!` / `ensure_post!` macros.
pub mod errors;

/// Observer and observable traits.
pub mod patterns;

/// Per-thread library settings (evaluation date).
pub mod settings;

/// Message formatting.
pub mod utilities;

/// Every quantity, rate and time is an `f64`.
pub type Real = f64;

/// Day counts such as settlement days.
pub type Natural = u32;

/// Lengths and indices.
pub type Size = usize;

/// A rate expressed as a decimal (e.g. 0.05 = 5 %).
pub type Rate = Real;

/// A correlation level in [-1, 1].
pub type Correlation = Real;

/// A time measurement in years.
pub type Time = Real;

pub use errors::{Error, Result};
pub use patterns::observable::{Observable, ObservableImpl, Observer};
pub use settings::{ScopedEvaluationDate, Settings};
