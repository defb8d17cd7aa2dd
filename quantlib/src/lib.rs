//! # quantlib-curves
//!
//! Inflation term structures and base-correlation surfaces built on
//! QuantLib's term-structure model.
//!
//! This crate is a **façade** that re-exports all public items from the
//! underlying workspace crates. Application code should depend on this
//! crate rather than the individual `ql-*` crates.
//!
//! ## Quick start
//!
//! ```rust
//! use quantlib_curves::termstructures::{
//!     FlatZeroInflationCurve, InflationTermStructureData, TermStructureData,
//!     ZeroInflationTermStructure,
//! };
//! use quantlib_curves::time::{Actual365Fixed, Date, Frequency, NullCalendar, Period};
//!
//! let reference = Date::from_ymd(2024, 6, 15).unwrap();
//! let data = InflationTermStructureData::new(
//!     TermStructureData::fixed(reference, NullCalendar, Actual365Fixed),
//!     0.025,
//!     Period::months(3),
//!     Frequency::Monthly,
//! );
//! let curve = FlatZeroInflationCurve::new(data, 0.025);
//! let rate = curve
//!     .zero_rate(Date::from_ymd(2026, 1, 1).unwrap(), None, false, false)
//!     .unwrap();
//! assert!((rate - 0.025).abs() < 1e-12);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Core types, aliases, observer pattern, settings and error definitions.
pub use ql_core as core;

/// Date, calendar, day counter, and schedule types.
pub use ql_time as time;

/// Mathematical utilities: 1D/2D interpolation and matrices.
pub use ql_math as math;

/// Market quotes.
pub use ql_quotes as quotes;

/// Term structure base and inflation term structures.
pub use ql_termstructures as termstructures;

/// Experimental modules: credit correlation term structures.
pub use ql_experimental as experimental;
