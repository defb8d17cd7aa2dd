//! # ql-termstructures
//!
//! Term structure base types and inflation term structures: publication
//! period utilities, lagged zero and year-on-year rate lookups, seasonality,
//! and flat / interpolated inflation curves.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// `TermStructure` — base trait for all term structures.
pub mod term_structure;

/// 1D interpolation factories for node-based curves.
pub mod interpolation_builder;

/// Inflation term structures: zero-inflation and year-on-year inflation curves.
pub mod inflation;

pub use inflation::{
    inflation_period, inflation_year_fraction, FlatYoYInflationCurve, FlatZeroInflationCurve,
    InflationTermStructure, InflationTermStructureData, InterpolatedYoYInflationCurve,
    InterpolatedZeroInflationCurve, MultiplicativePriceSeasonality, Seasonality,
    YoYInflationTermStructure, ZeroInflationTermStructure,
};
pub use interpolation_builder::{CubicNatural, InterpolationBuilder, Linear};
pub use term_structure::{ReferenceDate, TermStructure, TermStructureData};
