//! `CorrelationTermStructure` — base trait for correlation surfaces
//! (translates `ql/experimental/credit/correlationstructure.hpp`).

use ql_core::Size;
use ql_termstructures::TermStructure;
use ql_time::BusinessDayConvention;

/// A term structure of correlations.
///
/// Corresponds to `QuantLib::CorrelationTermStructure`.
pub trait CorrelationTermStructure: TermStructure {
    /// Number of correlation parameters returned per lookup (1 for scalar
    /// copula correlations).
    fn correlation_size(&self) -> Size;

    /// Convention used to roll tenors to dates.
    fn business_day_convention(&self) -> BusinessDayConvention;
}
