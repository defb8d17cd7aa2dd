//! Credit correlation term structures (translates parts of
//! `ql/experimental/credit`).

mod base_correlation;
mod correlation_term_structure;

pub use base_correlation::{BaseCorrelationBuilder, BaseCorrelationTermStructure};
pub use correlation_term_structure::CorrelationTermStructure;
