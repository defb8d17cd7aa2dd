//! # ql-experimental
//!
//! Experimental and unstable extensions.  Currently hosts the credit
//! correlation term structures.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Credit correlation term structures.
pub mod credit;

pub use credit::{BaseCorrelationBuilder, BaseCorrelationTermStructure, CorrelationTermStructure};
