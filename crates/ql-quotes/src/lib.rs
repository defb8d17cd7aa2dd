//! # ql-quotes
//!
//! Observable market quotes.  A quote notifies every subscribed dependent
//! synchronously whenever its value changes.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// `Quote` trait and concrete implementations.
pub mod quote;

pub use quote::{Quote, QuoteHandle, SimpleQuote};
