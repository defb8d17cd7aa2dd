//! Helpers for composing error messages.

pub mod data_formatters;
