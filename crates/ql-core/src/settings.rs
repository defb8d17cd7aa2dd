//! Library settings (translates `ql/settings.hpp`).
//!
//! [`Settings`] holds the **evaluation date** — the date at which all
//! calculations are performed.  Term structures built with settlement days
//! derive their reference date from it.
//!
//! The setting is kept per thread, which matches the single-threaded
//! notification model of the curve objects and keeps tests that move the
//! evaluation date independent of each other.  The date is stored as a
//! serial number (days since the QuantLib epoch) because this crate sits
//! below `ql-time`.

use std::cell::Cell;

thread_local! {
    static EVALUATION_DATE: Cell<Option<i32>> = const { Cell::new(None) };
}

/// Per-thread settings used by the library.
///
/// Currently the only setting is the **evaluation date** (today's date).
pub struct Settings;

impl Settings {
    /// Return the current evaluation date serial number (days since the
    /// QuantLib epoch: January 1, 1900).
    ///
    /// Returns `None` if no evaluation date has been set, in which case
    /// callers fall back to the system date.
    pub fn evaluation_date_serial() -> Option<i32> {
        EVALUATION_DATE.with(Cell::get)
    }

    /// Set the evaluation date as a serial number.
    pub fn set_evaluation_date_serial(serial: i32) {
        EVALUATION_DATE.with(|d| d.set(Some(serial)));
    }

    /// Clear the evaluation date, resetting it to "use today".
    pub fn reset_evaluation_date() {
        EVALUATION_DATE.with(|d| d.set(None));
    }
}

/// RAII guard that sets the evaluation date and restores the previous value
/// when dropped.
///
/// # Example
/// ```
/// use ql_core::{ScopedEvaluationDate, Settings};
///
/// {
///     let _guard = ScopedEvaluationDate::new(45_000);
///     assert_eq!(Settings::evaluation_date_serial(), Some(45_000));
/// }
/// assert_eq!(Settings::evaluation_date_serial(), None);
/// ```
#[must_use = "the previous evaluation date is restored when the guard is dropped"]
pub struct ScopedEvaluationDate {
    previous: Option<i32>,
}

impl ScopedEvaluationDate {
    /// Set the evaluation date to `serial` for the lifetime of the guard.
    pub fn new(serial: i32) -> Self {
        let previous = Settings::evaluation_date_serial();
        Settings::set_evaluation_date_serial(serial);
        Self { previous }
    }
}

impl Drop for ScopedEvaluationDate {
    fn drop(&mut self) {
        match self.previous {
            Some(serial) => Settings::set_evaluation_date_serial(serial),
            None => Settings::reset_evaluation_date(),
        }
    }
}
