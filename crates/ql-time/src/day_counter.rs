//! Day-count conventions (translates `ql/time/daycounter.hpp` and the
//! handful of `ql/time/daycounters/` used by the curves).
//!
//! Inflation and correlation curves turn dates into times with one of
//! these; every other time computation in the workspace goes through
//! [`DayCounter::year_fraction`].

use crate::date::{is_leap_year, Date};
use ql_core::{Real, Time};

/// A convention for counting the fraction of a year between two dates.
pub trait DayCounter: std::fmt::Debug + Send + Sync {
    /// QuantLib's printed name, e.g. `"Actual/360"`.
    fn name(&self) -> &str;

    /// Days from `d1` to `d2` as this convention counts them.
    fn day_count(&self, d1: Date, d2: Date) -> i64;

    /// Year fraction from `d1` to `d2`; negative when `d2 < d1`.
    fn year_fraction(&self, d1: Date, d2: Date) -> Time;
}

fn actual_days(d1: Date, d2: Date) -> i64 {
    i64::from(d2.serial()) - i64::from(d1.serial())
}

/// Actual days over a fixed 365-day year.
#[derive(Debug, Clone, Copy, Default)]
pub struct Actual365Fixed;

impl DayCounter for Actual365Fixed {
    fn name(&self) -> &str {
        "Actual/365 (Fixed)"
    }

    fn day_count(&self, d1: Date, d2: Date) -> i64 {
        actual_days(d1, d2)
    }

    fn year_fraction(&self, d1: Date, d2: Date) -> Time {
        actual_days(d1, d2) as Real / 365.0
    }
}

/// Actual days over a 360-day year.
#[derive(Debug, Clone, Copy, Default)]
pub struct Actual360;

impl DayCounter for Actual360 {
    fn name(&self) -> &str {
        "Actual/360"
    }

    fn day_count(&self, d1: Date, d2: Date) -> i64 {
        actual_days(d1, d2)
    }

    fn year_fraction(&self, d1: Date, d2: Date) -> Time {
        actual_days(d1, d2) as Real / 360.0
    }
}

/// 30/360 bond basis: every month has 30 days, a 31st start is pulled
/// back to the 30th and a 31st end follows it only when the start did.
#[derive(Debug, Clone, Copy, Default)]
pub struct Thirty360;

impl DayCounter for Thirty360 {
    fn name(&self) -> &str {
        "30/360"
    }

    fn day_count(&self, d1: Date, d2: Date) -> i64 {
        let start = i64::from(d1.day_of_month()).min(30);
        let end = match i64::from(d2.day_of_month()) {
            31 if start == 30 => 30,
            d => d,
        };
        let years = i64::from(d2.year()) - i64::from(d1.year());
        let months = i64::from(d2.month()) - i64::from(d1.month());
        360 * years + 30 * months + (end - start)
    }

    fn year_fraction(&self, d1: Date, d2: Date) -> Time {
        self.day_count(d1, d2) as Real / 360.0
    }
}

/// Actual/Actual (ISDA): the days falling in each calendar year are
/// divided by that year's length.
#[derive(Debug, Clone, Copy, Default)]
pub struct ActualActualIsda;

impl DayCounter for ActualActualIsda {
    fn name(&self) -> &str {
        "Actual/Actual (ISDA)"
    }

    fn day_count(&self, d1: Date, d2: Date) -> i64 {
        actual_days(d1, d2)
    }

    fn year_fraction(&self, d1: Date, d2: Date) -> Time {
        if d1 > d2 {
            return -self.year_fraction(d2, d1);
        }
        let (y1, y2) = (d1.year(), d2.year());
        if y1 == y2 {
            return actual_days(d1, d2) as Real / year_length(y1);
        }
        let first = (year_length(y1) - Real::from(d1.day_of_year()) + 1.0) / year_length(y1);
        let last = (Real::from(d2.day_of_year()) - 1.0) / year_length(y2);
        first + Real::from(y2 - y1 - 1) + last
    }
}

fn year_length(year: u16) -> Real {
    if is_leap_year(year) {
        366.0
    } else {
        365.0
    }
}
