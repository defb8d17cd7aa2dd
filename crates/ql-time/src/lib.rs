//! # ql-time
//!
//! Calendar arithmetic for the curve crates: serial [`Date`]s, [`Period`]s
//! with QuantLib's ordering, weekend-only calendars, the day counters that
//! turn dates into times, and the CDS schedule rules that roll tranche
//! maturities onto IMM twentieths.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Rolling rules for non-business days.
pub mod business_day_convention;

/// Calendars with weekend-only holidays.
pub mod calendar;

/// Serial dates.
pub mod date;

/// Date to year-fraction conventions.
pub mod day_counter;

/// Publication frequency.
pub mod frequency;

/// Signed spans of days, weeks, months or years.
pub mod period;

/// Date schedules and CDS date generation.
pub mod schedule;

/// Units of a period.
pub mod time_unit;

pub use business_day_convention::BusinessDayConvention;
pub use calendar::{Calendar, NullCalendar, WeekendsOnly};
pub use chrono::Weekday;
pub use date::Date;
pub use day_counter::{Actual360, Actual365Fixed, ActualActualIsda, DayCounter, Thirty360};
pub use frequency::Frequency;
pub use period::Period;
pub use schedule::{cds_maturity, DateGeneration, Schedule, ScheduleBuilder};
pub use time_unit::TimeUnit;
