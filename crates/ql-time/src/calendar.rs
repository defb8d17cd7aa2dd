//! `Calendar` trait and concrete calendar implementations.
//!
//! A calendar knows which dates are business days and can adjust and advance
//! dates according to a [`BusinessDayConvention`].  Date arithmetic is
//! fallible at the edges of the supported date range, so every method that
//! moves a date returns a `Result`.

use crate::business_day_convention::BusinessDayConvention;
use crate::date::Date;
use crate::period::Period;
use crate::time_unit::TimeUnit;
use chrono::Weekday;
use ql_core::errors::Result;

/// A financial calendar.
///
/// Corresponds to `QuantLib::Calendar`.
pub trait Calendar: std::fmt::Debug {
    /// Human-readable name (e.g. `"Weekends Only"`).
    fn name(&self) -> &str;

    /// Return `true` if `date` is a business day in this calendar.
    fn is_business_day(&self, date: Date) -> bool;

    /// Return `true` if `date` is a holiday (non-business) day.
    fn is_holiday(&self, date: Date) -> bool {
        !self.is_business_day(date)
    }

    /// Return `true` if `date` is a weekend according to this calendar.
    fn is_weekend(&self, date: Date) -> bool {
        matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
    }

    /// Return `true` if `date` is the last business day of its month.
    fn is_end_of_month(&self, date: Date) -> Result<bool> {
        let next = self.adjust(date.add_days(1)?, BusinessDayConvention::Following)?;
        Ok(date.month() != next.month())
    }

    /// Return the last business day of the month containing `date`.
    fn end_of_month(&self, date: Date) -> Result<Date> {
        self.adjust(date.end_of_month(), BusinessDayConvention::Preceding)
    }

    /// Adjust `date` according to the given business-day convention.
    fn adjust(&self, date: Date, convention: BusinessDayConvention) -> Result<Date> {
        match convention {
            BusinessDayConvention::Unadjusted => Ok(date),
            BusinessDayConvention::Following => self.roll(date, 1),
            BusinessDayConvention::Preceding => self.roll(date, -1),
            BusinessDayConvention::ModifiedFollowing => {
                let adjusted = self.roll(date, 1)?;
                if adjusted.month() != date.month() {
                    self.roll(date, -1)
                } else {
                    Ok(adjusted)
                }
            }
            BusinessDayConvention::ModifiedPreceding => {
                let adjusted = self.roll(date, -1)?;
                if adjusted.month() != date.month() {
                    self.roll(date, 1)
                } else {
                    Ok(adjusted)
                }
            }
            BusinessDayConvention::Nearest => {
                if self.is_business_day(date) {
                    return Ok(date);
                }
                let fwd = self.roll(date, 1)?;
                let bwd = self.roll(date, -1)?;
                if fwd - date <= date - bwd {
                    Ok(fwd)
                } else {
                    Ok(bwd)
                }
            }
            BusinessDayConvention::EndOfMonth => self.end_of_month(date),
        }
    }

    /// Step one day at a time in direction `step` until a business day.
    fn roll(&self, mut date: Date, step: i32) -> Result<Date> {
        while self.is_holiday(date) {
            date = date.add_days(step)?;
        }
        Ok(date)
    }

    /// Advance `date` by `period` (translates `Calendar::advance`).
    ///
    /// * A zero-length period adjusts `date` with `convention`.
    /// * `Days` moves by business days; the convention is not used.
    /// * `Weeks` adds calendar weeks, then adjusts.
    /// * `Months`/`Years` add calendar months; when `end_of_month` is set and
    ///   `date` is the last business day of its month, the result is the last
    ///   business day of the target month.  Otherwise the result is adjusted.
    fn advance(
        &self,
        date: Date,
        period: Period,
        convention: BusinessDayConvention,
        end_of_month: bool,
    ) -> Result<Date> {
        let n = period.length;
        if n == 0 {
            return self.adjust(date, convention);
        }
        match period.unit {
            TimeUnit::Days => self.advance_business_days(date, n),
            TimeUnit::Weeks => self.adjust(date.advance(n, TimeUnit::Weeks)?, convention),
            TimeUnit::Months | TimeUnit::Years => {
                let moved = date.add_period(period)?;
                if end_of_month && self.is_end_of_month(date)? {
                    self.end_of_month(moved)
                } else {
                    self.adjust(moved, convention)
                }
            }
        }
    }

    /// Advance `date` by `n` business days.
    ///
    /// For `n == 0` a holiday is rolled forward to the next business day.
    fn advance_business_days(&self, mut date: Date, n: i32) -> Result<Date> {
        if n == 0 {
            return self.roll(date, 1);
        }
        let step: i32 = if n > 0 { 1 } else { -1 };
        let mut remaining = n.abs();
        while remaining > 0 {
            date = date.add_days(step)?;
            if self.is_business_day(date) {
                remaining -= 1;
            }
        }
        Ok(date)
    }

    /// Count the number of business days between `d1` (exclusive) and `d2`
    /// (inclusive).  Returns a negative number if `d2 < d1`.
    fn business_days_between(&self, d1: Date, d2: Date) -> i32 {
        let (start, end, sign) = if d2 >= d1 { (d1, d2, 1) } else { (d2, d1, -1) };
        let count = (start.serial() + 1..=end.serial())
            .filter_map(|s| Date::from_serial(s).ok())
            .filter(|d| self.is_business_day(*d))
            .count() as i32;
        sign * count
    }
}

/// A null calendar — treats every day as a business day.
///
/// Equivalent to `QuantLib::NullCalendar`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullCalendar;

impl Calendar for NullCalendar {
    fn name(&self) -> &str {
        "Null"
    }

    fn is_business_day(&self, _date: Date) -> bool {
        true
    }

    fn is_weekend(&self, _date: Date) -> bool {
        false
    }
}

/// A calendar that treats only Saturdays and Sundays as non-business days,
/// with no additional holidays.
///
/// Equivalent to `QuantLib::WeekendsOnly`.
#[derive(Debug, Clone, Copy, Default)]
pub struct WeekendsOnly;

impl Calendar for WeekendsOnly {
    fn name(&self) -> &str {
        "Weekends Only"
    }

    fn is_business_day(&self, date: Date) -> bool {
        !self.is_weekend(date)
    }
}
