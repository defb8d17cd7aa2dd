//! `Date` type (translates `ql/time/date.hpp`).
//!
//! Dates are day serials counted from 31 December 1899, so serial 1 is
//! 1 January 1900 and serial 0 is the null date. Calendar fields come from
//! [`chrono::NaiveDate`]; the serial is what gets stored, compared and
//! subtracted.

use crate::period::Period;
use crate::time_unit::TimeUnit;
use chrono::{Datelike, Months, NaiveDate, Weekday};
use ql_core::errors::{Error, Result};
use ql_core::Settings;

/// `NaiveDate::num_days_from_ce` of 31 December 1899.
const CE_OFFSET: i32 = 693_595;

const FIRST_YEAR: u16 = 1900;
const LAST_YEAR: u16 = 2199;

/// A calendar date in 1900–2199, or the null date.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Date(i32);

impl Date {
    /// Serial 0.
    pub const NULL: Date = Date(0);

    /// 1 January 1901.
    pub const MIN: Date = Date(366);

    /// 31 December 2199.
    pub const MAX: Date = Date(109_573);

    /// Date with the given serial; zero, negative and post-2199 serials are
    /// rejected.
    pub fn from_serial(serial: i32) -> Result<Self> {
        if serial <= 0 || serial > Self::MAX.0 {
            return Err(Error::Date(format!(
                "serial {serial} outside [1, {}]",
                Self::MAX.0
            )));
        }
        Ok(Date(serial))
    }

    /// Date from year, month (1 to 12) and day of month.
    pub fn from_ymd(year: u16, month: u8, day: u8) -> Result<Self> {
        if !(FIRST_YEAR..=LAST_YEAR).contains(&year) {
            return Err(Error::Date(format!(
                "year {year} outside [{FIRST_YEAR}, {LAST_YEAR}]"
            )));
        }
        NaiveDate::from_ymd_opt(i32::from(year), u32::from(month), u32::from(day))
            .map(Self::from_naive)
            .ok_or_else(|| Error::Date(format!("{year}-{month:02}-{day:02} is not a calendar day")))
    }

    fn from_naive(date: NaiveDate) -> Self {
        Date(date.num_days_from_ce() - CE_OFFSET)
    }

    fn naive(self) -> NaiveDate {
        // every serial in [0, MAX] is inside chrono's range
        NaiveDate::from_num_days_from_ce_opt(self.0 + CE_OFFSET).unwrap_or(NaiveDate::MIN)
    }

    fn checked(date: Option<NaiveDate>, what: impl FnOnce() -> String) -> Result<Self> {
        match date {
            Some(d) if (i32::from(FIRST_YEAR)..=i32::from(LAST_YEAR)).contains(&d.year()) => {
                Ok(Self::from_naive(d))
            }
            _ => Err(Error::Date(format!("{} is out of range", what()))),
        }
    }

    /// Days since 31 December 1899.
    pub fn serial(&self) -> i32 {
        self.0
    }

    /// Whether this is [`Date::NULL`].
    pub fn is_null(&self) -> bool {
        self.0 == 0
    }

    /// Calendar year.
    pub fn year(&self) -> u16 {
        self.naive().year() as u16
    }

    /// 1 to 12.
    pub fn month(&self) -> u8 {
        self.naive().month() as u8
    }

    /// Day of the month, from 1.
    pub fn day_of_month(&self) -> u8 {
        self.naive().day() as u8
    }

    /// 1 to 366.
    pub fn day_of_year(&self) -> u16 {
        self.naive().ordinal() as u16
    }

    /// Day of the week.
    pub fn weekday(&self) -> Weekday {
        self.naive().weekday()
    }

    /// `self + n` days.
    pub fn add_days(self, n: i32) -> Result<Self> {
        match self.0.checked_add(n) {
            Some(serial) if serial > 0 && serial <= Self::MAX.0 => Ok(Date(serial)),
            _ => Err(Error::Date(format!("{self:?} + {n} days is out of range"))),
        }
    }

    /// Move by `n` units. Months and years keep the day of month when it
    /// exists and fall back to the last day otherwise, so 31 January plus
    /// one month is the end of February.
    pub fn advance(self, n: i32, unit: TimeUnit) -> Result<Self> {
        let months = match unit {
            TimeUnit::Days => return self.add_days(n),
            TimeUnit::Weeks => return self.add_days(n * 7),
            TimeUnit::Months => n,
            TimeUnit::Years => n * 12,
        };
        let step = Months::new(months.unsigned_abs());
        let moved = if months >= 0 {
            self.naive().checked_add_months(step)
        } else {
            self.naive().checked_sub_months(step)
        };
        Self::checked(moved, || format!("{self:?} + {months} months"))
    }

    /// `self + period`.
    pub fn add_period(self, period: Period) -> Result<Self> {
        self.advance(period.length, period.unit)
    }

    /// `self - period`.
    pub fn sub_period(self, period: Period) -> Result<Self> {
        self.advance(-period.length, period.unit)
    }

    /// Days from `self` to `other`.
    pub fn days_between(self, other: Date) -> i32 {
        other.0 - self.0
    }

    /// First day of this date's month.
    pub fn start_of_month(self) -> Self {
        Date(self.0 + 1 - i32::from(self.day_of_month()))
    }

    /// Last day of this date's month.
    pub fn end_of_month(self) -> Self {
        let (y, m) = (self.year(), self.month());
        Date(self.0 + i32::from(days_in_month(y, m)) - i32::from(self.day_of_month()))
    }

    /// Whether this is the last day of its month.
    pub fn is_end_of_month(self) -> bool {
        self == self.end_of_month()
    }

    /// Today on the local clock.
    pub fn todays_date() -> Result<Self> {
        let today = chrono::Local::now().date_naive();
        Self::checked(Some(today), || today.to_string())
    }

    /// The thread's evaluation date from [`Settings`], or today when none
    /// has been set.
    pub fn evaluation_date() -> Result<Self> {
        Settings::evaluation_date_serial().map_or_else(Date::todays_date, Date::from_serial)
    }
}

impl std::ops::Sub<Date> for Date {
    type Output = i32;
    fn sub(self, rhs: Date) -> i32 {
        self.0 - rhs.0
    }
}

impl std::fmt::Display for Date {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_null() {
            return f.write_str("null date");
        }
        write!(f, "{}", self.naive().format("%-d %B %Y"))
    }
}

impl std::fmt::Debug for Date {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_null() {
            return f.write_str("Date(null)");
        }
        write!(f, "Date({})", self.naive())
    }
}

/// Gregorian leap year test.
pub fn is_leap_year(year: u16) -> bool {
    NaiveDate::from_ymd_opt(i32::from(year), 2, 29).is_some()
}

/// Length of `month` in `year`.
pub fn days_in_month(year: u16, month: u8) -> u8 {
    match month {
        2 if is_leap_year(year) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: u16, m: u8, d: u8) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn serials_start_at_1900() {
        assert_eq!(date(1900, 1, 1).serial(), 1);
        assert_eq!(date(1901, 1, 1), Date::MIN);
        assert_eq!(date(2199, 12, 31), Date::MAX);
        assert!(Date::from_ymd(2200, 1, 1).is_err());
        assert!(Date::from_ymd(2023, 2, 29).is_err());
    }

    #[test]
    fn month_steps_fall_back_to_month_end() {
        assert_eq!(date(2023, 1, 31).advance(1, TimeUnit::Months).unwrap(), date(2023, 2, 28));
        assert_eq!(date(2024, 2, 29).advance(1, TimeUnit::Years).unwrap(), date(2025, 2, 28));
        assert_eq!(date(2024, 2, 29).advance(-1, TimeUnit::Years).unwrap(), date(2023, 2, 28));
        assert_eq!(date(2024, 1, 15).advance(-13, TimeUnit::Months).unwrap(), date(2022, 12, 15));
    }

    #[test]
    fn arithmetic_out_of_range() {
        assert!(date(2199, 12, 1).advance(1, TimeUnit::Months).is_err());
        assert!(date(1900, 1, 1).add_days(-1).is_err());
        assert!(date(1900, 6, 1).advance(-1, TimeUnit::Years).is_err());
    }

    #[test]
    fn month_boundaries() {
        let d = date(2023, 2, 1);
        assert_eq!(d.start_of_month(), d);
        assert_eq!(date(2024, 2, 15).end_of_month(), date(2024, 2, 29));
        assert_eq!(date(2024, 2, 15).start_of_month(), date(2024, 2, 1));
    }

    #[test]
    fn formatting() {
        assert_eq!(date(2024, 3, 5).to_string(), "5 March 2024");
        assert_eq!(format!("{:?}", date(2024, 3, 5)), "Date(2024-03-05)");
        assert_eq!(Date::NULL.to_string(), "null date");
    }

    #[test]
    fn evaluation_date_follows_settings() {
        let d = date(2021, 5, 17);
        let _guard = ql_core::ScopedEvaluationDate::new(d.serial());
        assert_eq!(Date::evaluation_date().unwrap(), d);
    }
}
