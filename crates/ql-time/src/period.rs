//! `Period` — a time span expressed in a [`TimeUnit`] (translates
//! `ql/time/period.hpp`).
//!
//! Periods are only partially ordered: `1M` and `30D` cannot be compared
//! because a month spans 28 to 31 days.  `partial_cmp` returns `None` for
//! such pairs, while `1Y == 12M` and `2W == 14D` hold exactly.

use std::cmp::Ordering;

use crate::frequency::Frequency;
use crate::time_unit::TimeUnit;
use ql_core::errors::{Error, Result};

/// A time span made up of an integer length and a [`TimeUnit`].
///
/// Corresponds to `QuantLib::Period`.
#[derive(Clone, Copy)]
pub struct Period {
    /// Number of units.
    pub length: i32,
    /// The unit of time.
    pub unit: TimeUnit,
}

impl Period {
    /// Create a new period.
    pub fn new(length: i32, unit: TimeUnit) -> Self {
        Self { length, unit }
    }

    /// Construct a `Period` from a [`Frequency`].
    ///
    /// # Errors
    /// Returns an error for `NoFrequency` and `OtherFrequency`.
    pub fn from_frequency(freq: Frequency) -> Result<Self> {
        match freq {
            Frequency::NoFrequency | Frequency::OtherFrequency => Err(Error::InvalidArgument(
                format!("cannot convert {freq} to a Period"),
            )),
            Frequency::Once => Ok(Period::new(0, TimeUnit::Years)),
            Frequency::Annual => Ok(Period::new(1, TimeUnit::Years)),
            Frequency::Semiannual => Ok(Period::new(6, TimeUnit::Months)),
            Frequency::EveryFourthMonth => Ok(Period::new(4, TimeUnit::Months)),
            Frequency::Quarterly => Ok(Period::new(3, TimeUnit::Months)),
            Frequency::Bimonthly => Ok(Period::new(2, TimeUnit::Months)),
            Frequency::Monthly => Ok(Period::new(1, TimeUnit::Months)),
            Frequency::EveryFourthWeek => Ok(Period::new(4, TimeUnit::Weeks)),
            Frequency::Biweekly => Ok(Period::new(2, TimeUnit::Weeks)),
            Frequency::Weekly => Ok(Period::new(1, TimeUnit::Weeks)),
            Frequency::Daily => Ok(Period::new(1, TimeUnit::Days)),
        }
    }

    /// `n` days.
    pub fn days(n: i32) -> Self {
        Self::new(n, TimeUnit::Days)
    }

    /// `n` weeks.
    pub fn weeks(n: i32) -> Self {
        Self::new(n, TimeUnit::Weeks)
    }

    /// `n` months.
    pub fn months(n: i32) -> Self {
        Self::new(n, TimeUnit::Months)
    }

    /// `n` years.
    pub fn years(n: i32) -> Self {
        Self::new(n, TimeUnit::Years)
    }

    /// Negate the period (reverse direction).
    pub fn negated(self) -> Self {
        Self {
            length: -self.length,
            unit: self.unit,
        }
    }

    /// Normalise the period by converting weeks to days and years to months.
    ///
    /// Returns a new period in a canonical form (Days or Months).
    pub fn normalized(self) -> Self {
        let (length, unit) = match self.unit {
            TimeUnit::Days => (self.length, TimeUnit::Days),
            TimeUnit::Weeks => (self.length * 7, TimeUnit::Days),
            TimeUnit::Months => {
                let y = self.length / 12;
                let m = self.length % 12;
                if m == 0 {
                    (y, TimeUnit::Years)
                } else {
                    (self.length, TimeUnit::Months)
                }
            }
            TimeUnit::Years => (self.length, TimeUnit::Years),
        };
        Period { length, unit }
    }

    /// Lower and upper bound of the number of calendar days this period can
    /// span.
    pub fn days_min_max(self) -> (i64, i64) {
        let n = self.length as i64;
        let (a, b) = match self.unit {
            TimeUnit::Days => (n, n),
            TimeUnit::Weeks => (7 * n, 7 * n),
            TimeUnit::Months => (28 * n, 31 * n),
            TimeUnit::Years => (365 * n, 366 * n),
        };
        // negative periods swap the bounds
        (a.min(b), a.max(b))
    }

    /// Length in months, for periods expressed in months or years.
    pub fn in_months(self) -> Option<i32> {
        match self.unit {
            TimeUnit::Months => Some(self.length),
            TimeUnit::Years => Some(self.length * 12),
            TimeUnit::Days | TimeUnit::Weeks => None,
        }
    }

    /// Length in days, for periods expressed in days or weeks.
    pub fn in_days(self) -> Option<i32> {
        match self.unit {
            TimeUnit::Days => Some(self.length),
            TimeUnit::Weeks => Some(self.length * 7),
            TimeUnit::Months | TimeUnit::Years => None,
        }
    }
}

impl PartialOrd for Period {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        // zero-length periods compare by sign of the other length
        if self.length == 0 {
            return Some(0.cmp(&other.length));
        }
        if other.length == 0 {
            return Some(self.length.cmp(&0));
        }
        if self.unit == other.unit {
            return Some(self.length.cmp(&other.length));
        }
        if let (Some(a), Some(b)) = (self.in_months(), other.in_months()) {
            return Some(a.cmp(&b));
        }
        if let (Some(a), Some(b)) = (self.in_days(), other.in_days()) {
            return Some(a.cmp(&b));
        }
        let (lo_a, hi_a) = self.days_min_max();
        let (lo_b, hi_b) = other.days_min_max();
        if hi_a < lo_b {
            Some(Ordering::Less)
        } else if lo_a > hi_b {
            Some(Ordering::Greater)
        } else {
            None
        }
    }
}

impl PartialEq for Period {
    fn eq(&self, other: &Self) -> bool {
        self.partial_cmp(other) == Some(Ordering::Equal)
    }
}

impl std::ops::Neg for Period {
    type Output = Self;
    fn neg(self) -> Self {
        self.negated()
    }
}

impl std::ops::Mul<i32> for Period {
    type Output = Self;
    fn mul(self, rhs: i32) -> Self {
        Period {
            length: self.length * rhs,
            unit: self.unit,
        }
    }
}

impl std::ops::Mul<Period> for i32 {
    type Output = Period;
    fn mul(self, rhs: Period) -> Period {
        rhs * self
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.length, self.unit.abbreviation())
    }
}

impl std::fmt::Debug for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Period({self})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        assert_eq!(Period::new(3, TimeUnit::Months).to_string(), "3M");
        assert_eq!(Period::new(1, TimeUnit::Years).to_string(), "1Y");
        assert_eq!(Period::new(-6, TimeUnit::Months).to_string(), "-6M");
    }

    #[test]
    fn from_frequency() {
        assert_eq!(
            Period::from_frequency(Frequency::Quarterly).unwrap(),
            Period::new(3, TimeUnit::Months)
        );
        assert!(Period::from_frequency(Frequency::NoFrequency).is_err());
    }

    #[test]
    fn ordering_within_unit_families() {
        assert_eq!(Period::years(1), Period::months(12));
        assert_eq!(Period::weeks(2), Period::days(14));
        assert!(Period::months(6) < Period::years(1));
        assert!(Period::days(6) < Period::weeks(1));
        assert!(Period::months(0) < Period::days(1));
        assert!(Period::years(-1) < Period::days(0));
    }

    #[test]
    fn ordering_across_families() {
        assert!(Period::days(27) < Period::months(1));
        assert!(Period::days(32) > Period::months(1));
        assert_eq!(Period::days(30).partial_cmp(&Period::months(1)), None);
        assert!(Period::months(14) > Period::days(366));
        assert_eq!(Period::months(13).partial_cmp(&Period::days(366)), None);
        assert_eq!(Period::days(365).partial_cmp(&Period::years(1)), None);
        assert_ne!(Period::days(30), Period::months(1));
    }
}
