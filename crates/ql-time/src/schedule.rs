//! `Schedule` — a sequence of dates (translates `ql/time/schedule.hpp`).
//!
//! A `Schedule` generates the payment/accrual dates for a financial
//! instrument given a start date, end date, tenor, calendar, and
//! business-day conventions.  Besides the plain backward/forward rules the
//! credit-market rules are supported: the twentieth family anchors periods on
//! the 20th of (IMM) months and [`cds_maturity`] gives the standard maturity
//! of a CDS traded on a given date.

use crate::business_day_convention::BusinessDayConvention;
use crate::calendar::Calendar;
use crate::date::Date;
use crate::period::Period;
use crate::time_unit::TimeUnit;
use ql_core::errors::{Error, Result};
use ql_core::{ensure, ensure_post};

/// Date generation rule for schedules.
///
/// Corresponds to `QuantLib::DateGeneration::Rule`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateGeneration {
    /// Only the effective and termination dates.
    Zero,
    /// Dates generated backward from the termination date.
    Backward,
    /// Dates generated forward from the effective date.
    Forward,
    /// Dates on the 20th of each period month, except the effective date.
    Twentieth,
    /// Dates on the 20th of March, June, September and December, except the
    /// effective date.
    TwentiethIMM,
    /// Like `TwentiethIMM`, with a minimum 30-day first stub and an
    /// unadjusted effective date (pre-2009 CDS convention).
    OldCDS,
    /// Standard CDS schedule after the 2009 big bang: the first date is the
    /// IMM twentieth preceding the trade date.
    CDS,
    /// CDS schedule after the December 2015 change: semiannual roll of the
    /// maturity on June and December 20th.
    CDS2015,
}

impl DateGeneration {
    /// `true` for the rules whose dates fall on the 20th of a month.
    pub fn is_twentieth_family(self) -> bool {
        matches!(
            self,
            DateGeneration::Twentieth
                | DateGeneration::TwentiethIMM
                | DateGeneration::OldCDS
                | DateGeneration::CDS
                | DateGeneration::CDS2015
        )
    }

    /// `true` for the rules that only use the IMM months (Mar/Jun/Sep/Dec).
    pub fn is_imm_only(self) -> bool {
        matches!(
            self,
            DateGeneration::TwentiethIMM
                | DateGeneration::OldCDS
                | DateGeneration::CDS
                | DateGeneration::CDS2015
        )
    }

    /// `true` for the rules [`cds_maturity`] accepts.
    pub fn is_cds(self) -> bool {
        matches!(
            self,
            DateGeneration::OldCDS | DateGeneration::CDS | DateGeneration::CDS2015
        )
    }
}

impl std::fmt::Display for DateGeneration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            DateGeneration::Zero => "Zero",
            DateGeneration::Backward => "Backward",
            DateGeneration::Forward => "Forward",
            DateGeneration::Twentieth => "Twentieth",
            DateGeneration::TwentiethIMM => "TwentiethIMM",
            DateGeneration::OldCDS => "OldCDS",
            DateGeneration::CDS => "CDS",
            DateGeneration::CDS2015 => "CDS2015",
        };
        write!(f, "{s}")
    }
}

/// The 20th of the month of `date`, or of the following month if that is
/// already past.  IMM-only rules roll further to the next IMM month.
pub fn next_twentieth(date: Date, rule: DateGeneration) -> Result<Date> {
    let mut result = Date::from_ymd(date.year(), date.month(), 20)?;
    if result < date {
        result = result.advance(1, TimeUnit::Months)?;
    }
    if rule.is_imm_only() {
        let m = result.month() as i32;
        if m % 3 != 0 {
            result = result.advance(3 - m % 3, TimeUnit::Months)?;
        }
    }
    Ok(result)
}

/// The 20th of the month of `date`, or of the preceding month if that is
/// still ahead.  IMM-only rules roll further back to the previous IMM month.
pub fn previous_twentieth(date: Date, rule: DateGeneration) -> Result<Date> {
    let mut result = Date::from_ymd(date.year(), date.month(), 20)?;
    if result > date {
        result = result.advance(-1, TimeUnit::Months)?;
    }
    if rule.is_imm_only() {
        let m = result.month() as i32;
        if m % 3 != 0 {
            result = result.advance(-(m % 3), TimeUnit::Months)?;
        }
    }
    Ok(result)
}

/// Standard maturity of a CDS traded on `trade_date` with the given tenor.
///
/// Only valid for the `CDS2015`, `CDS` and `OldCDS` rules, and for tenors
/// that are whole years or multiples of 3 months.  Under `CDS2015` the
/// maturity rolls semiannually: a zero tenor traded when the previous IMM
/// twentieth is a June or December 20th has no maturity (`Ok(None)`).
pub fn cds_maturity(trade_date: Date, tenor: Period, rule: DateGeneration) -> Result<Option<Date>> {
    ensure!(
        rule.is_cds(),
        "cds_maturity should only be used with date generation rule CDS2015, CDS or OldCDS, got {rule}"
    );
    ensure!(
        tenor.unit == TimeUnit::Years || (tenor.unit == TimeUnit::Months && tenor.length % 3 == 0),
        "cds_maturity expects a tenor that is a multiple of 3 months, got {tenor}"
    );
    if rule == DateGeneration::OldCDS {
        ensure!(tenor.length != 0, "a tenor of 0M is not supported for OldCDS");
    }

    let mut anchor = previous_twentieth(trade_date, rule)?;
    if rule == DateGeneration::CDS2015 && matches!(anchor.month(), 6 | 12) {
        if tenor.length == 0 {
            return Ok(None);
        }
        anchor = anchor.advance(-3, TimeUnit::Months)?;
    }

    let maturity = anchor
        .add_period(tenor)?
        .advance(3, TimeUnit::Months)?;
    ensure!(
        maturity > trade_date,
        "error calculating CDS maturity: tenor is {tenor}, trade date is {trade_date:?}, \
         generating a maturity of {maturity:?} <= trade date"
    );
    Ok(Some(maturity))
}

/// An ordered sequence of coupon/payment dates.
///
/// Corresponds to `QuantLib::Schedule`.
#[derive(Debug, Clone)]
pub struct Schedule {
    dates: Vec<Date>,
    is_regular: Vec<bool>,
    rule: DateGeneration,
}

impl Schedule {
    /// Return all dates in the schedule.
    pub fn dates(&self) -> &[Date] {
        &self.dates
    }

    /// Number of dates.
    pub fn size(&self) -> usize {
        self.dates.len()
    }

    /// Return `true` if the schedule is empty.
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Return the `i`-th date.
    pub fn date(&self, i: usize) -> Date {
        self.dates[i]
    }

    /// Return the start (effective) date.
    pub fn start_date(&self) -> Option<Date> {
        self.dates.first().copied()
    }

    /// Return the end (termination) date.
    pub fn end_date(&self) -> Option<Date> {
        self.dates.last().copied()
    }

    /// The rule the dates were generated with.
    pub fn rule(&self) -> DateGeneration {
        self.rule
    }

    /// Return `true` if the `i`-th period (1-based, between dates `i-1` and
    /// `i`) is a full (regular) period.
    pub fn is_regular(&self, i: usize) -> bool {
        i.checked_sub(1)
            .and_then(|k| self.is_regular.get(k))
            .copied()
            .unwrap_or(false)
    }

    /// Build a schedule from an explicit list of dates.
    pub fn from_dates(dates: Vec<Date>) -> Self {
        let n = dates.len().saturating_sub(1);
        Self {
            is_regular: vec![true; n],
            dates,
            rule: DateGeneration::Forward,
        }
    }
}

/// Builder for [`Schedule`].
///
/// Corresponds to `QuantLib::MakeSchedule`.
#[derive(Debug)]
pub struct ScheduleBuilder<'a> {
    effective_date: Date,
    termination_date: Date,
    tenor: Period,
    calendar: &'a dyn Calendar,
    convention: BusinessDayConvention,
    termination_convention: BusinessDayConvention,
    rule: DateGeneration,
    end_of_month: bool,
}

impl<'a> ScheduleBuilder<'a> {
    /// Begin building a schedule.
    pub fn new(
        effective_date: Date,
        termination_date: Date,
        tenor: Period,
        calendar: &'a dyn Calendar,
    ) -> Self {
        Self {
            effective_date,
            termination_date,
            tenor,
            calendar,
            convention: BusinessDayConvention::ModifiedFollowing,
            termination_convention: BusinessDayConvention::ModifiedFollowing,
            rule: DateGeneration::Backward,
            end_of_month: false,
        }
    }

    /// Set the business-day convention for intermediate dates.
    pub fn with_convention(mut self, c: BusinessDayConvention) -> Self {
        self.convention = c;
        self
    }

    /// Set the business-day convention for the termination date.
    pub fn with_termination_convention(mut self, c: BusinessDayConvention) -> Self {
        self.termination_convention = c;
        self
    }

    /// Set the date-generation rule.
    pub fn with_rule(mut self, rule: DateGeneration) -> Self {
        self.rule = rule;
        self
    }

    /// Whether to snap dates to the end of the month.
    pub fn end_of_month(mut self, flag: bool) -> Self {
        self.end_of_month = flag;
        self
    }

    fn adjust(&self, d: Date) -> Result<Date> {
        self.calendar.adjust(d, self.convention)
    }

    /// Unadjusted date arithmetic, snapping to month ends when the
    /// end-of-month flag is set and the seed is a month end.
    fn step(&self, seed: Date, periods: i32) -> Result<Date> {
        let moved = seed.add_period(self.tenor * periods)?;
        let by_months = matches!(self.tenor.unit, TimeUnit::Months | TimeUnit::Years);
        if self.end_of_month && by_months && seed.is_end_of_month() {
            Ok(moved.end_of_month())
        } else {
            Ok(moved)
        }
    }

    /// Build the `Schedule`.
    pub fn build(self) -> Result<Schedule> {
        let start = self.effective_date;
        let end = self.termination_date;

        ensure!(!start.is_null(), "null effective date");
        ensure!(!end.is_null(), "null termination date");
        if start >= end {
            return Err(Error::InvalidArgument(format!(
                "effective date ({start:?}) later than or equal to termination date ({end:?})"
            )));
        }
        ensure!(self.tenor.length >= 0, "non positive tenor ({}) not allowed", self.tenor);

        let rule = if self.tenor.length == 0 {
            DateGeneration::Zero
        } else {
            self.rule
        };
        if rule.is_twentieth_family() {
            ensure!(
                !self.end_of_month,
                "end-of-month convention incompatible with {rule} date generation rule"
            );
        }

        let mut dates: Vec<Date> = Vec::new();
        let mut is_regular: Vec<bool> = Vec::new();
        let mut seed = start;

        match rule {
            DateGeneration::Zero => {
                dates.push(start);
                dates.push(end);
                is_regular.push(true);
            }
            DateGeneration::Backward => {
                dates.push(end);
                seed = end;
                let mut periods = 1;
                loop {
                    let temp = self.step(seed, -periods)?;
                    if temp < start {
                        break;
                    }
                    if Some(self.adjust(temp)?) != dates.last().map(|d| self.adjust(*d)).transpose()? {
                        dates.push(temp);
                        is_regular.push(true);
                    }
                    periods += 1;
                }
                if Some(self.adjust(start)?) != dates.last().map(|d| self.adjust(*d)).transpose()? {
                    dates.push(start);
                    is_regular.push(false);
                }
                dates.reverse();
                is_regular.reverse();
            }
            DateGeneration::Forward
            | DateGeneration::Twentieth
            | DateGeneration::TwentiethIMM
            | DateGeneration::OldCDS
            | DateGeneration::CDS
            | DateGeneration::CDS2015 => {
                if matches!(rule, DateGeneration::CDS | DateGeneration::CDS2015) {
                    let prev20th = previous_twentieth(start, rule)?;
                    if self.adjust(prev20th)? > start {
                        dates.push(prev20th.advance(-3, TimeUnit::Months)?);
                        is_regular.push(true);
                    }
                    dates.push(prev20th);
                } else {
                    dates.push(start);
                }
                seed = *dates.last().unwrap_or(&start);

                if rule.is_twentieth_family() {
                    let mut next20th = next_twentieth(start, rule)?;
                    if rule == DateGeneration::OldCDS && next20th - start < 30 {
                        // minimum first stub, measured in calendar days
                        next20th = next_twentieth(next20th.add_days(1)?, rule)?;
                    }
                    if next20th != start {
                        dates.push(next20th);
                        is_regular.push(matches!(rule, DateGeneration::CDS | DateGeneration::CDS2015));
                        seed = next20th;
                    }
                }

                let mut periods = 1;
                loop {
                    let temp = self.step(seed, periods)?;
                    if temp > end {
                        break;
                    }
                    if Some(self.adjust(temp)?) != dates.last().map(|d| self.adjust(*d)).transpose()? {
                        dates.push(temp);
                        is_regular.push(true);
                    }
                    periods += 1;
                }

                let last = dates.last().copied().unwrap_or(start);
                let tc = self.termination_convention;
                if self.calendar.adjust(last, tc)? != self.calendar.adjust(end, tc)? {
                    if rule.is_twentieth_family() {
                        dates.push(next_twentieth(end, rule)?);
                        is_regular.push(true);
                    } else {
                        dates.push(end);
                        is_regular.push(false);
                    }
                }
            }
        }

        self.apply_adjustments(rule, seed, &mut dates)?;

        // EOM adjustments can push the next-to-last date onto or past the end
        let n = dates.len();
        if n >= 2 && dates[n - 2] >= dates[n - 1] {
            if is_regular.len() >= 2 {
                let k = is_regular.len() - 2;
                is_regular[k] = dates[n - 2] == dates[n - 1];
            }
            dates[n - 2] = dates[n - 1];
            dates.pop();
            is_regular.pop();
        }
        if dates.len() >= 2 && dates[1] <= dates[0] {
            if is_regular.len() >= 2 {
                is_regular[1] = dates[1] == dates[0];
            }
            dates[1] = dates[0];
            dates.remove(0);
            is_regular.remove(0);
        }

        ensure_post!(
            dates.len() > 1,
            "degenerate single date ({:?}) schedule: seed date {seed:?}, exit date {end:?}",
            dates.first()
        );
        Ok(Schedule {
            dates,
            is_regular,
            rule,
        })
    }

    fn apply_adjustments(&self, rule: DateGeneration, seed: Date, dates: &mut [Date]) -> Result<()> {
        let n = dates.len();
        if n < 2 {
            return Ok(());
        }
        let cal = self.calendar;
        if self.end_of_month && cal.is_end_of_month(seed)? {
            for d in dates.iter_mut().take(n - 1).skip(1) {
                *d = if self.convention == BusinessDayConvention::Unadjusted {
                    d.end_of_month()
                } else {
                    cal.end_of_month(*d)?
                };
            }
            let (mut d1, mut d2) = (dates[0], dates[n - 1]);
            if self.termination_convention != BusinessDayConvention::Unadjusted {
                d1 = cal.end_of_month(d1)?;
                d2 = cal.end_of_month(d2)?;
            } else if rule == DateGeneration::Backward {
                d2 = d2.end_of_month();
            } else {
                d1 = d1.end_of_month();
            }
            if d1 != d2 {
                dates[0] = d1;
                dates[n - 1] = d2;
            }
            return Ok(());
        }

        // the first date is left unadjusted for old CDS schedules
        if rule != DateGeneration::OldCDS {
            dates[0] = self.adjust(dates[0])?;
        }
        for d in dates.iter_mut().take(n - 1).skip(1) {
            *d = self.adjust(*d)?;
        }
        // termination date is not adjusted for CDS schedules
        if self.termination_convention != BusinessDayConvention::Unadjusted
            && !matches!(rule, DateGeneration::CDS | DateGeneration::CDS2015)
        {
            dates[n - 1] = cal.adjust(dates[n - 1], self.termination_convention)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::WeekendsOnly;

    fn date(y: u16, m: u8, d: u8) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn zero_coupon_schedule() {
        let cal = WeekendsOnly;
        let sched = ScheduleBuilder::new(date(2023, 1, 2), date(2025, 1, 2), Period::years(0), &cal)
            .build()
            .unwrap();
        assert_eq!(sched.size(), 2);
        assert_eq!(sched.rule(), DateGeneration::Zero);
    }

    #[test]
    fn annual_backward_schedule() {
        let cal = WeekendsOnly;
        let sched = ScheduleBuilder::new(date(2020, 1, 1), date(2023, 1, 1), Period::years(1), &cal)
            .with_rule(DateGeneration::Backward)
            .with_convention(BusinessDayConvention::Unadjusted)
            .with_termination_convention(BusinessDayConvention::Unadjusted)
            .build()
            .unwrap();
        assert_eq!(
            sched.dates(),
            &[date(2020, 1, 1), date(2021, 1, 1), date(2022, 1, 1), date(2023, 1, 1)]
        );
        assert!(sched.is_regular(1));
    }

    #[test]
    fn twentieth_helpers() {
        let d = date(2023, 8, 10);
        assert_eq!(next_twentieth(d, DateGeneration::Twentieth).unwrap(), date(2023, 8, 20));
        assert_eq!(next_twentieth(d, DateGeneration::CDS).unwrap(), date(2023, 9, 20));
        assert_eq!(previous_twentieth(d, DateGeneration::Twentieth).unwrap(), date(2023, 7, 20));
        assert_eq!(previous_twentieth(d, DateGeneration::CDS).unwrap(), date(2023, 6, 20));
        let twentieth = date(2023, 9, 20);
        assert_eq!(previous_twentieth(twentieth, DateGeneration::CDS).unwrap(), twentieth);
    }

    #[test]
    fn cds_maturity_rejects_other_rules_and_tenors() {
        let d = date(2023, 8, 10);
        assert!(cds_maturity(d, Period::years(5), DateGeneration::Forward).is_err());
        assert!(cds_maturity(d, Period::months(4), DateGeneration::CDS).is_err());
        assert!(cds_maturity(d, Period::months(0), DateGeneration::OldCDS).is_err());
    }
}
