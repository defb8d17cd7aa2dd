//! `TermStructure` — base trait for all term structures
//! (translates `ql/termstructure.hpp`).
//!
//! Every term structure has a **reference date**, a **day counter**, and a
//! **maximum date** (the furthest point at which the curve can be queried
//! without extrapolation).  The reference date is either fixed at
//! construction or floats with the evaluation date held in
//! [`ql_core::Settings`].

use std::cell::Cell;
use std::sync::Arc;

use ql_core::{ensure_in_range, errors::Result, Natural, Observable, ObservableImpl, Time};
use ql_time::{Actual365Fixed, BusinessDayConvention, Calendar, Date, DayCounter, NullCalendar, Period};

/// How a term structure determines its reference date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceDate {
    /// A reference date fixed at construction.
    Fixed(Date),
    /// The evaluation date advanced by a number of business days on the
    /// term structure's calendar.
    Floating {
        /// Business days between evaluation and reference date.
        settlement_days: Natural,
    },
}

/// State shared by every term structure: reference-date rule, calendar,
/// day counter, extrapolation switch and the subscriber registry.
#[derive(Debug)]
pub struct TermStructureData {
    reference: ReferenceDate,
    calendar: Box<dyn Calendar>,
    day_counter: Arc<dyn DayCounter>,
    extrapolation: Cell<bool>,
    observable: ObservableImpl,
}

impl TermStructureData {
    /// A term structure anchored on a fixed reference date.
    pub fn fixed(
        reference_date: Date,
        calendar: impl Calendar + 'static,
        day_counter: impl DayCounter + 'static,
    ) -> Self {
        Self::with_reference(ReferenceDate::Fixed(reference_date), calendar, day_counter)
    }

    /// A term structure whose reference date is `settlement_days` business
    /// days after the evaluation date.
    pub fn floating(
        settlement_days: Natural,
        calendar: impl Calendar + 'static,
        day_counter: impl DayCounter + 'static,
    ) -> Self {
        Self::with_reference(
            ReferenceDate::Floating { settlement_days },
            calendar,
            day_counter,
        )
    }

    fn with_reference(
        reference: ReferenceDate,
        calendar: impl Calendar + 'static,
        day_counter: impl DayCounter + 'static,
    ) -> Self {
        Self {
            reference,
            calendar: Box::new(calendar),
            day_counter: Arc::new(day_counter),
            extrapolation: Cell::new(false),
            observable: ObservableImpl::new(),
        }
    }

    /// Replace the day counter with a shared one.
    pub fn with_day_counter(mut self, day_counter: Arc<dyn DayCounter>) -> Self {
        self.day_counter = day_counter;
        self
    }

    /// The reference-date rule.
    pub fn reference(&self) -> ReferenceDate {
        self.reference
    }

    /// Resolve the reference date against the current evaluation date.
    pub fn reference_date(&self) -> Result<Date> {
        match self.reference {
            ReferenceDate::Fixed(d) => Ok(d),
            ReferenceDate::Floating { settlement_days } => self.calendar.advance(
                Date::evaluation_date()?,
                Period::days(settlement_days as i32),
                BusinessDayConvention::Following,
                false,
            ),
        }
    }

    /// The calendar.
    pub fn calendar(&self) -> &dyn Calendar {
        self.calendar.as_ref()
    }

    /// The day counter.
    pub fn day_counter(&self) -> &dyn DayCounter {
        self.day_counter.as_ref()
    }

    /// The subscriber registry.
    pub fn observable(&self) -> &ObservableImpl {
        &self.observable
    }
}

impl Default for TermStructureData {
    /// Floating on the evaluation date with no calendar and Actual/365F.
    fn default() -> Self {
        Self::floating(0, NullCalendar, Actual365Fixed)
    }
}

/// Base trait for all term structures.
///
/// Corresponds to `QuantLib::TermStructure`.
pub trait TermStructure: Observable + std::fmt::Debug {
    /// Shared term-structure state.
    fn data(&self) -> &TermStructureData;

    /// The latest date for which the curve can be used.
    fn max_date(&self) -> Result<Date>;

    /// The earliest date for which the curve can be used.  Defaults to the
    /// reference date.
    fn min_date(&self) -> Result<Date> {
        self.reference_date()
    }

    /// The date from which time is measured.
    fn reference_date(&self) -> Result<Date> {
        self.data().reference_date()
    }

    /// Settlement days, if the reference date floats.
    fn settlement_days(&self) -> Option<Natural> {
        match self.data().reference() {
            ReferenceDate::Fixed(_) => None,
            ReferenceDate::Floating { settlement_days } => Some(settlement_days),
        }
    }

    /// The day counter used for date → time-fraction conversions.
    fn day_counter(&self) -> &dyn DayCounter {
        self.data().day_counter()
    }

    /// The calendar used for date adjustments.
    fn calendar(&self) -> &dyn Calendar {
        self.data().calendar()
    }

    /// Whether lookups outside the curve range are allowed for every call.
    fn allows_extrapolation(&self) -> bool {
        self.data().extrapolation.get()
    }

    /// Allow lookups outside the curve range.
    fn enable_extrapolation(&self) {
        self.data().extrapolation.set(true);
    }

    /// Forbid lookups outside the curve range unless requested per call.
    fn disable_extrapolation(&self) {
        self.data().extrapolation.set(false);
    }

    /// Convert a date to a year fraction relative to the reference date.
    fn time_from_reference(&self, date: Date) -> Result<Time> {
        Ok(self
            .day_counter()
            .year_fraction(self.reference_date()?, date))
    }

    /// The latest time for which the curve can be used.
    fn max_time(&self) -> Result<Time> {
        self.time_from_reference(self.max_date()?)
    }

    /// The earliest time for which the curve can be used.
    fn min_time(&self) -> Result<Time> {
        self.time_from_reference(self.min_date()?)
    }

    /// Fail with `OutOfRange` unless `date` lies in `[min_date, max_date]`
    /// or extrapolation is requested (per call or on the structure).
    fn check_range(&self, date: Date, extrapolate: bool) -> Result<()> {
        if extrapolate || self.allows_extrapolation() {
            return Ok(());
        }
        let min = self.min_date()?;
        ensure_in_range!(date >= min, "date ({date}) before minimum date ({min})");
        let max = self.max_date()?;
        ensure_in_range!(date <= max, "date ({date}) is past max curve date ({max})");
        Ok(())
    }

    /// Fail with `OutOfRange` unless `t` lies in `[min_time, max_time]` or
    /// extrapolation is requested.
    fn check_range_time(&self, t: Time, extrapolate: bool) -> Result<()> {
        if extrapolate || self.allows_extrapolation() {
            return Ok(());
        }
        let min = self.min_time()?;
        ensure_in_range!(t >= min, "time ({t}) before minimum time ({min})");
        let max = self.max_time()?;
        ensure_in_range!(t <= max, "time ({t}) is past max curve time ({max})");
        Ok(())
    }
}
