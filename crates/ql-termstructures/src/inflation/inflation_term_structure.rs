//! Base, zero and year-on-year inflation term structure traits
//! (translates `ql/termstructures/inflationtermstructure.hpp`).
//!
//! An inflation curve observes its index with a lag: a rate requested for
//! date `d` is read at the observation date `d − lag`.  Depending on the
//! index convention the value is either held constant over the publication
//! period containing the observation date or interpolated linearly across
//! it.  An attached [`Seasonality`] corrects the result afterwards.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use ql_core::{errors::Error, errors::Result, Rate, Real, Time};
use ql_time::{Date, Frequency, Period};

use super::inflation_period;
use super::seasonality::Seasonality;
use crate::term_structure::{TermStructure, TermStructureData};

/// State shared by every inflation term structure.
#[derive(Debug)]
pub struct InflationTermStructureData {
    term_structure: TermStructureData,
    observation_lag: Period,
    frequency: Frequency,
    index_is_interpolated: bool,
    base_rate: Cell<Option<Rate>>,
    seasonality: RefCell<Option<Rc<dyn Seasonality>>>,
}

impl InflationTermStructureData {
    /// Inflation state with a known base rate.
    pub fn new(
        term_structure: TermStructureData,
        base_rate: Rate,
        observation_lag: Period,
        frequency: Frequency,
    ) -> Self {
        let data = Self::pending(term_structure, observation_lag, frequency);
        data.base_rate.set(Some(base_rate));
        data
    }

    /// Inflation state whose base rate will be supplied later through
    /// [`InflationTermStructure::finalize_base_rate`].  Every lookup fails
    /// with [`Error::NotFinalized`] until then.
    pub fn pending(
        term_structure: TermStructureData,
        observation_lag: Period,
        frequency: Frequency,
    ) -> Self {
        Self {
            term_structure,
            observation_lag,
            frequency,
            index_is_interpolated: false,
            base_rate: Cell::new(None),
            seasonality: RefCell::new(None),
        }
    }

    /// Mark the underlying index as interpolated.
    pub fn with_index_interpolated(mut self, interpolated: bool) -> Self {
        self.index_is_interpolated = interpolated;
        self
    }

    /// The generic term-structure state.
    pub fn term_structure(&self) -> &TermStructureData {
        &self.term_structure
    }
}

/// Upcast helper so that default trait methods can hand `self` to
/// collaborators taking `&dyn InflationTermStructure`.
pub trait AsInflationTermStructure {
    /// `self` as a trait object.
    fn as_inflation_term_structure(&self) -> &dyn InflationTermStructure;
}

impl<T: InflationTermStructure> AsInflationTermStructure for T {
    fn as_inflation_term_structure(&self) -> &dyn InflationTermStructure {
        self
    }
}

// ── Base trait ────────────────────────────────────────────────────────────────

/// Common interface for inflation term structures.
///
/// Corresponds to `QuantLib::InflationTermStructure`.  Implementors return
/// their base date from `min_date` so that the generic range checks start
/// at the base date rather than at the reference date.
pub trait InflationTermStructure: TermStructure + AsInflationTermStructure {
    /// Inflation-specific state.
    fn inflation_data(&self) -> &InflationTermStructureData;

    /// The earliest date for which the curve has observed data.
    fn base_date(&self) -> Result<Date>;

    /// Observation frequency (e.g. `Monthly`).
    fn frequency(&self) -> Frequency {
        self.inflation_data().frequency
    }

    /// Observation lag between a requested date and the date actually
    /// observed.
    fn observation_lag(&self) -> Period {
        self.inflation_data().observation_lag
    }

    /// Whether the underlying index is interpolated within its publication
    /// period.
    fn index_is_interpolated(&self) -> bool {
        self.inflation_data().index_is_interpolated
    }

    /// The base date implied by the lag and the index convention: the
    /// reference date minus the lag for interpolated indices, the start of
    /// the publication period containing that date otherwise.
    fn lagged_base_date(&self) -> Result<Date> {
        lagged_base_date(
            self.reference_date()?,
            self.observation_lag(),
            self.frequency(),
            self.index_is_interpolated(),
        )
    }

    /// The rate at the base date.
    fn base_rate(&self) -> Result<Rate> {
        self.inflation_data().base_rate.get().ok_or_else(|| {
            Error::NotFinalized("base rate has not been set".into())
        })
    }

    /// Whether the base rate is available.
    fn is_finalized(&self) -> bool {
        self.inflation_data().base_rate.get().is_some()
    }

    /// Complete a two-phase construction by supplying the base rate.
    /// Fails if the base rate was already set.
    fn finalize_base_rate(&self, rate: Rate) -> Result<()> {
        let cell = &self.inflation_data().base_rate;
        if let Some(existing) = cell.get() {
            ql_core::fail!("base rate already set to {existing}");
        }
        cell.set(Some(rate));
        tracing::debug!(rate, "inflation base rate finalized");
        self.notify();
        Ok(())
    }

    /// The attached seasonality, if any.
    fn seasonality(&self) -> Option<Rc<dyn Seasonality>> {
        self.inflation_data().seasonality.borrow().clone()
    }

    /// Whether a seasonality is attached.
    fn has_seasonality(&self) -> bool {
        self.inflation_data().seasonality.borrow().is_some()
    }

    /// Attach (`Some`) or detach (`None`) a seasonality.  A new seasonality
    /// is validated first; if it is rejected the previous one stays.
    fn set_seasonality(&self, seasonality: Option<Rc<dyn Seasonality>>) -> Result<()> {
        if let Some(s) = &seasonality {
            s.is_consistent(self.as_inflation_term_structure())?;
        }
        let attached = seasonality.is_some();
        self.inflation_data().seasonality.replace(seasonality);
        tracing::debug!(attached, "inflation seasonality changed");
        self.notify();
        Ok(())
    }
}

/// `reference - lag`, snapped to the start of its publication period unless
/// the index is interpolated.
pub(crate) fn lagged_base_date(
    reference: Date,
    observation_lag: Period,
    frequency: Frequency,
    index_is_interpolated: bool,
) -> Result<Date> {
    let lagged = reference.sub_period(observation_lag)?;
    if index_is_interpolated {
        Ok(lagged)
    } else {
        Ok(inflation_period(lagged, frequency)?.0)
    }
}

/// Shared lookup: apply the lag, read the curve either at the period start
/// or linearly across the period, then apply seasonality.  The range check
/// covers the date actually read: the observation date for linear lookups,
/// the period start otherwise.
fn lagged_rate(
    ts: &dyn InflationTermStructure,
    date: Date,
    inst_obs_lag: Option<Period>,
    linear: bool,
    extrapolate: bool,
    rate_at: &dyn Fn(Time) -> Rate,
) -> Result<(Date, Rate)> {
    ts.base_rate()?;
    let lag = inst_obs_lag.unwrap_or_else(|| ts.observation_lag());
    let observed = date.sub_period(lag)?;
    let (start, end) = inflation_period(observed, ts.frequency())?;
    ts.check_range(if linear { observed } else { start }, extrapolate)?;

    let r1 = rate_at(ts.time_from_reference(start)?);
    let rate = if linear {
        let r2 = rate_at(ts.time_from_reference(end)?);
        let w = Real::from(start.days_between(observed)) / Real::from(start.days_between(end));
        r1 + (r2 - r1) * w
    } else {
        r1
    };
    Ok((observed, rate))
}

// ── Zero-inflation ────────────────────────────────────────────────────────────

/// A zero-coupon inflation curve.
///
/// Rates are annually compounded, as quoted for zero-coupon inflation
/// swaps.
///
/// Corresponds to `QuantLib::ZeroInflationTermStructure`.
pub trait ZeroInflationTermStructure: InflationTermStructure {
    /// The zero-inflation rate for time `t` from the reference date.
    fn zero_rate_impl(&self, t: Time) -> Rate;

    /// The zero-inflation rate for date `date`.
    ///
    /// `inst_obs_lag` overrides the curve's own observation lag.  The rate
    /// is interpolated linearly across the publication period of the
    /// observation date when `force_linear_interpolation` is set or the
    /// index is interpolated; otherwise it is read at the period start.
    fn zero_rate(
        &self,
        date: Date,
        inst_obs_lag: Option<Period>,
        force_linear_interpolation: bool,
        extrapolate: bool,
    ) -> Result<Rate> {
        let ts = self.as_inflation_term_structure();
        let linear = force_linear_interpolation || self.index_is_interpolated();
        let (observed, rate) = lagged_rate(
            ts,
            date,
            inst_obs_lag,
            linear,
            extrapolate,
            &|t| self.zero_rate_impl(t),
        )?;
        match self.seasonality() {
            Some(s) => s.correct_zero_rate(observed, rate, ts),
            None => Ok(rate),
        }
    }

    /// The zero-inflation rate at time `t`.  Lag, seasonality and
    /// interpolation conventions are the caller's responsibility.
    fn zero_rate_time(&self, t: Time, extrapolate: bool) -> Result<Rate> {
        self.base_rate()?;
        self.check_range_time(t, extrapolate)?;
        Ok(self.zero_rate_impl(t))
    }
}

// ── YoY-inflation ─────────────────────────────────────────────────────────────

/// A year-on-year inflation curve.
///
/// Corresponds to `QuantLib::YoYInflationTermStructure`.
pub trait YoYInflationTermStructure: InflationTermStructure {
    /// The YoY inflation rate for time `t` from the reference date.
    fn yoy_rate_impl(&self, t: Time) -> Rate;

    /// The YoY inflation rate for date `date`; same lag and interpolation
    /// rules as [`ZeroInflationTermStructure::zero_rate`].
    fn yoy_rate(
        &self,
        date: Date,
        inst_obs_lag: Option<Period>,
        force_linear_interpolation: bool,
        extrapolate: bool,
    ) -> Result<Rate> {
        let ts = self.as_inflation_term_structure();
        let linear = force_linear_interpolation || self.index_is_interpolated();
        let (observed, rate) = lagged_rate(
            ts,
            date,
            inst_obs_lag,
            linear,
            extrapolate,
            &|t| self.yoy_rate_impl(t),
        )?;
        match self.seasonality() {
            Some(s) => s.correct_yoy_rate(observed, rate, ts),
            None => Ok(rate),
        }
    }

    /// The YoY inflation rate at time `t`.  Lag, seasonality and
    /// interpolation conventions are the caller's responsibility.
    fn yoy_rate_time(&self, t: Time, extrapolate: bool) -> Result<Rate> {
        self.base_rate()?;
        self.check_range_time(t, extrapolate)?;
        Ok(self.yoy_rate_impl(t))
    }
}
