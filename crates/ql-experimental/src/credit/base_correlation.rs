//! `BaseCorrelationTermStructure` — base correlations interpolated over
//! (time, loss level) (translates
//! `ql/experimental/credit/basecorrelationstructure.hpp`).
//!
//! Tranche maturities are derived from tenors applied to a start date,
//! either by calendar advancement or through a credit date-generation rule.
//! The correlation matrix has one row per loss level and one column per
//! tranche date still in the future; its cells are read from live quotes.
//! The surface subscribes to every quote and rebuilds synchronously when one
//! of them changes.  Tranche dates that expire as the reference date moves
//! are dropped from the front together with the matching matrix columns;
//! a floating surface also catches up lazily, on the first lookup after the
//! evaluation date has moved.

use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::sync::Arc;

use ql_core::utilities::data_formatters::format_ordinal;
use ql_core::{
    ensure, ensure_in_range, errors::Error, errors::Result, Natural, Observable, Observer, Real,
    Size, Time,
};
use ql_math::{Interpolation2D, Interpolator2D, Matrix};
use ql_quotes::QuoteHandle;
use ql_termstructures::{TermStructure, TermStructureData};
use ql_time::{
    cds_maturity, Actual365Fixed, BusinessDayConvention, Calendar, Date, DateGeneration,
    DayCounter, Period, ScheduleBuilder,
};
use tracing::{debug, trace, warn};

use super::correlation_term_structure::CorrelationTermStructure;

/// Builder for [`BaseCorrelationTermStructure`].
///
/// ```
/// use std::rc::Rc;
/// use ql_experimental::BaseCorrelationBuilder;
/// use ql_math::Bilinear;
/// use ql_quotes::{QuoteHandle, SimpleQuote};
/// use ql_termstructures::TermStructureData;
/// use ql_time::{Actual365Fixed, BusinessDayConvention, Date, NullCalendar, Period};
///
/// let reference = Date::from_ymd(2024, 1, 15).unwrap();
/// let quotes: Vec<Vec<QuoteHandle>> = (0..2)
///     .map(|i| {
///         (0..2)
///             .map(|j| Rc::new(SimpleQuote::new(0.3 + 0.1 * i as f64 + 0.01 * j as f64)) as QuoteHandle)
///             .collect()
///     })
///     .collect();
/// let surface = BaseCorrelationBuilder::new(
///     TermStructureData::fixed(reference, NullCalendar, Actual365Fixed),
///     BusinessDayConvention::Following,
///     vec![Period::years(5), Period::years(7)],
///     vec![0.03, 0.07],
///     quotes,
/// )
/// .build(Bilinear)
/// .unwrap();
/// let five_years = Date::from_ymd(2029, 1, 15).unwrap();
/// assert!((surface.correlation(five_years, 0.07, false).unwrap() - 0.4).abs() < 1e-12);
/// ```
#[derive(Debug)]
pub struct BaseCorrelationBuilder {
    term_structure: TermStructureData,
    business_day_convention: BusinessDayConvention,
    tenors: Vec<Period>,
    loss_levels: Vec<Real>,
    quotes: Vec<Vec<QuoteHandle>>,
    start_date: Option<Date>,
    rule: Option<DateGeneration>,
}

impl BaseCorrelationBuilder {
    /// Begin building a surface on the given term-structure state.
    ///
    /// `quotes[i][j]` is the correlation for loss level `i` and tenor `j`.
    pub fn new(
        term_structure: TermStructureData,
        business_day_convention: BusinessDayConvention,
        tenors: Vec<Period>,
        loss_levels: Vec<Real>,
        quotes: Vec<Vec<QuoteHandle>>,
    ) -> Self {
        Self {
            term_structure,
            business_day_convention,
            tenors,
            loss_levels,
            quotes,
            start_date: None,
            rule: None,
        }
    }

    /// Begin building a surface whose reference date is `settlement_days`
    /// business days after the evaluation date, with an Actual/365 (Fixed)
    /// day counter.
    pub fn floating(
        settlement_days: Natural,
        calendar: impl Calendar + 'static,
        business_day_convention: BusinessDayConvention,
        tenors: Vec<Period>,
        loss_levels: Vec<Real>,
        quotes: Vec<Vec<QuoteHandle>>,
    ) -> Self {
        Self::new(
            TermStructureData::floating(settlement_days, calendar, Actual365Fixed),
            business_day_convention,
            tenors,
            loss_levels,
            quotes,
        )
    }

    /// Replace the day counter.
    pub fn with_day_counter(mut self, day_counter: impl DayCounter + 'static) -> Self {
        self.term_structure = self.term_structure.with_day_counter(Arc::new(day_counter));
        self
    }

    /// Apply the tenors to `start` instead of the reference date (typically
    /// the start date of a traded index).
    pub fn with_start_date(mut self, start: Date) -> Self {
        self.start_date = Some(start);
        self
    }

    /// Derive tranche maturities through a schedule generated with `rule`.
    pub fn with_rule(mut self, rule: DateGeneration) -> Self {
        self.rule = Some(rule);
        self
    }

    /// Validate the inputs, read the quotes and build the interpolation.
    ///
    /// The returned surface is subscribed to every quote.
    pub fn build<I>(self, interpolator: I) -> Result<Rc<BaseCorrelationTermStructure<I>>>
    where
        I: Interpolator2D + 'static,
    {
        check_tranche_tenors(&self.tenors)?;

        let reference = self.term_structure.reference_date()?;
        let start = self.start_date.unwrap_or(reference);
        let calendar = self.term_structure.calendar();
        let bdc = self.business_day_convention;

        let mut dates = Vec::with_capacity(self.tenors.len());
        for &tenor in &self.tenors {
            let d = tranche_date(calendar, start, tenor, bdc, self.rule)?;
            if d <= reference {
                debug!(%tenor, date = %d, "dropping expired tranche tenor");
                continue;
            }
            dates.push(d);
        }
        ensure!(
            !dates.is_empty(),
            "no tranche dates left after removing expired tenors"
        );
        debug!(
            retained = dates.len(),
            tenors = self.tenors.len(),
            "base correlation tranche dates"
        );

        check_losses(&self.loss_levels)?;
        check_quote_grid(&self.quotes, self.loss_levels.len(), self.tenors.len())?;

        let matrix = Matrix::zeros(self.loss_levels.len(), dates.len());
        let surface = BaseCorrelationTermStructure {
            data: self.term_structure,
            business_day_convention: bdc,
            tenors: self.tenors,
            loss_levels: self.loss_levels,
            quotes: self.quotes,
            interpolator,
            state: RefCell::new(SurfaceState {
                grid_reference: Some(reference),
                matrix,
                times: Vec::new(),
                dates,
                interpolation: Err(Error::Runtime("surface not built".into())),
            }),
        };
        {
            let mut state = surface.state.borrow_mut();
            surface.initialize_tranche_times(&mut state)?;
            let interpolation = surface.refresh(&mut state)?;
            state.interpolation = Ok(interpolation);
        }

        let surface = Rc::new(surface);
        let observer = Rc::downgrade(&surface) as Weak<dyn Observer>;
        for quote in surface.quotes.iter().flatten() {
            quote.subscribe(observer.clone());
        }
        Ok(surface)
    }
}

fn check_tranche_tenors(tenors: &[Period]) -> Result<()> {
    ensure!(!tenors.is_empty(), "no tranche tenors given");
    ensure!(
        tenors[0] > Period::days(0),
        "first tranche tenor is negative ({})",
        tenors[0]
    );
    for i in 1..tenors.len() {
        ensure!(
            tenors[i] > tenors[i - 1],
            "non increasing tranche tenor: {} is {}, {} is {}",
            format_ordinal(i),
            tenors[i - 1],
            format_ordinal(i + 1),
            tenors[i]
        );
    }
    Ok(())
}

fn check_losses(losses: &[Real]) -> Result<()> {
    ensure!(!losses.is_empty(), "no loss levels given");
    ensure!(
        losses[0] > 0.0,
        "first loss level is negative ({})",
        losses[0]
    );
    ensure!(
        losses[0] <= 1.0,
        "first loss level larger than 100% ({})",
        losses[0]
    );
    for i in 1..losses.len() {
        ensure!(
            losses[i] > losses[i - 1],
            "non increasing losses: {} is {}, {} is {}",
            format_ordinal(i),
            losses[i - 1],
            format_ordinal(i + 1),
            losses[i]
        );
        ensure!(
            losses[i] <= 1.0,
            "{} loss level larger than 100% ({})",
            format_ordinal(i + 1),
            losses[i]
        );
    }
    Ok(())
}

fn check_quote_grid(quotes: &[Vec<QuoteHandle>], losses: Size, tenors: Size) -> Result<()> {
    ensure!(
        quotes.len() == losses,
        "mismatch between number of loss levels ({losses}) and number of rows ({}) in the correlation matrix",
        quotes.len()
    );
    for (i, row) in quotes.iter().enumerate() {
        ensure!(
            row.len() == tenors,
            "mismatch between number of tranche tenors ({tenors}) and number of columns ({}) in the {} row of the correlation matrix",
            row.len(),
            format_ordinal(i + 1)
        );
    }
    Ok(())
}

/// Maturity of the tranche with the given tenor.
///
/// With a rule, the maturity is the last date of a quarterly schedule from
/// `start` (ending on the CDS maturity for the CDS rules), adjusted with
/// `bdc`.  Without one, `start` is advanced by the tenor on the calendar.
fn tranche_date(
    calendar: &dyn Calendar,
    start: Date,
    tenor: Period,
    bdc: BusinessDayConvention,
    rule: Option<DateGeneration>,
) -> Result<Date> {
    let Some(rule) = rule else {
        return calendar.advance(start, tenor, bdc, false);
    };
    let end = if rule.is_cds() {
        cds_maturity(start, tenor, rule)?.ok_or_else(|| {
            Error::InvalidArgument(format!(
                "no {rule} maturity for a {tenor} tenor starting on {start}"
            ))
        })?
    } else {
        start.add_period(tenor)?
    };
    let schedule = ScheduleBuilder::new(start, end, Period::months(3), calendar)
        .with_convention(bdc)
        .with_termination_convention(BusinessDayConvention::Unadjusted)
        .with_rule(rule)
        .build()?;
    let last = schedule
        .end_date()
        .ok_or_else(|| Error::Runtime(format!("empty schedule from {start} to {end}")))?;
    calendar.adjust(last, bdc)
}

#[derive(Debug)]
struct SurfaceState<T> {
    /// Reference date the tranche times were measured from.
    grid_reference: Option<Date>,
    dates: Vec<Date>,
    times: Vec<Time>,
    /// Rows follow the loss levels, columns the retained tranche dates.
    matrix: Matrix,
    /// The last rebuild's outcome; lookups fail with its error.
    interpolation: Result<T>,
}

/// Base correlation surface over (time, loss level).
///
/// `I` selects the 2D interpolation; it is rebuilt from the correlation
/// matrix on every update.  Build it through [`BaseCorrelationBuilder`].
///
/// Corresponds to `QuantLib::BaseCorrelationTermStructure<Interpolator2D_T>`.
#[derive(Debug)]
pub struct BaseCorrelationTermStructure<I: Interpolator2D> {
    data: TermStructureData,
    business_day_convention: BusinessDayConvention,
    tenors: Vec<Period>,
    loss_levels: Vec<Real>,
    quotes: Vec<Vec<QuoteHandle>>,
    interpolator: I,
    state: RefCell<SurfaceState<I::Output>>,
}

impl<I: Interpolator2D> BaseCorrelationTermStructure<I> {
    /// Correlation at date `d` and the given loss level.
    pub fn correlation(&self, d: Date, loss_level: Real, extrapolate: bool) -> Result<Real> {
        self.correlation_time(self.time_from_reference(d)?, loss_level, extrapolate)
    }

    /// Correlation at time `t` and the given loss level.
    ///
    /// `t` must lie in `[0, max_time]` unless `extrapolate` is set or the
    /// surface allows extrapolation; the loss level must lie in `[0, 1]`.
    /// The interpolation itself is always evaluated with extrapolation
    /// allowed, so times before the first tranche and loss levels outside
    /// the quoted ones extend the edge cells.
    pub fn correlation_time(&self, t: Time, loss_level: Real, extrapolate: bool) -> Result<Real> {
        self.sync_reference();
        let state = self.state.borrow();
        let interpolation = state.interpolation.as_ref().map_err(Clone::clone)?;
        self.check_range_time(t, extrapolate)?;
        ensure_in_range!(
            (0.0..=1.0).contains(&loss_level),
            "loss level ({loss_level}) outside [0, 1]"
        );
        interpolation.value(t, loss_level, true)
    }

    /// Roll expired tranche dates off the front, refresh the matrix from
    /// the quotes, rebuild the interpolation and notify observers.
    ///
    /// A failed rebuild is logged and kept: lookups return its error until
    /// the next successful update.
    pub fn update(&self) {
        self.rebuild();
        self.notify();
    }

    fn rebuild(&self) {
        let mut state = self.state.borrow_mut();
        state.grid_reference = self.reference_date().ok();
        let rebuilt = self
            .roll_expired(&mut state)
            .and_then(|()| self.refresh(&mut state));
        if let Err(e) = &rebuilt {
            warn!(error = %e, "base correlation rebuild failed");
        }
        state.interpolation = rebuilt;
    }

    /// Rebuild quietly when the reference date has moved since the last
    /// rebuild.
    fn sync_reference(&self) {
        let current = self.reference_date().ok();
        let stale = self.state.borrow().grid_reference != current;
        if stale {
            debug!(reference = ?current, "reference date moved, rebuilding base correlation");
            self.rebuild();
        }
    }

    /// Re-read every matrix cell from its quote and rebuild the
    /// interpolation, without notifying observers.
    ///
    /// When tenors have expired the first retained column reads the quotes
    /// of tenor `original tenors − columns`.
    pub fn update_matrix(&self) -> Result<()> {
        let mut state = self.state.borrow_mut();
        let rebuilt = self.refresh(&mut state);
        let outcome = rebuilt.as_ref().map(|_| ()).map_err(Clone::clone);
        state.interpolation = rebuilt;
        outcome
    }

    fn initialize_tranche_times(&self, state: &mut SurfaceState<I::Output>) -> Result<()> {
        state.times = state
            .dates
            .iter()
            .map(|&d| self.time_from_reference(d))
            .collect::<Result<_>>()?;
        Ok(())
    }

    fn roll_expired(&self, state: &mut SurfaceState<I::Output>) -> Result<()> {
        let reference = self.reference_date()?;
        let expired = state.dates.iter().take_while(|&&d| d <= reference).count();
        if expired > 0 {
            state.dates.drain(..expired);
            state.matrix.remove_leading_columns(expired);
            debug!(expired, remaining = state.dates.len(), "tranche dates expired");
        }
        ensure!(
            !state.dates.is_empty(),
            "no tranche dates left after removing expired tenors"
        );
        self.initialize_tranche_times(state)
    }

    fn refresh(&self, state: &mut SurfaceState<I::Output>) -> Result<I::Output> {
        let columns = state.matrix.cols();
        let offset = self.tenors.len() - columns;
        for (i, row) in self.quotes.iter().enumerate() {
            for j in 0..columns {
                let tenor = offset + j;
                state.matrix[(i, j)] = row[tenor].value().ok_or_else(|| {
                    Error::Runtime(format!(
                        "invalid correlation quote for loss level {} and tenor {}",
                        self.loss_levels[i], self.tenors[tenor]
                    ))
                })?;
            }
        }
        debug!(
            rows = state.matrix.rows(),
            columns,
            "rebuilding base correlation interpolation"
        );
        self.interpolator
            .interpolate(&state.times, &self.loss_levels, &state.matrix)
    }

    /// Retained (non-expired) tranche maturities.
    pub fn tranche_dates(&self) -> Vec<Date> {
        self.sync_reference();
        self.state.borrow().dates.clone()
    }

    /// Times of the retained tranche maturities.
    pub fn tranche_times(&self) -> Vec<Time> {
        self.sync_reference();
        self.state.borrow().times.clone()
    }

    /// Tranche tenors as given, including expired ones.
    pub fn tenors(&self) -> &[Period] {
        &self.tenors
    }

    /// Loss levels.
    pub fn loss_levels(&self) -> &[Real] {
        &self.loss_levels
    }

    /// The correlation matrix, one row per loss level and one column per
    /// retained tranche date.
    pub fn correlation_matrix(&self) -> Matrix {
        self.sync_reference();
        self.state.borrow().matrix.clone()
    }

    /// The 2D interpolator.
    pub fn interpolator(&self) -> &I {
        &self.interpolator
    }
}

impl<I: Interpolator2D> Observable for BaseCorrelationTermStructure<I> {
    fn subscribe(&self, observer: Weak<dyn Observer>) {
        self.data.observable().subscribe(observer);
    }
    fn unsubscribe(&self, observer: &Weak<dyn Observer>) {
        self.data.observable().unsubscribe(observer);
    }
    fn notify(&self) {
        self.data.observable().notify();
    }
}

impl<I: Interpolator2D> Observer for BaseCorrelationTermStructure<I> {
    fn on_changed(&self) {
        trace!("base correlation quote changed");
        self.update();
    }
}

impl<I: Interpolator2D> TermStructure for BaseCorrelationTermStructure<I> {
    fn data(&self) -> &TermStructureData {
        &self.data
    }

    /// The last retained tranche date.
    fn max_date(&self) -> Result<Date> {
        self.state.borrow().dates.last().copied().ok_or_else(|| {
            Error::Precondition("no tranche dates left after removing expired tenors".into())
        })
    }
}

impl<I: Interpolator2D> CorrelationTermStructure for BaseCorrelationTermStructure<I> {
    fn correlation_size(&self) -> Size {
        1
    }

    fn business_day_convention(&self) -> BusinessDayConvention {
        self.business_day_convention
    }
}
