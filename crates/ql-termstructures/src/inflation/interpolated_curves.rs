//! Zero and year-on-year inflation curves interpolated between node rates
//! (translates `ql/termstructures/inflation/interpolatedzeroinflationcurve.hpp`
//! and `interpolatedyoyinflationcurve.hpp`).
//!
//! The first node must sit on the lagged base date and carries the base rate;
//! the last node is the curve's maximum date.  Rates are interpolated in
//! time from the reference date.

use std::rc::Weak;

use ql_core::{ensure, errors::Result, Observable, Observer, Rate, Real, Time};
use ql_math::Interpolation1D;
use ql_time::{Date, Frequency, Period};

use super::inflation_term_structure::{
    lagged_base_date, InflationTermStructure, InflationTermStructureData, YoYInflationTermStructure,
    ZeroInflationTermStructure,
};
use crate::interpolation_builder::InterpolationBuilder;
use crate::term_structure::{ReferenceDate, TermStructure, TermStructureData};

/// Validated nodes shared by both curve kinds.
#[derive(Debug)]
struct Nodes {
    dates: Vec<Date>,
    times: Vec<Time>,
    rates: Vec<Rate>,
    interpolation: Box<dyn Interpolation1D>,
}

impl Nodes {
    fn new(
        ts: &TermStructureData,
        observation_lag: Period,
        frequency: Frequency,
        index_is_interpolated: bool,
        dates: &[Date],
        rates: &[Rate],
        builder: &dyn InterpolationBuilder,
    ) -> Result<Self> {
        ensure!(
            matches!(ts.reference(), ReferenceDate::Fixed(_)),
            "interpolated inflation curves need a fixed reference date"
        );
        ensure!(
            dates.len() >= 2,
            "at least 2 dates are required, {} given",
            dates.len()
        );
        ensure!(
            dates.len() == rates.len(),
            "indices/dates count mismatch: {} vs {}",
            rates.len(),
            dates.len()
        );
        for (i, w) in dates.windows(2).enumerate() {
            ensure!(
                w[1] > w[0],
                "dates not sorted: {} is not after {} (node {})",
                w[1],
                w[0],
                i + 1
            );
        }
        let reference = ts.reference_date()?;
        let base_date =
            lagged_base_date(reference, observation_lag, frequency, index_is_interpolated)?;
        ensure!(
            dates[0] == base_date,
            "first node {} does not match the lagged base date {}",
            dates[0],
            base_date
        );
        let times: Vec<Time> = dates
            .iter()
            .map(|&d| ts.day_counter().year_fraction(reference, d))
            .collect();
        let interpolation = builder.build(&times, rates)?;
        Ok(Self {
            dates: dates.to_vec(),
            times,
            rates: rates.to_vec(),
            interpolation,
        })
    }

    fn first_date(&self) -> Date {
        self.dates[0]
    }

    fn last_date(&self) -> Date {
        self.dates[self.dates.len() - 1]
    }

    fn value(&self, t: Time) -> Real {
        self.interpolation.operator(t)
    }
}

// ── Zero ──────────────────────────────────────────────────────────────────────

/// Zero-inflation curve interpolated between node rates.
///
/// Corresponds to `QuantLib::InterpolatedZeroInflationCurve<Interpolator>`.
#[derive(Debug)]
pub struct InterpolatedZeroInflationCurve {
    data: InflationTermStructureData,
    nodes: Nodes,
}

impl InterpolatedZeroInflationCurve {
    /// Build the curve from node dates and zero rates.
    ///
    /// `ts` must carry a fixed reference date; the first node is the base
    /// date and its rate the base rate.
    pub fn new(
        ts: TermStructureData,
        observation_lag: Period,
        frequency: Frequency,
        dates: &[Date],
        rates: &[Rate],
        builder: &dyn InterpolationBuilder,
    ) -> Result<Self> {
        let nodes = Nodes::new(&ts, observation_lag, frequency, false, dates, rates, builder)?;
        let data = InflationTermStructureData::new(ts, rates[0], observation_lag, frequency);
        Ok(Self { data, nodes })
    }

    /// Node dates.
    pub fn dates(&self) -> &[Date] {
        &self.nodes.dates
    }

    /// Node times from the reference date.
    pub fn times(&self) -> &[Time] {
        &self.nodes.times
    }

    /// Node rates.
    pub fn rates(&self) -> &[Rate] {
        &self.nodes.rates
    }

    /// `(date, rate)` pairs.
    pub fn nodes(&self) -> Vec<(Date, Rate)> {
        self.nodes.dates.iter().copied().zip(self.nodes.rates.iter().copied()).collect()
    }
}

impl Observable for InterpolatedZeroInflationCurve {
    fn subscribe(&self, observer: Weak<dyn Observer>) {
        self.data().observable().subscribe(observer);
    }
    fn unsubscribe(&self, observer: &Weak<dyn Observer>) {
        self.data().observable().unsubscribe(observer);
    }
    fn notify(&self) {
        self.data().observable().notify();
    }
}

impl TermStructure for InterpolatedZeroInflationCurve {
    fn data(&self) -> &TermStructureData {
        self.data.term_structure()
    }
    fn max_date(&self) -> Result<Date> {
        Ok(self.nodes.last_date())
    }
    fn min_date(&self) -> Result<Date> {
        self.base_date()
    }
}

impl InflationTermStructure for InterpolatedZeroInflationCurve {
    fn inflation_data(&self) -> &InflationTermStructureData {
        &self.data
    }
    fn base_date(&self) -> Result<Date> {
        Ok(self.nodes.first_date())
    }
}

impl ZeroInflationTermStructure for InterpolatedZeroInflationCurve {
    fn zero_rate_impl(&self, t: Time) -> Rate {
        self.nodes.value(t)
    }
}

// ── YoY ───────────────────────────────────────────────────────────────────────

/// Year-on-year inflation curve interpolated between node rates.
///
/// Corresponds to `QuantLib::InterpolatedYoYInflationCurve<Interpolator>`.
#[derive(Debug)]
pub struct InterpolatedYoYInflationCurve {
    data: InflationTermStructureData,
    nodes: Nodes,
}

impl InterpolatedYoYInflationCurve {
    /// Build the curve from node dates and YoY rates.
    pub fn new(
        ts: TermStructureData,
        observation_lag: Period,
        frequency: Frequency,
        index_is_interpolated: bool,
        dates: &[Date],
        rates: &[Rate],
        builder: &dyn InterpolationBuilder,
    ) -> Result<Self> {
        let nodes = Nodes::new(
            &ts,
            observation_lag,
            frequency,
            index_is_interpolated,
            dates,
            rates,
            builder,
        )?;
        let data = InflationTermStructureData::new(ts, rates[0], observation_lag, frequency)
            .with_index_interpolated(index_is_interpolated);
        Ok(Self { data, nodes })
    }

    /// Node dates.
    pub fn dates(&self) -> &[Date] {
        &self.nodes.dates
    }

    /// Node times from the reference date.
    pub fn times(&self) -> &[Time] {
        &self.nodes.times
    }

    /// Node rates.
    pub fn rates(&self) -> &[Rate] {
        &self.nodes.rates
    }
}

impl Observable for InterpolatedYoYInflationCurve {
    fn subscribe(&self, observer: Weak<dyn Observer>) {
        self.data().observable().subscribe(observer);
    }
    fn unsubscribe(&self, observer: &Weak<dyn Observer>) {
        self.data().observable().unsubscribe(observer);
    }
    fn notify(&self) {
        self.data().observable().notify();
    }
}

impl TermStructure for InterpolatedYoYInflationCurve {
    fn data(&self) -> &TermStructureData {
        self.data.term_structure()
    }
    fn max_date(&self) -> Result<Date> {
        Ok(self.nodes.last_date())
    }
    fn min_date(&self) -> Result<Date> {
        self.base_date()
    }
}

impl InflationTermStructure for InterpolatedYoYInflationCurve {
    fn inflation_data(&self) -> &InflationTermStructureData {
        &self.data
    }
    fn base_date(&self) -> Result<Date> {
        Ok(self.nodes.first_date())
    }
}

impl YoYInflationTermStructure for InterpolatedYoYInflationCurve {
    fn yoy_rate_impl(&self, t: Time) -> Rate {
        self.nodes.value(t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpolation_builder::{CubicNatural, Linear};
    use ql_time::{Actual365Fixed, NullCalendar};

    fn date(y: u16, m: u8, d: u8) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    fn ts() -> TermStructureData {
        TermStructureData::fixed(date(2024, 6, 15), NullCalendar, Actual365Fixed)
    }

    #[test]
    fn nodes_define_base_and_max_dates() {
        let dates = [date(2024, 3, 1), date(2025, 3, 1), date(2026, 3, 1)];
        let curve = InterpolatedZeroInflationCurve::new(
            ts(),
            Period::months(3),
            Frequency::Monthly,
            &dates,
            &[0.02, 0.025, 0.03],
            &Linear,
        )
        .unwrap();
        assert_eq!(curve.base_date().unwrap(), date(2024, 3, 1));
        assert_eq!(curve.max_date().unwrap(), date(2026, 3, 1));
        assert!((curve.base_rate().unwrap() - 0.02).abs() < 1e-15);
        assert!(curve.times()[0] < 0.0);
        assert_eq!(curve.nodes()[1], (date(2025, 3, 1), 0.025));
    }

    #[test]
    fn cubic_curve_passes_through_its_nodes() {
        let dates = [date(2024, 3, 1), date(2025, 3, 1), date(2026, 3, 1), date(2027, 3, 1)];
        let rates = [0.02, 0.028, 0.025, 0.03];
        let curve = InterpolatedZeroInflationCurve::new(
            ts(),
            Period::months(3),
            Frequency::Monthly,
            &dates,
            &rates,
            &CubicNatural,
        )
        .unwrap();
        for (&t, &r) in curve.times()[1..].iter().zip(&rates[1..]) {
            assert!((curve.zero_rate_time(t, false).unwrap() - r).abs() < 1e-12);
        }
        // between nodes the spline overshoots the straight line
        let mid = 0.5 * (curve.times()[1] + curve.times()[2]);
        let cubic = curve.zero_rate_time(mid, false).unwrap();
        assert!((cubic - 0.5 * (0.028 + 0.025)).abs() > 1e-6);
    }

    #[test]
    fn invalid_nodes_are_rejected() {
        let bad_order = InterpolatedYoYInflationCurve::new(
            ts(),
            Period::months(3),
            Frequency::Monthly,
            false,
            &[date(2024, 3, 1), date(2024, 3, 1)],
            &[0.02, 0.021],
            &Linear,
        );
        assert!(bad_order.is_err());

        let floating = InterpolatedYoYInflationCurve::new(
            TermStructureData::floating(0, NullCalendar, Actual365Fixed),
            Period::months(3),
            Frequency::Monthly,
            false,
            &[date(2024, 3, 1), date(2025, 3, 1)],
            &[0.02, 0.021],
            &Linear,
        );
        assert!(floating.is_err());
    }

    #[test]
    fn first_node_must_be_the_lagged_base_date() {
        let dates = [date(2025, 1, 1), date(2026, 1, 1)];
        let late = InterpolatedZeroInflationCurve::new(
            ts(),
            Period::months(3),
            Frequency::Monthly,
            &dates,
            &[0.02, 0.025],
            &Linear,
        );
        assert!(matches!(late, Err(ql_core::Error::Precondition(_))));

        // an interpolated index keeps the day of month, a snapped one does not
        let snapped = [date(2024, 3, 1), date(2025, 3, 1)];
        let interpolated = [date(2024, 3, 15), date(2025, 3, 15)];
        let yoy = |index_is_interpolated: bool, dates: &[Date]| {
            InterpolatedYoYInflationCurve::new(
                ts(),
                Period::months(3),
                Frequency::Monthly,
                index_is_interpolated,
                dates,
                &[0.01, 0.02],
                &Linear,
            )
        };
        assert!(yoy(true, &interpolated).is_ok());
        assert!(yoy(false, &snapped).is_ok());
        assert!(yoy(true, &snapped).is_err());
        assert!(yoy(false, &interpolated).is_err());
    }
}
