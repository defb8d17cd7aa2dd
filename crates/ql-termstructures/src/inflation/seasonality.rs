//! Seasonal adjustment of inflation rates (translates
//! `ql/termstructures/inflation/seasonality.hpp`).
//!
//! A seasonality corrects the rates read off an inflation curve so that the
//! implied price index follows a periodic pattern of multiplicative factors.

use ql_core::{errors::Error, errors::Result, Rate, Real};
use ql_math::comparison::{close, EPSILON};
use ql_time::{Date, Frequency, Period, TimeUnit};

use super::inflation_period;
use super::inflation_term_structure::InflationTermStructure;

/// A seasonal correction strategy for inflation term structures.
///
/// Corresponds to `QuantLib::Seasonality`.
pub trait Seasonality: std::fmt::Debug {
    /// Correct a zero-inflation rate observed at `date`.
    fn correct_zero_rate(
        &self,
        date: Date,
        rate: Rate,
        ts: &dyn InflationTermStructure,
    ) -> Result<Rate>;

    /// Correct a year-on-year inflation rate observed at `date`.
    fn correct_yoy_rate(
        &self,
        date: Date,
        rate: Rate,
        ts: &dyn InflationTermStructure,
    ) -> Result<Rate>;

    /// Fail with [`Error::Seasonality`] if this seasonality cannot be used
    /// with `ts`.
    fn is_consistent(&self, ts: &dyn InflationTermStructure) -> Result<()>;
}

/// Tolerance on factors that must agree across years.
const FACTOR_TOLERANCE: Real = 1e-5;

/// Multiplicative seasonality on the price index.
///
/// Factors are cycled from the seasonality base date; one factor covers one
/// period of the seasonality frequency.  The factor vector may span several
/// years, in which case its length must be a multiple of the number of
/// periods per year.
///
/// Corresponds to `QuantLib::MultiplicativePriceSeasonality`.
#[derive(Debug, Clone)]
pub struct MultiplicativePriceSeasonality {
    base_date: Date,
    frequency: Frequency,
    factors: Vec<Real>,
}

impl MultiplicativePriceSeasonality {
    /// Create a seasonality from its base date, frequency and factors.
    ///
    /// # Errors
    /// Fails for frequencies other than semiannual through daily, and when
    /// the number of factors is not a multiple of the periods per year.
    pub fn new(base_date: Date, frequency: Frequency, factors: Vec<Real>) -> Result<Self> {
        let per_year = match frequency {
            Frequency::Semiannual
            | Frequency::EveryFourthMonth
            | Frequency::Quarterly
            | Frequency::Bimonthly
            | Frequency::Monthly
            | Frequency::Biweekly
            | Frequency::Weekly
            | Frequency::Daily => frequency.periods_per_year().unwrap_or(1) as usize,
            _ => {
                return Err(Error::Seasonality(format!(
                    "bad frequency specified: {frequency}, only semiannual through daily permitted"
                )))
            }
        };
        if factors.is_empty() || factors.len() % per_year != 0 {
            return Err(Error::Seasonality(format!(
                "for frequency {frequency} require a multiple of {per_year} factors, {} were given",
                factors.len()
            )));
        }
        Ok(Self {
            base_date,
            frequency,
            factors,
        })
    }

    /// The date from which factors are counted.
    pub fn seasonality_base_date(&self) -> Date {
        self.base_date
    }

    /// The seasonality frequency.
    pub fn frequency(&self) -> Frequency {
        self.frequency
    }

    /// The factors, one per period.
    pub fn seasonality_factors(&self) -> &[Real] {
        &self.factors
    }

    /// The factor of the period containing `to`.
    pub fn seasonality_factor(&self, to: Date) -> Result<Real> {
        let from = self.base_date;
        let diff: i64 = if let Some(months) = self.frequency.months_per_period() {
            let index = |d: Date| {
                (i64::from(d.year()) * 12 + i64::from(d.month()) - 1).div_euclid(i64::from(months))
            };
            index(to) - index(from)
        } else {
            let period = Period::from_frequency(self.frequency)?;
            let days = i64::from(from.days_between(to));
            match period.unit {
                TimeUnit::Days => days,
                // whole weeks counted toward the base date
                TimeUnit::Weeks => days / (7 * i64::from(period.length)),
                unit => ql_core::fail!("seasonality period time unit not allowed: {unit}"),
            }
        };
        let which = diff.rem_euclid(self.factors.len() as i64) as usize;
        Ok(self.factors[which])
    }

    fn correction(
        &self,
        rate: Rate,
        at: Date,
        ts: &dyn InflationTermStructure,
        is_zero_rate: bool,
    ) -> Result<Rate> {
        let factor_at = self.seasonality_factor(at)?;
        let f = if is_zero_rate {
            // last day of the publication period containing the base date
            let (_, end) = inflation_period(ts.base_date()?, ts.frequency())?;
            let curve_base = end.add_days(-1)?;
            let factor_base = self.seasonality_factor(curve_base)?;
            let tau = ts.day_counter().year_fraction(curve_base, at);
            if close(tau, 0.0, EPSILON) {
                1.0
            } else {
                (factor_at / factor_base).powf(1.0 / tau)
            }
        } else {
            let factor_year_before = self.seasonality_factor(at.sub_period(Period::years(1))?)?;
            factor_at / factor_year_before
        };
        Ok((rate + 1.0) * f - 1.0)
    }
}

impl Seasonality for MultiplicativePriceSeasonality {
    fn correct_zero_rate(
        &self,
        date: Date,
        rate: Rate,
        ts: &dyn InflationTermStructure,
    ) -> Result<Rate> {
        self.correction(rate, date, ts, true)
    }

    fn correct_yoy_rate(
        &self,
        date: Date,
        rate: Rate,
        ts: &dyn InflationTermStructure,
    ) -> Result<Rate> {
        self.correction(rate, date, ts, false)
    }

    fn is_consistent(&self, ts: &dyn InflationTermStructure) -> Result<()> {
        // daily factors never line up with weekends and leap years
        if self.frequency == Frequency::Daily {
            return Ok(());
        }
        let per_year = self.frequency.periods_per_year().unwrap_or(1) as usize;
        let years = self.factors.len() / per_year;
        if years <= 1 {
            return Ok(());
        }
        let base = ts.base_date()?;
        let factor_base = self.seasonality_factor(base)?;
        for i in 1..years {
            let d = base.add_period(Period::years(i as i32))?;
            let factor = self.seasonality_factor(d)?;
            if !close(factor, factor_base, FACTOR_TOLERANCE) {
                return Err(Error::Seasonality(format!(
                    "seasonality is inconsistent with inflation term structure: factor {factor_base} \
                     at base date {base} and factor {factor} at {d}"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn date(y: u16, m: u8, d: u8) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    fn monthly() -> MultiplicativePriceSeasonality {
        let factors = (0..12).map(|i| 1.0 + 0.001 * i as Real).collect();
        MultiplicativePriceSeasonality::new(date(2020, 1, 1), Frequency::Monthly, factors).unwrap()
    }

    #[test]
    fn monthly_factors_cycle_in_both_directions() {
        let s = monthly();
        assert_abs_diff_eq!(s.seasonality_factor(date(2020, 1, 15)).unwrap(), 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(s.seasonality_factor(date(2020, 3, 31)).unwrap(), 1.002, epsilon = 1e-12);
        assert_abs_diff_eq!(s.seasonality_factor(date(2024, 3, 1)).unwrap(), 1.002, epsilon = 1e-12);
        assert_abs_diff_eq!(s.seasonality_factor(date(2019, 12, 1)).unwrap(), 1.011, epsilon = 1e-12);
        assert_abs_diff_eq!(s.seasonality_factor(date(2018, 2, 10)).unwrap(), 1.001, epsilon = 1e-12);
    }

    #[test]
    fn quarterly_and_weekly_factors() {
        let q = MultiplicativePriceSeasonality::new(
            date(2020, 1, 1),
            Frequency::Quarterly,
            vec![1.0, 1.01, 0.99, 1.005],
        )
        .unwrap();
        assert_abs_diff_eq!(q.seasonality_factor(date(2021, 8, 31)).unwrap(), 0.99, epsilon = 1e-12);
        assert_abs_diff_eq!(q.seasonality_factor(date(2019, 11, 1)).unwrap(), 1.005, epsilon = 1e-12);

        let factors: Vec<Real> = (0..52).map(|i| 1.0 + i as Real * 1e-4).collect();
        let w = MultiplicativePriceSeasonality::new(date(2020, 1, 1), Frequency::Weekly, factors)
            .unwrap();
        assert_abs_diff_eq!(w.seasonality_factor(date(2020, 1, 7)).unwrap(), 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(w.seasonality_factor(date(2020, 1, 8)).unwrap(), 1.0001, epsilon = 1e-12);
        assert_abs_diff_eq!(w.seasonality_factor(date(2019, 12, 25)).unwrap(), 1.0051, epsilon = 1e-12);
    }

    #[test]
    fn weekly_counts_before_the_base_date_truncate() {
        let factors: Vec<Real> = (0..52).map(|i| 1.0 + i as Real * 1e-4).collect();
        let w = MultiplicativePriceSeasonality::new(date(2020, 1, 1), Frequency::Weekly, factors)
            .unwrap();
        // less than a full week before the base date still reads the first factor
        for d in [date(2019, 12, 26), date(2019, 12, 31)] {
            assert_abs_diff_eq!(w.seasonality_factor(d).unwrap(), 1.0, epsilon = 1e-12);
        }
        assert_abs_diff_eq!(w.seasonality_factor(date(2019, 12, 19)).unwrap(), 1.0051, epsilon = 1e-12);
        assert_abs_diff_eq!(w.seasonality_factor(date(2019, 12, 18)).unwrap(), 1.005, epsilon = 1e-12);
    }

    #[test]
    fn construction_is_validated() {
        assert!(matches!(
            MultiplicativePriceSeasonality::new(date(2020, 1, 1), Frequency::Annual, vec![1.0]),
            Err(Error::Seasonality(_))
        ));
        assert!(matches!(
            MultiplicativePriceSeasonality::new(date(2020, 1, 1), Frequency::Monthly, vec![1.0; 11]),
            Err(Error::Seasonality(_))
        ));
        assert!(
            MultiplicativePriceSeasonality::new(date(2020, 1, 1), Frequency::Quarterly, vec![1.0; 8])
                .is_ok()
        );
    }
}
