//! Inflation term structures (translates `ql/termstructures/inflationtermstructure.hpp`
//! and `ql/termstructures/inflation/`).
//!
//! Provides:
//! * [`inflation_period`] and [`inflation_year_fraction`] — publication-period
//!   utilities.
//! * [`InflationTermStructure`] — base trait holding lag, frequency, base
//!   rate and seasonality.
//! * [`ZeroInflationTermStructure`] / [`YoYInflationTermStructure`] — lagged
//!   rate lookups.
//! * [`Seasonality`] and [`MultiplicativePriceSeasonality`].
//! * Flat and interpolated zero / YoY curves.

use ql_core::{errors::Error, errors::Result, Time};
use ql_time::{Date, DayCounter, Frequency, TimeUnit};

/// Flat zero and YoY inflation curves.
pub mod flat_curves;
/// Base, zero and YoY inflation traits.
pub mod inflation_term_structure;
/// Node-interpolated zero and YoY inflation curves.
pub mod interpolated_curves;
/// Seasonal adjustment of inflation rates.
pub mod seasonality;

pub use flat_curves::{FlatYoYInflationCurve, FlatZeroInflationCurve};
pub use inflation_term_structure::{
    AsInflationTermStructure, InflationTermStructure, InflationTermStructureData,
    YoYInflationTermStructure, ZeroInflationTermStructure,
};
pub use interpolated_curves::{InterpolatedYoYInflationCurve, InterpolatedZeroInflationCurve};
pub use seasonality::{MultiplicativePriceSeasonality, Seasonality};

/// The publication period containing `date`, as a half-open interval
/// `[start, end)`.
///
/// Periods are aligned on calendar months: a quarterly period starts in
/// January, April, July or October, an annual one in January.  Only
/// frequencies whose periods are whole months are supported.
pub fn inflation_period(date: Date, frequency: Frequency) -> Result<(Date, Date)> {
    let months = frequency.months_per_period().ok_or_else(|| {
        Error::InvalidArgument(format!("frequency not handled for inflation periods: {frequency}"))
    })?;
    let month = u32::from(date.month()) - 1;
    let start_month = (month / months) * months + 1;
    let start = Date::from_ymd(date.year(), start_month as u8, 1)?;
    let end = start.advance(months as i32, TimeUnit::Months)?;
    Ok((start, end))
}

/// Year fraction between two dates for an index of the given frequency.
///
/// For non-interpolated indices both dates are first snapped to the start
/// of their publication period, so the result only changes at period
/// boundaries.
pub fn inflation_year_fraction(
    frequency: Frequency,
    index_is_interpolated: bool,
    day_counter: &dyn DayCounter,
    d1: Date,
    d2: Date,
) -> Result<Time> {
    if index_is_interpolated {
        return Ok(day_counter.year_fraction(d1, d2));
    }
    let (s1, _) = inflation_period(d1, frequency)?;
    let (s2, _) = inflation_period(d2, frequency)?;
    Ok(day_counter.year_fraction(s1, s2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use ql_time::{Actual365Fixed, ActualActualIsda};

    fn date(y: u16, m: u8, d: u8) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn periods_by_frequency() {
        let d = date(2024, 5, 17);
        assert_eq!(
            inflation_period(d, Frequency::Monthly).unwrap(),
            (date(2024, 5, 1), date(2024, 6, 1))
        );
        assert_eq!(
            inflation_period(d, Frequency::Quarterly).unwrap(),
            (date(2024, 4, 1), date(2024, 7, 1))
        );
        assert_eq!(
            inflation_period(d, Frequency::Semiannual).unwrap(),
            (date(2024, 1, 1), date(2024, 7, 1))
        );
        assert_eq!(
            inflation_period(d, Frequency::EveryFourthMonth).unwrap(),
            (date(2024, 5, 1), date(2024, 9, 1))
        );
        assert_eq!(
            inflation_period(d, Frequency::Annual).unwrap(),
            (date(2024, 1, 1), date(2025, 1, 1))
        );
        assert_eq!(
            inflation_period(date(2024, 12, 31), Frequency::Quarterly).unwrap(),
            (date(2024, 10, 1), date(2025, 1, 1))
        );
    }

    #[test]
    fn unsupported_frequency_fails() {
        assert!(matches!(
            inflation_period(date(2024, 5, 17), Frequency::Weekly),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn non_interpolated_year_fraction_snaps_to_period_start() {
        let dc = Actual365Fixed;
        let t = inflation_year_fraction(
            Frequency::Monthly,
            false,
            &dc,
            date(2024, 1, 20),
            date(2024, 3, 5),
        )
        .unwrap();
        // 2024-01-01 → 2024-03-01
        assert!((t - 60.0 / 365.0).abs() < 1e-12);

        let t = inflation_year_fraction(
            Frequency::Monthly,
            true,
            &dc,
            date(2024, 1, 20),
            date(2024, 3, 5),
        )
        .unwrap();
        assert!((t - 45.0 / 365.0).abs() < 1e-12);
    }

    fn any_frequency() -> impl Strategy<Value = Frequency> {
        prop_oneof![
            Just(Frequency::Monthly),
            Just(Frequency::Bimonthly),
            Just(Frequency::Quarterly),
            Just(Frequency::EveryFourthMonth),
            Just(Frequency::Semiannual),
            Just(Frequency::Annual),
        ]
    }

    proptest! {
        #[test]
        fn periods_tile_the_time_axis(serial in 40_000i32..80_000, freq in any_frequency()) {
            let d = Date::from_serial(serial).unwrap();
            let (s, e) = inflation_period(d, freq).unwrap();
            prop_assert!(s <= d && d < e);
            let (s2, _) = inflation_period(e, freq).unwrap();
            prop_assert_eq!(s2, e);
            let (_, e_prev) = inflation_period(s.add_days(-1).unwrap(), freq).unwrap();
            prop_assert_eq!(e_prev, s);
        }

        #[test]
        fn year_fraction_is_zero_on_diagonal_and_monotonic(
            serial in 40_000i32..80_000,
            step in 0i32..400,
            interpolated in any::<bool>(),
            freq in any_frequency(),
        ) {
            let dc = ActualActualIsda;
            let d1 = Date::from_serial(serial).unwrap();
            let d2 = d1.add_days(step).unwrap();
            let d3 = d2.add_days(1).unwrap();
            prop_assert_eq!(inflation_year_fraction(freq, interpolated, &dc, d1, d1).unwrap(), 0.0);
            let t2 = inflation_year_fraction(freq, interpolated, &dc, d1, d2).unwrap();
            let t3 = inflation_year_fraction(freq, interpolated, &dc, d1, d3).unwrap();
            prop_assert!(t3 >= t2);
        }
    }
}
