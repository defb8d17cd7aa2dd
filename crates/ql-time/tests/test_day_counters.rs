//! Year fractions used by the inflation and correlation curves.

use approx::assert_abs_diff_eq;
use proptest::prelude::*;
use ql_time::{Actual360, Actual365Fixed, ActualActualIsda, Date, DayCounter, Thirty360};

fn date(y: u16, m: u8, d: u8) -> Date {
    Date::from_ymd(y, m, d).unwrap()
}

fn all_counters() -> [&'static dyn DayCounter; 4] {
    [&Actual365Fixed, &Actual360, &ActualActualIsda, &Thirty360]
}

#[test]
fn isda_reference_fractions() {
    // pairs taken from the ISDA Actual/Actual examples
    let cases = [
        ((2003, 11, 1), (2004, 5, 1), 0.497724380567),
        ((1999, 7, 1), (2000, 7, 1), 1.001377348600),
        ((2002, 8, 15), (2003, 7, 15), 0.915068493151),
        ((1999, 7, 30), (2000, 1, 30), 0.503892506924),
        ((2000, 1, 30), (2000, 6, 30), 0.415300546448),
    ];
    for ((y1, m1, d1), (y2, m2, d2), expected) in cases {
        let yf = ActualActualIsda.year_fraction(date(y1, m1, d1), date(y2, m2, d2));
        assert_abs_diff_eq!(yf, expected, epsilon = 1e-10);
    }
}

#[test]
fn bond_basis_day_counts() {
    let cases = [
        ((2006, 8, 31), (2007, 2, 28), 178),
        ((2007, 2, 28), (2007, 8, 31), 183),
        ((2006, 1, 31), (2006, 2, 28), 28),
        ((2006, 9, 30), (2006, 10, 31), 30),
        ((2007, 2, 26), (2008, 2, 29), 363),
        ((2008, 2, 28), (2008, 3, 31), 33),
    ];
    for ((y1, m1, d1), (y2, m2, d2), expected) in cases {
        assert_eq!(
            Thirty360.day_count(date(y1, m1, d1), date(y2, m2, d2)),
            expected,
            "{y1}-{m1}-{d1} to {y2}-{m2}-{d2}"
        );
    }
}

#[test]
fn monthly_fixing_dates_under_actual_365() {
    // the first of each month in 2024, as an inflation curve sees them
    let base = date(2024, 1, 1);
    let feb = Actual365Fixed.year_fraction(base, date(2024, 2, 1));
    let mar = Actual365Fixed.year_fraction(base, date(2024, 3, 1));
    assert_abs_diff_eq!(feb, 31.0 / 365.0, epsilon = 1e-15);
    assert_abs_diff_eq!(mar - feb, 29.0 / 365.0, epsilon = 1e-15);
    assert_abs_diff_eq!(Actual365Fixed.year_fraction(base, date(2025, 1, 1)), 366.0 / 365.0);
}

#[test]
fn same_date_is_zero_for_every_counter() {
    let d = date(2024, 2, 29);
    for dc in all_counters() {
        assert_eq!(dc.day_count(d, d), 0, "{}", dc.name());
        assert_eq!(dc.year_fraction(d, d), 0.0, "{}", dc.name());
    }
}

proptest! {
    #[test]
    fn actual_counters_scale_and_flip(a in 0i32..20_000, b in 0i32..20_000) {
        let start = date(1990, 1, 1);
        let d1 = start.add_days(a).unwrap();
        let d2 = start.add_days(b).unwrap();

        let t365 = Actual365Fixed.year_fraction(d1, d2);
        let t360 = Actual360.year_fraction(d1, d2);
        prop_assert!((t365 * 365.0 / 360.0 - t360).abs() < 1e-12);

        for dc in [&Actual365Fixed as &dyn DayCounter, &Actual360, &ActualActualIsda] {
            let there = dc.year_fraction(d1, d2);
            let back = dc.year_fraction(d2, d1);
            prop_assert!((there + back).abs() < 1e-12, "{}", dc.name());
        }
    }

    #[test]
    fn year_fractions_grow_with_the_end_date(a in 0i32..20_000, step in 1i32..400) {
        let d1 = date(1990, 1, 1).add_days(a).unwrap();
        let d2 = d1.add_days(step).unwrap();
        let d3 = d2.add_days(step).unwrap();
        for dc in all_counters() {
            prop_assert!(dc.year_fraction(d1, d3) >= dc.year_fraction(d1, d2), "{}", dc.name());
        }
    }
}
