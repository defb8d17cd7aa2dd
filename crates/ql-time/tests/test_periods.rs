//! Period ordering properties.

use proptest::prelude::*;
use ql_time::{Date, Period, TimeUnit};

fn unit() -> impl Strategy<Value = TimeUnit> {
    prop_oneof![
        Just(TimeUnit::Days),
        Just(TimeUnit::Weeks),
        Just(TimeUnit::Months),
        Just(TimeUnit::Years),
    ]
}

fn period() -> impl Strategy<Value = Period> {
    (0i32..60, unit()).prop_map(|(n, u)| Period::new(n, u))
}

#[test]
fn mixed_units_compare_through_their_families() {
    assert_eq!(Period::years(1), Period::months(12));
    assert_eq!(Period::weeks(2), Period::days(14));
    assert!(Period::months(1) < Period::days(32));
    assert!(Period::years(1) > Period::days(364));
    assert_eq!(Period::months(1).partial_cmp(&Period::days(30)), None);
    assert!(Period::months(-1) < Period::days(0));
}

proptest! {
    #[test]
    fn ordering_is_antisymmetric(a in period(), b in period()) {
        prop_assert_eq!(a.partial_cmp(&b), b.partial_cmp(&a).map(|o| o.reverse()));
    }

    #[test]
    fn ordering_agrees_with_date_arithmetic(
        a in period(),
        b in period(),
        serial in 36_526i32..73_000,
    ) {
        let d = Date::from_serial(serial).unwrap();
        if a < b {
            prop_assert!(d.add_period(a).unwrap() < d.add_period(b).unwrap());
        }
    }
}
