//! `Frequency` (translates `ql/time/frequency.hpp`).
//!
//! Inflation indices are published with one of the monthly-family
//! frequencies; the weekly and daily ones only matter to seasonality
//! vectors.

/// How many times a year something happens. The discriminant is that
/// count, with `-1` and `999` marking the two frequencies that have none.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum Frequency {
    NoFrequency = -1,
    Once = 0,
    Annual = 1,
    Semiannual = 2,
    EveryFourthMonth = 3,
    Quarterly = 4,
    Bimonthly = 6,
    Monthly = 12,
    EveryFourthWeek = 13,
    Biweekly = 26,
    Weekly = 52,
    Daily = 365,
    OtherFrequency = 999,
}

impl Frequency {
    /// Occurrences per year; `None` for `NoFrequency` and `OtherFrequency`.
    pub fn periods_per_year(&self) -> Option<u32> {
        match self {
            Frequency::NoFrequency | Frequency::OtherFrequency => None,
            other => u32::try_from(*other as i32).ok(),
        }
    }

    /// Months in one period when twelve is a whole multiple of the count,
    /// i.e. for the publication frequencies of an inflation index.
    pub fn months_per_period(&self) -> Option<u32> {
        match self.periods_per_year()? {
            n @ (1 | 2 | 3 | 4 | 6 | 12) => Some(12 / n),
            _ => None,
        }
    }

    /// QuantLib's printed name.
    pub fn name(&self) -> &'static str {
        match self {
            Frequency::NoFrequency => "No-Frequency",
            Frequency::Once => "Once",
            Frequency::Annual => "Annual",
            Frequency::Semiannual => "Semiannual",
            Frequency::EveryFourthMonth => "Every-Fourth-Month",
            Frequency::Quarterly => "Quarterly",
            Frequency::Bimonthly => "Bimonthly",
            Frequency::Monthly => "Monthly",
            Frequency::EveryFourthWeek => "Every-Fourth-Week",
            Frequency::Biweekly => "Biweekly",
            Frequency::Weekly => "Weekly",
            Frequency::Daily => "Daily",
            Frequency::OtherFrequency => "Other-Frequency",
        }
    }
}

impl std::fmt::Display for Frequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
