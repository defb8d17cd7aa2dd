//! `TimeUnit` (translates `ql/time/timeunit.hpp`).

/// Unit of a [`Period`](crate::Period). Intraday units are not carried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum TimeUnit {
    Days,
    Weeks,
    Months,
    Years,
}

impl TimeUnit {
    /// One-letter suffix, as in `3M` or `10Y`.
    pub fn abbreviation(&self) -> &'static str {
        match self {
            TimeUnit::Days => "D",
            TimeUnit::Weeks => "W",
            TimeUnit::Months => "M",
            TimeUnit::Years => "Y",
        }
    }
}

impl std::fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let plural = match self {
            TimeUnit::Days => "Day",
            TimeUnit::Weeks => "Week",
            TimeUnit::Months => "Month",
            TimeUnit::Years => "Year",
        };
        write!(f, "{plural}(s)")
    }
}
