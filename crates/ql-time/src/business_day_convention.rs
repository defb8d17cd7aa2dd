//! Business-day convention (translates `ql/time/businessdayconvention.hpp`).

/// Rule for moving a date that is not a business day.
///
/// Tranche maturities and schedule dates are rolled with one of these
/// through [`Calendar::adjust`](crate::Calendar::adjust).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BusinessDayConvention {
    /// Next business day.
    Following,
    /// Next business day, or the previous one if the next falls in another
    /// month.
    ModifiedFollowing,
    /// Previous business day.
    Preceding,
    /// Previous business day, or the next one if the previous falls in
    /// another month.
    ModifiedPreceding,
    /// Leave the date as it is.
    Unadjusted,
    /// Closest business day; ties go forward.
    Nearest,
    /// Last business day of the month.
    EndOfMonth,
}

impl BusinessDayConvention {
    /// Name as printed by QuantLib.
    pub fn name(self) -> &'static str {
        match self {
            Self::Following => "Following",
            Self::ModifiedFollowing => "Modified Following",
            Self::Preceding => "Preceding",
            Self::ModifiedPreceding => "Modified Preceding",
            Self::Unadjusted => "Unadjusted",
            Self::Nearest => "Nearest",
            Self::EndOfMonth => "End of Month",
        }
    }
}

impl std::fmt::Display for BusinessDayConvention {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
