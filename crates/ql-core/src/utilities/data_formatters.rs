//! Message formatting helpers (after `ql/utilities/dataformatters.hpp`).

use crate::Size;

/// `n` with its English ordinal suffix: `1st`, `22nd`, `113th`.
///
/// Validation messages number vector entries from one with this.
pub fn format_ordinal(n: Size) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{n}{suffix}")
}

#[cfg(test)]
mod tests {
    use super::format_ordinal;

    #[test]
    fn teens_take_th() {
        let printed: Vec<String> = [1, 2, 3, 4, 11, 12, 13, 21, 102, 112].map(format_ordinal).into();
        assert_eq!(
            printed,
            ["1st", "2nd", "3rd", "4th", "11th", "12th", "13th", "21st", "102nd", "112th"]
        );
    }
}
