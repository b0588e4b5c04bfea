//! Injected localization capability for the battery labels.
//!
//! Replaces the usual process-wide gettext lookup: the presenter receives
//! whichever implementation the host wires in and never touches a global
//! translation catalog.

/// Produces the human-readable battery estimate strings.
pub trait BatteryStrings {
    /// Label when the battery level is 100%.
    fn fully_charged(&self) -> String;

    /// Label when no time estimate is available yet, e.g. `42% (Estimating…)`.
    fn estimating(&self, level: i32) -> String;

    /// Estimated time until charged, e.g. `42% (1:15 Until Full)`.
    fn until_full(&self, level: i32, hours: i64, minutes: i64) -> String;

    /// Estimated time until empty, e.g. `42% (12:15 Remaining)`.
    fn remaining(&self, level: i32, hours: i64, minutes: i64) -> String;
}

/// Untranslated English strings.
pub struct EnglishStrings;

impl BatteryStrings for EnglishStrings {
    fn fully_charged(&self) -> String {
        "Fully Charged".into()
    }

    fn estimating(&self, level: i32) -> String {
        format!("{level}% (Estimating…)")
    }

    fn until_full(&self, level: i32, hours: i64, minutes: i64) -> String {
        format!("{level}% ({hours}:{minutes:02} Until Full)")
    }

    fn remaining(&self, level: i32, hours: i64, minutes: i64) -> String {
        format!("{level}% ({hours}:{minutes:02} Remaining)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minutes_are_zero_padded() {
        assert_eq!(EnglishStrings.until_full(42, 1, 5), "42% (1:05 Until Full)");
        assert_eq!(EnglishStrings.remaining(42, 0, 9), "42% (0:09 Remaining)");
    }

    #[test]
    fn hours_are_not_padded() {
        assert_eq!(
            EnglishStrings.remaining(10, 25, 0),
            "10% (25:00 Remaining)"
        );
    }
}
