//! Date key codec and week arithmetic.
//!
//! Every daily ledger lives under its own key, `habits_YYYY-MM-DD`. No other
//! record key starts with [`LEDGER_PREFIX`], so a prefix scan returns ledgers
//! only.

use chrono::{Datelike, Duration, NaiveDate, Weekday};

pub const LEDGER_PREFIX: &str = "habits_";

const KEY_DATE_FORMAT: &str = "%Y-%m-%d";

/// Storage key of the ledger for `date`.
pub fn date_key(date: NaiveDate) -> String {
    format!("{LEDGER_PREFIX}{}", date.format(KEY_DATE_FORMAT))
}

/// Inverse of [`date_key`]. Returns `None` for keys that are not ledger keys.
pub fn parse_date_key(key: &str) -> Option<NaiveDate> {
    let raw = key.strip_prefix(LEDGER_PREFIX)?;
    NaiveDate::parse_from_str(raw, KEY_DATE_FORMAT).ok()
}

/// Monday of the week containing `date`. Sunday belongs to the week that
/// started six days earlier.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    let offset = date.weekday().num_days_from_monday() as i64;
    date - Duration::days(offset)
}

/// The seven consecutive dates beginning at `start`.
pub fn week_dates(start: NaiveDate) -> [NaiveDate; 7] {
    std::array::from_fn(|i| start + Duration::days(i as i64))
}

pub fn is_week_start(date: NaiveDate) -> bool {
    date.weekday() == Weekday::Mon
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn date_key_is_zero_padded() {
        assert_eq!(date_key(ymd(2024, 1, 5)), "habits_2024-01-05");
    }

    #[test]
    fn parse_date_key_rejects_foreign_keys() {
        assert_eq!(parse_date_key("habits_2024-01-05"), Some(ymd(2024, 1, 5)));
        assert_eq!(parse_date_key("goals"), None);
        assert_eq!(parse_date_key("habit_totals"), None);
        assert_eq!(parse_date_key("habits_garbage"), None);
    }

    #[test]
    fn sunday_maps_to_previous_monday() {
        // 2024-03-10 is a Sunday.
        assert_eq!(week_start(ymd(2024, 3, 10)), ymd(2024, 3, 4));
        assert_eq!(week_start(ymd(2024, 3, 4)), ymd(2024, 3, 4));
        assert_eq!(week_start(ymd(2024, 3, 6)), ymd(2024, 3, 4));
    }

    #[test]
    fn week_crosses_year_boundary() {
        let dates = week_dates(ymd(2024, 12, 30));
        assert_eq!(dates[0], ymd(2024, 12, 30));
        assert_eq!(dates[6], ymd(2025, 1, 5));
    }

    proptest! {
        #[test]
        fn week_start_is_a_monday_within_six_days(days in 0i64..200_000) {
            let date = ymd(1970, 1, 1) + Duration::days(days);
            let start = week_start(date);
            prop_assert!(is_week_start(start));
            prop_assert!(start <= date);
            prop_assert!(date - start < Duration::days(7));
        }
    }
}
