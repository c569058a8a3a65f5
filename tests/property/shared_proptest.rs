//! Input helpers under arbitrary input

use chrono::NaiveDate;
use proptest::prelude::*;

use planhub::shared::{normalize_email, parse_strict_date};

proptest! {
    #[test]
    fn prop_normalize_email_is_idempotent(email in "[A-Za-z0-9.+]{1,12}@[A-Za-z]{1,8}\\.(com|org)") {
        let once = normalize_email(&email);
        prop_assert_eq!(normalize_email(&once), once);
    }

    #[test]
    fn prop_gmail_variants_collapse(local in "[a-z]{1,6}", dots in "[.]{0,3}", tag in "[a-z0-9]{0,6}") {
        let plain = normalize_email(&format!("{local}@gmail.com"));
        let fancy = normalize_email(&format!("{dots}{}+{tag}@GMAIL.com", local.to_uppercase()));
        prop_assert_eq!(plain, fancy);
    }

    #[test]
    fn prop_strict_date_matches_chrono(days in 0i64..200_000) {
        let day = NaiveDate::from_ymd_opt(1900, 1, 1).unwrap() + chrono::Days::new(days as u64);
        let text = day.format("%Y-%m-%d").to_string();
        prop_assert_eq!(parse_strict_date(&text).ok(), Some(day));
    }

    #[test]
    fn prop_strict_date_never_panics(value in "\\PC{0,16}") {
        let _ = parse_strict_date(&value);
    }
}
