use catalog_validate::validators::{is_valid_gtin, parse_price};
use catalog_validate::{ValidatorId, validate};
use proptest::prelude::*;

proptest! {
    #[test]
    fn twelve_or_thirteen_digits_are_valid_gtins(gtin in "[0-9]{12,13}") {
        prop_assert!(validate(ValidatorId::Gtin, &gtin).valid);
    }

    #[test]
    fn other_digit_lengths_are_rejected(gtin in "[0-9]{1,11}|[0-9]{14,20}") {
        let outcome = validate(ValidatorId::Gtin, &gtin);
        prop_assert!(!outcome.valid);
        prop_assert_eq!(outcome.message.as_deref(), Some("GTIN must be 12 or 13 digits"));
    }

    #[test]
    fn surrounding_whitespace_is_ignored(gtin in "[0-9]{13}", pad in " {0,3}") {
        let padded = format!("{pad}{gtin}{pad}");
        prop_assert!(is_valid_gtin(&padded));
    }

    #[test]
    fn non_negative_prices_are_valid(cents in 0u64..10_000_000) {
        let dot = format!("{}.{:02}", cents / 100, cents % 100);
        let comma = dot.replace('.', ",");
        prop_assert!(validate(ValidatorId::Price, &dot).valid);
        prop_assert!(validate(ValidatorId::Price, &comma).valid);
        prop_assert_eq!(parse_price(&comma), parse_price(&dot));
    }

    #[test]
    fn trailing_currency_text_is_ignored(cents in 0u64..10_000_000, unit in " ?(€|EUR|USD|\\$)") {
        let dot = format!("{}.{:02}", cents / 100, cents % 100);
        let priced = format!("{dot}{unit}");
        prop_assert!(validate(ValidatorId::Price, &priced).valid);
        prop_assert_eq!(parse_price(&priced), parse_price(&dot));
    }

    #[test]
    fn negative_prices_are_invalid(cents in 1u64..10_000_000) {
        let value = format!("-{}.{:02}", cents / 100, cents % 100);
        prop_assert!(!validate(ValidatorId::Price, &value).valid);
    }

    #[test]
    fn invalid_outcomes_carry_a_message(raw in ".{0,20}") {
        for id in [ValidatorId::Gtin, ValidatorId::Price, ValidatorId::Date, ValidatorId::Email, ValidatorId::Url] {
            let outcome = validate(id, &raw);
            prop_assert_eq!(outcome.valid, outcome.message.is_none());
        }
    }
}
