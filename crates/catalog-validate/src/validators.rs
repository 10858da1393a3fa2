//! Single-value validators.
//!
//! Each validator is a pure function of the raw cell text. Only the GTIN
//! validator rejects empty input; every other validator treats an empty
//! value as "not provided" and accepts it.

use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use regex::Regex;
use serde::{Deserialize, Serialize};

use catalog_model::ValidatorId;

pub const GTIN_REQUIRED: &str = "GTIN is required";
pub const GTIN_LENGTH: &str = "GTIN must be 12 or 13 digits";
pub const PRICE_INVALID: &str = "Price must be a positive number";
pub const DATE_INVALID: &str = "Invalid date format";
pub const EMAIL_INVALID: &str = "Invalid email format";
pub const URL_INVALID: &str = "Invalid URL format";

static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Invalid email regex"));

/// Leading decimal number, trailing text is ignored.
static NUMBER_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?").expect("Invalid number regex")
});

static YEAR_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}$").expect("Invalid year regex"));

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%d.%m.%Y",
    "%m/%d/%Y",
    "%b %d %Y",
    "%B %d %Y",
    "%b %d, %Y",
    "%B %d, %Y",
    "%d %b %Y",
    "%d %B %Y",
];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Result of validating one value. Invalid outcomes always carry a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationOutcome {
    pub valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ValidationOutcome {
    pub fn ok() -> Self {
        Self {
            valid: true,
            message: None,
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            message: Some(message.into()),
        }
    }
}

/// Run the validator `id` against `raw`.
pub fn validate(id: ValidatorId, raw: &str) -> ValidationOutcome {
    match id {
        ValidatorId::Gtin => validate_gtin(raw),
        ValidatorId::Price => check(raw, is_valid_price, PRICE_INVALID),
        ValidatorId::Date => check(raw, is_valid_date, DATE_INVALID),
        ValidatorId::Email => check(raw, is_valid_email, EMAIL_INVALID),
        ValidatorId::Url => check(raw, is_valid_url, URL_INVALID),
    }
}

fn check(raw: &str, accept: fn(&str) -> bool, message: &str) -> ValidationOutcome {
    if raw.is_empty() || accept(raw) {
        ValidationOutcome::ok()
    } else {
        ValidationOutcome::invalid(message)
    }
}

fn validate_gtin(raw: &str) -> ValidationOutcome {
    if raw.is_empty() {
        return ValidationOutcome::invalid(GTIN_REQUIRED);
    }
    if is_valid_gtin(raw) {
        ValidationOutcome::ok()
    } else {
        ValidationOutcome::invalid(GTIN_LENGTH)
    }
}

/// 12 or 13 ASCII digits after trimming.
pub fn is_valid_gtin(raw: &str) -> bool {
    let value = raw.trim();
    matches!(value.len(), 12 | 13) && value.bytes().all(|b| b.is_ascii_digit())
}

/// Parse the leading number of a price, so `"19.99 €"` and `"12 EUR"` read
/// as amounts. `,` is the decimal separator when no `.` is present.
pub fn parse_price(raw: &str) -> Option<f64> {
    let value = raw.trim();
    let value = if value.contains(',') && !value.contains('.') {
        value.replace(',', ".")
    } else {
        value.to_string()
    };
    let number = NUMBER_PREFIX.find(&value)?;
    number.as_str().parse::<f64>().ok().filter(|n| n.is_finite())
}

/// A finite, non-negative number.
pub fn is_valid_price(raw: &str) -> bool {
    parse_price(raw).is_some_and(|n| n >= 0.0)
}

pub fn is_valid_date(raw: &str) -> bool {
    let value = raw.trim();
    if DateTime::parse_from_rfc3339(value).is_ok() || YEAR_REGEX.is_match(value) {
        return true;
    }
    DATE_FORMATS
        .iter()
        .any(|fmt| NaiveDate::parse_from_str(value, fmt).is_ok())
        || DATETIME_FORMATS
            .iter()
            .any(|fmt| NaiveDateTime::parse_from_str(value, fmt).is_ok())
}

pub fn is_valid_email(raw: &str) -> bool {
    EMAIL_REGEX.is_match(raw)
}

/// An absolute URL with a scheme.
pub fn is_valid_url(raw: &str) -> bool {
    url::Url::parse(raw.trim()).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gtin_messages() {
        assert_eq!(
            validate(ValidatorId::Gtin, "").message.as_deref(),
            Some(GTIN_REQUIRED)
        );
        assert_eq!(
            validate(ValidatorId::Gtin, "12345").message.as_deref(),
            Some(GTIN_LENGTH)
        );
        assert!(validate(ValidatorId::Gtin, " 4006381333931 ").valid);
        assert!(validate(ValidatorId::Gtin, "123456789012").valid);
        assert!(!validate(ValidatorId::Gtin, "40063813339３").valid);
    }

    #[test]
    fn empty_optional_values_pass() {
        for id in [
            ValidatorId::Price,
            ValidatorId::Date,
            ValidatorId::Email,
            ValidatorId::Url,
        ] {
            assert_eq!(validate(id, ""), ValidationOutcome::ok(), "{id}");
        }
    }

    #[test]
    fn prices() {
        assert!(is_valid_price("19.99"));
        assert!(is_valid_price("0"));
        assert!(is_valid_price("19,99"));
        assert!(!is_valid_price("-1"));
        assert!(!is_valid_price("abc"));
        assert!(!is_valid_price("NaN"));
        assert!(is_valid_price("1,000.50"));
        assert_eq!(parse_price("1,000.50"), Some(1.0));
        assert_eq!(parse_price("19.99 €"), Some(19.99));
        assert_eq!(parse_price("12 EUR"), Some(12.0));
        assert_eq!(parse_price("19,99 €"), Some(19.99));
        assert!(!is_valid_price("-5 €"));
        assert!(!is_valid_price("€ 12"));
        assert_eq!(
            validate(ValidatorId::Price, "-5").message.as_deref(),
            Some(PRICE_INVALID)
        );
    }

    #[test]
    fn dates() {
        for ok in [
            "2024-01-30",
            "2024/01/30",
            "30.01.2024",
            "01/30/2024",
            "2024-01-30T10:15",
            "2024-01-30 10:15:00",
            "2024-01-30T10:15:00+01:00",
            "Jan 30 2024",
            "January 30, 2024",
            "30 Jan 2024",
            "2024",
        ] {
            assert!(is_valid_date(ok), "{ok}");
        }
        for bad in ["not-a-date", "2024-13-40", "30/30/2024", "Foo 30 2024", "20245"] {
            assert!(!is_valid_date(bad), "{bad}");
        }
    }

    #[test]
    fn emails_and_urls() {
        assert!(is_valid_email("a@b.de"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a b@c.de"));
        assert!(is_valid_url("https://example.com/image.jpg"));
        assert!(!is_valid_url("example.com/image.jpg"));
        assert_eq!(
            validate(ValidatorId::Url, "nope").message.as_deref(),
            Some(URL_INVALID)
        );
    }
}
