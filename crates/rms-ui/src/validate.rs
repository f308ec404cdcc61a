//! Form field checks and as-you-type input formatting

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));
static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[1-9]\d{0,15}$").expect("valid phone regex"));

pub const INVALID_EMAIL: &str = "Please enter a valid email address";
pub const INVALID_PHONE: &str = "Please enter a valid phone number";

/// Outcome of checking one field. Empty optional fields are neither valid nor invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldCheck {
    Empty,
    Valid,
    Invalid(&'static str),
}

impl FieldCheck {
    pub fn is_invalid(&self) -> bool {
        matches!(self, FieldCheck::Invalid(_))
    }
}

pub fn validate_email(value: &str) -> FieldCheck {
    if value.is_empty() {
        FieldCheck::Empty
    } else if EMAIL_RE.is_match(value) {
        FieldCheck::Valid
    } else {
        FieldCheck::Invalid(INVALID_EMAIL)
    }
}

/// Punctuation is ignored; only the digits are checked
pub fn validate_phone(value: &str) -> FieldCheck {
    if value.is_empty() {
        return FieldCheck::Empty;
    }
    if PHONE_RE.is_match(&digits(value)) {
        FieldCheck::Valid
    } else {
        FieldCheck::Invalid(INVALID_PHONE)
    }
}

/// Reformat a phone input as `(555) 123-4567` while the user types
pub fn format_phone(value: &str) -> String {
    let digits = digits(value);
    let n = digits.len();
    if n >= 10 {
        format!(
            "({}) {}-{}{}",
            &digits[..3],
            &digits[3..6],
            &digits[6..10],
            &digits[10..]
        )
    } else if n >= 6 {
        // not enough digits for a full number yet
        digits
    } else if n >= 3 {
        format!("({}) {}", &digits[..3], &digits[3..])
    } else {
        digits
    }
}

/// Required fields left blank
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Please fill in all required fields")]
pub struct MissingFields {
    pub names: Vec<String>,
}

/// Check `(name, value)` pairs of required fields; whitespace counts as blank
pub fn check_required(fields: &[(&str, &str)]) -> Result<(), MissingFields> {
    let names: Vec<String> = fields
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name.to_string())
        .collect();
    if names.is_empty() {
        Ok(())
    } else {
        Err(MissingFields { names })
    }
}

fn digits(value: &str) -> String {
    value.chars().filter(|c| c.is_ascii_digit()).collect()
}
