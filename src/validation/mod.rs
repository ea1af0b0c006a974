//! Field validators used by every intake and payment form.
//!
//! Each validator takes the raw input of a single field and returns `Ok(())`
//! when the value is acceptable or a [`FieldError`] whose `Display` is the
//! user-facing (Hebrew) message. Validators are pure and never panic, so they
//! can run on every keystroke as well as during the submit pass.
//!
//! Several validators deliberately accept partial input (an ID or card number
//! that is still being typed) and accept empty input; required-ness is
//! decided by the form that calls them.

use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod checksum;

use checksum::{ISRAELI_ID_LENGTH, israeli_id_checksum, luhn_checksum};

/// Number of digits on a supported payment card.
pub const CARD_NUMBER_LENGTH: usize = 16;

static EMAIL_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

// Longest numeric prefix accepted by a lenient float parser ("10abc" -> 10).
static FLOAT_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:Infinity|(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)(?:[eE][+-]?[0-9]+)?)")
        .expect("float prefix pattern is valid")
});

/// Reason a single field value was rejected.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq, Hash)]
pub enum FieldError {
    #[error("שדה מייל חובה")]
    EmailRequired,
    #[error("לא ניתן להשתמש בתווים בעברית בשדה מייל")]
    EmailHebrew,
    #[error("פורמט מייל לא תקין - חייב להיות כמו: example@domain.com")]
    EmailFormat,
    #[error("שדה טלפון חובה")]
    PhoneRequired,
    #[error("לא ניתן להשתמש בתווים בעברית בשדה טלפון")]
    PhoneHebrew,
    #[error("שדה טלפון חייב להכיל רק מספרים")]
    PhoneNotDigits,
    #[error("מספר טלפון לא תקין - חייב להיות בין 9-15 ספרות")]
    PhoneLength,
    #[error("מספר כרטיס חייב להיות בדיוק 16 ספרות")]
    CardLength,
    #[error("מספר כרטיס לא תקין")]
    CardChecksum,
    #[error("CVV חייב להיות 3-4 ספרות בלבד")]
    CvvFormat,
    #[error("אותיות בלבד, לא מספרים")]
    NameHasDigits,
    #[error("שם חייב להכיל לפחות 2 תווים")]
    NameTooShort,
    #[error("תעודת זהות חייבת להיות בדיוק 9 ספרות")]
    IdLength,
    #[error("תעודת זהות לא תקינה")]
    IdChecksum,
    #[error("שדה סכום חובה")]
    AmountRequired,
    #[error("סכום חייב להיות מספר")]
    AmountNotNumber,
    #[error("סכום חייב להיות גדול מ-0")]
    AmountNotPositive,
    #[error("כתובת חייבת להכיל לפחות 5 תווים")]
    AddressTooShort,
    #[error("שם העיר חייב להכיל לפחות 2 תווים")]
    CityTooShort,
    #[error("אותיות בלבד, לא מספרים")]
    CityHasDigits,
    /// Reported for zip codes shorter than five characters, before the
    /// length/format check runs.
    #[error("מספרים בלבד")]
    ZipDigitsOnly,
    #[error("מיקוד חייב להכיל 5-6 ספרות בלבד")]
    ZipFormat,
}

/// Outcome of validating a single field.
pub type FieldResult = Result<(), FieldError>;

/// Returns `true` if any character falls in the Hebrew block (U+0590..=U+05FF).
pub fn contains_hebrew(text: &str) -> bool {
    text.chars().any(|c| ('\u{0590}'..='\u{05FF}').contains(&c))
}

/// Bare `local@domain.tld` shape test, without the required/Hebrew checks.
pub fn is_email_shape(value: &str) -> bool {
    EMAIL_SHAPE.is_match(value)
}

fn strip(value: &str, drop: impl Fn(char) -> bool) -> String {
    value.chars().filter(|&c| !drop(c)).collect()
}

fn is_all_digits(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit())
}

fn has_digit(value: &str) -> bool {
    value.bytes().any(|b| b.is_ascii_digit())
}

fn char_len(value: &str) -> usize {
    value.chars().count()
}

/// Parses the longest numeric prefix of `value` after leading whitespace.
///
/// A leading byte order mark counts as whitespace. Returns `None` when no
/// digits (or `Infinity`) start the value.
pub fn parse_float_prefix(value: &str) -> Option<f64> {
    let candidate = value.trim_start_matches(|c: char| c.is_whitespace() || c == '\u{FEFF}');
    FLOAT_PREFIX
        .find(candidate)
        .and_then(|m| m.as_str().parse::<f64>().ok())
}

pub fn validate_email(value: &str) -> FieldResult {
    if value.is_empty() {
        return Err(FieldError::EmailRequired);
    }
    if contains_hebrew(value) {
        return Err(FieldError::EmailHebrew);
    }
    if !is_email_shape(value) {
        return Err(FieldError::EmailFormat);
    }
    Ok(())
}

/// Accepts 9 to 15 digits once spaces, hyphens and parentheses are removed.
pub fn validate_phone(value: &str) -> FieldResult {
    if value.is_empty() {
        return Err(FieldError::PhoneRequired);
    }
    if contains_hebrew(value) {
        return Err(FieldError::PhoneHebrew);
    }

    let cleaned = strip(value, |c| c.is_whitespace() || matches!(c, '-' | '(' | ')'));
    if !is_all_digits(&cleaned) {
        return Err(FieldError::PhoneNotDigits);
    }
    if !(9..=15).contains(&cleaned.len()) {
        return Err(FieldError::PhoneLength);
    }
    Ok(())
}

/// Validates a 16 digit card number with the Luhn checksum.
///
/// Shorter input is treated as still being typed and passes.
pub fn validate_card_number(value: &str) -> FieldResult {
    if value.is_empty() {
        return Ok(());
    }

    let cleaned = strip(value, char::is_whitespace);
    let length = char_len(&cleaned);
    if length < CARD_NUMBER_LENGTH {
        return Ok(());
    }
    if length != CARD_NUMBER_LENGTH {
        return Err(FieldError::CardLength);
    }
    if !luhn_checksum(&cleaned) {
        return Err(FieldError::CardChecksum);
    }
    Ok(())
}

pub fn validate_cvv(value: &str) -> FieldResult {
    if value.is_empty() {
        return Ok(());
    }
    if !(3..=4).contains(&value.len()) || !is_all_digits(value) {
        return Err(FieldError::CvvFormat);
    }
    Ok(())
}

pub fn validate_name(value: &str) -> FieldResult {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(());
    }
    if has_digit(value) {
        return Err(FieldError::NameHasDigits);
    }
    if char_len(trimmed) < 2 {
        return Err(FieldError::NameTooShort);
    }
    Ok(())
}

/// Validates an Israeli ID number, ignoring spaces and hyphens.
///
/// Fewer than nine characters is treated as still being typed and passes.
pub fn validate_id_number(value: &str) -> FieldResult {
    if value.is_empty() {
        return Ok(());
    }

    let cleaned = strip(value, |c| c.is_whitespace() || c == '-');
    let length = char_len(&cleaned);
    if length < ISRAELI_ID_LENGTH {
        return Ok(());
    }
    if length != ISRAELI_ID_LENGTH {
        return Err(FieldError::IdLength);
    }
    if !israeli_id_checksum(&cleaned) {
        return Err(FieldError::IdChecksum);
    }
    Ok(())
}

pub fn validate_amount(value: &str) -> FieldResult {
    if value.is_empty() {
        return Err(FieldError::AmountRequired);
    }
    match parse_float_prefix(value) {
        None => Err(FieldError::AmountNotNumber),
        Some(amount) if amount <= 0.0 => Err(FieldError::AmountNotPositive),
        Some(_) => Ok(()),
    }
}

pub fn validate_address(value: &str) -> FieldResult {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(());
    }
    if char_len(trimmed) < 5 {
        return Err(FieldError::AddressTooShort);
    }
    Ok(())
}

pub fn validate_city(value: &str) -> FieldResult {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(());
    }
    if char_len(trimmed) < 2 {
        return Err(FieldError::CityTooShort);
    }
    if has_digit(value) {
        return Err(FieldError::CityHasDigits);
    }
    Ok(())
}

/// Validates a 5 or 6 digit zip code, ignoring spaces and hyphens.
///
/// Input shorter than five characters reports [`FieldError::ZipDigitsOnly`]
/// rather than [`FieldError::ZipFormat`].
pub fn validate_zip_code(value: &str) -> FieldResult {
    if value.is_empty() {
        return Ok(());
    }

    let cleaned = strip(value, |c| c.is_whitespace() || c == '-');
    let length = char_len(&cleaned);
    if length < 5 {
        return Err(FieldError::ZipDigitsOnly);
    }
    if !(5..=6).contains(&length) || !is_all_digits(&cleaned) {
        return Err(FieldError::ZipFormat);
    }
    Ok(())
}

/// Error returned when a field kind name is not recognised.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown field kind: {0}")]
pub struct UnknownFieldKind(pub String);

/// The kinds of field a single validator exists for.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Email,
    Phone,
    CardNumber,
    Cvv,
    Name,
    IdNumber,
    Amount,
    Address,
    City,
    ZipCode,
}

impl FieldKind {
    pub const ALL: [FieldKind; 10] = [
        FieldKind::Email,
        FieldKind::Phone,
        FieldKind::CardNumber,
        FieldKind::Cvv,
        FieldKind::Name,
        FieldKind::IdNumber,
        FieldKind::Amount,
        FieldKind::Address,
        FieldKind::City,
        FieldKind::ZipCode,
    ];

    /// Runs the validator matching this kind.
    pub fn validate(self, value: &str) -> FieldResult {
        match self {
            FieldKind::Email => validate_email(value),
            FieldKind::Phone => validate_phone(value),
            FieldKind::CardNumber => validate_card_number(value),
            FieldKind::Cvv => validate_cvv(value),
            FieldKind::Name => validate_name(value),
            FieldKind::IdNumber => validate_id_number(value),
            FieldKind::Amount => validate_amount(value),
            FieldKind::Address => validate_address(value),
            FieldKind::City => validate_city(value),
            FieldKind::ZipCode => validate_zip_code(value),
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            FieldKind::Email => "email",
            FieldKind::Phone => "phone",
            FieldKind::CardNumber => "card_number",
            FieldKind::Cvv => "cvv",
            FieldKind::Name => "name",
            FieldKind::IdNumber => "id_number",
            FieldKind::Amount => "amount",
            FieldKind::Address => "address",
            FieldKind::City => "city",
            FieldKind::ZipCode => "zip_code",
        }
    }
}

impl std::fmt::Display for FieldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldKind {
    type Err = UnknownFieldKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownFieldKind(s.to_string()))
    }
}
