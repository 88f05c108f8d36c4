//! Field format validators.
//!
//! Each validator is a pure predicate over a single field value. Rejection is
//! an ordinary [`ValidationResult`], never an error.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::{FieldError, FieldId, FormValues};

/// Message for a malformed account number.
pub const ACCOUNT_NUMBER_MESSAGE: &str = "Broj računa mora sadržati tačno 18 cifara";

/// Message for a malformed amount.
pub const AMOUNT_MESSAGE: &str =
    "Iznos mora biti u formatu: RSD[broj],[decimale] (npr. RSD3596,13)";

/// Message for a malformed payment code.
pub const PAYMENT_CODE_MESSAGE: &str = "Šifra plaćanja mora biti broj od 1 do 3 cifre";

/// Message for a malformed model and reference number.
pub const REFERENCE_NUMBER_MESSAGE: &str =
    "Model i poziv na broj mora biti u formatu: [model-2 cifre][poziv na broj-do 21 cifre]";

/// Message for an empty required field.
pub const REQUIRED_MESSAGE: &str = "Ovo polje je obavezno";

// `\d` is Unicode-aware in the regex crate; the formats only admit ASCII digits.
static ACCOUNT_NUMBER: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r"^[0-9]{18}$").ok());
static AMOUNT: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"^RSD[0-9]+(?:,[0-9]{2})?$").ok());
static PAYMENT_CODE: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r"^[0-9]{1,3}$").ok());
static REFERENCE_NUMBER: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"^(?:0[1-9]|[1-9][0-9])[0-9]{1,21}$").ok());

/// Outcome of a single validator call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationResult {
    /// Whether the value is acceptable.
    pub valid: bool,
    /// The validator's rejection message, returned regardless of `valid`.
    pub message: &'static str,
}

impl ValidationResult {
    fn check(regex: &Option<Regex>, value: &str, message: &'static str) -> Self {
        let valid = match regex {
            Some(re) => re.is_match(value),
            None => false,
        };
        Self { valid, message }
    }
}

/// Exactly 18 digits.
pub fn validate_account_number(value: &str) -> ValidationResult {
    ValidationResult::check(&ACCOUNT_NUMBER, value, ACCOUNT_NUMBER_MESSAGE)
}

/// `RSD`, one or more digits, then optionally a comma and exactly two digits.
pub fn validate_amount(value: &str) -> ValidationResult {
    ValidationResult::check(&AMOUNT, value, AMOUNT_MESSAGE)
}

/// One to three digits.
pub fn validate_payment_code(value: &str) -> ValidationResult {
    ValidationResult::check(&PAYMENT_CODE, value, PAYMENT_CODE_MESSAGE)
}

/// Two-digit model (`01`-`99`) followed by 1 to 21 reference digits.
pub fn validate_reference_number(value: &str) -> ValidationResult {
    ValidationResult::check(&REFERENCE_NUMBER, value, REFERENCE_NUMBER_MESSAGE)
}

/// A field format validator.
pub type Validator = fn(&str) -> ValidationResult;

/// Returns the format validator for a regulated field.
pub fn validator_for(field: FieldId) -> Option<Validator> {
    let validate: Validator = match field {
        FieldId::R => validate_account_number,
        FieldId::I => validate_amount,
        FieldId::SF => validate_payment_code,
        FieldId::RO => validate_reference_number,
        _ => return None,
    };
    Some(validate)
}

/// Validates a whole form snapshot.
///
/// Format errors come first (`R`, `I`, `SF`, then `RO` when it is filled in),
/// followed by a required error for every blank required field. An empty
/// regulated field therefore reports both.
pub fn validate_form(values: &FormValues) -> Vec<FieldError> {
    let mut errors = Vec::new();

    for field in [FieldId::R, FieldId::I, FieldId::SF, FieldId::RO] {
        let value = values.get(field);
        if field == FieldId::RO && value.is_empty() {
            continue;
        }
        if let Some(validate) = validator_for(field) {
            let result = validate(value);
            if !result.valid {
                errors.push(FieldError::format(field, result.message));
            }
        }
    }

    errors.extend(
        FieldId::REQUIRED
            .into_iter()
            .filter(|field| values.is_blank(*field))
            .map(FieldError::required),
    );

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FieldErrorKind;

    #[test]
    fn test_account_number_exact_length() {
        assert!(validate_account_number("123456789012345678").valid);
        assert!(!validate_account_number("12345678901234567").valid);
        assert!(!validate_account_number("1234567890123456789").valid);
        assert!(!validate_account_number("12345678901234567a").valid);
        assert!(!validate_account_number("").valid);
    }

    #[test]
    fn test_account_number_rejects_non_ascii_digits() {
        // Arabic-Indic digits are `\d` in Unicode regexes.
        assert!(!validate_account_number("١٢٣٤٥٦٧٨٩٠١٢٣٤٥٦٧٨").valid);
    }

    #[test]
    fn test_message_returned_on_success() {
        let result = validate_payment_code("189");
        assert!(result.valid);
        assert_eq!(result.message, PAYMENT_CODE_MESSAGE);
    }

    #[test]
    fn test_amount_separator_is_comma() {
        assert!(validate_amount("RSD3596,13").valid);
        assert!(!validate_amount("RSD3596.13").valid);
        assert!(!validate_amount("RSD3596,1").valid);
        assert!(!validate_amount("RSD3596,133").valid);
        assert!(!validate_amount("RSD").valid);
        assert!(!validate_amount("rsd100").valid);
    }

    #[test]
    fn test_reference_model_zero_zero_rejected() {
        assert!(!validate_reference_number("001").valid);
        assert!(validate_reference_number("011").valid);
        assert!(validate_reference_number("971").valid);
    }

    #[test]
    fn test_validator_for_unregulated_field() {
        assert!(validator_for(FieldId::K).is_none());
        assert!(validator_for(FieldId::RO).is_some());
    }

    #[test]
    fn test_validate_form_empty_reports_format_and_required() {
        let errors = validate_form(&FormValues::new());

        let format: Vec<_> = errors
            .iter()
            .filter(|e| e.kind == FieldErrorKind::Format)
            .map(|e| e.field)
            .collect();
        let required: Vec<_> = errors
            .iter()
            .filter(|e| e.kind == FieldErrorKind::Required)
            .map(|e| e.field)
            .collect();

        assert_eq!(format, vec![FieldId::R, FieldId::I, FieldId::SF]);
        assert_eq!(required, FieldId::REQUIRED.to_vec());
    }

    #[test]
    fn test_validate_form_skips_empty_reference() {
        let values = FormValues::new()
            .with(FieldId::K, "PR")
            .with(FieldId::V, "01")
            .with(FieldId::C, "1")
            .with(FieldId::R, "845000000040484987")
            .with(FieldId::N, "JP EPS BEOGRAD")
            .with(FieldId::I, "RSD3596,13")
            .with(FieldId::SF, "189");

        assert!(validate_form(&values).is_empty());

        let errors = validate_form(&values.with(FieldId::RO, "97abc"));
        assert_eq!(errors, vec![FieldError::format(FieldId::RO, REFERENCE_NUMBER_MESSAGE)]);
    }

    #[test]
    fn test_validate_form_whitespace_required_field() {
        let values = FormValues::new()
            .with(FieldId::K, "  ")
            .with(FieldId::V, "01")
            .with(FieldId::C, "1")
            .with(FieldId::R, "845000000040484987")
            .with(FieldId::N, "\t")
            .with(FieldId::I, "RSD1")
            .with(FieldId::SF, "1");

        let errors = validate_form(&values);
        assert_eq!(
            errors,
            vec![FieldError::required(FieldId::K), FieldError::required(FieldId::N)]
        );
    }
}
