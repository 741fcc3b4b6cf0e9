//! Bid field predicates and draft validation.
//!
//! Validation is sequential and short-circuiting: the first field that fails
//! is the only one reported.

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::types::{BidDraft, BidField, Email, PaymentType};

/// Letters, then letters, spaces, apostrophes, periods or hyphens.
static NAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\p{L}[\p{L} '.\-]{1,49}$").expect("name pattern is a valid regex")
});

/// Whole units (up to seven ASCII digits), optionally a dot and up to two
/// decimals. A trailing dot is allowed so amounts can be typed incrementally.
static PRICE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]{1,7}(\.[0-9]{0,2})?$").expect("price pattern is a valid regex")
});

/// A draft failed validation at `field`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{}", .field.error_message())]
pub struct ValidationError {
    /// The first field that failed.
    pub field: BidField,
}

/// True when `value` is empty or only whitespace.
#[must_use]
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Check a person's name: 2-50 characters after trimming, starting with a
/// letter.
#[must_use]
pub fn is_valid_name(value: &str) -> bool {
    NAME_PATTERN.is_match(value.trim())
}

/// Check an email address (surrounding whitespace ignored).
#[must_use]
pub fn is_valid_email(value: &str) -> bool {
    Email::parse(value.trim()).is_ok()
}

/// Check a price amount such as `"12"`, `"12."` or `"12.50"`.
#[must_use]
pub fn is_valid_price(value: &str) -> bool {
    PRICE_PATTERN.is_match(value)
}

/// Input-time guard for the price field.
///
/// Rejects a keystroke that would leave the field holding an invalid price,
/// except that the empty string is always accepted so the field can be
/// cleared.
#[must_use]
pub fn accept_price_input(proposed: &str) -> bool {
    proposed.is_empty() || is_valid_price(proposed)
}

/// Check a single field of `draft`.
fn field_is_valid(draft: &BidDraft, field: BidField) -> bool {
    let value = draft.get(field);
    match field {
        BidField::Name => is_valid_name(value),
        BidField::Email => is_valid_email(value),
        BidField::City | BidField::DeliveryAddress | BidField::SpecialInstructions => {
            !is_blank(value)
        }
        BidField::Price => !is_blank(value) && is_valid_price(value.trim()),
        BidField::PaymentType => !is_blank(value) && PaymentType::parse(value.trim()).is_some(),
    }
}

/// Validate a draft in field order; the first failure wins.
///
/// # Errors
///
/// Returns the first field that is missing or malformed.
pub fn validate(draft: &BidDraft) -> Result<(), ValidationError> {
    match BidField::ALL
        .into_iter()
        .find(|field| !field_is_valid(draft, *field))
    {
        Some(field) => Err(ValidationError { field }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_draft() -> BidDraft {
        BidDraft {
            name: "Ada Obi".to_string(),
            email: "ada@example.com".to_string(),
            city: "Lagos".to_string(),
            delivery_address: "12 Marina Road".to_string(),
            price_willing_to_pay: "2500.50".to_string(),
            special_instructions: "Call on arrival".to_string(),
            payment_type: "Debit Card".to_string(),
        }
    }

    #[test]
    fn test_valid_draft_passes() {
        assert_eq!(validate(&valid_draft()), Ok(()));
    }

    #[test]
    fn test_each_field_fails_in_isolation() {
        for field in BidField::ALL {
            let mut draft = valid_draft();
            draft.set(field, "");
            assert_eq!(
                validate(&draft),
                Err(ValidationError { field }),
                "blank {field} should fail on {field}"
            );
        }
    }

    #[test]
    fn test_first_failure_wins() {
        let draft = BidDraft {
            email: "nope".to_string(),
            ..BidDraft::default()
        };
        assert_eq!(
            validate(&draft),
            Err(ValidationError {
                field: BidField::Name
            })
        );

        let draft = BidDraft {
            name: "Ada".to_string(),
            email: "nope".to_string(),
            ..BidDraft::default()
        };
        assert_eq!(
            validate(&draft),
            Err(ValidationError {
                field: BidField::Email
            })
        );
    }

    #[test]
    fn test_error_display_is_field_message() {
        let err = ValidationError {
            field: BidField::SpecialInstructions,
        };
        assert_eq!(err.to_string(), "Please enter special instructions");
    }

    #[test]
    fn test_whitespace_only_is_blank() {
        let mut draft = valid_draft();
        draft.delivery_address = "   ".to_string();
        assert_eq!(
            validate(&draft),
            Err(ValidationError {
                field: BidField::DeliveryAddress
            })
        );
    }

    #[test]
    fn test_unknown_payment_type_fails() {
        let mut draft = valid_draft();
        draft.payment_type = "Cash".to_string();
        assert_eq!(
            validate(&draft),
            Err(ValidationError {
                field: BidField::PaymentType
            })
        );
    }

    #[test]
    fn test_malformed_price_fails_on_price() {
        let mut draft = valid_draft();
        draft.price_willing_to_pay = "ten".to_string();
        assert_eq!(
            validate(&draft),
            Err(ValidationError {
                field: BidField::Price
            })
        );
    }

    #[test]
    fn test_is_valid_name() {
        assert!(is_valid_name("Ada"));
        assert!(is_valid_name("Mary-Jane O'Neil"));
        assert!(is_valid_name("José Álvarez"));
        assert!(is_valid_name("  Ada  "));

        assert!(!is_valid_name(""));
        assert!(!is_valid_name("A"));
        assert!(!is_valid_name("R2D2"));
        assert!(!is_valid_name("-Ada"));
        assert!(!is_valid_name(&"a".repeat(51)));
    }

    #[test]
    fn test_is_valid_email() {
        assert!(is_valid_email("ada@example.com"));
        assert!(is_valid_email(" ada@example.com "));
        assert!(!is_valid_email("ada@example"));
        assert!(!is_valid_email("ada"));
    }

    #[test]
    fn test_is_valid_price() {
        assert!(is_valid_price("0"));
        assert!(is_valid_price("12"));
        assert!(is_valid_price("12."));
        assert!(is_valid_price("12.5"));
        assert!(is_valid_price("1234567.99"));

        assert!(!is_valid_price(""));
        assert!(!is_valid_price(".5"));
        assert!(!is_valid_price("12.345"));
        assert!(!is_valid_price("12345678"));
        assert!(!is_valid_price("-5"));
        assert!(!is_valid_price("1e3"));
        assert!(!is_valid_price("١٢"));
    }

    #[test]
    fn test_price_guard_rejects_non_numeric_keystrokes() {
        assert!(accept_price_input("1"));
        assert!(accept_price_input("12.3"));
        assert!(!accept_price_input("12a"));
        assert!(!accept_price_input("$12"));
        assert!(!accept_price_input(" "));
    }

    #[test]
    fn test_price_guard_always_accepts_empty() {
        assert!(accept_price_input(""));
    }
}
