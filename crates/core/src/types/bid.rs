//! Bid drafts and their per-field error record.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::validation::{ValidationError, accept_price_input};

/// One of the seven fields of a bid.
///
/// Variants are declared in validation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BidField {
    Name,
    Email,
    City,
    DeliveryAddress,
    Price,
    SpecialInstructions,
    PaymentType,
}

impl BidField {
    /// Every field, in the order validation checks them.
    pub const ALL: [Self; 7] = [
        Self::Name,
        Self::Email,
        Self::City,
        Self::DeliveryAddress,
        Self::Price,
        Self::SpecialInstructions,
        Self::PaymentType,
    ];

    /// Name of the field in form posts and in the backend's JSON body.
    #[must_use]
    pub const fn form_name(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::City => "city",
            Self::DeliveryAddress => "delivery_address",
            Self::Price => "price_willing_to_pay",
            Self::SpecialInstructions => "special_instructions",
            Self::PaymentType => "payment_type",
        }
    }

    /// Message shown inline and in the toast when this field fails.
    #[must_use]
    pub const fn error_message(self) -> &'static str {
        match self {
            Self::Name => "Please enter a valid name",
            Self::Email => "Please enter a valid email",
            Self::City => "Please select a city",
            Self::DeliveryAddress => "Please enter a delivery address",
            Self::Price => "Please enter a valid price",
            Self::SpecialInstructions => "Please enter special instructions",
            Self::PaymentType => "Please select a payment type",
        }
    }
}

impl fmt::Display for BidField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.form_name())
    }
}

/// A customer's bid as typed into the form.
///
/// All fields are free text until [`crate::validate`] accepts the draft.
/// Serializes with the field names the create-bid endpoint expects.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BidDraft {
    pub name: String,
    pub email: String,
    pub city: String,
    pub delivery_address: String,
    pub price_willing_to_pay: String,
    pub special_instructions: String,
    pub payment_type: String,
}

impl BidDraft {
    /// Current value of a field.
    #[must_use]
    pub fn get(&self, field: BidField) -> &str {
        match field {
            BidField::Name => &self.name,
            BidField::Email => &self.email,
            BidField::City => &self.city,
            BidField::DeliveryAddress => &self.delivery_address,
            BidField::Price => &self.price_willing_to_pay,
            BidField::SpecialInstructions => &self.special_instructions,
            BidField::PaymentType => &self.payment_type,
        }
    }

    /// Store a new value for a field.
    ///
    /// The price field only takes values that pass the price input guard;
    /// anything else leaves it unchanged. Returns whether the value was
    /// stored.
    pub fn set(&mut self, field: BidField, value: impl Into<String>) -> bool {
        let value = value.into();
        if field == BidField::Price && !accept_price_input(&value) {
            return false;
        }
        *self.slot_mut(field) = value;
        true
    }

    fn slot_mut(&mut self, field: BidField) -> &mut String {
        match field {
            BidField::Name => &mut self.name,
            BidField::Email => &mut self.email,
            BidField::City => &mut self.city,
            BidField::DeliveryAddress => &mut self.delivery_address,
            BidField::Price => &mut self.price_willing_to_pay,
            BidField::SpecialInstructions => &mut self.special_instructions,
            BidField::PaymentType => &mut self.payment_type,
        }
    }
}

/// Inline error messages, one optional slot per [`BidDraft`] field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    pub name: Option<String>,
    pub email: Option<String>,
    pub city: Option<String>,
    pub delivery_address: Option<String>,
    pub price_willing_to_pay: Option<String>,
    pub special_instructions: Option<String>,
    pub payment_type: Option<String>,
}

impl FieldErrors {
    /// The error record for a failed validation: exactly one slot set.
    #[must_use]
    pub fn for_failure(error: &ValidationError) -> Self {
        let mut errors = Self::default();
        errors.set(error.field, error.field.error_message());
        errors
    }

    /// Message for a field, if any.
    #[must_use]
    pub fn get(&self, field: BidField) -> Option<&str> {
        match field {
            BidField::Name => self.name.as_deref(),
            BidField::Email => self.email.as_deref(),
            BidField::City => self.city.as_deref(),
            BidField::DeliveryAddress => self.delivery_address.as_deref(),
            BidField::Price => self.price_willing_to_pay.as_deref(),
            BidField::SpecialInstructions => self.special_instructions.as_deref(),
            BidField::PaymentType => self.payment_type.as_deref(),
        }
    }

    /// Set the message for a field.
    pub fn set(&mut self, field: BidField, message: impl Into<String>) {
        let slot = match field {
            BidField::Name => &mut self.name,
            BidField::Email => &mut self.email,
            BidField::City => &mut self.city,
            BidField::DeliveryAddress => &mut self.delivery_address,
            BidField::Price => &mut self.price_willing_to_pay,
            BidField::SpecialInstructions => &mut self.special_instructions,
            BidField::PaymentType => &mut self.payment_type,
        };
        *slot = Some(message.into());
    }

    /// Clear every message.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// True when no field has a message.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        BidField::ALL.iter().all(|field| self.get(*field).is_none())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_wire_names() {
        let draft = BidDraft {
            name: "Ada Obi".to_string(),
            price_willing_to_pay: "25".to_string(),
            payment_type: "PayPal".to_string(),
            ..BidDraft::default()
        };

        let json = serde_json::to_value(&draft).unwrap();
        for field in BidField::ALL {
            assert!(json.get(field.form_name()).is_some(), "missing {field}");
        }
        assert_eq!(json["price_willing_to_pay"], "25");
    }

    #[test]
    fn test_set_and_get_every_field() {
        let mut draft = BidDraft::default();
        for field in BidField::ALL {
            assert!(draft.set(field, "1"));
            assert_eq!(draft.get(field), "1");
        }
    }

    #[test]
    fn test_set_price_applies_input_guard() {
        let mut draft = BidDraft::default();
        assert!(draft.set(BidField::Price, "12.5"));
        assert!(!draft.set(BidField::Price, "12.5a"));
        assert_eq!(draft.price_willing_to_pay, "12.5");

        // Clearing is always allowed
        assert!(draft.set(BidField::Price, ""));
        assert_eq!(draft.price_willing_to_pay, "");
    }

    #[test]
    fn test_field_errors_for_failure_sets_one_slot() {
        let errors = FieldErrors::for_failure(&ValidationError {
            field: BidField::City,
        });

        assert_eq!(errors.city.as_deref(), Some("Please select a city"));
        let set: Vec<_> = BidField::ALL
            .into_iter()
            .filter(|f| errors.get(*f).is_some())
            .collect();
        assert_eq!(set, vec![BidField::City]);
    }

    #[test]
    fn test_field_errors_clear() {
        let mut errors = FieldErrors::default();
        assert!(errors.is_empty());
        errors.set(BidField::Email, "bad");
        assert!(!errors.is_empty());
        errors.clear();
        assert!(errors.is_empty());
    }
}
