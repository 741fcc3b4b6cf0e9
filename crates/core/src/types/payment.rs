//! Payment types offered on the bid form.

use core::fmt;

/// How the customer intends to pay the runner.
///
/// Bids carry the human-readable label (e.g. `"Credit Card"`) on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaymentType {
    CreditCard,
    DebitCard,
    PayPal,
}

impl PaymentType {
    /// Every payment type, in the order the form lists them.
    pub const ALL: [Self; 3] = [Self::CreditCard, Self::DebitCard, Self::PayPal];

    /// The label shown on the form and submitted to the backend.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::CreditCard => "Credit Card",
            Self::DebitCard => "Debit Card",
            Self::PayPal => "PayPal",
        }
    }

    /// Look up a payment type by its exact label.
    #[must_use]
    pub fn parse(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.label() == label)
    }
}

impl fmt::Display for PaymentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
