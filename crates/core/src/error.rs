//! Domain error model.

use thiserror::Error;

use crate::ean::Ean;
use crate::id::InvoiceId;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Every variant is an operator-facing failure that is recovered locally:
/// the operator sees one alert and the store is left as it was.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The scanned code is not exactly 13 characters long.
    #[error("scanned code must have exactly 13 characters")]
    InvalidCodeLength,

    /// The scanned code contains something other than decimal digits.
    #[error("scanned code must contain decimal digits only")]
    InvalidCodeFormat,

    /// The quantity field evaluates to zero or less.
    #[error("quantity must be greater than zero")]
    NonPositiveQuantity,

    /// The quantity field is not a plain unsigned integer.
    #[error("quantity must be a whole number")]
    InvalidQuantityFormat,

    /// No line item in any loaded invoice carries the scanned code.
    #[error("no line item matches code {ean}")]
    NoMatch { ean: Ean },

    /// The scan would push the last matching line past `u64::MAX`.
    #[error("quantity for code {ean} exceeds what a line can record")]
    QuantityOverflow { ean: Ean },

    /// An invoice with the same identifier is already in the store.
    #[error("invoice {id} is already loaded")]
    DuplicateInvoice { id: InvoiceId },
}

impl DomainError {
    pub fn no_match(ean: Ean) -> Self {
        Self::NoMatch { ean }
    }

    pub fn quantity_overflow(ean: Ean) -> Self {
        Self::QuantityOverflow { ean }
    }

    pub fn duplicate_invoice(id: InvoiceId) -> Self {
        Self::DuplicateInvoice { id }
    }

    /// Fixed operator-facing text shown in the alert for this error kind.
    pub fn alert_message(&self) -> String {
        match self {
            Self::InvalidCodeLength => "Error! EAN-13 code must have 13 digits.".to_string(),
            Self::InvalidCodeFormat => "Error! EAN-13 code must include digits only.".to_string(),
            Self::NonPositiveQuantity => "Error! Quantity must be greater than 0.".to_string(),
            Self::InvalidQuantityFormat => "Error! Bad quantity format.".to_string(),
            Self::NoMatch { ean } => format!("Error! No item with code {ean}"),
            Self::QuantityOverflow { ean } => {
                format!("Error! Quantity too large for item with code {ean}")
            }
            Self::DuplicateInvoice { id } => format!("Error! Invoice {id} is already loaded."),
        }
    }

    /// Whether this error was raised by the input validator (before any store lookup).
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidCodeLength
                | Self::InvalidCodeFormat
                | Self::NonPositiveQuantity
                | Self::InvalidQuantityFormat
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alert_texts_are_fixed_per_kind() {
        assert_eq!(
            DomainError::InvalidCodeLength.alert_message(),
            "Error! EAN-13 code must have 13 digits."
        );
        assert_eq!(
            DomainError::InvalidQuantityFormat.alert_message(),
            "Error! Bad quantity format."
        );

        let ean: Ean = "4006381333931".parse().unwrap();
        assert_eq!(
            DomainError::no_match(ean).alert_message(),
            "Error! No item with code 4006381333931"
        );
        assert_eq!(
            DomainError::duplicate_invoice(InvoiceId::new("march.csv")).alert_message(),
            "Error! Invoice march.csv is already loaded."
        );
    }

    #[test]
    fn only_input_errors_count_as_validation() {
        assert!(DomainError::NonPositiveQuantity.is_validation());
        assert!(!DomainError::duplicate_invoice(InvoiceId::new("a.csv")).is_validation());
        let ean: Ean = "4006381333931".parse().unwrap();
        assert!(!DomainError::no_match(ean.clone()).is_validation());
        assert!(!DomainError::quantity_overflow(ean).is_validation());
    }
}
