//! Scan input validation.
//!
//! Runs before any store lookup. Rules are checked in a fixed order and the
//! first failure wins:
//!
//! 1. the code has exactly 13 characters,
//! 2. the code is all decimal digits,
//! 3. the quantity is numerically at least 1,
//! 4. the quantity is written as plain decimal digits.

use scancheck_core::{DomainError, DomainResult, Ean};

/// A scan that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidScan {
    pub ean: Ean,
    pub quantity: u64,
}

/// Validate the raw scan field and quantity field.
pub fn validate(code: &str, quantity_raw: &str) -> DomainResult<ValidScan> {
    let ean = Ean::parse(code)?;

    if numeric_value(quantity_raw).is_some_and(|value| value < 1.0) {
        return Err(DomainError::NonPositiveQuantity);
    }

    if !quantity_raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DomainError::InvalidQuantityFormat);
    }
    let quantity = quantity_raw
        .parse::<u64>()
        .map_err(|_| DomainError::InvalidQuantityFormat)?;

    Ok(ValidScan { ean, quantity })
}

/// Lenient numeric reading of the quantity field.
///
/// Whitespace is ignored and a blank field reads as zero, so `""`, `"0"`,
/// `"-2"` and `"0.5"` all count as non-positive. Text that is not a number
/// yields `None` and is left for the format rule.
fn numeric_value(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Some(0.0);
    }
    trimmed.parse::<f64>().ok().filter(|value| !value.is_nan())
}

#[cfg(test)]
mod tests {
    use super::*;

    const CODE: &str = "4006381333931";

    #[test]
    fn accepts_thirteen_digits_and_positive_quantity() {
        let scan = validate(CODE, "3").unwrap();
        assert_eq!(scan.ean.as_str(), CODE);
        assert_eq!(scan.quantity, 3);
    }

    #[test]
    fn short_code_fails_on_length() {
        assert_eq!(validate("12345", "1"), Err(DomainError::InvalidCodeLength));
    }

    #[test]
    fn code_rules_win_over_quantity_rules() {
        assert_eq!(validate("12345", "abc"), Err(DomainError::InvalidCodeLength));
        assert_eq!(validate("40063813339x1", "0"), Err(DomainError::InvalidCodeFormat));
    }

    #[test]
    fn non_positive_quantities() {
        for raw in ["0", "", "   ", "-2", "0.5", "-0"] {
            assert_eq!(
                validate(CODE, raw),
                Err(DomainError::NonPositiveQuantity),
                "quantity {raw:?}"
            );
        }
    }

    #[test]
    fn badly_formatted_quantities() {
        for raw in ["abc", "1.5", " 3", "+4", "2e1", "3x"] {
            assert_eq!(
                validate(CODE, raw),
                Err(DomainError::InvalidQuantityFormat),
                "quantity {raw:?}"
            );
        }
    }

    #[test]
    fn quantity_overflow_is_a_format_error() {
        assert_eq!(
            validate(CODE, "99999999999999999999999"),
            Err(DomainError::InvalidQuantityFormat)
        );
    }

    #[test]
    fn leading_zeros_in_quantity_are_allowed() {
        assert_eq!(validate(CODE, "007").unwrap().quantity, 7);
    }
}
