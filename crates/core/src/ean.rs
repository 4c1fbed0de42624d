//! EAN-13 barcode value object.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Number of characters in an EAN-13 code, counted in UTF-16 code units.
pub const EAN_LENGTH: usize = 13;

/// A scanned EAN-13 code.
///
/// Kept as text so leading zeros survive. Only the shape is checked (13
/// decimal digits); the check digit is not verified.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Ean(String);

impl Ean {
    /// Parse a scanned code, checking length before content.
    pub fn parse(code: &str) -> Result<Self, DomainError> {
        if code.encode_utf16().count() != EAN_LENGTH {
            return Err(DomainError::InvalidCodeLength);
        }
        if !code.bytes().all(|b| b.is_ascii_digit()) {
            return Err(DomainError::InvalidCodeFormat);
        }
        Ok(Self(code.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Ean {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Ean {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Ean> for String {
    fn from(value: Ean) -> Self {
        value.0
    }
}

impl core::fmt::Display for Ean {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}
