//! `scancheck-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod ean;
pub mod error;
pub mod id;

pub use ean::{EAN_LENGTH, Ean};
pub use error::{DomainError, DomainResult};
pub use id::InvoiceId;
