//! Invoicing domain module.
//!
//! Invoice store, scan validation and quantity allocation, implemented as
//! deterministic domain logic (no IO, no terminal, no file access). Rendering
//! is reached only through the [`Presenter`] port.

pub mod allocation;
pub mod invoice;
pub mod presentation;
pub mod store;
pub mod validation;

pub use allocation::{Allocation, FillKind, Highlight, ItemUpdate, allocate};
pub use invoice::{Invoice, LineItem, LineStatus};
pub use presentation::{Presenter, publish};
pub use store::{InvoiceStore, StoreTotals};
pub use validation::{ValidScan, validate};
