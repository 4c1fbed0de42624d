use serde::{Deserialize, Serialize};

use scancheck_core::InvoiceId;

/// Reconciliation state of a single line item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineStatus {
    /// Nothing scanned yet.
    Pending,
    /// Some, but not all, of the expected quantity has been scanned.
    Partial,
    /// Scanned quantity equals the expected quantity.
    Complete,
    /// More was scanned than expected.
    Over,
}

/// One row of an invoice: an expected quantity for an EAN.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Barcode as read from the source file (kept as text for leading zeros).
    pub ean: String,
    pub expected_quantity: u64,
    pub fulfilled_quantity: u64,
    /// 0-based position within the owning invoice.
    pub position: usize,
}

impl LineItem {
    /// A fresh line with nothing fulfilled.
    pub fn new(position: usize, ean: impl Into<String>, expected_quantity: u64) -> Self {
        Self {
            ean: ean.into(),
            expected_quantity,
            fulfilled_quantity: 0,
            position,
        }
    }

    /// Quantity this line can still absorb before it is complete.
    ///
    /// Zero for complete and over-filled lines.
    pub fn capacity(&self) -> u64 {
        self.expected_quantity.saturating_sub(self.fulfilled_quantity)
    }

    pub fn status(&self) -> LineStatus {
        use core::cmp::Ordering;

        match self.fulfilled_quantity.cmp(&self.expected_quantity) {
            Ordering::Greater => LineStatus::Over,
            Ordering::Equal => LineStatus::Complete,
            Ordering::Less if self.fulfilled_quantity == 0 => LineStatus::Pending,
            Ordering::Less => LineStatus::Partial,
        }
    }
}

/// An invoice loaded from one source file.
///
/// Line order is the row order of the source and never changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invoice {
    id: InvoiceId,
    items: Vec<LineItem>,
}

impl Invoice {
    /// Build an invoice from `(ean, expected_quantity)` rows in source order.
    pub fn new<I, S>(id: InvoiceId, rows: I) -> Self
    where
        I: IntoIterator<Item = (S, u64)>,
        S: Into<String>,
    {
        let items = rows
            .into_iter()
            .enumerate()
            .map(|(position, (ean, quantity))| LineItem::new(position, ean, quantity))
            .collect();
        Self { id, items }
    }

    pub fn id_typed(&self) -> &InvoiceId {
        &self.id
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Identifier alongside mutable lines, for in-place allocation.
    pub(crate) fn parts_mut(&mut self) -> (&InvoiceId, &mut [LineItem]) {
        (&self.id, &mut self.items)
    }
}
