//! In-memory invoice store.

use serde::Serialize;

use scancheck_core::{DomainError, DomainResult, InvoiceId};

use crate::invoice::{Invoice, LineItem, LineStatus};

/// Position of a line item inside the store: (invoice index, item index).
pub(crate) type Slot = (usize, usize);

/// Aggregate counts over every loaded line.
///
/// Quantity sums saturate at `u64::MAX`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StoreTotals {
    pub invoices: usize,
    pub lines: usize,
    pub complete_lines: usize,
    pub expected_quantity: u64,
    pub fulfilled_quantity: u64,
}

/// Ordered, append-only collection of invoices.
///
/// Insertion order is load order. Invoices are never removed or reordered;
/// the only mutation after append is the allocation engine updating
/// fulfilled quantities.
#[derive(Debug, Default)]
pub struct InvoiceStore {
    invoices: Vec<Invoice>,
}

impl InvoiceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an invoice, rejecting identifiers that are already loaded.
    pub fn append(&mut self, invoice: Invoice) -> DomainResult<()> {
        if self.get(invoice.id_typed()).is_some() {
            return Err(DomainError::duplicate_invoice(invoice.id_typed().clone()));
        }
        tracing::info!(
            invoice = %invoice.id_typed(),
            lines = invoice.items().len(),
            "invoice loaded"
        );
        self.invoices.push(invoice);
        Ok(())
    }

    /// All invoices in store order.
    pub fn invoices(&self) -> &[Invoice] {
        &self.invoices
    }

    pub fn get(&self, id: &InvoiceId) -> Option<&Invoice> {
        self.invoices.iter().find(|invoice| invoice.id_typed() == id)
    }

    pub fn len(&self) -> usize {
        self.invoices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.invoices.is_empty()
    }

    /// Every line carrying `ean`, across all invoices, in store order then
    /// row order.
    pub fn find_items_by_ean(&self, ean: &str) -> Vec<(&InvoiceId, &LineItem)> {
        self.slots_for(ean)
            .into_iter()
            .map(|(inv, item)| {
                let invoice = &self.invoices[inv];
                (invoice.id_typed(), &invoice.items()[item])
            })
            .collect()
    }

    pub fn totals(&self) -> StoreTotals {
        self.invoices
            .iter()
            .flat_map(|invoice| invoice.items())
            .fold(
                StoreTotals {
                    invoices: self.invoices.len(),
                    ..StoreTotals::default()
                },
                |mut acc, item| {
                    acc.lines += 1;
                    if item.status() == LineStatus::Complete {
                        acc.complete_lines += 1;
                    }
                    acc.expected_quantity =
                        acc.expected_quantity.saturating_add(item.expected_quantity);
                    acc.fulfilled_quantity =
                        acc.fulfilled_quantity.saturating_add(item.fulfilled_quantity);
                    acc
                },
            )
    }

    pub(crate) fn slots_for(&self, ean: &str) -> Vec<Slot> {
        self.invoices
            .iter()
            .enumerate()
            .flat_map(|(inv, invoice)| {
                invoice
                    .items()
                    .iter()
                    .enumerate()
                    .filter(move |(_, item)| item.ean == ean)
                    .map(move |(item, _)| (inv, item))
            })
            .collect()
    }

    pub(crate) fn slot(&self, (inv, item): Slot) -> &LineItem {
        &self.invoices[inv].items()[item]
    }

    pub(crate) fn slot_mut(&mut self, (inv, item): Slot) -> (&InvoiceId, &mut LineItem) {
        let (id, items) = self.invoices[inv].parts_mut();
        (id, &mut items[item])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn invoice(id: &str, rows: &[(&str, u64)]) -> Invoice {
        Invoice::new(InvoiceId::new(id), rows.iter().copied())
    }

    #[test]
    fn append_keeps_load_order() {
        let mut store = InvoiceStore::new();
        store.append(invoice("b.csv", &[])).unwrap();
        store.append(invoice("a.csv", &[])).unwrap();

        let ids: Vec<_> = store.invoices().iter().map(|i| i.id_typed().as_str()).collect();
        assert_eq!(ids, vec!["b.csv", "a.csv"]);
    }

    #[test]
    fn append_rejects_duplicate_identifier() {
        let mut store = InvoiceStore::new();
        store.append(invoice("a.csv", &[("1111111111111", 1)])).unwrap();

        let err = store.append(invoice("a.csv", &[("2222222222222", 5)])).unwrap_err();
        assert_eq!(err, DomainError::duplicate_invoice(InvoiceId::new("a.csv")));
        assert_eq!(store.len(), 1);
        assert_eq!(store.invoices()[0].items()[0].ean, "1111111111111");
    }

    #[test]
    fn find_items_by_ean_walks_store_then_row_order() {
        let mut store = InvoiceStore::new();
        store
            .append(invoice("a.csv", &[("1111111111111", 1), ("2222222222222", 2), ("1111111111111", 3)]))
            .unwrap();
        store.append(invoice("b.csv", &[("1111111111111", 4)])).unwrap();

        let found: Vec<_> = store
            .find_items_by_ean("1111111111111")
            .into_iter()
            .map(|(id, item)| (id.as_str(), item.position, item.expected_quantity))
            .collect();
        assert_eq!(found, vec![("a.csv", 0, 1), ("a.csv", 2, 3), ("b.csv", 0, 4)]);
        assert!(store.find_items_by_ean("9999999999999").is_empty());
    }

    #[test]
    fn totals_sum_every_line() {
        let mut store = InvoiceStore::new();
        store
            .append(invoice("a.csv", &[("1111111111111", 1), ("2222222222222", 0)]))
            .unwrap();
        store.append(invoice("b.csv", &[("3333333333333", 4)])).unwrap();

        let totals = store.totals();
        assert_eq!(totals.invoices, 2);
        assert_eq!(totals.lines, 3);
        assert_eq!(totals.complete_lines, 1);
        assert_eq!(totals.expected_quantity, 5);
        assert_eq!(totals.fulfilled_quantity, 0);
    }

    #[test]
    fn totals_saturate_instead_of_overflowing() {
        let mut store = InvoiceStore::new();
        store
            .append(invoice("a.csv", &[("1111111111111", u64::MAX), ("2222222222222", 5)]))
            .unwrap();
        let (_, item) = store.slot_mut((0, 0));
        item.fulfilled_quantity = u64::MAX;
        let (_, item) = store.slot_mut((0, 1));
        item.fulfilled_quantity = 1;

        let totals = store.totals();
        assert_eq!(totals.expected_quantity, u64::MAX);
        assert_eq!(totals.fulfilled_quantity, u64::MAX);
        assert_eq!(totals.complete_lines, 1);
    }
}
