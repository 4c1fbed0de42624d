//! Presentation port.
//!
//! The allocation engine never talks to a UI directly. It returns an
//! [`Allocation`] and [`publish`] replays the updates into whatever
//! [`Presenter`] the caller plugged in.

use scancheck_core::InvoiceId;

use crate::allocation::{Allocation, ItemUpdate};
use crate::invoice::Invoice;

/// Receives model changes to reflect on screen. Never mutates the model.
pub trait Presenter {
    /// A new invoice was appended to the store.
    fn invoice_loaded(&mut self, invoice: &Invoice);

    /// A line item's fulfilled quantity (and possibly highlight) changed.
    fn update_item(&mut self, update: &ItemUpdate);

    /// Bring a row into view.
    fn scroll_to(&mut self, invoice_id: &InvoiceId, position: usize);

    /// Show a blocking notification to the operator.
    fn alert(&mut self, message: &str);
}

/// Forward every update of `allocation` to `presenter`, in order, each
/// followed by a scroll to the touched row.
pub fn publish<P: Presenter + ?Sized>(presenter: &mut P, allocation: &Allocation) {
    for update in &allocation.updates {
        presenter.update_item(update);
        presenter.scroll_to(&update.invoice_id, update.position);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::allocation::allocate;
    use crate::store::InvoiceStore;
    use scancheck_core::Ean;

    #[derive(Default)]
    struct Recorder {
        calls: Vec<String>,
    }

    impl Presenter for Recorder {
        fn invoice_loaded(&mut self, invoice: &Invoice) {
            self.calls.push(format!("load {}", invoice.id_typed()));
        }

        fn update_item(&mut self, update: &ItemUpdate) {
            self.calls.push(format!(
                "update {}#{}={}",
                update.invoice_id, update.position, update.fulfilled_quantity
            ));
        }

        fn scroll_to(&mut self, invoice_id: &InvoiceId, position: usize) {
            self.calls.push(format!("scroll {invoice_id}#{position}"));
        }

        fn alert(&mut self, message: &str) {
            self.calls.push(format!("alert {message}"));
        }
    }

    #[test]
    fn updates_are_published_in_order_with_scrolls() {
        let code = "1111111111111";
        let mut store = InvoiceStore::new();
        store
            .append(Invoice::new(InvoiceId::new("a.csv"), [(code, 1)]))
            .unwrap();
        store
            .append(Invoice::new(InvoiceId::new("b.csv"), [(code, 1)]))
            .unwrap();

        let allocation = allocate(&mut store, &Ean::parse(code).unwrap(), 3).unwrap();
        let mut recorder = Recorder::default();
        publish(&mut recorder, &allocation);

        assert_eq!(
            recorder.calls,
            vec![
                "update a.csv#0=1",
                "scroll a.csv#0",
                "update b.csv#0=1",
                "scroll b.csv#0",
                "update b.csv#0=2",
                "scroll b.csv#0",
            ]
        );
    }
}
