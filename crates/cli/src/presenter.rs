//! Terminal presentation adapter.
//!
//! Keeps a view model of every rendered table (the on-screen copy of each
//! invoice) and updates it only from presenter notifications, never by
//! reading the store.

use std::fmt;
use std::io::Write;

use scancheck_core::InvoiceId;
use scancheck_invoicing::{Highlight, Invoice, ItemUpdate, Presenter};

/// One rendered table row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    pub ean: String,
    pub quantity: u64,
    pub actual_quantity: u64,
    pub highlight: Highlight,
}

/// One rendered invoice table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableView {
    pub invoice_id: InvoiceId,
    pub rows: Vec<RowView>,
}

impl TableView {
    fn from_invoice(invoice: &Invoice) -> Self {
        Self {
            invoice_id: invoice.id_typed().clone(),
            rows: invoice
                .items()
                .iter()
                .map(|item| RowView {
                    ean: item.ean.clone(),
                    quantity: item.expected_quantity,
                    actual_quantity: item.fulfilled_quantity,
                    highlight: Highlight::None,
                })
                .collect(),
        }
    }
}

/// Renders invoice tables and scan feedback as text.
#[derive(Debug)]
pub struct TerminalPresenter<W: Write> {
    out: W,
    tables: Vec<TableView>,
    focus: Option<(InvoiceId, usize)>,
    alerts: usize,
}

impl<W: Write> TerminalPresenter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            tables: Vec::new(),
            focus: None,
            alerts: 0,
        }
    }

    /// Tables in load order.
    pub fn tables(&self) -> &[TableView] {
        &self.tables
    }

    pub fn table(&self, id: &InvoiceId) -> Option<&TableView> {
        self.tables.iter().find(|t| &t.invoice_id == id)
    }

    /// Row most recently scrolled into view.
    pub fn focus(&self) -> Option<(&InvoiceId, usize)> {
        self.focus.as_ref().map(|(id, pos)| (id, *pos))
    }

    pub fn alert_count(&self) -> usize {
        self.alerts
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    /// Print an informational line.
    pub fn notice(&mut self, message: &str) {
        self.emit(format_args!("{message}\n"));
    }

    /// Render every table, newest first.
    pub fn render_all(&mut self) {
        if self.tables.is_empty() {
            self.notice("No invoices loaded.");
            return;
        }
        let text: String = self
            .tables
            .iter()
            .rev()
            .map(|table| render_table(table, self.focus.as_ref()))
            .collect::<Vec<_>>()
            .join("\n");
        self.emit(format_args!("{text}"));
    }

    fn emit(&mut self, args: fmt::Arguments<'_>) {
        if let Err(err) = self.out.write_fmt(args).and_then(|()| self.out.flush()) {
            tracing::warn!(error = %err, "failed to write to terminal");
        }
    }
}

impl<W: Write> Presenter for TerminalPresenter<W> {
    fn invoice_loaded(&mut self, invoice: &Invoice) {
        let table = TableView::from_invoice(invoice);
        let text = render_table(&table, None);
        self.tables.push(table);
        self.emit(format_args!("{text}"));
    }

    fn update_item(&mut self, update: &ItemUpdate) {
        let Some(row) = self
            .tables
            .iter_mut()
            .find(|t| t.invoice_id == update.invoice_id)
            .and_then(|t| t.rows.get_mut(update.position))
        else {
            tracing::warn!(
                invoice = %update.invoice_id,
                position = update.position,
                "update for a row that was never rendered"
            );
            return;
        };

        row.actual_quantity = update.fulfilled_quantity;
        if update.highlight() != Highlight::None {
            row.highlight = update.highlight();
        }
        let line = format!(
            "{} №{}: {} {}/{}{}",
            update.invoice_id,
            update.position + 1,
            row.ean,
            row.actual_quantity,
            row.quantity,
            class_suffix(row.highlight),
        );
        self.emit(format_args!("{line}\n"));
    }

    fn scroll_to(&mut self, invoice_id: &InvoiceId, position: usize) {
        self.focus = Some((invoice_id.clone(), position));
    }

    fn alert(&mut self, message: &str) {
        self.alerts += 1;
        tracing::warn!(alert = message, "operator alert");
        self.emit(format_args!("ALERT: {message}\n"));
    }
}

fn class_suffix(highlight: Highlight) -> String {
    highlight
        .class_name()
        .map(|class| format!("  [{class}]"))
        .unwrap_or_default()
}

fn render_table(table: &TableView, focus: Option<&(InvoiceId, usize)>) -> String {
    let mut text = format!(
        "Invoice: {}\n  {:>3}  {:<13}  {:>8}  {:>15}\n",
        table.invoice_id, "№", "EAN", "Quantity", "Actual quantity"
    );
    for (position, row) in table.rows.iter().enumerate() {
        let marker = match focus {
            Some((id, pos)) if id == &table.invoice_id && *pos == position => '>',
            _ => ' ',
        };
        text.push_str(&format!(
            "{marker} {:>3}  {:<13}  {:>8}  {:>15}{}\n",
            position + 1,
            row.ean,
            row.quantity,
            row.actual_quantity,
            class_suffix(row.highlight),
        ));
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use scancheck_invoicing::FillKind;

    fn invoice() -> Invoice {
        Invoice::new(
            InvoiceId::new("123"),
            [("1111111111111", 1), ("2222222222222", 2)],
        )
    }

    fn update(position: usize, fulfilled: u64, kind: FillKind) -> ItemUpdate {
        ItemUpdate {
            invoice_id: InvoiceId::new("123"),
            position,
            allocated: fulfilled,
            fulfilled_quantity: fulfilled,
            kind,
        }
    }

    fn text(presenter: &TerminalPresenter<Vec<u8>>) -> String {
        String::from_utf8(presenter.output().clone()).unwrap()
    }

    #[test]
    fn loading_renders_a_table_with_every_row() {
        let mut presenter = TerminalPresenter::new(Vec::new());
        presenter.invoice_loaded(&invoice());

        let out = text(&presenter);
        assert!(out.starts_with("Invoice: 123\n"));
        assert!(out.contains("1111111111111"));
        assert!(out.contains("2222222222222"));
        assert_eq!(presenter.tables()[0].rows.len(), 2);
    }

    #[test]
    fn updates_change_only_the_addressed_row() {
        let mut presenter = TerminalPresenter::new(Vec::new());
        presenter.invoice_loaded(&invoice());

        presenter.update_item(&update(0, 1, FillKind::Complete));

        let table = presenter.table(&InvoiceId::new("123")).unwrap();
        assert_eq!(table.rows[0].actual_quantity, 1);
        assert_eq!(table.rows[0].highlight, Highlight::Green);
        assert_eq!(table.rows[1].actual_quantity, 0);
        assert_eq!(table.rows[1].highlight, Highlight::None);
        assert!(text(&presenter).contains("123 №1: 1111111111111 1/1  [highlight-green]"));
    }

    #[test]
    fn partial_update_keeps_existing_highlight_and_excess_turns_red() {
        let mut presenter = TerminalPresenter::new(Vec::new());
        presenter.invoice_loaded(&invoice());

        presenter.update_item(&update(1, 2, FillKind::Complete));
        presenter.update_item(&update(1, 2, FillKind::Partial));
        assert_eq!(presenter.tables()[0].rows[1].highlight, Highlight::Green);

        presenter.update_item(&update(1, 4, FillKind::Excess));
        assert_eq!(presenter.tables()[0].rows[1].highlight, Highlight::Red);
    }

    #[test]
    fn scroll_marks_focused_row_when_rendering() {
        let mut presenter = TerminalPresenter::new(Vec::new());
        presenter.invoice_loaded(&invoice());
        presenter.scroll_to(&InvoiceId::new("123"), 1);

        presenter.render_all();

        assert_eq!(presenter.focus(), Some((&InvoiceId::new("123"), 1)));
        let out = text(&presenter);
        let focused: Vec<_> = out.lines().filter(|l| l.starts_with('>')).collect();
        assert_eq!(focused.len(), 1);
        assert!(focused[0].contains("2222222222222"));
    }

    #[test]
    fn newest_table_is_rendered_first() {
        let mut presenter = TerminalPresenter::new(Vec::new());
        presenter.invoice_loaded(&invoice());
        presenter.invoice_loaded(&Invoice::new(InvoiceId::new("456"), [("3333333333333", 1)]));
        let before = presenter.output().len();

        presenter.render_all();

        let out = text(&presenter);
        let rendered = &out[before..];
        let first = rendered.find("Invoice: 456").unwrap();
        let second = rendered.find("Invoice: 123").unwrap();
        assert!(first < second);
    }

    #[test]
    fn alerts_are_counted_and_printed() {
        let mut presenter = TerminalPresenter::new(Vec::new());
        presenter.alert("Error! Bad quantity format.");

        assert_eq!(presenter.alert_count(), 1);
        assert_eq!(text(&presenter), "ALERT: Error! Bad quantity format.\n");
    }
}
