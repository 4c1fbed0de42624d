//! Interactive scan session.
//!
//! The session owns the invoice store and the two input fields (scan and
//! quantity). Every submitted scan runs to completion before the next one is
//! read, so the store needs no locking.

use std::io::Write;
use std::path::PathBuf;

use scancheck_core::{DomainError, DomainResult};
use scancheck_ingest::{load_invoices, write_report};
use scancheck_invoicing::{Allocation, Invoice, InvoiceStore, Presenter, allocate, publish, validate};

use crate::presenter::TerminalPresenter;

/// Outcome of loading a batch of files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadSummary {
    pub loaded: usize,
    pub rejected: usize,
}

#[derive(Debug)]
pub struct ScanSession<W: Write> {
    store: InvoiceStore,
    presenter: TerminalPresenter<W>,
    scan_field: String,
    quantity_field: String,
}

impl<W: Write> ScanSession<W> {
    pub fn new(presenter: TerminalPresenter<W>, default_quantity: u64) -> Self {
        Self {
            store: InvoiceStore::new(),
            presenter,
            scan_field: String::new(),
            quantity_field: default_quantity.to_string(),
        }
    }

    pub fn store(&self) -> &InvoiceStore {
        &self.store
    }

    pub fn presenter(&self) -> &TerminalPresenter<W> {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut TerminalPresenter<W> {
        &mut self.presenter
    }

    pub fn scan_field(&self) -> &str {
        &self.scan_field
    }

    pub fn quantity_field(&self) -> &str {
        &self.quantity_field
    }

    pub fn set_scan_field(&mut self, value: impl Into<String>) {
        self.scan_field = value.into();
    }

    pub fn set_quantity_field(&mut self, value: impl Into<String>) {
        self.quantity_field = value.into();
    }

    /// Fill the fields from a scanner line and submit.
    pub fn scan(&mut self, code: &str, quantity: Option<&str>) -> DomainResult<Allocation> {
        self.set_scan_field(code);
        if let Some(quantity) = quantity {
            self.set_quantity_field(quantity);
        }
        self.submit()
    }

    /// Process the current field contents (the Enter key).
    ///
    /// A validation failure alerts and leaves both fields as they are. Once
    /// validation passes the scan field is cleared, whether or not the code
    /// matches a line.
    pub fn submit(&mut self) -> DomainResult<Allocation> {
        let result = validate(&self.scan_field, &self.quantity_field)
            .and_then(|scan| allocate(&mut self.store, &scan.ean, scan.quantity));

        match result {
            Ok(allocation) => {
                self.scan_field.clear();
                publish(&mut self.presenter, &allocation);
                tracing::info!(
                    ean = %allocation.ean,
                    quantity = allocation.requested,
                    updates = allocation.updates.len(),
                    excess = allocation.excess,
                    "scan allocated"
                );
                Ok(allocation)
            }
            Err(err) => {
                if !err.is_validation() {
                    self.scan_field.clear();
                }
                Err(self.reject(err))
            }
        }
    }

    /// Append one parsed invoice and render it.
    pub fn add_invoice(&mut self, invoice: Invoice) -> DomainResult<()> {
        let id = invoice.id_typed().clone();
        match self.store.append(invoice) {
            Ok(()) => {
                if let Some(invoice) = self.store.get(&id) {
                    self.presenter.invoice_loaded(invoice);
                }
                Ok(())
            }
            Err(err) => Err(self.reject(err)),
        }
    }

    /// Load files concurrently and append each invoice as it completes.
    pub async fn load_files<I, P>(&mut self, paths: I) -> LoadSummary
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let mut summary = LoadSummary::default();
        for result in load_invoices(paths).await {
            match result {
                Ok(invoice) => match self.add_invoice(invoice) {
                    Ok(()) => summary.loaded += 1,
                    Err(_) => summary.rejected += 1,
                },
                Err(err) => {
                    self.presenter.alert(&format!("Error! {err}"));
                    summary.rejected += 1;
                }
            }
        }
        summary
    }

    /// Write the reconciliation report and tell the operator where it went.
    pub fn export(&mut self, path: &std::path::Path) {
        match write_report(&self.store, path) {
            Ok(rows) => self
                .presenter
                .notice(&format!("Exported {rows} lines to {}", path.display())),
            Err(err) => self.presenter.alert(&format!("Error! {err}")),
        }
    }

    /// One-line progress summary.
    pub fn status_line(&self) -> String {
        let totals = self.store.totals();
        format!(
            "{} invoice(s), {}/{} lines complete, {}/{} units scanned",
            totals.invoices,
            totals.complete_lines,
            totals.lines,
            totals.fulfilled_quantity,
            totals.expected_quantity
        )
    }

    fn reject(&mut self, err: DomainError) -> DomainError {
        self.presenter.alert(&err.alert_message());
        err
    }
}
