//! Ingestion and export adapters: CSV invoice files in, reconciliation
//! reports out.

pub mod csv_invoice;
pub mod error;
pub mod export;
pub mod loader;

pub use csv_invoice::{EAN_COLUMN, QUANTITY_COLUMN, parse_invoice};
pub use error::IngestError;
pub use export::{ReportFormat, ReportRow, report_rows, write_report};
pub use loader::{invoice_id_for, load_invoice, load_invoices};
