//! Reconciliation report export.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use scancheck_invoicing::{InvoiceStore, LineStatus};

use crate::error::IngestError;

/// One exported line: the state of a line item at export time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRow {
    pub invoice: String,
    /// 1-based row number, as shown on screen.
    pub index: usize,
    pub ean: String,
    pub quantity: u64,
    pub actual_quantity: u64,
    pub status: LineStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Csv,
    Json,
}

impl ReportFormat {
    /// `.json` paths get JSON, everything else CSV.
    pub fn for_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => ReportFormat::Json,
            _ => ReportFormat::Csv,
        }
    }
}

/// Flatten the store into report rows, in store order then row order.
pub fn report_rows(store: &InvoiceStore) -> Vec<ReportRow> {
    store
        .invoices()
        .iter()
        .flat_map(|invoice| {
            invoice.items().iter().map(move |item| ReportRow {
                invoice: invoice.id_typed().to_string(),
                index: item.position + 1,
                ean: item.ean.clone(),
                quantity: item.expected_quantity,
                actual_quantity: item.fulfilled_quantity,
                status: item.status(),
            })
        })
        .collect()
}

/// Write the current state of every line to `path`.
///
/// Returns the number of rows written.
pub fn write_report(store: &InvoiceStore, path: &Path) -> Result<usize, IngestError> {
    let rows = report_rows(store);
    let io_err = |source| IngestError::Io {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(io_err)?;
    let mut out = BufWriter::new(file);

    match ReportFormat::for_path(path) {
        ReportFormat::Json => {
            serde_json::to_writer_pretty(&mut out, &rows).map_err(|source| IngestError::Json {
                path: path.to_path_buf(),
                source,
            })?;
            out.write_all(b"\n").map_err(io_err)?;
        }
        ReportFormat::Csv => {
            let csv_err = |source| IngestError::Csv {
                path: path.to_path_buf(),
                source,
            };
            let mut writer = csv::Writer::from_writer(&mut out);
            for row in &rows {
                writer.serialize(row).map_err(csv_err)?;
            }
            writer.flush().map_err(io_err)?;
        }
    }
    out.flush().map_err(io_err)?;

    tracing::info!(path = %path.display(), rows = rows.len(), "report written");
    Ok(rows.len())
}
