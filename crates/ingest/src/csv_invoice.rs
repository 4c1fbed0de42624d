//! CSV invoice parsing.
//!
//! A file is one invoice. The header row must name an `ean` column and a
//! `quantity` column (any case, any position); other columns are ignored.
//! Fulfilled quantities always start at zero whatever the file says.

use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};

use scancheck_core::InvoiceId;
use scancheck_invoicing::Invoice;

use crate::error::IngestError;

pub const EAN_COLUMN: &str = "ean";
pub const QUANTITY_COLUMN: &str = "quantity";

/// Parse CSV `data` read from `path` into an invoice named `id`.
///
/// Blank rows are skipped. Codes are taken verbatim (trimmed); only the
/// quantity must parse, as an unsigned integer.
pub fn parse_invoice<R: Read>(id: InvoiceId, path: &Path, data: R) -> Result<Invoice, IngestError> {
    let csv_err = |source| IngestError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(data);

    let headers = reader.headers().map_err(csv_err)?.clone();
    let ean_idx = column_index(&headers, EAN_COLUMN).ok_or_else(|| IngestError::MissingColumn {
        path: path.to_path_buf(),
        column: EAN_COLUMN,
    })?;
    let qty_idx =
        column_index(&headers, QUANTITY_COLUMN).ok_or_else(|| IngestError::MissingColumn {
            path: path.to_path_buf(),
            column: QUANTITY_COLUMN,
        })?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(csv_err)?;
        if record.iter().all(str::is_empty) {
            continue;
        }

        let line = record.position().map_or(0, |p| p.line());
        let ean = record.get(ean_idx).unwrap_or_default();
        let raw_qty = record.get(qty_idx).unwrap_or_default();
        let quantity = raw_qty
            .parse::<u64>()
            .map_err(|_| IngestError::InvalidQuantity {
                path: path.to_path_buf(),
                line,
                value: raw_qty.to_string(),
            })?;

        rows.push((ean.to_string(), quantity));
    }

    tracing::debug!(invoice = %id, rows = rows.len(), "parsed invoice file");
    Ok(Invoice::new(id, rows))
}

fn column_index(headers: &StringRecord, name: &str) -> Option<usize> {
    headers
        .iter()
        .position(|h| h.trim_start_matches('\u{feff}').eq_ignore_ascii_case(name))
}
