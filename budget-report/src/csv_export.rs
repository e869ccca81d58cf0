//! Filtered ledger export: the source file's columns, no index.

use budget_core::{Period, Record, Schema};
use tracing::info;

use crate::error::ReportError;

pub const CSV_MIME: &str = "text/csv";

/// `filtered_data_<period>.csv`
pub fn filtered_csv_file_name(period: Period) -> String {
    format!("filtered_data_{period}.csv")
}

/// Serialize records as UTF-8 CSV under the schema's header.
pub fn export_csv(schema: &Schema, records: &[Record]) -> Result<Vec<u8>, ReportError> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record(schema.headers())?;
    for r in records {
        wtr.write_record(schema.cells(r))?;
    }
    let bytes = wtr
        .into_inner()
        .map_err(|e| ReportError::Io(e.into_error()))?;
    info!(rows = records.len(), bytes = bytes.len(), "exported csv");
    Ok(bytes)
}
