//! Parse a ledger CSV into typed records.
//!
//! Expected header (any order, names matched case-insensitively):
//!   date,category,amount
//! Any other columns are kept verbatim in `Record::extra`.

use budget_core::{AMOUNT_COLUMN, CATEGORY_COLUMN, DATE_COLUMN, Record, Schema};
use std::io::Read;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::dates::parse_date;
use crate::error::IngestError;
use crate::types::{IngestReport, RejectReason, RejectedRow};

fn resolve_schema(record: &csv::StringRecord) -> Result<Schema, IngestError> {
    let headers: Vec<String> = record
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').to_string())
        .collect();
    let find = |name: &str| headers.iter().position(|h| h.trim().eq_ignore_ascii_case(name));

    let date = find(DATE_COLUMN);
    let category = find(CATEGORY_COLUMN);
    let amount = find(AMOUNT_COLUMN);

    let missing: Vec<String> = [
        (DATE_COLUMN, date),
        (CATEGORY_COLUMN, category),
        (AMOUNT_COLUMN, amount),
    ]
    .iter()
    .filter(|(_, idx)| idx.is_none())
    .map(|(name, _)| name.to_string())
    .collect();

    match (date, category, amount) {
        (Some(date), Some(category), Some(amount)) => {
            // distinct names always land on distinct columns
            Schema::new(headers, date, category, amount)
                .ok_or(IngestError::MissingColumns(missing))
        }
        _ => Err(IngestError::MissingColumns(missing)),
    }
}

fn parse_amount(raw: &str) -> Result<f64, RejectReason> {
    let s = raw.trim();
    if s.is_empty() {
        return Err(RejectReason::MissingAmount);
    }
    match s.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(RejectReason::InvalidAmount(s.to_string())),
    }
}

/// Ingest ledger CSV from any reader.
///
/// Rows with a missing/unparseable date or amount are not errors: they are
/// listed in `IngestReport::rejected` and left out of the records.
pub fn ingest_reader<R: Read>(reader: R) -> Result<IngestReport, IngestError> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(true)
        .from_reader(reader);

    let schema = resolve_schema(rdr.headers()?)?;
    let mut report = IngestReport {
        schema,
        ..IngestReport::default()
    };
    let schema = &report.schema;

    for result in rdr.records() {
        let row = result?;
        let line = row.position().map(|p| p.line()).unwrap_or(0);

        let date_raw = row.get(schema.date_column()).unwrap_or("").trim();
        let date = if date_raw.is_empty() {
            Err(RejectReason::MissingDate)
        } else {
            parse_date(date_raw).ok_or_else(|| RejectReason::InvalidDate(date_raw.to_string()))
        };

        let amount = parse_amount(row.get(schema.amount_column()).unwrap_or(""));

        match (date, amount) {
            (Ok(date), Ok(amount)) => {
                let category = row.get(schema.category_column()).unwrap_or("");
                let extra = schema
                    .extra_columns()
                    .map(|i| row.get(i).unwrap_or("").to_string())
                    .collect();
                report
                    .records
                    .push(Record::new(date, category, amount).with_extra(extra));
            }
            (Err(reason), _) | (_, Err(reason)) => {
                debug!(line, %reason, "dropping row");
                report.rejected.push(RejectedRow { line, reason });
            }
        }
    }

    if !report.rejected.is_empty() {
        warn!(
            rejected = report.rejected.len(),
            "dropped rows with unparseable date or amount"
        );
    }
    info!(records = report.records.len(), "ingested ledger");

    Ok(report)
}

pub fn ingest_bytes(bytes: &[u8]) -> Result<IngestReport, IngestError> {
    ingest_reader(bytes)
}

pub fn ingest_path(path: impl AsRef<Path>) -> Result<IngestReport, IngestError> {
    let file = std::fs::File::open(path.as_ref())?;
    ingest_reader(std::io::BufReader::new(file))
}
