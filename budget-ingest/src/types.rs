use budget_core::{Record, Schema};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a CSV row was left out of the record set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RejectReason {
    MissingDate,
    InvalidDate(String),
    MissingAmount,
    InvalidAmount(String),
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::MissingDate => write!(f, "missing date"),
            RejectReason::InvalidDate(raw) => write!(f, "unparseable date '{raw}'"),
            RejectReason::MissingAmount => write!(f, "missing amount"),
            RejectReason::InvalidAmount(raw) => write!(f, "non-numeric amount '{raw}'"),
        }
    }
}

/// A dropped row, with its 1-based line number in the CSV file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectedRow {
    pub line: u64,
    pub reason: RejectReason,
}

/// Output of ingestion: the file's columns, clean records, and the rows that
/// were dropped.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IngestReport {
    pub schema: Schema,
    pub records: Vec<Record>,
    pub rejected: Vec<RejectedRow>,
}

impl IngestReport {
    pub fn rejected_count(&self) -> usize {
        self.rejected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
