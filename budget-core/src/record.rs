//! Ledger record type

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::period::Period;

/// A single cleaned transaction entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Record {
    /// Date of the transaction (YYYY-MM-DD)
    pub date: NaiveDate,
    /// Normalized category label (trimmed, lowercase). `None` when the cell
    /// was blank; such rows count toward totals but not toward any category.
    pub category: Option<String>,
    /// Positive = income, negative = expense
    pub amount: f64,
    /// Cells of the file's other columns, in `Schema` order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extra: Vec<String>,
}

impl Record {
    /// Create a new Record, normalizing the category label.
    pub fn new(date: NaiveDate, category: &str, amount: f64) -> Self {
        Self {
            date,
            category: normalize_category(category),
            amount,
            extra: Vec::new(),
        }
    }

    pub fn with_extra(mut self, extra: Vec<String>) -> Self {
        self.extra = extra;
        self
    }

    /// The month this record belongs to.
    pub fn period(&self) -> Period {
        Period::from_date(self.date)
    }

    /// Category text, empty when the row had none.
    pub fn category_label(&self) -> &str {
        self.category.as_deref().unwrap_or("")
    }

    /// Returns true if this is an expense (negative amount)
    pub fn is_expense(&self) -> bool {
        self.amount < 0.0
    }

    /// Returns true if this is income (positive amount)
    pub fn is_income(&self) -> bool {
        self.amount > 0.0
    }

    pub fn abs_amount(&self) -> f64 {
        self.amount.abs()
    }
}

/// Trim and lowercase a free-text category so equivalent labels group together.
///
/// Blank text has no category at all.
pub fn normalize_category(raw: &str) -> Option<String> {
    let label = raw.trim().to_lowercase();
    if label.is_empty() { None } else { Some(label) }
}
