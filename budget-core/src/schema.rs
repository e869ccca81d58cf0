//! Column layout of a ledger file.

use serde::{Deserialize, Serialize};

use crate::record::Record;

pub const DATE_COLUMN: &str = "date";
pub const CATEGORY_COLUMN: &str = "category";
pub const AMOUNT_COLUMN: &str = "amount";

/// The source header in file order, with the positions of the three ledger
/// columns. Every other column rides along in `Record::extra`, in the order
/// it appears here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    headers: Vec<String>,
    date: usize,
    category: usize,
    amount: usize,
}

impl Default for Schema {
    fn default() -> Self {
        Self {
            headers: vec![
                DATE_COLUMN.to_string(),
                CATEGORY_COLUMN.to_string(),
                AMOUNT_COLUMN.to_string(),
            ],
            date: 0,
            category: 1,
            amount: 2,
        }
    }
}

impl Schema {
    /// `None` unless the three positions are distinct and inside `headers`.
    pub fn new(headers: Vec<String>, date: usize, category: usize, amount: usize) -> Option<Self> {
        let n = headers.len();
        let distinct = date != category && date != amount && category != amount;
        if !distinct || date >= n || category >= n || amount >= n {
            return None;
        }
        Some(Self {
            headers,
            date,
            category,
            amount,
        })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn date_column(&self) -> usize {
        self.date
    }

    pub fn category_column(&self) -> usize {
        self.category
    }

    pub fn amount_column(&self) -> usize {
        self.amount
    }

    fn is_ledger_column(&self, i: usize) -> bool {
        i == self.date || i == self.category || i == self.amount
    }

    /// Positions of the non-ledger columns, ascending.
    pub fn extra_columns(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.headers.len()).filter(|i| !self.is_ledger_column(*i))
    }

    /// A record laid out as a row under `headers`.
    ///
    /// Dates print as `YYYY-MM-DD`, amounts keep a decimal point, a missing
    /// category is an empty cell, and absent extra cells are empty.
    pub fn cells(&self, record: &Record) -> Vec<String> {
        let mut extra = record.extra.iter();
        (0..self.headers.len())
            .map(|i| {
                if i == self.date {
                    record.date.format("%Y-%m-%d").to_string()
                } else if i == self.category {
                    record.category_label().to_string()
                } else if i == self.amount {
                    format!("{:?}", record.amount)
                } else {
                    extra.next().cloned().unwrap_or_default()
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_default_is_the_ledger_columns() {
        let schema = Schema::default();
        assert_eq!(schema.headers(), ["date", "category", "amount"]);
        assert_eq!(schema.extra_columns().count(), 0);
    }

    #[test]
    fn test_new_rejects_bad_positions() {
        assert!(Schema::new(headers(&["a", "b", "c"]), 0, 0, 2).is_none());
        assert!(Schema::new(headers(&["a", "b", "c"]), 0, 1, 3).is_none());
        assert!(Schema::new(headers(&["a", "b", "c"]), 2, 0, 1).is_some());
    }

    #[test]
    fn test_cells_follow_header_order() {
        let schema = Schema::new(headers(&["memo", "Amount", "date", "ref", "category"]), 2, 4, 1)
            .unwrap();
        let extras: Vec<usize> = schema.extra_columns().collect();
        assert_eq!(extras, vec![0, 3]);

        let date = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        let record = Record::new(date, "Food", -20.0)
            .with_extra(vec!["groceries".to_string(), "A-1".to_string()]);
        assert_eq!(
            schema.cells(&record),
            vec!["groceries", "-20.0", "2024-01-05", "A-1", "food"]
        );
    }

    #[test]
    fn test_cells_pad_missing_values() {
        let schema = Schema::new(headers(&["date", "category", "amount", "memo"]), 0, 1, 2).unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        let record = Record::new(date, "", 3.5);
        assert_eq!(schema.cells(&record), vec!["2024-01-05", "", "3.5", ""]);
    }
}
