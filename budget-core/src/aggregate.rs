//! Group-by aggregations over an immutable record slice.
//!
//! Every function here is total: an empty slice yields zero or an empty
//! summary, never an error.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::period::Period;
use crate::record::Record;

/// Per-category totals, ordered descending by amount.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategorySummary {
    entries: Vec<(String, f64)>,
}

impl CategorySummary {
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.entries.iter().map(|(c, a)| (c.as_str(), *a))
    }

    pub fn get(&self, category: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(c, _)| c == category)
            .map(|(_, a)| *a)
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|(c, _)| c.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Per-month totals over the whole dataset, ordered ascending by period.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MonthlySummary {
    entries: Vec<(Period, f64)>,
}

impl MonthlySummary {
    pub fn iter(&self) -> impl Iterator<Item = (Period, f64)> + '_ {
        self.entries.iter().copied()
    }

    pub fn get(&self, period: Period) -> Option<f64> {
        self.entries
            .iter()
            .find(|(p, _)| *p == period)
            .map(|(_, a)| *a)
    }

    pub fn periods(&self) -> impl Iterator<Item = Period> + '_ {
        self.entries.iter().map(|(p, _)| *p)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Income, expense and net balance split by amount sign.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct IncomeExpenseSplit {
    /// Sum of positive amounts
    pub income: f64,
    /// Absolute sum of negative amounts (never negative)
    pub expense: f64,
    /// income - expense
    pub balance: f64,
}

/// Distinct months present, ascending.
pub fn list_periods(records: &[Record]) -> Vec<Period> {
    records
        .iter()
        .map(Record::period)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Records whose month equals `period`.
pub fn filter_by_period(records: &[Record], period: Period) -> Vec<Record> {
    records
        .iter()
        .filter(|r| period.contains(r.date))
        .cloned()
        .collect()
}

pub fn total_amount(records: &[Record]) -> f64 {
    records.iter().map(|r| r.amount).sum()
}

/// Group by category and sum, sorted descending by total.
///
/// Ties keep the order in which categories were first encountered. Records
/// without a category are left out.
pub fn category_summary(records: &[Record]) -> CategorySummary {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut entries: Vec<(String, f64)> = Vec::new();

    for r in records {
        let Some(category) = r.category.as_deref() else {
            continue;
        };
        match index.get(category) {
            Some(&i) => entries[i].1 += r.amount,
            None => {
                index.insert(category, entries.len());
                entries.push((category.to_string(), r.amount));
            }
        }
    }

    // sort_by is stable
    entries.sort_by(|a, b| b.1.total_cmp(&a.1));
    CategorySummary { entries }
}

/// Group by month across the full dataset and sum, ascending by month.
pub fn monthly_summary(records: &[Record]) -> MonthlySummary {
    let mut totals: BTreeMap<Period, f64> = BTreeMap::new();
    for r in records {
        *totals.entry(r.period()).or_insert(0.0) += r.amount;
    }
    MonthlySummary {
        entries: totals.into_iter().collect(),
    }
}

/// Partition by sign. Zero amounts count towards neither side.
pub fn income_expense_split(records: &[Record]) -> IncomeExpenseSplit {
    let income: f64 = records
        .iter()
        .filter(|r| r.is_income())
        .map(|r| r.amount)
        .sum();
    let expense: f64 = records
        .iter()
        .filter(|r| r.is_expense())
        .map(Record::abs_amount)
        .sum();

    IncomeExpenseSplit {
        income,
        expense,
        balance: income - expense,
    }
}
