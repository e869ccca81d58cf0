//! Renderer-independent chart objects built from the aggregates.

use budget_core::{CategorySummary, MonthlySummary};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChartKind {
    Bar,
    Line,
}

/// Colour role of a point. Income and expense always contrast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeriesColor {
    Income,
    Expense,
    Neutral,
}

impl SeriesColor {
    pub fn rgb(&self) -> (u8, u8, u8) {
        match self {
            SeriesColor::Income => (0, 128, 0),
            SeriesColor::Expense => (220, 20, 60),
            SeriesColor::Neutral => (31, 119, 180),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub label: String,
    pub value: f64,
    pub color: SeriesColor,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chart {
    pub kind: ChartKind,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub points: Vec<ChartPoint>,
}

impl Chart {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> + '_ {
        self.points.iter().map(|p| p.label.as_str())
    }

    /// Value axis bounds: always includes zero and never collapses to a point.
    pub fn value_range(&self) -> (f64, f64) {
        let (lo, hi) = self
            .points
            .iter()
            .fold((0.0f64, 0.0f64), |(lo, hi), p| (lo.min(p.value), hi.max(p.value)));
        if lo == hi {
            return (lo, lo + 1.0);
        }
        let pad = (hi - lo) * 0.1;
        (if lo < 0.0 { lo - pad } else { lo }, if hi > 0.0 { hi + pad } else { hi })
    }
}

/// Category totals for the selected month, in summary order.
pub fn render_bar_chart(summary: &CategorySummary) -> Chart {
    Chart {
        kind: ChartKind::Bar,
        title: "Spending by Category".to_string(),
        x_label: "Category".to_string(),
        y_label: "Amount ($)".to_string(),
        points: summary
            .iter()
            .map(|(category, amount)| ChartPoint {
                label: category.to_string(),
                value: amount,
                color: SeriesColor::Neutral,
            })
            .collect(),
    }
}

/// Month-by-month totals across the whole dataset.
pub fn render_line_chart(summary: &MonthlySummary) -> Chart {
    Chart {
        kind: ChartKind::Line,
        title: "Monthly Spending Trend".to_string(),
        x_label: "Month".to_string(),
        y_label: "Total Spent ($)".to_string(),
        points: summary
            .iter()
            .map(|(period, amount)| ChartPoint {
                label: period.to_string(),
                value: amount,
                color: SeriesColor::Neutral,
            })
            .collect(),
    }
}

/// Two bars: income then expense.
pub fn render_comparison_bar_chart(income: f64, expense: f64) -> Chart {
    Chart {
        kind: ChartKind::Bar,
        title: "Income vs Expense".to_string(),
        x_label: "Type".to_string(),
        y_label: "Amount ($)".to_string(),
        points: vec![
            ChartPoint {
                label: "Income".to_string(),
                value: income,
                color: SeriesColor::Income,
            },
            ChartPoint {
                label: "Expense".to_string(),
                value: expense,
                color: SeriesColor::Expense,
            },
        ],
    }
}
