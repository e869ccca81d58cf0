//! Everything one render cycle shows, recomputed from scratch per selection.

use budget_core::{
    CategorySummary, IncomeExpenseSplit, MonthlySummary, Period, Record, Schema, category_summary,
    filter_by_period, income_expense_split, list_periods, monthly_summary, total_amount,
};
use serde::Serialize;

use crate::chart::{Chart, render_bar_chart, render_comparison_bar_chart, render_line_chart};

/// The earliest period in the data, which is the default selection.
pub fn default_period(records: &[Record]) -> Option<Period> {
    list_periods(records).into_iter().next()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    /// Columns of the source file, for the raw table and CSV export
    pub schema: Schema,
    pub period: Period,
    pub periods: Vec<Period>,
    /// Records of the selected period
    pub records: Vec<Record>,
    pub total: f64,
    pub categories: CategorySummary,
    /// Whole dataset, not period-filtered
    pub monthly: MonthlySummary,
    /// Whole dataset, not period-filtered
    pub split: IncomeExpenseSplit,
}

impl DashboardView {
    pub fn compute(all: &[Record], schema: &Schema, period: Period) -> Self {
        let records = filter_by_period(all, period);
        let total = total_amount(&records);
        let categories = category_summary(&records);

        Self {
            schema: schema.clone(),
            period,
            periods: list_periods(all),
            records,
            total,
            categories,
            monthly: monthly_summary(all),
            split: income_expense_split(all),
        }
    }

    pub fn category_chart(&self) -> Chart {
        render_bar_chart(&self.categories)
    }

    pub fn trend_chart(&self) -> Chart {
        render_line_chart(&self.monthly)
    }

    pub fn comparison_chart(&self) -> Chart {
        render_comparison_bar_chart(self.split.income, self.split.expense)
    }

    /// Neighbouring period in the data, `step` positions away, clamped.
    pub fn shifted_period(&self, step: isize) -> Period {
        let Some(idx) = self.periods.iter().position(|p| *p == self.period) else {
            return self.period;
        };
        let last = self.periods.len().saturating_sub(1) as isize;
        let target = (idx as isize + step).clamp(0, last) as usize;
        self.periods[target]
    }
}
