use budget_report::{DashboardView, format_money, title_case};
use serde::Serialize;
use std::borrow::Cow;

#[derive(Debug, Serialize)]
pub struct SummaryJson<'a> {
    pub period: String,
    pub total: f64,
    pub categories: Vec<Amount<'a>>,
    pub monthly: Vec<Amount<'a>>,
    pub income: f64,
    pub expense: f64,
    pub balance: f64,
    pub rejected_rows: usize,
}

#[derive(Debug, Serialize)]
pub struct Amount<'a> {
    pub label: Cow<'a, str>,
    pub amount: f64,
}

impl<'a> SummaryJson<'a> {
    pub fn new(view: &'a DashboardView, rejected_rows: usize) -> Self {
        Self {
            period: view.period.to_string(),
            total: view.total,
            categories: view
                .categories
                .iter()
                .map(|(c, amount)| Amount {
                    label: c.into(),
                    amount,
                })
                .collect(),
            monthly: view
                .monthly
                .iter()
                .map(|(p, amount)| Amount {
                    label: p.to_string().into(),
                    amount,
                })
                .collect(),
            income: view.split.income,
            expense: view.split.expense,
            balance: view.split.balance,
            rejected_rows,
        }
    }
}

/// Plain-text report for `budget summary`.
pub fn render_text(view: &DashboardView, symbol: &str) -> String {
    let money = |a: f64| format_money(symbol, a);

    let mut lines = vec![
        format!("Budget Summary - {}", view.period),
        format!("Total Spent: {}", money(view.total)),
        format!("Transactions: {}", view.records.len()),
        String::new(),
        "Spending by Category:".to_string(),
    ];
    if view.categories.is_empty() {
        lines.push("  (none)".to_string());
    }
    let width = view.categories.categories().map(|c| c.chars().count()).max().unwrap_or(0);
    lines.extend(
        view.categories
            .iter()
            .map(|(category, amount)| format!("  {:<width$}  {:>12}", title_case(category), money(amount))),
    );

    lines.push(String::new());
    lines.push("Monthly Spending Trend:".to_string());
    lines.extend(view.monthly.iter().map(|(period, amount)| {
        let marker = if period == view.period { "*" } else { " " };
        format!(" {marker}{period}  {:>12}", money(amount))
    }));

    lines.push(String::new());
    lines.push(format!("Income:   {:>12}", money(view.split.income)));
    lines.push(format!("Expense:  {:>12}", money(view.split.expense)));
    lines.push(format!("Net:      {:>12}", money(view.split.balance)));

    let mut out = lines.join("\n");
    out.push('\n');
    out
}
