//! budget-core: ledger record types and the month/category aggregations

pub mod aggregate;
pub mod period;
pub mod record;
pub mod schema;

pub use aggregate::{
    CategorySummary, IncomeExpenseSplit, MonthlySummary, category_summary, filter_by_period,
    income_expense_split, list_periods, monthly_summary, total_amount,
};
pub use period::{Period, PeriodParseError};
pub use record::{Record, normalize_category};
pub use schema::{AMOUNT_COLUMN, CATEGORY_COLUMN, DATE_COLUMN, Schema};
