use budget_core::{
    Period, category_summary, filter_by_period, income_expense_split, list_periods,
    monthly_summary, total_amount,
};
use budget_ingest::ingest_bytes;
use budget_report::{
    DashboardView, DocumentOptions, default_period, export_csv, export_summary_document,
};

const SCENARIO: &str = "\
date,category,amount
2024-01-05,Food,-20
2024-01-10,food,-10
2024-02-01,Salary,1000
";

fn period(s: &str) -> Period {
    s.parse().unwrap()
}

#[test]
fn test_scenario_end_to_end() {
    let report = ingest_bytes(SCENARIO.as_bytes()).unwrap();
    let records = &report.records;

    let periods: Vec<String> = list_periods(records).iter().map(|p| p.to_string()).collect();
    assert_eq!(periods, vec!["2024-01", "2024-02"]);

    let jan = filter_by_period(records, period("2024-01"));
    let cats = category_summary(&jan);
    assert_eq!(cats.len(), 1);
    assert_eq!(cats.get("food"), Some(-30.0));

    let monthly = monthly_summary(records);
    assert_eq!(monthly.get(period("2024-01")), Some(-30.0));
    assert_eq!(monthly.get(period("2024-02")), Some(1000.0));

    let split = income_expense_split(records);
    assert_eq!((split.income, split.expense, split.balance), (1000.0, 30.0, 970.0));

    let pdf = export_summary_document(total_amount(&jan), &cats, "2024-01", &DocumentOptions::default())
        .unwrap();
    assert!(pdf.starts_with(b"%PDF"));
}

#[test]
fn test_empty_date_row_is_excluded_everywhere() {
    let csv = format!("{SCENARIO},Food,-500\n");
    let report = ingest_bytes(csv.as_bytes()).unwrap();
    assert_eq!(report.rejected_count(), 1);
    assert_eq!(list_periods(&report.records).len(), 2);
    assert_eq!(total_amount(&report.records), 970.0);
    assert_eq!(income_expense_split(&report.records).expense, 30.0);
}

#[test]
fn test_header_only_input() {
    let report = ingest_bytes(b"date,category,amount\n").unwrap();
    let records = &report.records;
    assert!(list_periods(records).is_empty());
    assert_eq!(total_amount(records), 0.0);
    assert!(category_summary(records).is_empty());
    assert!(monthly_summary(records).is_empty());
    let split = income_expense_split(records);
    assert_eq!((split.income, split.expense, split.balance), (0.0, 0.0, 0.0));
    assert_eq!(default_period(records), None);
    assert_eq!(
        export_csv(&report.schema, records).unwrap(),
        b"date,category,amount\n".to_vec()
    );
}

#[test]
fn test_csv_export_round_trip() {
    let ledger = "\
date,category,amount
2024-03-01,Rent,-950.5
03/15/2024, Groceries ,-82.13
2024-03-31T09:00:00,salary,3200
2024-04-01,food,-3
";
    let report = ingest_bytes(ledger.as_bytes()).unwrap();
    let march = filter_by_period(&report.records, period("2024-03"));
    assert_eq!(march.len(), 3);

    let bytes = export_csv(&report.schema, &march).unwrap();
    let again = ingest_bytes(&bytes).unwrap();
    assert_eq!(again.rejected_count(), 0);

    let original: Vec<_> = march.iter().map(|r| (r.date, r.amount)).collect();
    let reparsed: Vec<_> = again.records.iter().map(|r| (r.date, r.amount)).collect();
    assert_eq!(original, reparsed);
    assert_eq!(again.records, march);
}

#[test]
fn test_view_totals_match_filtered_sum() {
    let report = ingest_bytes(SCENARIO.as_bytes()).unwrap();
    for p in list_periods(&report.records) {
        let view = DashboardView::compute(&report.records, &report.schema, p);
        let manual: f64 = report
            .records
            .iter()
            .filter(|r| r.period() == p)
            .map(|r| r.amount)
            .sum();
        assert_eq!(view.total, manual);
    }
}

#[test]
fn test_csv_export_keeps_extra_columns() {
    let ledger = "\
date,category,amount,memo
2024-01-05,Food,-20,groceries
2024-01-09,,-7,
2024-02-01,Salary,1000,payroll
";
    let report = ingest_bytes(ledger.as_bytes()).unwrap();
    let jan = filter_by_period(&report.records, period("2024-01"));

    let text = String::from_utf8(export_csv(&report.schema, &jan).unwrap()).unwrap();
    assert_eq!(
        text,
        "date,category,amount,memo\n2024-01-05,food,-20.0,groceries\n2024-01-09,,-7.0,\n"
    );

    let again = ingest_bytes(text.as_bytes()).unwrap();
    assert_eq!(again.schema, report.schema);
    assert_eq!(again.records, jan);
}

#[test]
fn test_blank_category_counts_in_total_only() {
    let ledger = "date,category,amount\n2024-01-05,,-7\n2024-01-06,Uncategorized,-3\n";
    let report = ingest_bytes(ledger.as_bytes()).unwrap();
    let view = DashboardView::compute(&report.records, &report.schema, period("2024-01"));
    assert_eq!(view.total, -10.0);
    let cats: Vec<(&str, f64)> = view.categories.iter().collect();
    assert_eq!(cats, vec![("uncategorized", -3.0)]);
}
