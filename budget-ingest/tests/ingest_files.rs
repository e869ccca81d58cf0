use budget_ingest::{IngestCache, IngestError, ingest_path};
use chrono::NaiveDate;
use std::fs;

const LEDGER: &str = "\
date,category,amount,memo
2024-01-05,Food,-20,groceries
01/10/2024,food,-10,
Feb 1 2024,Salary,1000,payroll
,Food,-99,no date
2024-02-03,Rent,,no amount
";

#[test]
fn test_ingest_path_mixed_formats() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ledger.csv");
    fs::write(&path, LEDGER).unwrap();

    let report = ingest_path(&path).unwrap();
    assert_eq!(report.records.len(), 3);
    assert_eq!(report.rejected_count(), 2);

    let dates: Vec<NaiveDate> = report.records.iter().map(|r| r.date).collect();
    assert_eq!(
        dates,
        vec![
            NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
        ]
    );
    assert!(
        report
            .records
            .iter()
            .all(|r| r.category_label() == r.category_label().to_lowercase())
    );
    let memos: Vec<&str> = report.records.iter().map(|r| r.extra[0].as_str()).collect();
    assert_eq!(memos, vec!["groceries", "", "payroll"]);
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = ingest_path(dir.path().join("nope.csv")).unwrap_err();
    assert!(matches!(err, IngestError::Io(_)));
}

#[test]
fn test_cache_reload_after_edit() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ledger.csv");
    fs::write(&path, LEDGER).unwrap();

    let mut cache = IngestCache::new();
    let first = cache.load_path(&path).unwrap();
    let again = cache.load_path(&path).unwrap();
    assert_eq!(first, again);
    assert_eq!(cache.hits(), 1);

    fs::write(&path, format!("{LEDGER}2024-03-01,Food,-5,late\n")).unwrap();
    let edited = cache.load_path(&path).unwrap();
    assert_eq!(edited.records.len(), 4);
    assert_eq!(cache.misses(), 2);
}
