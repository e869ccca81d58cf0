//! Writes the month's artifacts to a directory. Every artifact is attempted
//! even when an earlier one fails.

use anyhow::{Context, Result};
use budget_report::{
    ChartSize, DOCUMENT_FILE_NAME, DashboardView, DocumentOptions, export_csv,
    export_summary_document, filtered_csv_file_name,
};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub const TREND_FILE_NAME: &str = "monthly_trend.svg";
pub const COMPARISON_FILE_NAME: &str = "income_vs_expense.svg";

#[derive(Debug, Clone)]
pub struct ExportSettings {
    pub out_dir: PathBuf,
    pub document: DocumentOptions,
    pub chart_size: ChartSize,
    pub charts: bool,
}

#[derive(Debug)]
pub struct ExportOutcome {
    pub name: String,
    pub result: Result<PathBuf>,
}

impl ExportOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

pub fn category_chart_file_name(view: &DashboardView) -> String {
    format!("category_{}.svg", view.period)
}

pub fn export_month(view: &DashboardView, settings: &ExportSettings) -> Vec<ExportOutcome> {
    let dir = settings.out_dir.as_path();
    let mut outcomes = Vec::new();

    let csv_name = filtered_csv_file_name(view.period);
    outcomes.push(write_artifact(dir, &csv_name, || {
        Ok(export_csv(&view.schema, &view.records)?)
    }));

    outcomes.push(write_artifact(dir, DOCUMENT_FILE_NAME, || {
        Ok(export_summary_document(
            view.total,
            &view.categories,
            &view.period.to_string(),
            &settings.document,
        )?)
    }));

    if settings.charts {
        let size = settings.chart_size;
        let charts = [
            (category_chart_file_name(view), view.category_chart()),
            (TREND_FILE_NAME.to_string(), view.trend_chart()),
            (COMPARISON_FILE_NAME.to_string(), view.comparison_chart()),
        ];
        for (name, chart) in charts {
            outcomes.push(write_artifact(dir, &name, || {
                Ok(chart.to_svg(size)?.into_bytes())
            }));
        }
    }

    let failed = outcomes.iter().filter(|o| !o.is_ok()).count();
    info!(
        period = %view.period,
        written = outcomes.len() - failed,
        failed,
        "export finished"
    );
    outcomes
}

fn write_artifact(
    dir: &Path,
    name: &str,
    render: impl FnOnce() -> Result<Vec<u8>>,
) -> ExportOutcome {
    let result = render()
        .with_context(|| format!("rendering {name}"))
        .and_then(|bytes| {
            fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
            let path = dir.join(name);
            fs::write(&path, bytes).with_context(|| format!("write {}", path.display()))?;
            Ok(path)
        });
    if let Err(e) = &result {
        warn!(artifact = name, error = %format!("{e:#}"), "export failed");
    }
    ExportOutcome {
        name: name.to_string(),
        result,
    }
}

/// Print one line per artifact. Returns the number of failures.
pub fn print_outcomes(outcomes: &[ExportOutcome]) -> usize {
    let mut failed = 0;
    for o in outcomes {
        match &o.result {
            Ok(path) => println!("wrote  {}", path.display()),
            Err(e) => {
                failed += 1;
                eprintln!("failed {}: {e:#}", o.name);
            }
        }
    }
    failed
}

#[cfg(test)]
mod tests {
    use super::*;
    use budget_core::{Record, Schema};
    use budget_report::LabelPolicy;
    use chrono::NaiveDate;

    fn view(category: &str) -> DashboardView {
        let d = |m, day| NaiveDate::from_ymd_opt(2024, m, day).unwrap();
        let all = vec![
            Record::new(d(1, 5), category, -20.0),
            Record::new(d(1, 10), "rent", -10.0),
            Record::new(d(2, 1), "salary", 1000.0),
        ];
        DashboardView::compute(&all, &Schema::default(), "2024-01".parse().unwrap())
    }

    fn settings(dir: &Path, charts: bool) -> ExportSettings {
        ExportSettings {
            out_dir: dir.to_path_buf(),
            document: DocumentOptions::default(),
            chart_size: ChartSize::default(),
            charts,
        }
    }

    #[test]
    fn test_writes_every_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let outcomes = export_month(&view("food"), &settings(dir.path(), true));
        assert_eq!(outcomes.len(), 5);
        assert!(outcomes.iter().all(ExportOutcome::is_ok));

        let csv = fs::read_to_string(dir.path().join("filtered_data_2024-01.csv")).unwrap();
        assert!(csv.starts_with("date,category,amount"));
        assert_eq!(csv.lines().count(), 3);

        let pdf = fs::read(dir.path().join(DOCUMENT_FILE_NAME)).unwrap();
        assert!(pdf.starts_with(b"%PDF"));
        assert!(dir.path().join("category_2024-01.svg").exists());
        assert!(dir.path().join(TREND_FILE_NAME).exists());
        assert!(dir.path().join(COMPARISON_FILE_NAME).exists());
    }

    #[test]
    fn test_no_charts() {
        let dir = tempfile::tempdir().unwrap();
        let outcomes = export_month(&view("food"), &settings(dir.path(), false));
        assert_eq!(outcomes.len(), 2);
        assert!(!dir.path().join(TREND_FILE_NAME).exists());
    }

    #[test]
    fn test_pdf_failure_does_not_block_csv() {
        let dir = tempfile::tempdir().unwrap();
        let mut s = settings(dir.path(), false);
        s.document.label_policy = LabelPolicy::Reject;
        let outcomes = export_month(&view("café ☕"), &s);

        assert!(outcomes[0].is_ok());
        assert!(!outcomes[1].is_ok());
        assert!(dir.path().join("filtered_data_2024-01.csv").exists());
        assert!(!dir.path().join(DOCUMENT_FILE_NAME).exists());
        assert_eq!(print_outcomes(&outcomes), 1);
    }

    #[test]
    fn test_replace_policy_writes_pdf() {
        let dir = tempfile::tempdir().unwrap();
        let mut s = settings(dir.path(), false);
        s.document.label_policy = LabelPolicy::Replace;
        let outcomes = export_month(&view("café ☕"), &s);
        assert!(outcomes.iter().all(ExportOutcome::is_ok));
    }
}
