//! budget-report: charts, CSV and PDF exports, and the per-selection view

pub mod chart;
pub mod csv_export;
pub mod document;
pub mod error;
pub mod svg;
pub mod text;
pub mod view;

pub use chart::{
    Chart, ChartKind, ChartPoint, SeriesColor, render_bar_chart, render_comparison_bar_chart,
    render_line_chart,
};
pub use csv_export::{CSV_MIME, export_csv, filtered_csv_file_name};
pub use document::{
    DOCUMENT_FILE_NAME, DocumentLine, DocumentOptions, PDF_MIME, export_summary_document,
    summary_lines,
};
pub use error::ReportError;
pub use svg::ChartSize;
pub use text::{LabelPolicy, format_money, title_case};
pub use view::{DashboardView, default_period};
