use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("cannot encode {ch:?} in '{text}': summary documents are limited to WinAnsi (Windows-1252) text")]
    Encoding { text: String, ch: char },
    #[error("pdf error: {0}")]
    Pdf(String),
    #[error("chart error: {0}")]
    Chart(String),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
