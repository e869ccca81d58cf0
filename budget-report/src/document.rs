//! One-page PDF summary: title, total, then one line per category.
//!
//! Layout follows a plain A4 page with 10mm margins and 10mm line cells.
//! Text uses the built-in Helvetica font, so every string is checked against
//! WinAnsi before any PDF bytes are produced.

use budget_core::CategorySummary;
use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfLayerReference};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ReportError;
use crate::text::{LabelPolicy, format_money, title_case, to_win_ansi};

pub const DOCUMENT_FILE_NAME: &str = "budget_summary.pdf";
pub const PDF_MIME: &str = "application/pdf";

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN: f32 = 10.0;
const CELL_HEIGHT: f32 = 10.0;
const BOTTOM_LIMIT: f32 = PAGE_HEIGHT - 20.0;
const PT_TO_MM: f32 = 0.352_778;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentOptions {
    pub currency_symbol: String,
    pub label_policy: LabelPolicy,
}

impl Default for DocumentOptions {
    fn default() -> Self {
        Self {
            currency_symbol: "$".to_string(),
            label_policy: LabelPolicy::Reject,
        }
    }
}

/// One text line of the summary page.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentLine {
    pub text: String,
    /// Font size in points
    pub size: f32,
    pub centered: bool,
    /// Extra vertical space before the line, in mm
    pub gap_before: f32,
}

impl DocumentLine {
    fn new(text: String, size: f32) -> Self {
        Self {
            text,
            size,
            centered: false,
            gap_before: 0.0,
        }
    }
}

/// The summary's lines in page order, already restricted to WinAnsi.
pub fn summary_lines(
    total: f64,
    summary: &CategorySummary,
    period_label: &str,
    options: &DocumentOptions,
) -> Result<Vec<DocumentLine>, ReportError> {
    let policy = options.label_policy;
    let symbol = options.currency_symbol.as_str();

    let mut lines = vec![
        DocumentLine {
            centered: true,
            ..DocumentLine::new(to_win_ansi(&format!("Budget Summary - {period_label}"), policy)?, 14.0)
        },
        DocumentLine {
            gap_before: 10.0,
            ..DocumentLine::new(
                to_win_ansi(&format!("Total Spent: {}", format_money(symbol, total)), policy)?,
                12.0,
            )
        },
        DocumentLine {
            gap_before: 5.0,
            ..DocumentLine::new("Spending by Category:".to_string(), 11.0)
        },
    ];

    for (category, amount) in summary.iter() {
        let text = format!("{}: {}", title_case(category), format_money(symbol, amount));
        lines.push(DocumentLine::new(to_win_ansi(&text, policy)?, 11.0));
    }

    Ok(lines)
}

/// Build the summary PDF for one period.
pub fn export_summary_document(
    total: f64,
    summary: &CategorySummary,
    period_label: &str,
    options: &DocumentOptions,
) -> Result<Vec<u8>, ReportError> {
    let lines = summary_lines(total, summary, period_label, options)?;
    let bytes = render_pdf(&format!("Budget Summary - {period_label}"), &lines)?;
    info!(
        period = period_label,
        categories = summary.len(),
        bytes = bytes.len(),
        "exported summary document"
    );
    Ok(bytes)
}

fn pdf_err(e: impl std::fmt::Display) -> ReportError {
    ReportError::Pdf(e.to_string())
}

/// Rough Helvetica advance width; good enough for centering a title.
fn estimate_width_mm(text: &str, size: f32) -> f32 {
    text.chars().count() as f32 * size * 0.5 * PT_TO_MM
}

fn render_pdf(title: &str, lines: &[DocumentLine]) -> Result<Vec<u8>, ReportError> {
    let (doc, page, layer) =
        PdfDocument::new(title, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
    let font = doc.add_builtin_font(BuiltinFont::Helvetica).map_err(pdf_err)?;

    {
        let mut current: PdfLayerReference = doc.get_page(page).get_layer(layer);
        let mut top = MARGIN;

        for line in lines {
            top += line.gap_before;
            // overflowing lines continue on a fresh page
            if top + CELL_HEIGHT > BOTTOM_LIMIT {
                let (p, l) = doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
                current = doc.get_page(p).get_layer(l);
                top = MARGIN;
            }
            write_line(&current, &font, line, top);
            top += CELL_HEIGHT;
        }
    }

    doc.save_to_bytes().map_err(pdf_err)
}

fn write_line(layer: &PdfLayerReference, font: &IndirectFontRef, line: &DocumentLine, top: f32) {
    let cell_width = PAGE_WIDTH - 2.0 * MARGIN;
    let x = if line.centered {
        MARGIN + ((cell_width - estimate_width_mm(&line.text, line.size)) / 2.0).max(0.0)
    } else {
        MARGIN
    };
    // baseline sits mid-cell, shifted down by roughly a third of the font height
    let baseline_from_top = top + CELL_HEIGHT / 2.0 + 0.3 * line.size * PT_TO_MM;
    layer.use_text(
        line.text.clone(),
        line.size,
        Mm(x),
        Mm(PAGE_HEIGHT - baseline_from_top),
        font,
    );
}
