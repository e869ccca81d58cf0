//! Label and amount formatting shared by the document and the views.

use serde::{Deserialize, Serialize};

use crate::error::ReportError;

/// What to do with characters a single-byte document cannot hold.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelPolicy {
    /// Fail the export with `ReportError::Encoding`
    #[default]
    Reject,
    /// Substitute `?`
    Replace,
}

/// Uppercase the first letter of each word, lowercase the rest.
///
/// A word starts after any non-letter, so "3rd-party" becomes "3Rd-Party".
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_letter = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_letter = true;
        } else {
            out.push(c);
            prev_letter = false;
        }
    }
    out
}

/// `$-30.00` style: symbol, then the signed amount to two decimals.
pub fn format_money(symbol: &str, amount: f64) -> String {
    format!("{symbol}{amount:.2}")
}

/// Unicode characters WinAnsiEncoding places in 0x80..=0x9F.
const WIN_ANSI_HIGH: [char; 27] = [
    '\u{20AC}', '\u{201A}', '\u{0192}', '\u{201E}', '\u{2026}', '\u{2020}', '\u{2021}',
    '\u{02C6}', '\u{2030}', '\u{0160}', '\u{2039}', '\u{0152}', '\u{017D}', '\u{2018}',
    '\u{2019}', '\u{201C}', '\u{201D}', '\u{2022}', '\u{2013}', '\u{2014}', '\u{02DC}',
    '\u{2122}', '\u{0161}', '\u{203A}', '\u{0153}', '\u{017E}', '\u{0178}',
];

/// Whether the built-in PDF fonts can draw `c`. Their text is written in
/// WinAnsiEncoding, and anything outside it is silently dropped.
pub fn is_win_ansi(c: char) -> bool {
    matches!(c, ' '..='~' | '\u{A0}'..='\u{FF}') || WIN_ANSI_HIGH.contains(&c)
}

/// Restrict `text` to WinAnsi according to `policy`.
pub fn to_win_ansi(text: &str, policy: LabelPolicy) -> Result<String, ReportError> {
    match text.chars().find(|c| !is_win_ansi(*c)) {
        None => Ok(text.to_string()),
        Some(ch) => match policy {
            LabelPolicy::Reject => Err(ReportError::Encoding {
                text: text.to_string(),
                ch,
            }),
            LabelPolicy::Replace => Ok(text
                .chars()
                .map(|c| if is_win_ansi(c) { c } else { '?' })
                .collect()),
        },
    }
}
