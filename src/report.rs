//! Plain-text rendering of contrast reports.

use std::fmt::Write;

use crate::color::Color;
use crate::contrast::{average_ratio, suggest_contrast, PairReport, ValidationReport, AA_RATIO};

/// One line per pair (`#aaaaaa / #bbbbbb  4.52:1  AA`) plus the average.
pub fn render_pairs(reports: &[PairReport]) -> String {
    let mut out = String::new();
    for pair in reports {
        let _ = writeln!(
            out,
            "{} / {}  {:.2}:1  {}",
            pair.first.to_hex(),
            pair.second.to_hex(),
            pair.report.contrast_ratio,
            pair.report.level
        );
    }
    let _ = writeln!(out, "average {:.2}:1", average_ratio(reports));
    out
}

/// One line per color against `background`; failing colors get a suggested
/// replacement that reaches AA.
pub fn render_against(colors: &[Color], reports: &[ValidationReport], background: Color) -> String {
    let mut out = String::new();
    for (&color, report) in colors.iter().zip(reports) {
        let _ = write!(
            out,
            "{} on {}  {:.2}:1  {}",
            color.to_hex(),
            background.to_hex(),
            report.contrast_ratio,
            report.level
        );
        if !report.is_accessible {
            let _ = write!(
                out,
                "  try {}",
                suggest_contrast(color, background, AA_RATIO).to_hex()
            );
        }
        out.push('\n');
    }
    out
}
