use std::fmt;

use serde::Serialize;

use crate::color::{Color, OklchChanges};

/// WCAG AA threshold for normal text.
pub const AA_RATIO: f64 = 4.5;
/// WCAG AAA threshold for normal text.
pub const AAA_RATIO: f64 = 7.0;

const LIGHTNESS_STEP: f64 = 0.01;

/// WCAG compliance bucket for a contrast ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ComplianceLevel {
    #[serde(rename = "AAA")]
    Aaa,
    #[serde(rename = "AA")]
    Aa,
    Fail,
}

impl fmt::Display for ComplianceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ComplianceLevel::Aaa => "AAA",
            ComplianceLevel::Aa => "AA",
            ComplianceLevel::Fail => "Fail",
        })
    }
}

/// Accessibility verdict for one foreground/background pairing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub contrast_ratio: f64,
    pub is_accessible: bool,
    pub level: ComplianceLevel,
}

/// Report for one unordered pair of palette members.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PairReport {
    pub first_index: usize,
    pub second_index: usize,
    pub first: Color,
    pub second: Color,
    pub report: ValidationReport,
}

/// WCAG 2.x relative luminance of the color's hex (8-bit sRGB) form.
pub fn relative_luminance(color: Color) -> f64 {
    fn linearize(c: u8) -> f64 {
        let c = f64::from(c) / 255.0;
        if c <= 0.04045 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    }
    let [r, g, b] = color.to_rgb8();
    0.2126 * linearize(r) + 0.7152 * linearize(g) + 0.0722 * linearize(b)
}

/// WCAG contrast ratio in `[1, 21]`, symmetric in its arguments.
pub fn contrast_ratio(a: Color, b: Color) -> f64 {
    let la = relative_luminance(a);
    let lb = relative_luminance(b);
    let (lighter, darker) = if la > lb { (la, lb) } else { (lb, la) };
    (lighter + 0.05) / (darker + 0.05)
}

pub fn classify(ratio: f64) -> ComplianceLevel {
    if ratio >= AAA_RATIO {
        ComplianceLevel::Aaa
    } else if ratio >= AA_RATIO {
        ComplianceLevel::Aa
    } else {
        ComplianceLevel::Fail
    }
}

pub fn is_accessible(ratio: f64) -> bool {
    ratio >= AA_RATIO
}

pub fn validate(a: Color, b: Color) -> ValidationReport {
    let ratio = contrast_ratio(a, b);
    ValidationReport {
        contrast_ratio: ratio,
        is_accessible: is_accessible(ratio),
        level: classify(ratio),
    }
}

/// Every unordered pair `(i, j)` with `i < j`, outer index ascending first.
pub fn validate_palette(colors: &[Color]) -> Vec<PairReport> {
    let n = colors.len();
    let mut reports = Vec::with_capacity(n * n.saturating_sub(1) / 2);
    for (i, &first) in colors.iter().enumerate() {
        for (j, &second) in colors.iter().enumerate().skip(i + 1) {
            reports.push(PairReport {
                first_index: i,
                second_index: j,
                first,
                second,
                report: validate(first, second),
            });
        }
    }
    reports
}

/// One report per color, each measured against `background`.
pub fn validate_against(colors: &[Color], background: Color) -> Vec<ValidationReport> {
    colors.iter().map(|&c| validate(c, background)).collect()
}

/// Mean contrast ratio over pair reports, 0.0 when there are none.
pub fn average_ratio(reports: &[PairReport]) -> f64 {
    if reports.is_empty() {
        return 0.0;
    }
    reports.iter().map(|r| r.report.contrast_ratio).sum::<f64>() / reports.len() as f64
}

/// Walk Oklch lightness away from `background` until `color` reaches
/// `min_ratio` against it, or lightness runs out. Hue and chroma are kept.
pub fn suggest_contrast(color: Color, background: Color, min_ratio: f64) -> Color {
    if contrast_ratio(color, background) >= min_ratio {
        return color;
    }
    let white = Color::new(1.0, 0.0, 0.0);
    let black = Color::BLACK;
    let step = if contrast_ratio(white, background) >= contrast_ratio(black, background) {
        LIGHTNESS_STEP
    } else {
        -LIGHTNESS_STEP
    };

    let mut candidate = color;
    loop {
        let l = (candidate.l() + step).clamp(0.0, 1.0);
        candidate = candidate.with(OklchChanges {
            l: Some(l),
            ..OklchChanges::default()
        });
        if contrast_ratio(candidate, background) >= min_ratio || l <= 0.0 || l >= 1.0 {
            return candidate;
        }
    }
}
