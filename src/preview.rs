use std::io::Write;

use crossterm::queue;
use crossterm::style::{Color as TermColor, Print, ResetColor, SetBackgroundColor, SetForegroundColor};

use crate::color::Color;
use crate::contrast::contrast_ratio;
use crate::service::Palette;

const SWATCH_WIDTH: usize = 11;

fn to_term_color(c: Color) -> TermColor {
    let [r, g, b] = c.to_rgb8();
    TermColor::Rgb { r, g, b }
}

/// Black or white label text, whichever reads better on `c`.
fn label_color(c: Color) -> TermColor {
    let white = Color::new(1.0, 0.0, 0.0);
    if contrast_ratio(c, Color::BLACK) >= contrast_ratio(c, white) {
        TermColor::Black
    } else {
        TermColor::White
    }
}

/// Print the palette as a row of colored swatches labeled with their hex
/// codes, followed by a newline.
pub fn write_swatches<W: Write>(out: &mut W, palette: &Palette) -> std::io::Result<()> {
    for color in &palette.colors {
        queue!(
            out,
            SetBackgroundColor(to_term_color(*color)),
            SetForegroundColor(label_color(*color)),
            Print(format!("{:^width$}", color.to_hex(), width = SWATCH_WIDTH)),
            ResetColor,
            Print(" ")
        )?;
    }
    queue!(out, Print("\n"))?;
    out.flush()
}
