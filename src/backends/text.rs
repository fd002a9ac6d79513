use crate::service::Palette;

use super::ExportBackend;

/// Plain listing: hex and Oklch notation, one color per line.
pub struct TextBackend;

impl ExportBackend for TextBackend {
    fn name(&self) -> &str {
        "text"
    }

    fn extension(&self) -> &str {
        "txt"
    }

    fn serialize(&self, palette: &Palette) -> String {
        palette
            .colors
            .iter()
            .map(|c| format!("{}  {}\n", c.to_hex(), c.to_oklch_string()))
            .collect()
    }
}
