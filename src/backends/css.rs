use crate::service::Palette;

use super::ExportBackend;

/// CSS custom-property block, one `--color-N` per palette entry (1-based).
pub struct CssBackend;

impl ExportBackend for CssBackend {
    fn name(&self) -> &str {
        "CSS"
    }

    fn extension(&self) -> &str {
        "css"
    }

    fn serialize(&self, palette: &Palette) -> String {
        let mut out = String::new();
        out.push_str(":root {\n");
        for (i, color) in palette.colors.iter().enumerate() {
            out.push_str(&format!("  --color-{}: {};\n", i + 1, color.to_hex()));
        }
        out.push_str("}\n");
        out
    }
}
