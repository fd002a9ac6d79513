pub mod css;
pub mod json;
pub mod text;

use std::path::Path;

use anyhow::{Context, Result};

use crate::service::Palette;

pub use css::CssBackend;
pub use json::JsonBackend;
pub use text::TextBackend;

/// A serialization target for generated palettes.
pub trait ExportBackend {
    /// Human-readable backend name.
    fn name(&self) -> &str;

    /// File extension used when writing, without the dot.
    fn extension(&self) -> &str;

    /// Render the palette in this backend's format.
    fn serialize(&self, palette: &Palette) -> String;

    /// Write the rendered palette to `path`.
    fn write_to(&self, palette: &Palette, path: &Path) -> Result<()> {
        let content = self.serialize(palette);
        std::fs::write(path, content)
            .with_context(|| format!("failed to write {} export to {}", self.name(), path.display()))?;
        Ok(())
    }
}
