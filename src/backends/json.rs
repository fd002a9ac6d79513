use serde_json::Value;

use crate::service::Palette;

use super::ExportBackend;

/// Pretty-printed JSON array of hex strings.
pub struct JsonBackend;

impl ExportBackend for JsonBackend {
    fn name(&self) -> &str {
        "JSON"
    }

    fn extension(&self) -> &str {
        "json"
    }

    fn serialize(&self, palette: &Palette) -> String {
        let value = Value::from(palette.hex_codes());
        format!("{value:#}\n")
    }
}
