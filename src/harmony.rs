use std::fmt;
use std::str::FromStr;

use tracing::warn;

use crate::color::Color;

/// Hue relationships that can be derived from a single seed color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HarmonyKind {
    Analogous,
    Complementary,
    SplitComplementary,
    Triadic,
    Square,
}

impl HarmonyKind {
    pub const ALL: [HarmonyKind; 5] = [
        HarmonyKind::Analogous,
        HarmonyKind::Complementary,
        HarmonyKind::SplitComplementary,
        HarmonyKind::Triadic,
        HarmonyKind::Square,
    ];

    /// Hue offsets from the seed, in output order.
    pub fn offsets(self) -> &'static [f64] {
        match self {
            HarmonyKind::Analogous => &[-30.0, 0.0, 30.0],
            HarmonyKind::Complementary => &[0.0, 180.0],
            HarmonyKind::SplitComplementary => &[0.0, 150.0, 210.0],
            HarmonyKind::Triadic => &[0.0, 120.0, 240.0],
            HarmonyKind::Square => &[0.0, 90.0, 180.0, 270.0],
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            HarmonyKind::Analogous => "analogous",
            HarmonyKind::Complementary => "complementary",
            HarmonyKind::SplitComplementary => "split-complementary",
            HarmonyKind::Triadic => "triadic",
            HarmonyKind::Square => "square",
        }
    }
}

impl fmt::Display for HarmonyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HarmonyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        HarmonyKind::ALL
            .into_iter()
            .find(|kind| kind.name() == wanted)
            .ok_or_else(|| format!("unknown harmony kind: {s}"))
    }
}

/// Derive the harmony colors for `base`. The seed keeps its lightness and
/// chroma; only the hue rotates. Offset 0 yields `base` itself.
pub fn generate(base: Color, kind: HarmonyKind) -> Vec<Color> {
    kind.offsets()
        .iter()
        .map(|&offset| {
            if offset == 0.0 {
                base
            } else {
                base.shift_hue(offset)
            }
        })
        .collect()
}

/// Like [`generate`], but takes the harmony by name. Unknown names yield a
/// single-color palette holding only `base`.
pub fn generate_named(base: Color, kind: &str) -> Vec<Color> {
    match kind.parse::<HarmonyKind>() {
        Ok(kind) => generate(base, kind),
        Err(_) => {
            warn!(kind, "unknown harmony kind, returning base color only");
            vec![base]
        }
    }
}
