use std::fmt;
use std::str::FromStr;

use palette::{FromColor, Hsl, IntoColor, Oklch, Srgb};
use serde::{Serialize, Serializer};
use tracing::warn;

use crate::parse::{parse_color, ColorParseError};

/// Per-component tolerance used by `Color` equality.
pub const EPSILON: f64 = 1e-6;

/// Below this chroma a color has no meaningful hue.
pub const ACHROMATIC_CHROMA: f64 = 1e-4;

/// Core color type used throughout the engine.
///
/// Stores Oklch lightness (`[0, 1]`), chroma (`>= 0`) and hue (degrees in
/// `[0, 360)`). Values are normalized on construction and never mutated:
/// every transformation returns a new `Color`.
#[derive(Debug, Clone, Copy)]
pub struct Color {
    l: f64,
    chroma: f64,
    hue: f64,
}

/// Partial Oklch override for [`Color::with`]. `None` keeps the current value.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OklchChanges {
    pub l: Option<f64>,
    pub chroma: Option<f64>,
    pub hue: Option<f64>,
}

impl Color {
    /// Sentinel returned when color text cannot be parsed.
    pub const BLACK: Color = Color {
        l: 0.0,
        chroma: 0.0,
        hue: 0.0,
    };

    /// Build a color from Oklch components, clamping lightness and chroma and
    /// wrapping hue into `[0, 360)`.
    pub fn new(l: f64, chroma: f64, hue: f64) -> Self {
        let l = if l.is_nan() { 0.0 } else { l.clamp(0.0, 1.0) };
        let chroma = if chroma.is_nan() { 0.0 } else { chroma.max(0.0) };
        Self {
            l,
            chroma,
            hue: normalize_hue(hue),
        }
    }

    /// Create from gamma-encoded sRGB components in `[0, 1]`.
    pub fn from_srgb(r: f64, g: f64, b: f64) -> Self {
        let oklch: Oklch<f64> = Srgb::new(r, g, b).into_color();
        Self::from_oklch(oklch)
    }

    /// Create from 8-bit sRGB channels.
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        let srgb: Srgb<f64> = Srgb::new(r, g, b).into_format();
        Self::from_srgb(srgb.red, srgb.green, srgb.blue)
    }

    /// Create from HSL with hue in degrees and saturation/lightness in `[0, 1]`.
    pub fn from_hsl(hue: f64, saturation: f64, lightness: f64) -> Self {
        let hsl: Hsl<palette::encoding::Srgb, f64> = Hsl::new(
            hue,
            saturation.clamp(0.0, 1.0),
            lightness.clamp(0.0, 1.0),
        );
        let srgb: Srgb<f64> = Srgb::from_color(hsl);
        Self::from_srgb(srgb.red, srgb.green, srgb.blue)
    }

    /// Create from a `palette` Oklch value.
    pub fn from_oklch(oklch: Oklch<f64>) -> Self {
        let hue = if oklch.chroma < ACHROMATIC_CHROMA {
            0.0
        } else {
            oklch.hue.into_positive_degrees()
        };
        Self::new(oklch.l, oklch.chroma, hue)
    }

    /// Best-effort parse used for free-text ingestion.
    ///
    /// Unparseable input degrades to [`Color::BLACK`] and is reported as a
    /// warning instead of an error.
    pub fn parse_lossy(input: &str) -> Self {
        match parse_color(input) {
            Ok(color) => color,
            Err(err) => {
                warn!(input, error = %err, "invalid color input, defaulting to black");
                Self::BLACK
            }
        }
    }

    pub fn l(self) -> f64 {
        self.l
    }

    pub fn chroma(self) -> f64 {
        self.chroma
    }

    pub fn hue(self) -> f64 {
        self.hue
    }

    pub fn is_achromatic(self) -> bool {
        self.chroma < ACHROMATIC_CHROMA
    }

    /// Convert to `palette::Oklch<f64>`.
    pub fn to_oklch(self) -> Oklch<f64> {
        Oklch::new(self.l, self.chroma, self.hue)
    }

    /// Gamma-encoded sRGB, clipped to the displayable gamut.
    pub fn to_srgb(self) -> Srgb<f64> {
        let srgb: Srgb<f64> = Srgb::from_color(self.to_oklch());
        Srgb::new(
            clip_channel(srgb.red),
            clip_channel(srgb.green),
            clip_channel(srgb.blue),
        )
    }

    /// 8-bit sRGB channels, the same values `to_hex` encodes.
    pub fn to_rgb8(self) -> [u8; 3] {
        let srgb = self.to_srgb();
        [
            quantize(srgb.red),
            quantize(srgb.green),
            quantize(srgb.blue),
        ]
    }

    /// Serialize to lowercase hex `#rrggbb`.
    pub fn to_hex(self) -> String {
        let [r, g, b] = self.to_rgb8();
        format!("#{r:02x}{g:02x}{b:02x}")
    }

    /// `"L C H"` with three decimals. Achromatic colors report hue 0.
    pub fn to_functional_string(self) -> String {
        let hue = if self.is_achromatic() { 0.0 } else { self.hue };
        format!("{:.3} {:.3} {:.3}", self.l, self.chroma, hue)
    }

    /// CSS `oklch(L C H)` notation.
    pub fn to_oklch_string(self) -> String {
        format!("oklch({})", self.to_functional_string())
    }

    /// New color with only the given components replaced.
    #[must_use]
    pub fn with(self, changes: OklchChanges) -> Self {
        Self::new(
            changes.l.unwrap_or(self.l),
            changes.chroma.unwrap_or(self.chroma),
            changes.hue.unwrap_or(self.hue),
        )
    }

    /// Rotate hue by `degrees`, wrapping back into `[0, 360)`.
    #[must_use]
    pub fn shift_hue(self, degrees: f64) -> Self {
        self.with(OklchChanges {
            hue: Some(self.hue + degrees),
            ..OklchChanges::default()
        })
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl PartialEq for Color {
    fn eq(&self, other: &Self) -> bool {
        (self.l - other.l).abs() <= EPSILON
            && (self.chroma - other.chroma).abs() <= EPSILON
            && hue_distance(self.hue, other.hue) <= EPSILON
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_color(s)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

/// Wrap any finite angle into `[0, 360)`. Non-finite input maps to 0.
pub fn normalize_hue(degrees: f64) -> f64 {
    if !degrees.is_finite() {
        return 0.0;
    }
    let hue = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if hue >= 360.0 {
        0.0
    } else {
        hue
    }
}

/// Shortest angular distance between two hues, in degrees.
pub fn hue_distance(a: f64, b: f64) -> f64 {
    let d = (a - b).abs() % 360.0;
    d.min(360.0 - d)
}

fn clip_channel(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

fn quantize(value: f64) -> u8 {
    (value * 255.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_round_trip() {
        let color = Color::parse_lossy("#ff8800");
        assert_eq!(color.to_rgb8(), [255, 136, 0]);
        assert_eq!(color.to_hex(), "#ff8800");
    }

    #[test]
    fn hex_uppercase_input() {
        let color: Color = "#FF8800".parse().unwrap();
        assert_eq!(color.to_hex(), "#ff8800");
    }

    #[test]
    fn hex_output_is_stable() {
        let color = Color::new(0.62, 0.19, 41.5);
        let first = color.to_hex();
        for _ in 0..10 {
            assert_eq!(color.to_hex(), first);
        }
    }

    #[test]
    fn rgb8_round_trip_for_a_spread_of_colors() {
        let samples = [
            [200, 100, 50],
            [0, 255, 0],
            [128, 128, 128],
            [0, 0, 0],
            [255, 255, 255],
            [1, 2, 3],
            [59, 130, 246],
        ];
        for [r, g, b] in samples {
            let color = Color::from_rgb8(r, g, b);
            assert_eq!(
                color.to_rgb8(),
                [r, g, b],
                "round trip failed for {r},{g},{b}"
            );
        }
    }

    #[test]
    fn hue_is_normalized_on_construction() {
        assert!((Color::new(0.5, 0.1, 370.0).hue() - 10.0).abs() < 1e-9);
        assert!((Color::new(0.5, 0.1, -30.0).hue() - 330.0).abs() < 1e-9);
        assert!((Color::new(0.5, 0.1, 720.0).hue()).abs() < 1e-9);
        assert_eq!(Color::new(0.5, 0.1, f64::NAN).hue(), 0.0);
        assert!(Color::new(0.5, 0.1, -1e-18).hue() < 360.0);
    }

    #[test]
    fn lightness_and_chroma_are_clamped() {
        let color = Color::new(1.7, -0.2, 0.0);
        assert_eq!(color.l(), 1.0);
        assert_eq!(color.chroma(), 0.0);
    }

    #[test]
    fn functional_string_has_three_decimals() {
        let color = Color::new(0.5, 0.123_456, 250.0);
        assert_eq!(color.to_functional_string(), "0.500 0.123 250.000");
        assert_eq!(color.to_oklch_string(), "oklch(0.500 0.123 250.000)");
    }

    #[test]
    fn functional_string_zeroes_hue_when_achromatic() {
        let gray = Color::new(0.6, 0.0, 123.0);
        assert_eq!(gray.to_functional_string(), "0.600 0.000 0.000");
    }

    #[test]
    fn with_overrides_only_given_components() {
        let base = Color::new(0.4, 0.1, 200.0);
        let changed = base.with(OklchChanges {
            l: Some(0.8),
            ..OklchChanges::default()
        });
        assert_eq!(changed.l(), 0.8);
        assert_eq!(changed.chroma(), base.chroma());
        assert_eq!(changed.hue(), base.hue());
        // original untouched
        assert_eq!(base.l(), 0.4);
    }

    #[test]
    fn shift_hue_wraps() {
        let base = Color::new(0.6, 0.15, 300.0);
        assert!((base.shift_hue(90.0).hue() - 30.0).abs() < 1e-9);
        assert!((base.shift_hue(-330.0).hue() - 330.0).abs() < 1e-9);
    }

    #[test]
    fn shift_hue_full_turn_is_identity() {
        for hue in [0.0, 45.0, 179.9, 359.5] {
            let base = Color::new(0.7, 0.12, hue);
            assert_eq!(base.shift_hue(360.0), base, "hue {hue}");
        }
    }

    #[test]
    fn equality_uses_epsilon_and_wraps_hue() {
        let a = Color::new(0.5, 0.1, 0.0);
        let b = Color::new(0.5 + 1e-9, 0.1, 359.999_999_9);
        assert_eq!(a, b);
        assert_ne!(a, Color::new(0.5, 0.1, 1.0));
    }

    #[test]
    fn parse_lossy_falls_back_to_black() {
        let color = Color::parse_lossy("definitely not a color");
        assert_eq!(color, Color::BLACK);
        assert_eq!(color.to_hex(), "#000000");
    }

    #[test]
    fn out_of_gamut_is_clipped_before_hex() {
        // very high chroma is outside sRGB for any hue
        let loud = Color::new(0.7, 0.4, 145.0);
        let hex = loud.to_hex();
        assert_eq!(hex.len(), 7);
        assert!(hex.starts_with('#'));
    }

    #[test]
    fn from_hsl_matches_rgb() {
        let red = Color::from_hsl(0.0, 1.0, 0.5);
        assert_eq!(red.to_hex(), "#ff0000");
        let gray = Color::from_hsl(210.0, 0.0, 0.2);
        assert_eq!(gray.to_hex(), "#333333");
    }

    #[test]
    fn display_matches_to_hex() {
        let color = Color::from_rgb8(171, 205, 239);
        assert_eq!(format!("{color}"), color.to_hex());
    }

    #[test]
    fn serializes_as_hex_string() {
        let color = Color::from_rgb8(16, 32, 48);
        assert_eq!(serde_json::to_string(&color).unwrap(), "\"#102030\"");
    }
}
