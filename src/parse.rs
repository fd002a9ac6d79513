use thiserror::Error;

use crate::color::Color;

/// Why a piece of color text could not be understood.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorParseError {
    #[error("empty color string")]
    Empty,

    #[error("invalid hex color `{0}`: expected 3, 4, 6 or 8 hex digits")]
    InvalidHex(String),

    #[error("unrecognized color notation `{0}`")]
    UnknownFormat(String),

    #[error("{function}() expects 3 or 4 components, got {count}")]
    WrongArity { function: &'static str, count: usize },

    #[error("invalid component `{component}` in {function}()")]
    InvalidComponent {
        function: &'static str,
        component: String,
    },
}

/// Oklch chroma that CSS maps to `100%`.
const OKLCH_CHROMA_PERCENT_SCALE: f64 = 0.4;

/// Parse hex (`#RGB`, `#RGBA`, `#RRGGBB`, `#RRGGBBAA`) or functional notation
/// (`rgb()`, `rgba()`, `hsl()`, `hsla()`, `oklch()`). Alpha is accepted and
/// discarded.
pub fn parse_color(input: &str) -> Result<Color, ColorParseError> {
    let text = input.trim();
    if text.is_empty() {
        return Err(ColorParseError::Empty);
    }

    if let Some(hex) = text.strip_prefix('#') {
        return parse_hex(hex);
    }

    let Some((name, rest)) = text.split_once('(') else {
        if text.chars().all(|c| c.is_ascii_hexdigit()) {
            return parse_hex(text);
        }
        return Err(ColorParseError::UnknownFormat(text.to_string()));
    };
    let body = rest
        .trim_end()
        .strip_suffix(')')
        .ok_or_else(|| ColorParseError::UnknownFormat(text.to_string()))?;
    let args = split_args(body);

    match name.trim().to_ascii_lowercase().as_str() {
        "rgb" | "rgba" => parse_rgb(&args),
        "hsl" | "hsla" => parse_hsl(&args),
        "oklch" => parse_oklch(&args),
        _ => Err(ColorParseError::UnknownFormat(text.to_string())),
    }
}

fn parse_hex(hex: &str) -> Result<Color, ColorParseError> {
    let invalid = || ColorParseError::InvalidHex(format!("#{hex}"));
    if !hex.is_ascii() {
        return Err(invalid());
    }
    let digit = |i: usize| u8::from_str_radix(&hex[i..=i], 16).map_err(|_| invalid());
    let pair = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());

    let (r, g, b) = match hex.len() {
        3 | 4 => (digit(0)? * 17, digit(1)? * 17, digit(2)? * 17),
        6 | 8 => (pair(0)?, pair(2)?, pair(4)?),
        _ => return Err(invalid()),
    };
    // alpha digits must still be hex
    if hex.len() == 4 {
        digit(3)?;
    } else if hex.len() == 8 {
        pair(6)?;
    }
    Ok(Color::from_rgb8(r, g, b))
}

/// Split a function body on commas, slashes and whitespace.
fn split_args(body: &str) -> Vec<&str> {
    body.split(|c: char| c == ',' || c == '/' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .collect()
}

fn check_arity(function: &'static str, args: &[&str]) -> Result<(), ColorParseError> {
    match args.len() {
        3 => Ok(()),
        4 => alpha(function, args[3]).map(|_| ()),
        count => Err(ColorParseError::WrongArity { function, count }),
    }
}

fn parse_rgb(args: &[&str]) -> Result<Color, ColorParseError> {
    const FUNCTION: &str = "rgb";
    check_arity(FUNCTION, args)?;
    let channel = |token: &str| -> Result<f64, ColorParseError> {
        let value = match token.strip_suffix('%') {
            Some(pct) => number(FUNCTION, pct)? / 100.0,
            None => number(FUNCTION, token)? / 255.0,
        };
        Ok(value.clamp(0.0, 1.0))
    };
    Ok(Color::from_srgb(
        channel(args[0])?,
        channel(args[1])?,
        channel(args[2])?,
    ))
}

fn parse_hsl(args: &[&str]) -> Result<Color, ColorParseError> {
    const FUNCTION: &str = "hsl";
    check_arity(FUNCTION, args)?;
    // saturation and lightness are percentages with or without the sign
    let percentage = |token: &str| -> Result<f64, ColorParseError> {
        let raw = token.strip_suffix('%').unwrap_or(token);
        Ok((number(FUNCTION, raw)? / 100.0).clamp(0.0, 1.0))
    };
    Ok(Color::from_hsl(
        angle(FUNCTION, args[0])?,
        percentage(args[1])?,
        percentage(args[2])?,
    ))
}

fn parse_oklch(args: &[&str]) -> Result<Color, ColorParseError> {
    const FUNCTION: &str = "oklch";
    check_arity(FUNCTION, args)?;
    let l = match args[0].strip_suffix('%') {
        Some(pct) => number(FUNCTION, pct)? / 100.0,
        None => number(FUNCTION, args[0])?,
    };
    let chroma = match args[1].strip_suffix('%') {
        Some(pct) => number(FUNCTION, pct)? / 100.0 * OKLCH_CHROMA_PERCENT_SCALE,
        None => number(FUNCTION, args[1])?,
    };
    Ok(Color::new(l, chroma, angle(FUNCTION, args[2])?))
}

fn number(function: &'static str, token: &str) -> Result<f64, ColorParseError> {
    token
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ColorParseError::InvalidComponent {
            function,
            component: token.to_string(),
        })
}

/// Hue angle in degrees. Accepts `deg`, `rad`, `grad` and `turn` units.
fn angle(function: &'static str, token: &str) -> Result<f64, ColorParseError> {
    let lower = token.to_ascii_lowercase();
    let (raw, scale) = if let Some(v) = lower.strip_suffix("deg") {
        (v, 1.0)
    } else if let Some(v) = lower.strip_suffix("grad") {
        (v, 0.9)
    } else if let Some(v) = lower.strip_suffix("rad") {
        (v, 180.0 / std::f64::consts::PI)
    } else if let Some(v) = lower.strip_suffix("turn") {
        (v, 360.0)
    } else {
        (lower.as_str(), 1.0)
    };
    number(function, raw)
        .map(|v| v * scale)
        .map_err(|_| ColorParseError::InvalidComponent {
            function,
            component: token.to_string(),
        })
}

fn alpha(function: &'static str, token: &str) -> Result<f64, ColorParseError> {
    match token.strip_suffix('%') {
        Some(pct) => number(function, pct).map(|v| v / 100.0),
        None => number(function, token),
    }
}
