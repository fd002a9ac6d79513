//! Pulling colors out of free-form text (pasted lists, stylesheets, notes).

use std::sync::LazyLock;

use regex::Regex;

use crate::color::Color;

static COLOR_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)#(?:[0-9a-f]{8}|[0-9a-f]{6}|[0-9a-f]{3,4})\b|\b(?:rgba?|hsla?|oklch)\([^)]*\)")
        .expect("color token pattern is valid")
});

/// Every hex or functional-notation color in `text`, in order of appearance.
/// Tokens that look like colors but do not parse become black.
pub fn scan_colors(text: &str) -> Vec<Color> {
    COLOR_TOKEN
        .find_iter(text)
        .map(|m| Color::parse_lossy(m.as_str()))
        .collect()
}

/// Split a pasted list on newlines and commas, leaving commas inside
/// parentheses alone, and parse each entry best-effort.
pub fn split_color_list(text: &str) -> Vec<Color> {
    let mut entries = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, ch) in text.char_indices() {
        match ch {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ',' | '\n' if depth == 0 => {
                entries.push(&text[start..i]);
                start = i + ch.len_utf8();
            }
            _ => {}
        }
    }
    entries.push(&text[start..]);

    entries
        .into_iter()
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(Color::parse_lossy)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hexes(colors: &[Color]) -> Vec<String> {
        colors.iter().map(|c| c.to_hex()).collect()
    }

    #[test]
    fn scans_hex_and_functions_in_order() {
        let css = "body { color: #333; background: rgb(255, 255, 255); }\n\
                   a:hover { color: hsl(0, 100%, 50%) } .x { fill: #00FF00 }";
        assert_eq!(
            hexes(&scan_colors(css)),
            vec!["#333333", "#ffffff", "#ff0000", "#00ff00"]
        );
    }

    #[test]
    fn scan_finds_oklch() {
        let colors = scan_colors("accent: oklch(0.7 0.1 200);");
        assert_eq!(colors.len(), 1);
        assert!((colors[0].hue() - 200.0).abs() < 1e-9);
    }

    #[test]
    fn scan_ignores_plain_words() {
        assert!(scan_colors("nothing to see here, #notacolor").is_empty());
    }

    #[test]
    fn scan_skips_five_and_seven_digit_hex() {
        let text = "ids #12345 and #abcdef1, colors #abcd and #11223344";
        assert_eq!(hexes(&scan_colors(text)), vec!["#aabbcc", "#112233"]);
    }

    #[test]
    fn split_keeps_functional_commas_together() {
        let list = "#ff0000, rgb(0, 0, 255)\n#0f0\n\n";
        assert_eq!(
            hexes(&split_color_list(list)),
            vec!["#ff0000", "#0000ff", "#00ff00"]
        );
    }

    #[test]
    fn split_degrades_bad_entries_to_black() {
        assert_eq!(
            hexes(&split_color_list("#fff, bogus")),
            vec!["#ffffff", "#000000"]
        );
    }
}
