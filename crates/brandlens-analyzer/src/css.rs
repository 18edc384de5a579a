//! Parsing for computed CSS values: colors, lengths, weights, font lists.
//!
//! Per-element parse failures return `None`; the analyzers skip those
//! elements rather than propagating errors.

use std::sync::LazyLock;

use regex::Regex;

use crate::tables::GENERIC_FONT_TOKENS;

static RGB_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)rgba?\(\s*(\d{1,3})\s*,\s*(\d{1,3})\s*,\s*(\d{1,3})\s*(?:,\s*([\d.]+)\s*)?\)")
        .expect("valid rgb regex")
});

static PX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*([\d.]+)").expect("valid px regex"));

/// A parsed CSS color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ParsedColor {
    pub rgb: [u8; 3],
    pub alpha: f64,
}

impl ParsedColor {
    pub(crate) fn is_transparent(self) -> bool {
        self.alpha <= 0.0
    }
}

/// Parses `#rgb`, `#rrggbb`, `rgb()`, `rgba()`, and `transparent`.
pub(crate) fn parse_color(value: &str) -> Option<ParsedColor> {
    let value = value.trim();
    if value.eq_ignore_ascii_case("transparent") {
        return Some(ParsedColor {
            rgb: [0, 0, 0],
            alpha: 0.0,
        });
    }
    if let Some(hex) = value.strip_prefix('#') {
        return parse_hex(hex);
    }
    let caps = RGB_RE.captures(value)?;
    let channel = |i: usize| -> Option<u8> { caps.get(i)?.as_str().parse().ok() };
    let alpha = match caps.get(4) {
        Some(m) => m.as_str().parse().ok()?,
        None => 1.0,
    };
    Some(ParsedColor {
        rgb: [channel(1)?, channel(2)?, channel(3)?],
        alpha,
    })
}

fn parse_hex(hex: &str) -> Option<ParsedColor> {
    let expanded: String = match hex.len() {
        3 => hex.chars().flat_map(|c| [c, c]).collect(),
        6 => hex.to_string(),
        _ => return None,
    };
    let byte = |i: usize| u8::from_str_radix(&expanded[i..i + 2], 16).ok();
    Some(ParsedColor {
        rgb: [byte(0)?, byte(2)?, byte(4)?],
        alpha: 1.0,
    })
}

/// Lowercase `#rrggbb` for an RGB triple.
pub(crate) fn hex(rgb: [u8; 3]) -> String {
    format!("#{:02x}{:02x}{:02x}", rgb[0], rgb[1], rgb[2])
}

/// Leading numeric value of a CSS length (`"16px"` → `16.0`).
pub(crate) fn parse_px(value: &str) -> Option<f64> {
    let caps = PX_RE.captures(value)?;
    caps.get(1)?.as_str().parse().ok()
}

/// Computed font weight as a number; keywords map to their CSS equivalents
/// and anything unrecognized falls back to 400.
pub(crate) fn parse_font_weight(value: Option<&str>) -> u32 {
    let Some(value) = value else { return 400 };
    match value.trim().to_lowercase().as_str() {
        "normal" => 400,
        "bold" => 700,
        "lighter" => 300,
        "bolder" => 700,
        other => other.parse().unwrap_or(400),
    }
}

/// Line height in pixels. Unitless multipliers scale `font_size`; `normal`
/// and unparseable values fall back to `font_size × 1.2`.
pub(crate) fn parse_line_height(value: Option<&str>, font_size: f64) -> f64 {
    let Some(value) = value else {
        return font_size * 1.2;
    };
    let trimmed = value.trim();
    if trimmed.eq_ignore_ascii_case("normal") {
        return font_size * 1.2;
    }
    let Some(number) = parse_px(trimmed) else {
        return font_size * 1.2;
    };
    if trimmed.ends_with("px") {
        number
    } else if number <= 4.0 {
        // Bare multiplier ("1.5").
        number * font_size
    } else {
        number
    }
}

/// First concrete family from a CSS font-family list.
///
/// Strips quotes, skips generic and system tokens, and returns `None` when
/// nothing concrete remains.
pub(crate) fn first_concrete_family(value: &str) -> Option<String> {
    for token in value.split(',') {
        let token = token.trim().trim_matches(|c| c == '"' || c == '\'').trim();
        if token.is_empty() {
            continue;
        }
        let lower = token.to_lowercase();
        if GENERIC_FONT_TOKENS.contains(&lower.as_str()) {
            continue;
        }
        return Some(token.to_string());
    }
    None
}
