use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Semantic role assigned to a palette entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorRole {
    Primary,
    Secondary,
    Accent,
    Light,
    Dark,
    Brand,
}

impl fmt::Display for ColorRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColorRole::Primary => "primary",
            ColorRole::Secondary => "secondary",
            ColorRole::Accent => "accent",
            ColorRole::Light => "light",
            ColorRole::Dark => "dark",
            ColorRole::Brand => "brand",
        };
        write!(f, "{name}")
    }
}

/// Page region an element was classified into when its colors were sampled.
///
/// Each region carries a sampling weight; see the analyzer's weight table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementRole {
    Header,
    Hero,
    Cta,
    Main,
    Footer,
    Small,
    Background,
}

/// Style channel a color was sampled from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorChannel {
    Background,
    Text,
    Border,
}

/// WCAG contrast ratios computed for one palette entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContrastReport {
    pub vs_white: f64,
    pub vs_black: f64,
    /// Contrast against the palette's primary color, when one exists.
    pub vs_primary: Option<f64>,
}

/// One color in the extracted brand palette.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaletteEntry {
    /// Lowercase `#rrggbb`.
    pub hex: String,
    pub rgb: [u8; 3],
    pub role: ColorRole,
    /// Number of element/channel samples that produced this color.
    pub frequency: u32,
    /// Share of the total weighted area, 0–100.
    pub coverage: f64,
    /// Heuristic certainty, 0–0.99.
    pub confidence: f64,
    /// Regions the color was observed in.
    pub roles: BTreeSet<ElementRole>,
    /// Style channels the color was observed on.
    pub channels: BTreeSet<ColorChannel>,
    pub contrast: Option<ContrastReport>,
    /// Set by the orchestrator when the color also appears in the logo.
    pub in_logo: bool,
    /// Entry was added past the diversity filter to fill the requested count.
    pub backfill: bool,
}

/// Non-scoring page metadata collected alongside the palette.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaletteMeta {
    /// `<meta name="theme-color">` content, verbatim.
    pub theme_color: Option<String>,
    /// `<link rel="manifest">` href, verbatim.
    pub manifest: Option<String>,
    /// Elements that contributed at least one color sample.
    pub sampled_elements: usize,
    /// Distinct qualifying colors before clustering.
    pub distinct_colors: usize,
}

/// Output of the color analyzer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColorExtraction {
    pub palette: Vec<PaletteEntry>,
    pub meta: PaletteMeta,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_role_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&ColorRole::Primary).unwrap(),
            "\"primary\""
        );
        assert_eq!(ColorRole::Secondary.to_string(), "secondary");
    }

    #[test]
    fn palette_entry_round_trips() {
        let entry = PaletteEntry {
            hex: "#1a73e8".to_string(),
            rgb: [26, 115, 232],
            role: ColorRole::Primary,
            frequency: 12,
            coverage: 41.5,
            confidence: 0.8,
            roles: BTreeSet::from([ElementRole::Header]),
            channels: BTreeSet::from([ColorChannel::Background]),
            contrast: None,
            in_logo: false,
            backfill: false,
        };
        let json = serde_json::to_string(&entry).unwrap();
        let back: PaletteEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(back.hex, entry.hex);
        assert_eq!(back.role, ColorRole::Primary);
        assert!(back.roles.contains(&ElementRole::Header));
    }
}
