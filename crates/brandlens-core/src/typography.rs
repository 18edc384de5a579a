use std::fmt;

use serde::{Deserialize, Serialize};

/// Where a font family is served from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FontSource {
    GoogleFonts,
    AdobeFonts,
    FontsCom,
    CloudTypography,
    SelfHosted,
    System,
}

impl fmt::Display for FontSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FontSource::GoogleFonts => "google-fonts",
            FontSource::AdobeFonts => "adobe-fonts",
            FontSource::FontsCom => "fonts-com",
            FontSource::CloudTypography => "cloud-typography",
            FontSource::SelfHosted => "self-hosted",
            FontSource::System => "system",
        };
        write!(f, "{name}")
    }
}

/// Winning (family, weight) group for one heading level.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeadingStyle {
    pub family: String,
    pub weight: u32,
    /// Average font size across the level's samples, rounded to whole px.
    pub size: f64,
    pub count: u32,
    /// Up to three truncated text samples.
    pub examples: Vec<String>,
    /// Accumulated visual weight of the winning group.
    pub coverage: f64,
}

/// A font family assigned to one of the display/body/accent roles.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FontRoleEntry {
    pub family: String,
    /// Every weight observed for this family anywhere on the page, ascending.
    pub weights: Vec<u32>,
    /// Text categories the winning observation appeared in.
    pub used_in: Vec<String>,
    pub avg_size: f64,
    /// Share of the page's total visual weight, 0–100.
    pub coverage: f64,
    /// Heuristic certainty, 0–0.99.
    pub confidence: f64,
    pub source: FontSource,
}

/// Typography hierarchy extracted from one snapshot.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TypographyResult {
    /// Index 0 is `<h1>`, index 5 is `<h6>`.
    pub headings: [Option<HeadingStyle>; 6],
    pub display: Option<FontRoleEntry>,
    pub body: Option<FontRoleEntry>,
    pub accent: Option<FontRoleEntry>,
}

impl TypographyResult {
    /// Heading style for `level` 1–6, if one was observed.
    #[must_use]
    pub fn heading(&self, level: u8) -> Option<&HeadingStyle> {
        match level {
            1..=6 => self.headings[usize::from(level) - 1].as_ref(),
            _ => None,
        }
    }
}
