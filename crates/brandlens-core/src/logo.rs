use serde::{Deserialize, Serialize};

/// A scored logo candidate image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogoCandidate {
    /// Absolute URL, resolved against the page base.
    pub url: String,
    pub alt: Option<String>,
    pub width: f64,
    pub height: f64,
    pub aspect_ratio: f64,
    pub in_header: bool,
    pub in_footer: bool,
    pub has_logo_keyword: bool,
    /// Additive heuristic score; candidates below the minimum are dropped.
    pub score: i32,
}

/// A validated favicon link.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Favicon {
    pub url: String,
    /// Normalized `rel` attribute (`icon`, `apple-touch-icon`, ...).
    pub rel: String,
    /// Declared `sizes` dimensions, when the link carried them.
    pub sizes: Option<(u32, u32)>,
}

/// One dominant color sampled from the winning logo's pixels.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogoColor {
    pub hex: String,
    pub frequency: u32,
}

/// Output of the logo detector.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LogoResult {
    pub primary: Option<LogoCandidate>,
    /// Runner-up candidates, at most four.
    pub alternates: Vec<LogoCandidate>,
    pub favicons: Vec<Favicon>,
    /// Top dominant colors of the primary logo; `None` when pixel sampling
    /// failed or no candidate survived.
    pub logo_colors: Option<Vec<LogoColor>>,
}
