//! Static keyword and weight tables shared by the analyzers.
//!
//! Kept as plain data so each table is independently testable and tunable
//! without touching the sampling code.

use brandlens_core::{ElementRole, FontSource};

/// Sampling weight per page region. Regions not listed weigh `1.0`.
pub(crate) const REGION_WEIGHTS: &[(ElementRole, f64)] = &[
    (ElementRole::Header, 8.0),
    (ElementRole::Hero, 6.0),
    (ElementRole::Cta, 10.0),
    (ElementRole::Main, 0.3),
    (ElementRole::Footer, 0.2),
    (ElementRole::Small, 0.1),
    (ElementRole::Background, 0.05),
];

#[must_use]
pub fn region_weight(role: ElementRole) -> f64 {
    REGION_WEIGHTS
        .iter()
        .find(|(r, _)| *r == role)
        .map_or(1.0, |(_, w)| *w)
}

/// Generic and system font tokens that never identify a brand typeface.
pub(crate) const GENERIC_FONT_TOKENS: &[&str] = &[
    "-apple-system",
    "blinkmacsystemfont",
    "system-ui",
    "sans-serif",
    "serif",
    "monospace",
    "cursive",
    "fantasy",
];

/// Class keywords marking hero/banner sections.
pub(crate) const HERO_CLASS_KEYWORDS: &[&str] = &["hero", "banner", "jumbotron"];

/// Class keywords marking call-to-action anchors.
pub(crate) const CTA_CLASS_KEYWORDS: &[&str] = &["btn", "cta", "button"];

/// Class keywords marking page headers.
pub(crate) const HEADER_CLASS_KEYWORDS: &[&str] = &["header", "navbar"];

/// Class keywords marking navigation blocks.
pub(crate) const NAV_CLASS_KEYWORDS: &[&str] = &["nav", "menu"];

/// Keywords in alt/class/id/src that disqualify an image as a logo.
pub(crate) const LOGO_EXCLUDE_KEYWORDS: &[&str] = &[
    "coupon",
    "promo",
    "sale",
    "deal",
    "discount",
    "special",
    "offer",
    "badge",
    "award",
    "certification",
    "accreditation",
    "certified",
    "gallery",
    "portfolio",
    "project",
    "testimonial",
    "review",
    "people",
    "person",
    "team",
    "staff",
    "employee",
    "headshot",
    "banner",
    "hero",
    "slide",
    "carousel",
    "feature",
    "partner",
    "sponsor",
    "client",
    "customer",
    "product",
    "service",
    "work",
    "case-study",
];

/// Ancestor class keywords that mark a container whose images are never logos.
pub(crate) const PROMO_CONTAINER_KEYWORDS: &[&str] = &["promo", "sale", "hero", "carousel"];

/// Substrings identifying lazy-load placeholder URLs.
pub(crate) const LAZY_PLACEHOLDER_PATTERNS: &[&str] =
    &["placeholder", "blank", "spacer", "1x1", "transparent", "lazy"];

/// Hosted-font provider domains matched against `@font-face` src URLs.
pub(crate) const FONT_PROVIDER_DOMAINS: &[(&str, FontSource)] = &[
    ("fonts.googleapis.com", FontSource::GoogleFonts),
    ("fonts.gstatic.com", FontSource::GoogleFonts),
    ("use.typekit.net", FontSource::AdobeFonts),
    ("p.typekit.net", FontSource::AdobeFonts),
    ("fast.fonts.net", FontSource::FontsCom),
    ("cloud.typography.com", FontSource::CloudTypography),
];

/// Provider for a `@font-face` src URL; `None` means the file is served from
/// an unrecognized (self-hosted) origin.
#[must_use]
pub fn provider_for_font_src(src: &str) -> Option<FontSource> {
    let src = src.to_lowercase();
    FONT_PROVIDER_DOMAINS
        .iter()
        .find(|(domain, _)| src.contains(domain))
        .map(|(_, provider)| *provider)
}

/// Minimum additive score a logo candidate must reach to be reported.
pub const MIN_LOGO_SCORE: i32 = 80;

/// Minimum pairwise RGB distance between clustered palette entries.
pub const MIN_COLOR_DISTANCE: f64 = 50.0;

/// Maximum RGB distance for a palette color to count as present in the logo.
pub const LOGO_COLOR_MATCH_DISTANCE: f64 = 30.0;
