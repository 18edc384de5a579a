//! Orchestration of the three analyzers over one snapshot.
//!
//! Each stage runs in isolation: a failing stage is recorded in the profile's
//! `errors` and leaves its result empty while the remaining stages still run.
//! Only an unusable snapshot makes the whole extraction unsuccessful.

use std::time::Instant;

use chrono::Utc;

use brandlens_core::{BrandProfile, ExtractOptions, LogoColor, PaletteEntry, StageError};
use brandlens_probe::ProbeClient;
use brandlens_snapshot::PageSnapshot;

use crate::color::{extract_brand_colors, rgb_distance};
use crate::css;
use crate::logo::detect_logos;
use crate::tables::LOGO_COLOR_MATCH_DISTANCE;
use crate::typography::extract_brand_fonts;

/// Runs color, typography, and logo extraction and assembles the profile.
///
/// Stages are sequenced for clarity; they only read the snapshot, so nothing
/// depends on the order. Recovered stage failures keep `success = true`; only
/// a snapshot without a viewport (provider contract violation) yields an
/// unsuccessful profile.
pub async fn extract_brand_profile(
    snapshot: &PageSnapshot,
    base_url: &str,
    options: &ExtractOptions,
    probe: &ProbeClient,
) -> BrandProfile {
    let started = Instant::now();

    if snapshot.viewport.width <= 0.0 || snapshot.viewport.height <= 0.0 {
        tracing::warn!(
            width = snapshot.viewport.width,
            height = snapshot.viewport.height,
            "snapshot has no viewport; aborting extraction"
        );
        return BrandProfile::failed(
            StageError {
                stage: "snapshot".to_string(),
                message: "snapshot viewport has no area".to_string(),
            },
            elapsed_ms(&started),
        );
    }

    let mut errors: Vec<StageError> = Vec::new();

    let (mut palette, palette_meta) = match extract_brand_colors(snapshot, options) {
        Ok(extraction) => (extraction.palette, Some(extraction.meta)),
        Err(e) => {
            tracing::warn!(stage = "colors", error = %e, "color extraction failed");
            errors.push(StageError {
                stage: "colors".to_string(),
                message: e.to_string(),
            });
            (Vec::new(), None)
        }
    };

    let typography = Some(extract_brand_fonts(snapshot).await);

    let logos = match detect_logos(snapshot, base_url, probe).await {
        Ok(result) => Some(result),
        Err(e) => {
            tracing::warn!(stage = "logos", error = %e, "logo detection failed");
            errors.push(StageError {
                stage: "logos".to_string(),
                message: e.to_string(),
            });
            None
        }
    };

    if let Some(logo_colors) = logos.as_ref().and_then(|l| l.logo_colors.as_deref()) {
        cross_validate(&mut palette, logo_colors);
    }

    let duration_ms = elapsed_ms(&started);
    tracing::info!(
        colors = palette.len(),
        errors = errors.len(),
        duration_ms,
        "brand extraction finished"
    );

    BrandProfile {
        palette,
        palette_meta,
        typography,
        logos,
        errors,
        success: true,
        duration_ms,
        extracted_at: Utc::now(),
    }
}

/// Marks palette entries that also appear among the logo's dominant colors
/// and boosts their confidence.
fn cross_validate(palette: &mut [PaletteEntry], logo_colors: &[LogoColor]) {
    for entry in palette {
        let matched = logo_colors
            .iter()
            .filter_map(|lc| css::parse_color(&lc.hex))
            .any(|lc| rgb_distance(entry.rgb, lc.rgb) <= LOGO_COLOR_MATCH_DISTANCE);
        entry.in_logo = matched;
        if matched {
            entry.confidence = (entry.confidence + 0.1).min(0.99);
        }
    }
}

fn elapsed_ms(started: &Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use brandlens_core::{ColorChannel, ColorRole, ElementRole};
    use std::collections::BTreeSet;

    fn entry(hex: &str, rgb: [u8; 3], confidence: f64) -> PaletteEntry {
        PaletteEntry {
            hex: hex.to_string(),
            rgb,
            role: ColorRole::Primary,
            frequency: 5,
            coverage: 50.0,
            confidence,
            roles: BTreeSet::from([ElementRole::Header]),
            channels: BTreeSet::from([ColorChannel::Background]),
            contrast: None,
            in_logo: false,
            backfill: false,
        }
    }

    #[test]
    fn close_logo_colors_mark_and_boost() {
        let mut palette = vec![
            entry("#1a73e8", [26, 115, 232], 0.7),
            entry("#c0392b", [192, 57, 43], 0.7),
        ];
        let logo_colors = vec![LogoColor {
            // 10 units away from #1a73e8 in RGB.
            hex: "#2077ea".to_string(),
            frequency: 40,
        }];
        cross_validate(&mut palette, &logo_colors);
        assert!(palette[0].in_logo);
        assert!((palette[0].confidence - 0.8).abs() < 1e-12);
        assert!(!palette[1].in_logo);
        assert!((palette[1].confidence - 0.7).abs() < 1e-12);
    }

    #[test]
    fn boost_caps_at_ninety_nine() {
        let mut palette = vec![entry("#1a73e8", [26, 115, 232], 0.95)];
        let logo_colors = vec![LogoColor {
            hex: "#1a73e8".to_string(),
            frequency: 10,
        }];
        cross_validate(&mut palette, &logo_colors);
        assert!((palette[0].confidence - 0.99).abs() < 1e-12);
    }
}
