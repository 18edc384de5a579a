//! Area-weighted brand color extraction.
//!
//! Samples background/text/border colors from every qualifying element,
//! weights them by page region, clusters the result for diversity, and labels
//! each surviving color with a semantic role.

use std::collections::{BTreeSet, HashMap};

use brandlens_core::{
    ColorChannel, ColorExtraction, ColorRole, ContrastReport, ElementRole, ExtractOptions,
    PaletteEntry, PaletteMeta,
};
use brandlens_snapshot::{ElementSample, PageSnapshot, Tag, Viewport};

use crate::contrast::{contrast_ratio, BLACK, WHITE};
use crate::css;
use crate::error::AnalyzerError;
use crate::tables::{
    region_weight, CTA_CLASS_KEYWORDS, HEADER_CLASS_KEYWORDS, HERO_CLASS_KEYWORDS,
    MIN_COLOR_DISTANCE,
};

/// Elements smaller than this contribute too little paint to matter.
const MIN_ELEMENT_AREA: f64 = 100.0;

const MAX_EXAMPLES: usize = 5;

/// Per-color accumulator, keyed by hex. Lives for one call only.
struct ColorObservation {
    hex: String,
    rgb: [u8; 3],
    frequency: u32,
    raw_area: f64,
    weighted_area: f64,
    roles: BTreeSet<ElementRole>,
    channels: BTreeSet<ColorChannel>,
    examples: Vec<String>,
}

/// Extracts the brand color palette from one snapshot.
///
/// Zero qualifying elements yield an empty palette, not an error.
///
/// # Errors
///
/// Returns [`AnalyzerError::Snapshot`] when the viewport has no area (a
/// provider contract violation — region classification needs it).
pub fn extract_brand_colors(
    snapshot: &PageSnapshot,
    options: &ExtractOptions,
) -> Result<ColorExtraction, AnalyzerError> {
    if snapshot.viewport.width <= 0.0 || snapshot.viewport.height <= 0.0 {
        return Err(AnalyzerError::Snapshot {
            reason: format!(
                "viewport has no area ({}x{})",
                snapshot.viewport.width, snapshot.viewport.height
            ),
        });
    }

    let viewport = snapshot.viewport;
    let mut observations: HashMap<String, ColorObservation> = HashMap::new();
    let mut sampled_elements = 0usize;

    for el in snapshot.visible_elements() {
        if options.third_party_filter
            && el
                .iframe_host
                .as_deref()
                .is_some_and(|host| snapshot.is_third_party_host(host))
        {
            continue;
        }
        if el.rect.area() < MIN_ELEMENT_AREA {
            continue;
        }
        // Only elements near the fold: one viewport above, two below.
        if el.rect.bottom() < -viewport.height || el.rect.y > viewport.height * 2.0 {
            continue;
        }

        let role = classify_region(el, &viewport);
        let weight = region_weight(role);
        let mut sampled_any = false;

        let channels = [
            (ColorChannel::Background, el.style.background_color.as_deref()),
            (ColorChannel::Text, el.style.color.as_deref()),
            (ColorChannel::Border, el.style.border_color.as_deref()),
        ];
        for (channel, value) in channels {
            // The body background is the page canvas, not a brand color.
            if channel == ColorChannel::Background && el.tag == Tag::Body {
                continue;
            }
            let Some(value) = value else { continue };
            let Some(parsed) = css::parse_color(value) else {
                continue;
            };
            if parsed.is_transparent() || !is_brandable(parsed.rgb) {
                continue;
            }
            record(&mut observations, parsed.rgb, role, channel, el, weight);
            sampled_any = true;
        }
        if sampled_any {
            sampled_elements += 1;
        }
    }

    let total_weighted: f64 = observations.values().map(|o| o.weighted_area).sum();
    let mut ranked: Vec<ColorObservation> = observations.into_values().collect();
    ranked.sort_by(|a, b| {
        b.weighted_area
            .total_cmp(&a.weighted_area)
            .then_with(|| a.hex.cmp(&b.hex))
    });
    let distinct_colors = ranked.len();

    let selected = diversity_cluster(&ranked, options.color_count);
    let mut palette: Vec<PaletteEntry> = selected
        .into_iter()
        .enumerate()
        .map(|(index, (obs, backfill))| build_entry(index, obs, backfill, total_weighted))
        .collect();

    if options.include_contrast {
        attach_contrast(&mut palette);
    }

    tracing::debug!(
        colors = palette.len(),
        distinct = distinct_colors,
        elements = sampled_elements,
        "extracted brand colors"
    );

    Ok(ColorExtraction {
        palette,
        meta: PaletteMeta {
            theme_color: snapshot.theme_color.clone(),
            manifest: snapshot.manifest_href.clone(),
            sampled_elements,
            distinct_colors,
        },
    })
}

/// Classifies the page region an element paints into, in priority order.
fn classify_region(el: &ElementSample, viewport: &Viewport) -> ElementRole {
    if el.tag == Tag::Body {
        return ElementRole::Background;
    }
    if matches!(el.tag, Tag::Header | Tag::Nav)
        || el.class_contains_any(HEADER_CLASS_KEYWORDS)
        || el.rect.y < 100.0
    {
        return ElementRole::Header;
    }
    if el.class_contains_any(HERO_CLASS_KEYWORDS) {
        return ElementRole::Hero;
    }
    if el.tag == Tag::Button || (el.tag == Tag::A && el.class_contains_any(CTA_CLASS_KEYWORDS)) {
        return ElementRole::Cta;
    }
    if el.tag == Tag::Footer || el.class_contains("footer") {
        return ElementRole::Footer;
    }
    if el.rect.height < 20.0 || el.rect.width < 50.0 {
        return ElementRole::Small;
    }
    if el.rect.area() > viewport.area() * 0.5 {
        return ElementRole::Background;
    }
    ElementRole::Main
}

/// Whether a color is saturated and mid-toned enough to be a brand color.
fn is_brandable(rgb: [u8; 3]) -> bool {
    let [r, g, b] = [f64::from(rgb[0]), f64::from(rgb[1]), f64::from(rgb[2])];
    let mean = (r + g + b) / 3.0;
    if !(30.0..=240.0).contains(&mean) {
        return false;
    }
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let lightness = (max + min) / 2.0;
    if !(40.0..=220.0).contains(&lightness) {
        return false;
    }
    let delta = max - min;
    if delta <= 0.0 {
        return false;
    }
    let saturation = delta / (255.0 - (2.0 * lightness - 255.0).abs());
    saturation >= 0.15
}

fn record(
    observations: &mut HashMap<String, ColorObservation>,
    rgb: [u8; 3],
    role: ElementRole,
    channel: ColorChannel,
    el: &ElementSample,
    weight: f64,
) {
    let hex = css::hex(rgb);
    let area = el.rect.area();
    let obs = observations
        .entry(hex.clone())
        .or_insert_with(|| ColorObservation {
            hex,
            rgb,
            frequency: 0,
            raw_area: 0.0,
            weighted_area: 0.0,
            roles: BTreeSet::new(),
            channels: BTreeSet::new(),
            examples: Vec::new(),
        });
    obs.frequency += 1;
    obs.raw_area += area;
    obs.weighted_area += area * weight;
    obs.roles.insert(role);
    obs.channels.insert(channel);
    if obs.examples.len() < MAX_EXAMPLES {
        obs.examples.push(describe(el));
    }
}

fn describe(el: &ElementSample) -> String {
    match el.classes.split_whitespace().next() {
        Some(class) => format!("{}.{class}", el.tag.name()),
        None => el.tag.name().to_string(),
    }
}

/// Greedy diversity selection: walk candidates by weighted area and keep any
/// that sit at least [`MIN_COLOR_DISTANCE`] from everything already chosen.
/// When the page has too few diverse colors, remaining slots backfill in rank
/// order regardless of distance; those entries are flagged.
fn diversity_cluster(
    ranked: &[ColorObservation],
    count: usize,
) -> Vec<(&ColorObservation, bool)> {
    let mut picked: Vec<(&ColorObservation, bool)> = Vec::new();
    for obs in ranked {
        if picked.len() >= count {
            break;
        }
        if picked
            .iter()
            .all(|(p, _)| rgb_distance(p.rgb, obs.rgb) >= MIN_COLOR_DISTANCE)
        {
            picked.push((obs, false));
        }
    }
    if picked.len() < count {
        for obs in ranked {
            if picked.len() >= count {
                break;
            }
            if picked.iter().any(|(p, _)| p.hex == obs.hex) {
                continue;
            }
            picked.push((obs, true));
        }
    }
    picked
}

pub(crate) fn rgb_distance(a: [u8; 3], b: [u8; 3]) -> f64 {
    let dr = f64::from(a[0]) - f64::from(b[0]);
    let dg = f64::from(a[1]) - f64::from(b[1]);
    let db = f64::from(a[2]) - f64::from(b[2]);
    (dr * dr + dg * dg + db * db).sqrt()
}

fn build_entry(
    index: usize,
    obs: &ColorObservation,
    backfill: bool,
    total_weighted: f64,
) -> PaletteEntry {
    let coverage = if total_weighted > 0.0 {
        obs.weighted_area / total_weighted * 100.0
    } else {
        0.0
    };
    let confidence =
        (0.5 + f64::from(obs.frequency) / 100.0 + coverage / 100.0 * 0.3).min(0.99);
    PaletteEntry {
        hex: obs.hex.clone(),
        rgb: obs.rgb,
        role: label_role(index, obs),
        frequency: obs.frequency,
        coverage,
        confidence,
        roles: obs.roles.clone(),
        channels: obs.channels.clone(),
        contrast: None,
        in_logo: false,
        backfill,
    }
}

fn label_role(index: usize, obs: &ColorObservation) -> ColorRole {
    match index {
        0 => ColorRole::Primary,
        1 => ColorRole::Secondary,
        _ => {
            if obs.roles.contains(&ElementRole::Cta)
                || obs.channels.contains(&ColorChannel::Background)
            {
                ColorRole::Accent
            } else {
                let [r, g, b] = obs.rgb;
                let brightness =
                    (f64::from(r) * 299.0 + f64::from(g) * 587.0 + f64::from(b) * 114.0) / 1000.0;
                if brightness > 200.0 {
                    ColorRole::Light
                } else if brightness < 60.0 {
                    ColorRole::Dark
                } else {
                    ColorRole::Brand
                }
            }
        }
    }
}

fn attach_contrast(palette: &mut [PaletteEntry]) {
    let primary_rgb = palette
        .iter()
        .find(|entry| entry.role == ColorRole::Primary)
        .map(|entry| entry.rgb);
    for entry in palette {
        entry.contrast = Some(ContrastReport {
            vs_white: contrast_ratio(entry.rgb, WHITE),
            vs_black: contrast_ratio(entry.rgb, BLACK),
            vs_primary: primary_rgb.map(|p| contrast_ratio(entry.rgb, p)),
        });
    }
}

#[cfg(test)]
#[path = "color_test.rs"]
mod tests;
