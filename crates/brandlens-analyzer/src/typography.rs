//! Visual-weight-based typography extraction.
//!
//! Every text element contributes a (family, weight) observation scored by
//! how much ink it puts on the page; the heaviest observations win the
//! heading, display, body, and accent roles.

use std::collections::{BTreeSet, HashMap};

use brandlens_core::{FontRoleEntry, FontSource, HeadingStyle, TypographyResult};
use brandlens_snapshot::{ElementSample, PageSnapshot, Tag};

use crate::css;
use crate::tables::{
    provider_for_font_src, CTA_CLASS_KEYWORDS, HERO_CLASS_KEYWORDS, NAV_CLASS_KEYWORDS,
};

/// Text shorter than this carries no typographic signal.
const MIN_TEXT_LEN: usize = 3;

/// Elements smaller than this are skipped.
const MIN_TEXT_AREA: f64 = 50.0;

const MAX_HEADING_EXAMPLES: usize = 3;
const EXAMPLE_TRUNCATE: usize = 60;

/// Buckets a text observation routes into for role assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FontBucket {
    Display,
    Body,
    Accent,
    Other,
}

impl FontBucket {
    fn index(self) -> usize {
        match self {
            FontBucket::Display => 0,
            FontBucket::Body => 1,
            FontBucket::Accent => 2,
            FontBucket::Other => 3,
        }
    }
}

/// Coarse category of a non-heading text element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TextCategory {
    Hero,
    Cta,
    Quote,
    Navigation,
    Body,
    Link,
    Other,
}

impl TextCategory {
    fn bucket(self) -> FontBucket {
        match self {
            TextCategory::Hero | TextCategory::Cta => FontBucket::Display,
            TextCategory::Quote | TextCategory::Navigation => FontBucket::Accent,
            TextCategory::Body => FontBucket::Body,
            TextCategory::Link | TextCategory::Other => FontBucket::Other,
        }
    }

    fn name(self) -> &'static str {
        match self {
            TextCategory::Hero => "hero",
            TextCategory::Cta => "cta",
            TextCategory::Quote => "quote",
            TextCategory::Navigation => "navigation",
            TextCategory::Body => "body",
            TextCategory::Link => "link",
            TextCategory::Other => "other",
        }
    }
}

/// Per-(family, weight) accumulator. Lives for one call only.
struct FontObservation {
    family: String,
    weight: u32,
    count: u32,
    weight_sum: f64,
    bucket_weights: [f64; 4],
    size_sum: f64,
    categories: BTreeSet<&'static str>,
    source: FontSource,
}

impl FontObservation {
    fn avg_size(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.size_sum / f64::from(self.count)
        }
    }

    fn bucket_weight(&self, bucket: FontBucket) -> f64 {
        self.bucket_weights[bucket.index()]
    }
}

struct HeadingGroup {
    family: String,
    weight: u32,
    count: u32,
    weight_sum: f64,
    size_sum: f64,
    examples: Vec<String>,
}

/// Extracts the typography hierarchy from one snapshot.
///
/// Waits for the snapshot's fonts-ready barrier before sampling so computed
/// families reflect loaded webfonts, not fallbacks. Per-element parse
/// failures are skipped; an empty page yields all-null roles.
pub async fn extract_brand_fonts(snapshot: &PageSnapshot) -> TypographyResult {
    snapshot.fonts().wait().await;

    let mut per_level: [HashMap<(String, u32), HeadingGroup>; 6] =
        std::array::from_fn(|_| HashMap::new());
    let mut index: HashMap<(String, u32), FontObservation> = HashMap::new();

    for el in snapshot.visible_elements() {
        let Some(text) = el.text.as_deref().map(str::trim) else {
            continue;
        };
        if text.chars().count() < MIN_TEXT_LEN || el.rect.area() < MIN_TEXT_AREA {
            continue;
        }
        let Some(sample) = sample_font(snapshot, el, text) else {
            continue;
        };

        if let Some(level) = el.tag.heading_level() {
            fold_heading(&mut per_level[usize::from(level) - 1], &sample, text);
            fold_index(&mut index, &sample, FontBucket::Other, "heading");
        } else if is_text_tag(el.tag) {
            let category = classify_text(el);
            fold_index(&mut index, &sample, category.bucket(), category.name());
        }
    }

    let headings = build_headings(per_level);
    let total_weight: f64 = index.values().map(|o| o.weight_sum).sum();
    let observations: Vec<&FontObservation> = index.values().collect();

    let display = pick_display(&observations);
    let body = pick_body(&observations, display);
    let accent = pick_accent(&observations, display, body);

    let result = TypographyResult {
        headings,
        display: display.map(|o| role_entry(o, &observations, total_weight, RoleKind::Display)),
        body: body.map(|o| role_entry(o, &observations, total_weight, RoleKind::Body)),
        accent: accent.map(|o| role_entry(o, &observations, total_weight, RoleKind::Accent)),
    };
    tracing::debug!(
        families = observations.len(),
        display = result.display.as_ref().map(|r| r.family.as_str()),
        body = result.body.as_ref().map(|r| r.family.as_str()),
        "extracted brand fonts"
    );
    result
}

struct FontSample {
    family: String,
    weight: u32,
    size: f64,
    visual_weight: f64,
    source: FontSource,
}

fn sample_font(snapshot: &PageSnapshot, el: &ElementSample, text: &str) -> Option<FontSample> {
    let family = css::first_concrete_family(el.style.font_family.as_deref()?)?;
    let size = el
        .style
        .font_size
        .as_deref()
        .and_then(css::parse_px)
        .unwrap_or(16.0);
    let weight = css::parse_font_weight(el.style.font_weight.as_deref());
    let line_height = css::parse_line_height(el.style.line_height.as_deref(), size);

    #[allow(clippy::cast_precision_loss)]
    let char_count = text.chars().count() as f64;
    let visual_weight = visual_weight(char_count, size, line_height, el.rect.width);

    Some(FontSample {
        source: detect_source(snapshot, &family),
        family,
        weight,
        size,
        visual_weight,
    })
}

/// Visual weight of one text block: char count × font size × line height ×
/// estimated line count. The line estimate is a crude width/char-width ratio;
/// downstream thresholds are tuned against exactly this approximation.
fn visual_weight(char_count: f64, font_size: f64, line_height: f64, width: f64) -> f64 {
    let estimated_lines = if width > 0.0 {
        (char_count * font_size * 0.6 / width).ceil().max(1.0)
    } else {
        1.0
    };
    char_count * font_size * line_height * estimated_lines
}

fn is_text_tag(tag: Tag) -> bool {
    matches!(
        tag,
        Tag::P
            | Tag::Div
            | Tag::Span
            | Tag::A
            | Tag::Button
            | Tag::Blockquote
            | Tag::Q
            | Tag::Li
            | Tag::Td
            | Tag::Th
            | Tag::Label
    )
}

fn classify_text(el: &ElementSample) -> TextCategory {
    if el.class_contains_any(HERO_CLASS_KEYWORDS)
        || (el.rect.y < 200.0 && el.rect.height > 200.0)
    {
        return TextCategory::Hero;
    }
    if el.tag == Tag::Button || (el.tag == Tag::A && el.class_contains_any(CTA_CLASS_KEYWORDS)) {
        return TextCategory::Cta;
    }
    if matches!(el.tag, Tag::Blockquote | Tag::Q) || el.class_contains("quote") {
        return TextCategory::Quote;
    }
    if el.tag == Tag::Nav || el.class_contains_any(NAV_CLASS_KEYWORDS) {
        return TextCategory::Navigation;
    }
    match el.tag {
        Tag::P | Tag::Div | Tag::Span => TextCategory::Body,
        Tag::A => TextCategory::Link,
        _ => TextCategory::Other,
    }
}

fn detect_source(snapshot: &PageSnapshot, family: &str) -> FontSource {
    match snapshot.font_face_sources.get(&family.to_lowercase()) {
        Some(src) => provider_for_font_src(src).unwrap_or(FontSource::SelfHosted),
        None => FontSource::System,
    }
}

fn fold_heading(
    groups: &mut HashMap<(String, u32), HeadingGroup>,
    sample: &FontSample,
    text: &str,
) {
    let group = groups
        .entry((sample.family.clone(), sample.weight))
        .or_insert_with(|| HeadingGroup {
            family: sample.family.clone(),
            weight: sample.weight,
            count: 0,
            weight_sum: 0.0,
            size_sum: 0.0,
            examples: Vec::new(),
        });
    group.count += 1;
    group.weight_sum += sample.visual_weight;
    group.size_sum += sample.size;
    if group.examples.len() < MAX_HEADING_EXAMPLES {
        group.examples.push(truncate(text));
    }
}

fn fold_index(
    index: &mut HashMap<(String, u32), FontObservation>,
    sample: &FontSample,
    bucket: FontBucket,
    category: &'static str,
) {
    let obs = index
        .entry((sample.family.clone(), sample.weight))
        .or_insert_with(|| FontObservation {
            family: sample.family.clone(),
            weight: sample.weight,
            count: 0,
            weight_sum: 0.0,
            bucket_weights: [0.0; 4],
            size_sum: 0.0,
            categories: BTreeSet::new(),
            source: sample.source,
        });
    obs.count += 1;
    obs.weight_sum += sample.visual_weight;
    obs.bucket_weights[bucket.index()] += sample.visual_weight;
    obs.size_sum += sample.size;
    obs.categories.insert(category);
}

fn truncate(text: &str) -> String {
    text.chars().take(EXAMPLE_TRUNCATE).collect()
}

fn build_headings(
    per_level: [HashMap<(String, u32), HeadingGroup>; 6],
) -> [Option<HeadingStyle>; 6] {
    per_level.map(|groups| {
        let mut ranked: Vec<HeadingGroup> = groups.into_values().collect();
        ranked.sort_by(|a, b| {
            b.weight_sum
                .total_cmp(&a.weight_sum)
                .then_with(|| a.family.cmp(&b.family))
        });
        ranked.into_iter().next().map(|g| HeadingStyle {
            size: (g.size_sum / f64::from(g.count)).round(),
            family: g.family,
            weight: g.weight,
            count: g.count,
            examples: g.examples,
            coverage: g.weight_sum,
        })
    })
}

/// Ranks observations by their weight within one bucket, heaviest first.
fn ranked_in_bucket<'a>(
    observations: &[&'a FontObservation],
    bucket: FontBucket,
) -> Vec<&'a FontObservation> {
    let mut ranked: Vec<&FontObservation> = observations
        .iter()
        .copied()
        .filter(|o| o.bucket_weight(bucket) > 0.0)
        .collect();
    ranked.sort_by(|a, b| {
        b.bucket_weight(bucket)
            .total_cmp(&a.bucket_weight(bucket))
            .then_with(|| (&a.family, a.weight).cmp(&(&b.family, b.weight)))
    });
    ranked
}

fn ranked_overall<'a>(observations: &[&'a FontObservation]) -> Vec<&'a FontObservation> {
    let mut ranked: Vec<&FontObservation> = observations.to_vec();
    ranked.sort_by(|a, b| {
        b.weight_sum
            .total_cmp(&a.weight_sum)
            .then_with(|| (&a.family, a.weight).cmp(&(&b.family, b.weight)))
    });
    ranked
}

fn pick_display<'a>(observations: &[&'a FontObservation]) -> Option<&'a FontObservation> {
    if let Some(top) = ranked_in_bucket(observations, FontBucket::Display).into_iter().next() {
        return Some(top);
    }
    // No hero/cta text on the page: fall back to any large typeface.
    ranked_overall(observations)
        .into_iter()
        .find(|o| o.avg_size() > 24.0)
}

fn pick_body<'a>(
    observations: &[&'a FontObservation],
    display: Option<&FontObservation>,
) -> Option<&'a FontObservation> {
    ranked_in_bucket(observations, FontBucket::Body)
        .into_iter()
        .find(|o| display.is_none_or(|d| o.family != d.family))
}

fn pick_accent<'a>(
    observations: &[&'a FontObservation],
    display: Option<&FontObservation>,
    body: Option<&FontObservation>,
) -> Option<&'a FontObservation> {
    let distinct = |o: &&FontObservation| {
        display.is_none_or(|d| o.family != d.family) && body.is_none_or(|b| o.family != b.family)
    };
    let from_bucket = ranked_in_bucket(observations, FontBucket::Accent)
        .into_iter()
        .find(|o| distinct(o));
    if from_bucket.is_some() {
        return from_bucket;
    }
    // No quote/navigation text: mid-sized faces stand in.
    ranked_overall(observations)
        .into_iter()
        .filter(|o| (14.0..=20.0).contains(&o.avg_size()))
        .find(|o| distinct(o))
}

enum RoleKind {
    Display,
    Body,
    Accent,
}

fn role_entry(
    obs: &FontObservation,
    observations: &[&FontObservation],
    total_weight: f64,
    kind: RoleKind,
) -> FontRoleEntry {
    // Every weight the family appears with anywhere on the page, not just in
    // the winning bucket.
    let weights: Vec<u32> = observations
        .iter()
        .filter(|o| o.family == obs.family)
        .map(|o| o.weight)
        .collect::<BTreeSet<u32>>()
        .into_iter()
        .collect();
    let coverage = if total_weight > 0.0 {
        obs.weight_sum / total_weight * 100.0
    } else {
        0.0
    };
    let coverage_fraction = coverage / 100.0;
    let count = f64::from(obs.count);
    let confidence = match kind {
        RoleKind::Display => 0.6 + count / 50.0 + coverage_fraction * 0.3,
        RoleKind::Body => 0.7 + count / 100.0 + coverage_fraction * 0.2,
        RoleKind::Accent => 0.5 + count / 30.0 + coverage_fraction * 0.2,
    }
    .min(0.99);

    FontRoleEntry {
        family: obs.family.clone(),
        weights,
        used_in: obs.categories.iter().map(|c| (*c).to_string()).collect(),
        avg_size: obs.avg_size(),
        coverage,
        confidence,
        source: obs.source,
    }
}

#[cfg(test)]
#[path = "typography_test.rs"]
mod tests;
