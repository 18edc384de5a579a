//! Heuristic logo detection: positional/keyword/size scoring over `<img>`
//! candidates, favicon validation, and dominant-color sampling of the winner.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use brandlens_core::{Favicon, LogoCandidate, LogoColor, LogoResult};
use brandlens_probe::{dominant_colors, ProbeClient};
use brandlens_snapshot::{ElementSample, PageSnapshot, Tag, Viewport};

use crate::error::AnalyzerError;
use crate::tables::{
    LAZY_PLACEHOLDER_PATTERNS, LOGO_EXCLUDE_KEYWORDS, MIN_LOGO_SCORE, PROMO_CONTAINER_KEYWORDS,
};

static SIZES_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s*[xX]\s*(\d+)").expect("valid sizes regex"));

/// `rel` values accepted as favicon links, after lowercasing and whitespace
/// normalization.
const ICON_RELS: &[&str] = &[
    "icon",
    "shortcut icon",
    "apple-touch-icon",
    "apple-touch-icon-precomposed",
];

const MAX_ALTERNATES: usize = 4;

/// Detects logo candidates and favicons for one snapshot.
///
/// Favicon existence probes and logo pixel sampling go through `probe`; both
/// degrade gracefully (empty favicon list, `None` logo colors) on network or
/// decode failure.
///
/// # Errors
///
/// Returns [`AnalyzerError::InvalidBaseUrl`] when `base_url` is not an
/// absolute http(s) URL, and [`AnalyzerError::Snapshot`] when the viewport
/// has no area.
pub async fn detect_logos(
    snapshot: &PageSnapshot,
    base_url: &str,
    probe: &ProbeClient,
) -> Result<LogoResult, AnalyzerError> {
    let origin = origin_of(base_url)?;
    if snapshot.viewport.width <= 0.0 || snapshot.viewport.height <= 0.0 {
        return Err(AnalyzerError::Snapshot {
            reason: format!(
                "viewport has no area ({}x{})",
                snapshot.viewport.width, snapshot.viewport.height
            ),
        });
    }

    let mut candidates: Vec<LogoCandidate> = snapshot
        .visible_elements()
        .filter(|el| el.tag == Tag::Img)
        .filter_map(|el| build_candidate(el, &snapshot.viewport, &origin))
        .filter(|c| c.score >= MIN_LOGO_SCORE)
        .collect();
    candidates.sort_by(|a, b| b.score.cmp(&a.score).then_with(|| a.url.cmp(&b.url)));
    let mut deduped = dedup_candidates(candidates);

    let primary = if deduped.is_empty() {
        None
    } else {
        Some(deduped.remove(0))
    };
    deduped.truncate(MAX_ALTERNATES);

    let favicons = validate_favicons(snapshot, &origin, probe).await;

    let logo_colors = match &primary {
        Some(candidate) => match probe.fetch_image(&candidate.url).await {
            Ok(img) => Some(
                dominant_colors(&img, 5)
                    .into_iter()
                    .map(|(hex, frequency)| LogoColor { hex, frequency })
                    .collect(),
            ),
            Err(e) => {
                tracing::debug!(url = %candidate.url, error = %e, "logo pixel sampling failed");
                None
            }
        },
        None => None,
    };

    tracing::debug!(
        primary = primary.as_ref().map(|c| c.url.as_str()),
        alternates = deduped.len(),
        favicons = favicons.len(),
        "detected logos"
    );

    Ok(LogoResult {
        primary,
        alternates: deduped,
        favicons,
        logo_colors,
    })
}

fn build_candidate(
    el: &ElementSample,
    viewport: &Viewport,
    origin: &str,
) -> Option<LogoCandidate> {
    let src = el.src.as_deref()?;
    let url = absolutize_url(origin, src)?;
    let scored = score_image(el, viewport)?;
    let w = el.rect.width;
    let h = el.rect.height;
    Some(LogoCandidate {
        url,
        alt: el.alt.clone(),
        width: w,
        height: h,
        aspect_ratio: w / h,
        in_header: scored.in_header,
        in_footer: scored.in_footer,
        has_logo_keyword: scored.has_keyword,
        score: scored.score,
    })
}

struct ImageScore {
    score: i32,
    in_header: bool,
    in_footer: bool,
    has_keyword: bool,
}

/// Additive candidate scoring. `None` means disqualified.
fn score_image(el: &ElementSample, viewport: &Viewport) -> Option<ImageScore> {
    let w = el.rect.width;
    let h = el.rect.height;
    if w <= 0.0 || h <= 0.0 {
        return None;
    }
    // Plausible logo footprint: the larger axis at least 80px, neither
    // axis past 500px, aspect no more extreme than 5:1 either way.
    if w.max(h) < 80.0 || w > 500.0 || h > 500.0 {
        return None;
    }
    let aspect = w / h;
    if !(0.2..=5.0).contains(&aspect) {
        return None;
    }

    let alt = el.alt.as_deref().unwrap_or("").to_lowercase();
    let haystack = format!(
        "{alt} {} {} {}",
        el.classes.to_lowercase(),
        el.id.to_lowercase(),
        el.src.as_deref().unwrap_or("").to_lowercase()
    );
    if LOGO_EXCLUDE_KEYWORDS.iter().any(|kw| haystack.contains(kw)) {
        return None;
    }
    if el.ancestor_matches(|a| {
        let classes = a.classes.to_lowercase();
        PROMO_CONTAINER_KEYWORDS.iter().any(|kw| classes.contains(kw))
    }) {
        return None;
    }

    let in_header = region_match(el, &["header", "nav"], &["header", "navbar", "nav"]);
    let in_footer = region_match(el, &["footer"], &["footer"]);
    let near_top = el.rect.y <= 250.0;
    let near_bottom = el.rect.bottom() >= viewport.height - 250.0;
    if !in_header && !in_footer && !near_top && !near_bottom {
        return None;
    }

    let mut score = 0;
    if in_header {
        score += 40;
    } else if in_footer {
        score += 30;
    }

    if el.rect.y < 200.0 {
        score += 30;
    } else if el.rect.bottom() > viewport.height - 300.0 {
        score += 25;
    } else if el.rect.y < 250.0 {
        score += 20;
    } else {
        return None;
    }

    let has_keyword = haystack.contains("logo") || alt.contains("brand");
    score += if has_keyword { 40 } else { -20 };

    let avg = (w + h) / 2.0;
    score += if (50.0..=300.0).contains(&avg) {
        30
    } else if (30.0..=400.0).contains(&avg) {
        20
    } else if (20.0..=600.0).contains(&avg) {
        10
    } else {
        -10
    };

    score += if (0.8..=5.0).contains(&aspect) { 20 } else { -10 };

    if el.rect.x < 300.0 {
        score += 20;
    } else if el.rect.right() >= viewport.width - 300.0 {
        score += 10;
    }

    Some(ImageScore {
        score,
        in_header,
        in_footer,
        has_keyword,
    })
}

/// True when the element or an ancestor matches one of `tags` or carries one
/// of `class_keywords`.
fn region_match(el: &ElementSample, tags: &[&str], class_keywords: &[&str]) -> bool {
    if el.class_contains_any(class_keywords) {
        return true;
    }
    el.ancestor_matches(|a| {
        tags.contains(&a.tag.as_str()) || {
            let classes = a.classes.to_lowercase();
            class_keywords.iter().any(|kw| classes.contains(kw))
        }
    })
}

/// Drops later candidates whose query-stripped URL was already seen. Input
/// is sorted by score, so the first (highest-scored) occurrence wins.
fn dedup_candidates(candidates: Vec<LogoCandidate>) -> Vec<LogoCandidate> {
    let mut seen: HashSet<String> = HashSet::new();
    candidates
        .into_iter()
        .filter(|c| seen.insert(strip_query(&c.url).to_string()))
        .collect()
}

fn strip_query(url: &str) -> &str {
    url.split('?').next().unwrap_or(url)
}

async fn validate_favicons(
    snapshot: &PageSnapshot,
    origin: &str,
    probe: &ProbeClient,
) -> Vec<Favicon> {
    let candidates = collect_favicon_candidates(snapshot, origin);
    let checks = candidates.iter().map(|f| probe.exists(&f.url));
    let results = futures::future::join_all(checks).await;
    let mut validated: Vec<Favicon> = candidates
        .into_iter()
        .zip(results)
        .filter_map(|(favicon, ok)| ok.then_some(favicon))
        .collect();

    if validated.is_empty() {
        // Conventional path as last resort.
        let fallback = format!("{origin}/favicon.ico");
        if probe.exists(&fallback).await {
            validated.push(Favicon {
                url: fallback,
                rel: "icon".to_string(),
                sizes: None,
            });
        }
    }

    // Largest declared size first; undeclared sizes sink to the end.
    validated.sort_by(|a, b| declared_area(b).cmp(&declared_area(a)));
    validated
}

fn declared_area(favicon: &Favicon) -> u64 {
    favicon
        .sizes
        .map_or(0, |(w, h)| u64::from(w) * u64::from(h))
}

fn collect_favicon_candidates(snapshot: &PageSnapshot, origin: &str) -> Vec<Favicon> {
    let mut out = Vec::new();
    for link in &snapshot.icon_links {
        let rel = link.rel.to_lowercase();
        let rel = rel.split_whitespace().collect::<Vec<_>>().join(" ");
        if !ICON_RELS.contains(&rel.as_str()) {
            continue;
        }
        let href = link.href.trim();
        if href.is_empty() || href.starts_with("data:") {
            continue;
        }
        let lower = href.to_lowercase();
        if LAZY_PLACEHOLDER_PATTERNS.iter().any(|p| lower.contains(p)) {
            continue;
        }
        let Some(url) = absolutize_url(origin, href) else {
            continue;
        };
        out.push(Favicon {
            url,
            rel,
            sizes: link.sizes.as_deref().and_then(parse_sizes_attr),
        });
    }
    out
}

/// Largest `WxH` pair declared in a `sizes` attribute.
fn parse_sizes_attr(value: &str) -> Option<(u32, u32)> {
    SIZES_RE
        .captures_iter(value)
        .filter_map(|caps| {
            let w: u32 = caps.get(1)?.as_str().parse().ok()?;
            let h: u32 = caps.get(2)?.as_str().parse().ok()?;
            Some((w, h))
        })
        .max_by_key(|(w, h)| u64::from(*w) * u64::from(*h))
}

/// Scheme-and-host origin of an absolute http(s) URL.
fn origin_of(base_url: &str) -> Result<String, AnalyzerError> {
    let rest = base_url
        .strip_prefix("https://")
        .map(|rest| ("https", rest))
        .or_else(|| base_url.strip_prefix("http://").map(|rest| ("http", rest)));
    let Some((scheme, rest)) = rest else {
        return Err(AnalyzerError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: "expected an absolute http(s) URL".to_string(),
        });
    };
    let host = rest.split('/').next().unwrap_or("");
    if host.is_empty() {
        return Err(AnalyzerError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: "missing host".to_string(),
        });
    }
    Ok(format!("{scheme}://{host}"))
}

/// Resolves a possibly relative URL against `origin` without pulling in a
/// URL crate. Non-fetchable schemes resolve to `None`.
fn absolutize_url(origin: &str, raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if raw.starts_with("http://") || raw.starts_with("https://") {
        return Some(raw.to_string());
    }
    let lower = raw.to_lowercase();
    if lower.starts_with("data:") || lower.starts_with("javascript:") || lower.contains("://") {
        return None;
    }
    if let Some(rest) = raw.strip_prefix("//") {
        let scheme = origin.split("://").next().unwrap_or("https");
        return Some(format!("{scheme}://{rest}"));
    }
    if let Some(rest) = raw.strip_prefix('/') {
        return Some(format!("{origin}/{rest}"));
    }
    Some(format!("{origin}/{raw}"))
}

#[cfg(test)]
#[path = "logo_test.rs"]
mod tests;
