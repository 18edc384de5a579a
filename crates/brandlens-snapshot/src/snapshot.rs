use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::element::ElementSample;
use crate::fonts::FontsBarrier;

/// Viewport dimensions at capture time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn area(&self) -> f64 {
        self.width * self.height
    }
}

/// One `<link>` icon entry from the document head.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IconLink {
    /// `rel` attribute, verbatim.
    pub rel: String,
    /// `href` attribute, verbatim (may be relative).
    pub href: String,
    /// `sizes` attribute, verbatim (e.g. `"32x32"` or `"16x16 32x32"`).
    pub sizes: Option<String>,
}

/// A single immutable capture of a rendered page.
///
/// Produced once per extraction by an external renderer and only read by the
/// analyzers; nothing here is shared or cached across invocations.
#[derive(Debug, Clone, Default)]
pub struct PageSnapshot {
    pub elements: Vec<ElementSample>,
    pub viewport: Viewport,
    /// Hostnames backing third-party iframes found on the page.
    pub third_party_hosts: HashSet<String>,
    /// `<meta name="theme-color">` content.
    pub theme_color: Option<String>,
    /// `<link rel="manifest">` href.
    pub manifest_href: Option<String>,
    /// `<link rel="icon">`-family entries from the document head.
    pub icon_links: Vec<IconLink>,
    /// Lowercased `@font-face` family names mapped to their `src` URL.
    pub font_face_sources: HashMap<String, String>,
    pub fonts: FontsBarrier,
}

impl PageSnapshot {
    /// Elements that passed the renderer's visibility predicate.
    pub fn visible_elements(&self) -> impl Iterator<Item = &ElementSample> {
        self.elements.iter().filter(|el| el.visible)
    }

    /// True when `host` backs a third-party iframe on this page.
    #[must_use]
    pub fn is_third_party_host(&self, host: &str) -> bool {
        self.third_party_hosts.contains(host)
    }

    #[must_use]
    pub fn fonts(&self) -> &FontsBarrier {
        &self.fonts
    }
}

/// Assembles a [`PageSnapshot`]. Used by providers and heavily by tests.
#[derive(Debug, Default)]
pub struct SnapshotBuilder {
    snapshot: PageSnapshot,
}

impl SnapshotBuilder {
    #[must_use]
    pub fn new(viewport_width: f64, viewport_height: f64) -> Self {
        Self {
            snapshot: PageSnapshot {
                viewport: Viewport::new(viewport_width, viewport_height),
                ..PageSnapshot::default()
            },
        }
    }

    #[must_use]
    pub fn element(mut self, element: ElementSample) -> Self {
        self.snapshot.elements.push(element);
        self
    }

    #[must_use]
    pub fn elements(mut self, elements: impl IntoIterator<Item = ElementSample>) -> Self {
        self.snapshot.elements.extend(elements);
        self
    }

    #[must_use]
    pub fn third_party_host(mut self, host: impl Into<String>) -> Self {
        self.snapshot.third_party_hosts.insert(host.into());
        self
    }

    #[must_use]
    pub fn theme_color(mut self, value: impl Into<String>) -> Self {
        self.snapshot.theme_color = Some(value.into());
        self
    }

    #[must_use]
    pub fn manifest(mut self, href: impl Into<String>) -> Self {
        self.snapshot.manifest_href = Some(href.into());
        self
    }

    #[must_use]
    pub fn icon_link(
        mut self,
        rel: impl Into<String>,
        href: impl Into<String>,
        sizes: Option<&str>,
    ) -> Self {
        self.snapshot.icon_links.push(IconLink {
            rel: rel.into(),
            href: href.into(),
            sizes: sizes.map(str::to_string),
        });
        self
    }

    /// Registers an `@font-face` rule: `family` is lowercased for lookup.
    #[must_use]
    pub fn font_face(mut self, family: &str, src: impl Into<String>) -> Self {
        self.snapshot
            .font_face_sources
            .insert(family.to_lowercase(), src.into());
        self
    }

    #[must_use]
    pub fn fonts(mut self, barrier: FontsBarrier) -> Self {
        self.snapshot.fonts = barrier;
        self
    }

    #[must_use]
    pub fn build(self) -> PageSnapshot {
        self.snapshot
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{BoundingBox, Tag};

    #[test]
    fn builder_assembles_snapshot() {
        let mut hidden = ElementSample::new(Tag::Div, BoundingBox::new(0.0, 0.0, 10.0, 10.0));
        hidden.visible = false;

        let snapshot = SnapshotBuilder::new(1280.0, 720.0)
            .element(ElementSample::new(
                Tag::Header,
                BoundingBox::new(0.0, 0.0, 1280.0, 80.0),
            ))
            .element(hidden)
            .third_party_host("ads.example.com")
            .theme_color("#1a73e8")
            .font_face("Inter", "https://example.com/fonts/inter.woff2")
            .build();

        assert_eq!(snapshot.elements.len(), 2);
        assert_eq!(snapshot.visible_elements().count(), 1);
        assert!(snapshot.is_third_party_host("ads.example.com"));
        assert!(!snapshot.is_third_party_host("example.com"));
        assert_eq!(snapshot.theme_color.as_deref(), Some("#1a73e8"));
        assert!(snapshot.font_face_sources.contains_key("inter"));
    }
}
