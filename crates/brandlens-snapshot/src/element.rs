use serde::{Deserialize, Serialize};

/// Tag category of a captured element.
///
/// Tags the analyzers never inspect individually collapse into `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tag {
    Body,
    Header,
    Nav,
    Footer,
    H1,
    H2,
    H3,
    H4,
    H5,
    H6,
    P,
    Div,
    Span,
    A,
    Button,
    Blockquote,
    Q,
    Li,
    Td,
    Th,
    Label,
    Img,
    Iframe,
    Other,
}

impl Tag {
    /// Maps a lowercase tag name to its category.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name {
            "body" => Tag::Body,
            "header" => Tag::Header,
            "nav" => Tag::Nav,
            "footer" => Tag::Footer,
            "h1" => Tag::H1,
            "h2" => Tag::H2,
            "h3" => Tag::H3,
            "h4" => Tag::H4,
            "h5" => Tag::H5,
            "h6" => Tag::H6,
            "p" => Tag::P,
            "div" => Tag::Div,
            "span" => Tag::Span,
            "a" => Tag::A,
            "button" => Tag::Button,
            "blockquote" => Tag::Blockquote,
            "q" => Tag::Q,
            "li" => Tag::Li,
            "td" => Tag::Td,
            "th" => Tag::Th,
            "label" => Tag::Label,
            "img" => Tag::Img,
            "iframe" => Tag::Iframe,
            _ => Tag::Other,
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Tag::Body => "body",
            Tag::Header => "header",
            Tag::Nav => "nav",
            Tag::Footer => "footer",
            Tag::H1 => "h1",
            Tag::H2 => "h2",
            Tag::H3 => "h3",
            Tag::H4 => "h4",
            Tag::H5 => "h5",
            Tag::H6 => "h6",
            Tag::P => "p",
            Tag::Div => "div",
            Tag::Span => "span",
            Tag::A => "a",
            Tag::Button => "button",
            Tag::Blockquote => "blockquote",
            Tag::Q => "q",
            Tag::Li => "li",
            Tag::Td => "td",
            Tag::Th => "th",
            Tag::Label => "label",
            Tag::Img => "img",
            Tag::Iframe => "iframe",
            Tag::Other => "other",
        }
    }

    /// Heading level 1–6 for `h1`–`h6`, otherwise `None`.
    #[must_use]
    pub fn heading_level(self) -> Option<u8> {
        match self {
            Tag::H1 => Some(1),
            Tag::H2 => Some(2),
            Tag::H3 => Some(3),
            Tag::H4 => Some(4),
            Tag::H5 => Some(5),
            Tag::H6 => Some(6),
            _ => None,
        }
    }
}

/// Bounding rectangle in viewport coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[must_use]
    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

/// Computed style values the analyzers read, as the renderer reported them.
///
/// Values keep their CSS string form (`"rgb(26, 115, 232)"`, `"16px"`);
/// parsing into numbers is the analyzers' concern, and a value the renderer
/// could not resolve is simply `None`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ComputedStyle {
    pub background_color: Option<String>,
    pub color: Option<String>,
    pub border_color: Option<String>,
    pub font_family: Option<String>,
    pub font_size: Option<String>,
    pub font_weight: Option<String>,
    pub line_height: Option<String>,
}

/// One entry of an element's static ancestor chain, nearest first.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AncestorNode {
    /// Lowercase tag name.
    pub tag: String,
    /// Space-joined class list.
    pub classes: String,
}

/// A single captured element.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElementSample {
    pub tag: Tag,
    pub rect: BoundingBox,
    /// Passed the renderer's visibility predicate (`display`, `visibility`,
    /// `opacity`, nonzero dimensions).
    pub visible: bool,
    pub style: ComputedStyle,
    pub text: Option<String>,
    /// Space-joined class list.
    pub classes: String,
    pub id: String,
    /// `src` attribute for `<img>` elements.
    pub src: Option<String>,
    /// `alt` attribute for `<img>` elements.
    pub alt: Option<String>,
    /// Static ancestor chain, nearest ancestor first.
    pub ancestors: Vec<AncestorNode>,
    /// Hostname of the enclosing iframe, when the element lives inside one.
    pub iframe_host: Option<String>,
}

impl ElementSample {
    /// A visible element with empty styles and attributes; tests and
    /// providers fill in what they need.
    #[must_use]
    pub fn new(tag: Tag, rect: BoundingBox) -> Self {
        Self {
            tag,
            rect,
            visible: true,
            style: ComputedStyle::default(),
            text: None,
            classes: String::new(),
            id: String::new(),
            src: None,
            alt: None,
            ancestors: Vec::new(),
            iframe_host: None,
        }
    }

    /// Case-insensitive substring check against the element's class list.
    #[must_use]
    pub fn class_contains(&self, needle: &str) -> bool {
        self.classes.to_lowercase().contains(needle)
    }

    /// True when any of `needles` appears in the class list.
    #[must_use]
    pub fn class_contains_any(&self, needles: &[&str]) -> bool {
        let classes = self.classes.to_lowercase();
        needles.iter().any(|n| classes.contains(n))
    }

    /// True when the element or any ancestor matches `predicate`.
    #[must_use]
    pub fn ancestor_matches(&self, predicate: impl Fn(&AncestorNode) -> bool) -> bool {
        self.ancestors.iter().any(predicate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_round_trips_through_names() {
        for name in ["body", "h3", "img", "blockquote"] {
            assert_eq!(Tag::from_name(name).name(), name);
        }
        assert_eq!(Tag::from_name("video"), Tag::Other);
    }

    #[test]
    fn heading_levels() {
        assert_eq!(Tag::H1.heading_level(), Some(1));
        assert_eq!(Tag::H6.heading_level(), Some(6));
        assert_eq!(Tag::Div.heading_level(), None);
    }

    #[test]
    fn bounding_box_geometry() {
        let rect = BoundingBox::new(10.0, 20.0, 100.0, 50.0);
        assert!((rect.area() - 5000.0).abs() < f64::EPSILON);
        assert!((rect.right() - 110.0).abs() < f64::EPSILON);
        assert!((rect.bottom() - 70.0).abs() < f64::EPSILON);
    }

    #[test]
    fn class_matching_is_case_insensitive() {
        let mut el = ElementSample::new(Tag::Div, BoundingBox::default());
        el.classes = "Site-Header navBar".to_string();
        assert!(el.class_contains("header"));
        assert!(el.class_contains_any(&["navbar", "hero"]));
        assert!(!el.class_contains("footer"));
    }
}
