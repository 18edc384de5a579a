use super::*;

use std::io::Cursor;

use brandlens_snapshot::{AncestorNode, BoundingBox, SnapshotBuilder};
use image::{ImageFormat, Rgba, RgbaImage};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn viewport() -> Viewport {
    Viewport::new(1280.0, 720.0)
}

fn img(x: f64, y: f64, w: f64, h: f64, src: &str, alt: Option<&str>) -> ElementSample {
    let mut el = ElementSample::new(Tag::Img, BoundingBox::new(x, y, w, h));
    el.src = Some(src.to_string());
    el.alt = alt.map(str::to_string);
    el
}

fn header_img(x: f64, y: f64, w: f64, h: f64, src: &str, alt: Option<&str>) -> ElementSample {
    let mut el = img(x, y, w, h, src, alt);
    el.ancestors.push(AncestorNode {
        tag: "header".to_string(),
        classes: String::new(),
    });
    el
}

fn test_probe() -> ProbeClient {
    ProbeClient::new(5, "brandlens-test/0.1").expect("probe client")
}

fn png_bytes(color: [u8; 4]) -> Vec<u8> {
    let img = RgbaImage::from_pixel(64, 64, Rgba(color));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
        .expect("png encode");
    buf
}

#[test]
fn header_logo_reaches_full_scenario_score() {
    // 120x40, alt "Acme Logo", inside <header>, top < 200, left < 300:
    // 40 + 30 + 40 + 30 + 20 + 20 = 180.
    let el = header_img(100.0, 50.0, 120.0, 40.0, "/logo.png", Some("Acme Logo"));
    let scored = score_image(&el, &viewport()).expect("must qualify");
    assert_eq!(scored.score, 180);
    assert!(scored.in_header);
    assert!(!scored.in_footer);
    assert!(scored.has_keyword);
}

#[test]
fn missing_keyword_costs_sixty_points() {
    let with = header_img(100.0, 50.0, 120.0, 40.0, "/mark.png", Some("Acme Logo"));
    let without = header_img(100.0, 50.0, 120.0, 40.0, "/mark.png", Some("Acme"));
    let with = score_image(&with, &viewport()).unwrap();
    let without = score_image(&without, &viewport()).unwrap();
    assert_eq!(with.score - without.score, 60);
}

#[test]
fn exclude_keywords_disqualify_outright() {
    let clean = header_img(100.0, 50.0, 120.0, 40.0, "/mark.png", Some("Acme Logo"));
    let mut tainted = clean.clone();
    tainted.classes = "sale-banner".to_string();
    let clean_score = score_image(&clean, &viewport()).expect("clean candidate qualifies");
    assert!(score_image(&tainted, &viewport()).is_none());
    // Monotonicity: the non-excluded twin always keeps its full score.
    assert!(clean_score.score >= MIN_LOGO_SCORE);
}

#[test]
fn promo_ancestors_disqualify() {
    let mut el = header_img(100.0, 50.0, 120.0, 40.0, "/mark.png", Some("Acme Logo"));
    el.ancestors.push(AncestorNode {
        tag: "div".to_string(),
        classes: "promo-strip".to_string(),
    });
    assert!(score_image(&el, &viewport()).is_none());
}

#[test]
fn mid_page_images_are_disqualified() {
    // Not in header or footer, 400px from the top, 280px from the bottom.
    let el = img(500.0, 400.0, 120.0, 40.0, "/mark.png", Some("Acme Logo"));
    assert!(score_image(&el, &viewport()).is_none());
}

#[test]
fn size_bounds_filter_candidates() {
    assert!(score_image(&header_img(0.0, 50.0, 60.0, 60.0, "/s.png", None), &viewport()).is_none());
    assert!(
        score_image(&header_img(0.0, 50.0, 600.0, 200.0, "/w.png", None), &viewport()).is_none()
    );
    assert!(
        score_image(&header_img(0.0, 50.0, 120.0, 20.0, "/thin.png", None), &viewport())
            .is_none(),
        "aspect 6:1 is past the candidate bound"
    );
}

#[test]
fn footer_logo_scores_from_the_bottom_edge() {
    let mut el = img(40.0, 650.0, 120.0, 40.0, "/logo.png", Some("Acme Logo"));
    el.ancestors.push(AncestorNode {
        tag: "footer".to_string(),
        classes: String::new(),
    });
    let scored = score_image(&el, &viewport()).unwrap();
    assert!(scored.in_footer);
    // 30 footer + 25 bottom + 40 keyword + 30 size + 20 aspect + 20 left.
    assert_eq!(scored.score, 165);
}

#[test]
fn dedup_keeps_first_occurrence_and_is_idempotent() {
    let candidate = |url: &str, score: i32| LogoCandidate {
        url: url.to_string(),
        alt: None,
        width: 120.0,
        height: 40.0,
        aspect_ratio: 3.0,
        in_header: true,
        in_footer: false,
        has_logo_keyword: true,
        score,
    };
    let input = vec![
        candidate("https://acme.test/logo.png?v=2", 180),
        candidate("https://acme.test/logo.png?v=1", 150),
        candidate("https://acme.test/footer-logo.png", 120),
    ];
    let once = dedup_candidates(input);
    assert_eq!(once.len(), 2);
    assert_eq!(once[0].url, "https://acme.test/logo.png?v=2");
    let urls: Vec<String> = once.iter().map(|c| c.url.clone()).collect();
    let twice = dedup_candidates(once);
    let urls_again: Vec<String> = twice.iter().map(|c| c.url.clone()).collect();
    assert_eq!(urls, urls_again);
}

#[test]
fn url_helpers_resolve_and_strip() {
    assert_eq!(origin_of("https://acme.test/about").unwrap(), "https://acme.test");
    assert_eq!(origin_of("http://acme.test:8080/x").unwrap(), "http://acme.test:8080");
    assert!(origin_of("ftp://acme.test").is_err());
    assert!(origin_of("acme.test").is_err());

    let origin = "https://acme.test";
    assert_eq!(
        absolutize_url(origin, "/img/logo.png").unwrap(),
        "https://acme.test/img/logo.png"
    );
    assert_eq!(
        absolutize_url(origin, "img/logo.png").unwrap(),
        "https://acme.test/img/logo.png"
    );
    assert_eq!(
        absolutize_url(origin, "//cdn.acme.test/logo.png").unwrap(),
        "https://cdn.acme.test/logo.png"
    );
    assert_eq!(
        absolutize_url(origin, "https://cdn.acme.test/x.png").unwrap(),
        "https://cdn.acme.test/x.png"
    );
    assert!(absolutize_url(origin, "data:image/png;base64,AAAA").is_none());

    assert_eq!(strip_query("https://a.test/x.png?v=1"), "https://a.test/x.png");
    assert_eq!(strip_query("https://a.test/x.png"), "https://a.test/x.png");
}

#[test]
fn sizes_attribute_takes_largest_pair() {
    assert_eq!(parse_sizes_attr("32x32"), Some((32, 32)));
    assert_eq!(parse_sizes_attr("16x16 48x48 32x32"), Some((48, 48)));
    assert_eq!(parse_sizes_attr("any"), None);
}

#[tokio::test]
async fn detect_logos_end_to_end() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/logo.png"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(png_bytes([26, 115, 232, 255]), "image/png"),
        )
        .mount(&server)
        .await;
    Mock::given(method("HEAD"))
        .and(path("/favicon-32.png"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let snapshot = SnapshotBuilder::new(1280.0, 720.0)
        .element(header_img(100.0, 50.0, 120.0, 40.0, "/logo.png", Some("Acme Logo")))
        .icon_link("icon", "/favicon-32.png", Some("32x32"))
        .build();

    let result = detect_logos(&snapshot, &server.uri(), &test_probe())
        .await
        .unwrap();

    let primary = result.primary.expect("header logo wins");
    assert!(primary.url.ends_with("/logo.png"));
    assert_eq!(primary.score, 180);
    let colors = result.logo_colors.expect("pixel sampling succeeds");
    assert_eq!(colors[0].hex, "#1a73e8");
    assert_eq!(result.favicons.len(), 1);
    assert!(result.favicons[0].url.ends_with("/favicon-32.png"));
    assert_eq!(result.favicons[0].sizes, Some((32, 32)));
}

#[tokio::test]
async fn favicon_fallback_probes_conventional_path() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .and(path("/favicon.ico"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let snapshot = SnapshotBuilder::new(1280.0, 720.0).build();
    let result = detect_logos(&snapshot, &server.uri(), &test_probe())
        .await
        .unwrap();

    assert!(result.primary.is_none());
    assert!(result.logo_colors.is_none());
    assert_eq!(result.favicons.len(), 1);
    assert!(result.favicons[0].url.ends_with("/favicon.ico"));
}

#[tokio::test]
async fn probe_failures_degrade_gracefully() {
    let server = MockServer::start().await;
    // No mocks: every request 404s.
    let snapshot = SnapshotBuilder::new(1280.0, 720.0)
        .element(header_img(100.0, 50.0, 120.0, 40.0, "/logo.png", Some("Acme Logo")))
        .icon_link("icon", "/favicon-32.png", Some("32x32"))
        .build();

    let result = detect_logos(&snapshot, &server.uri(), &test_probe())
        .await
        .unwrap();

    assert!(result.primary.is_some(), "scoring is offline and still works");
    assert!(result.logo_colors.is_none());
    assert!(result.favicons.is_empty());
}

#[tokio::test]
async fn invalid_base_url_is_rejected() {
    let snapshot = SnapshotBuilder::new(1280.0, 720.0).build();
    let err = detect_logos(&snapshot, "not-a-url", &test_probe())
        .await
        .unwrap_err();
    assert!(matches!(err, AnalyzerError::InvalidBaseUrl { .. }));
}

#[test]
fn data_uri_icons_and_placeholders_are_dropped() {
    let snapshot = SnapshotBuilder::new(1280.0, 720.0)
        .icon_link("icon", "data:image/png;base64,AAAA", None)
        .icon_link("icon", "/img/lazy-placeholder.png", None)
        .icon_link("stylesheet", "/style.css", None)
        .icon_link("apple-touch-icon", "/apple-icon.png", Some("180x180"))
        .build();
    let candidates = collect_favicon_candidates(&snapshot, "https://acme.test");
    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].url, "https://acme.test/apple-icon.png");
    assert_eq!(candidates[0].sizes, Some((180, 180)));
}
