//! Integration tests for `ProbeClient`.
//!
//! Uses `wiremock` to stand up a local HTTP server for each test so no real
//! network traffic is made.

use std::io::Cursor;

use image::{ImageFormat, Rgba, RgbaImage};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use brandlens_probe::{ProbeClient, ProbeError};

fn test_client() -> ProbeClient {
    ProbeClient::new(5, "brandlens-test/0.1").expect("failed to build test ProbeClient")
}

fn png_bytes(color: [u8; 4]) -> Vec<u8> {
    let img = RgbaImage::from_pixel(64, 64, Rgba(color));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
        .expect("png encode");
    buf
}

#[tokio::test]
async fn exists_returns_true_for_200() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .and(path("/favicon.ico"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let client = test_client();
    assert!(client.exists(&format!("{}/favicon.ico", server.uri())).await);
}

#[tokio::test]
async fn exists_returns_false_for_404() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .and(path("/favicon.ico"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = test_client();
    assert!(!client.exists(&format!("{}/favicon.ico", server.uri())).await);
}

#[tokio::test]
async fn exists_falls_back_to_get_when_head_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .and(path("/icon.png"))
        .respond_with(ResponseTemplate::new(405))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/icon.png"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let client = test_client();
    assert!(client.exists(&format!("{}/icon.png", server.uri())).await);
}

#[tokio::test]
async fn exists_returns_false_on_connection_failure() {
    let client = test_client();
    // Reserved TEST-NET address; nothing listens there.
    assert!(!client.exists("http://192.0.2.1:9/favicon.ico").await);
}

#[tokio::test]
async fn fetch_image_decodes_png() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/logo.png"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(png_bytes([26, 115, 232, 255]), "image/png"),
        )
        .mount(&server)
        .await;

    let client = test_client();
    let img = client
        .fetch_image(&format!("{}/logo.png", server.uri()))
        .await
        .expect("decode should succeed");
    assert_eq!(img.width(), 64);
    assert_eq!(img.height(), 64);
}

#[tokio::test]
async fn fetch_image_rejects_non_success_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/logo.png"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let client = test_client();
    let err = client
        .fetch_image(&format!("{}/logo.png", server.uri()))
        .await
        .expect_err("403 must not decode");
    assert!(matches!(
        err,
        ProbeError::UnexpectedStatus { status: 403, .. }
    ));
}

#[tokio::test]
async fn fetch_image_surfaces_decode_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/logo.png"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(b"not an image".to_vec(), "image/png"))
        .mount(&server)
        .await;

    let client = test_client();
    let err = client
        .fetch_image(&format!("{}/logo.png", server.uri()))
        .await
        .expect_err("garbage bytes must not decode");
    assert!(matches!(err, ProbeError::Decode { .. }));
}
