//! Assertion helpers for tests.

use axum::http::StatusCode;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use pretty_assertions::assert_eq;

use super::app::TestResponse;

const PNG_SIGNATURE: &[u8] = b"\x89PNG\r\n\x1a\n";

/// Assert response has expected status code
pub fn assert_status(response: &TestResponse, expected: StatusCode) {
    assert_eq!(
        response.status,
        expected,
        "Expected status {}, got {}. Body: {}",
        expected,
        response.status,
        response.text()
    );
}

/// Assert response is OK (200)
pub fn assert_ok(response: &TestResponse) {
    assert_status(response, StatusCode::OK);
}

/// Assert an error body carries the expected `kind`
pub fn assert_error_kind(response: &TestResponse, status: StatusCode, kind: &str) {
    assert_status(response, status);
    let json: serde_json::Value = response.json();
    assert_eq!(json["status"].as_u64(), Some(status.as_u16() as u64));
    assert_eq!(json["kind"], kind);
    assert!(json["error"].is_string(), "Expected error message");
}

pub fn is_png(bytes: &[u8]) -> bool {
    bytes.len() >= 8 && &bytes[0..8] == PNG_SIGNATURE
}

/// Decode a PNG and return its dimensions and color type
pub fn png_info(bytes: &[u8]) -> (u32, u32, image::ColorType) {
    assert!(is_png(bytes), "Expected PNG signature");
    let decoded = image::load_from_memory(bytes).expect("PNG should decode");
    (decoded.width(), decoded.height(), decoded.color())
}

/// Assert an image/mask pair is RGB + grayscale PNG of equal size
pub fn assert_sample_pngs(image: &[u8], mask: &[u8]) -> (u32, u32) {
    let (w, h, color) = png_info(image);
    let (mw, mh, mask_color) = png_info(mask);

    assert_eq!((w, h), (mw, mh), "Image and mask dimensions differ");
    assert_eq!(color, image::ColorType::Rgb8);
    assert_eq!(mask_color, image::ColorType::L8);
    (w, h)
}

/// Decode a base64 field from a JSON body
pub fn base64_field(json: &serde_json::Value, field: &str) -> Vec<u8> {
    let encoded = json[field]
        .as_str()
        .unwrap_or_else(|| panic!("Expected {field} to be a string"));
    STANDARD.decode(encoded).expect("Invalid base64")
}

/// Every word of `text` is one of `words`
pub fn assert_words_from(text: &str, words: &[&str]) {
    for word in text.split([' ', '\n']) {
        assert!(words.contains(&word), "Unexpected word {word:?} in {text:?}");
    }
}
