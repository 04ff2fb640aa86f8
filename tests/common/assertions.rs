//! Assertion helpers for tests.

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use rgb565_pipeline::{quantize, RasterBuffer};

use super::app::TestResponse;

/// Assert response has expected status code
pub fn assert_status(response: &TestResponse, expected: StatusCode) {
    assert_eq!(
        response.status, expected,
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

/// Assert response is a valid PNG image
pub fn assert_png(response: &TestResponse) {
    assert_ok(response);
    assert!(
        response.is_png(),
        "Expected PNG image, got {} bytes starting with {:?}",
        response.body.len(),
        &response.body[..8.min(response.body.len())]
    );

    assert_eq!(
        response.header("content-type"),
        Some("image/png"),
        "Expected Content-Type: image/png"
    );
}

/// Assert JSON response has expected status field
pub fn assert_json_status(response: &TestResponse, expected_status: u16) {
    let json: serde_json::Value = response.json();
    assert_eq!(
        json["status"].as_u64(),
        Some(expected_status as u64),
        "Expected JSON status {}, got {:?}. Full response: {}",
        expected_status,
        json["status"],
        serde_json::to_string_pretty(&json).unwrap()
    );
    assert!(json["error"].is_string(), "Expected error message");
}

/// Assert every pixel of the buffer lies on the RGB565 grid
pub fn assert_rgb565(buffer: &RasterBuffer) {
    for (i, pixel) in buffer.pixels().enumerate() {
        assert_eq!(quantize(pixel), pixel, "Pixel {i} is not RGB565-representable");
    }
}
