// SPDX-License-Identifier: MPL-2.0

//! Integration tests for constants module

use snapcam::constants::{PhotoQuality, zoom};

#[test]
fn test_photo_quality_values() {
    assert_eq!(PhotoQuality::ALL.len(), 4);
}

#[test]
fn test_photo_quality_ordering() {
    // Presets are ordered from lowest to highest quality
    let mut prev = 0u8;
    for preset in PhotoQuality::ALL {
        let quality = preset.jpeg_quality();
        assert!(quality > prev, "Presets should be ordered by quality");
        assert!(quality <= 100);
        prev = quality;
    }
}

#[test]
fn test_zoom_range() {
    assert_eq!(zoom::MIN_ZOOM, 1.0);
    assert!(zoom::MAX_ZOOM > zoom::MIN_ZOOM);
    assert!(zoom::SCROLL_STEP > 0.0);
}
