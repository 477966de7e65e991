// SPDX-License-Identifier: MPL-2.0

//! Integration tests for configuration module

use snapcam::{Config, PhotoQuality};

#[test]
fn test_config_default() {
    let config = Config::default();

    assert!(
        config.mirror_front_preview,
        "Front preview should be mirrored by default"
    );
    assert_eq!(config.photo_quality, PhotoQuality::High);
    assert!(config.photo_directory.is_none());
}

#[test]
fn test_capture_settings_follow_config() {
    let config = Config {
        photo_directory: Some("/tmp/snapcam-test".to_string()),
        photo_quality: PhotoQuality::Low,
        mirror_front_preview: false,
    };

    let settings = config.capture_settings();
    assert_eq!(
        settings.photo_directory,
        std::path::PathBuf::from("/tmp/snapcam-test")
    );
    assert_eq!(settings.quality, PhotoQuality::Low);
    assert!(!settings.mirror_front_preview);
}

#[test]
fn test_default_directory_is_app_subfolder() {
    let settings = Config::default().capture_settings();
    assert!(
        settings.photo_directory.ends_with("snapcam"),
        "Photos should default to a snapcam folder"
    );
}
