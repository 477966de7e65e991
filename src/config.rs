// SPDX-License-Identifier: GPL-3.0-only

use crate::constants::PhotoQuality;
use cosmic::cosmic_config::{self, CosmicConfigEntry, cosmic_config_derive::CosmicConfigEntry};
use serde::{Deserialize, Serialize};
use tracing::error;

/// Unique identifier in RDNN (reverse domain name notation) format
pub const APP_ID: &str = "io.github.snapcam.SnapCam";

#[derive(Debug, Clone, CosmicConfigEntry, Eq, PartialEq, Serialize, Deserialize)]
#[version = 1]
pub struct Config {
    /// Where photos are written (None = ~/Pictures/snapcam)
    pub photo_directory: Option<String>,
    /// JPEG quality preset for captured photos
    pub photo_quality: PhotoQuality,
    /// Mirror the front camera preview horizontally (selfie mode)
    pub mirror_front_preview: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            photo_directory: None,
            photo_quality: PhotoQuality::default(), // High
            mirror_front_preview: true,
        }
    }
}

impl Config {
    /// Load the stored configuration
    ///
    /// Entries that fail to parse fall back to their defaults. Without a
    /// config handler (no writable config dir) the defaults are used.
    pub fn load() -> (Option<cosmic_config::Config>, Config) {
        match cosmic_config::Config::new(APP_ID, Config::VERSION) {
            Ok(handler) => {
                let config = match Config::get_entry(&handler) {
                    Ok(config) => config,
                    Err((errors, config)) => {
                        error!(?errors, "Errors loading config");
                        config
                    }
                };
                (Some(handler), config)
            }
            Err(err) => {
                error!(%err, "Failed to create config handler");
                (None, Config::default())
            }
        }
    }

    /// Capture settings derived from this configuration
    pub fn capture_settings(&self) -> crate::backends::camera::CaptureSettings {
        crate::backends::camera::CaptureSettings {
            photo_directory: crate::storage::photo_directory(self),
            quality: self.photo_quality,
            mirror_front_preview: self.mirror_front_preview,
        }
    }
}
