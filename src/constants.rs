// SPDX-License-Identifier: GPL-3.0-only

//! Application-wide constants

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// JPEG quality presets for captured photos
///
/// Users can trade file size for fidelity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PhotoQuality {
    /// Low quality (high compression)
    Low,
    /// Medium quality (balanced)
    Medium,
    /// High quality (low compression, default)
    #[default]
    High,
    /// Maximum quality (minimal compression)
    Maximum,
}

impl PhotoQuality {
    /// Get all preset variants for UI iteration
    pub const ALL: [PhotoQuality; 4] = [
        PhotoQuality::Low,
        PhotoQuality::Medium,
        PhotoQuality::High,
        PhotoQuality::Maximum,
    ];

    /// Get display name for the preset
    pub fn display_name(&self) -> &'static str {
        match self {
            PhotoQuality::Low => "Low",
            PhotoQuality::Medium => "Medium",
            PhotoQuality::High => "High",
            PhotoQuality::Maximum => "Maximum",
        }
    }

    /// JPEG quality value (0-100) handed to the encoder
    pub fn jpeg_quality(&self) -> u8 {
        match self {
            PhotoQuality::Low => 60,
            PhotoQuality::Medium => 80,
            PhotoQuality::High => 92,
            PhotoQuality::Maximum => 98,
        }
    }
}

/// Zoom limits for the preview and captured photos
pub mod zoom {
    /// No zoom
    pub const MIN_ZOOM: f32 = 1.0;

    /// Largest centre-crop factor
    pub const MAX_ZOOM: f32 = 8.0;

    /// Zoom change per scroll line
    pub const SCROLL_STEP: f32 = 0.25;

    /// Pixel deltas (touchpads) are divided by this to get lines
    pub const PIXELS_PER_LINE: f32 = 40.0;
}

/// UI Constants
pub mod ui {
    /// Capture button size (outer)
    pub const CAPTURE_BUTTON_OUTER: f32 = 60.0;

    /// Capture button size (inner)
    pub const CAPTURE_BUTTON_INNER: f32 = 50.0;

    /// Capture button border radius
    pub const CAPTURE_BUTTON_RADIUS: f32 = 25.0;

    /// Overlay button/container background transparency (0.0 = transparent, 1.0 = opaque)
    ///
    /// Used for semi-transparent backgrounds on buttons and panels overlaid on the camera preview.
    pub const OVERLAY_BACKGROUND_ALPHA: f32 = 0.6;

    /// Side length of the photo thumbnail in the bottom bar
    pub const THUMBNAIL_SIZE: f32 = 48.0;

    /// Standard icon button width (for layout balancing)
    pub const ICON_BUTTON_WIDTH: f32 = 44.0;

    /// Pointer travel (px) between press and release still counted as a tap
    pub const TAP_SLOP: f32 = 12.0;

    /// Focus ring radius
    pub const FOCUS_RING_RADIUS: f32 = 36.0;

    /// Focus ring stroke width
    pub const FOCUS_RING_BORDER: f32 = 2.0;

    /// Viewer counter text size
    pub const VIEWER_COUNTER_TEXT_SIZE: u16 = 14;

    /// Viewer navigation icon size
    pub const VIEWER_ICON_SIZE: u16 = 32;
}

/// GStreamer pipeline constants
pub mod pipeline {
    /// Maximum buffer queue size (keep small for low latency)
    pub const MAX_BUFFERS: u32 = 2;

    /// Output pixel format for appsink
    pub const OUTPUT_FORMAT: &str = "RGBA";

    /// Capacity of the frame channel between the appsink and the UI
    pub const FRAME_CHANNEL_CAPACITY: usize = 2;
}

/// Timing constants
pub mod timing {
    use super::Duration;

    /// Frame counter modulo for periodic logging
    pub const FRAME_LOG_INTERVAL: u64 = 120;

    /// Pipeline state change timeout on stop
    pub const STOP_TIMEOUT_SECS: u64 = 2;

    /// Preview frames older than this (ms) when they reach the UI are logged
    pub const PREVIEW_LATENCY_WARN_MS: f64 = 66.0;

    /// How long the focus ring stays on screen after a tap
    pub const FOCUS_RING_DURATION: Duration = Duration::from_millis(800);

    /// Wait for the first preview frame when capturing from the CLI
    pub const CLI_FIRST_FRAME_TIMEOUT: Duration = Duration::from_secs(5);

    /// Longest wait for the camera portal to answer, dialog included
    pub const PORTAL_RESPONSE_TIMEOUT: Duration = Duration::from_secs(120);
}

/// Photo file naming
pub mod files {
    /// strftime pattern for captured photos
    pub const PHOTO_NAME_FORMAT: &str = "IMG_%Y%m%d_%H%M%S";

    /// Extension of captured photos
    pub const PHOTO_EXTENSION: &str = "jpg";

    /// Directory under the user's pictures folder
    pub const APP_PICTURES_DIR: &str = "snapcam";
}
