// SPDX-License-Identifier: GPL-3.0-only

//! Shared types for camera backends

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

/// Where a camera sits on the machine
///
/// Reported by libcamera as `api.libcamera.location`. UVC webcams do not
/// report a location and are treated as external.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CameraPosition {
    /// Faces the user (selfie camera)
    Front,
    /// Faces away from the user
    Back,
    /// USB webcam or anything without a reported location
    #[default]
    External,
}

impl CameraPosition {
    /// Parse a libcamera location property ("front", "back", "external")
    pub fn from_location(location: &str) -> Self {
        match location.trim().to_ascii_lowercase().as_str() {
            "front" => CameraPosition::Front,
            "back" | "rear" => CameraPosition::Back,
            _ => CameraPosition::External,
        }
    }
}

impl std::fmt::Display for CameraPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CameraPosition::Front => write!(f, "front"),
            CameraPosition::Back => write!(f, "back"),
            CameraPosition::External => write!(f, "external"),
        }
    }
}

/// Which camera the user asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CameraFacing {
    Front,
    #[default]
    Back,
}

impl CameraFacing {
    /// The opposite facing
    pub fn toggled(self) -> Self {
        match self {
            CameraFacing::Front => CameraFacing::Back,
            CameraFacing::Back => CameraFacing::Front,
        }
    }
}

/// Continuous light state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TorchState {
    On,
    #[default]
    Off,
}

impl TorchState {
    pub fn toggled(self) -> Self {
        match self {
            TorchState::On => TorchState::Off,
            TorchState::Off => TorchState::On,
        }
    }

    pub fn is_on(self) -> bool {
        self == TorchState::On
    }
}

/// Represents a camera device
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CameraDevice {
    pub name: String,
    pub path: String, // PipeWire target ("pipewire-serial-<n>" or "pipewire-<id>")
    pub position: CameraPosition,
    pub v4l2_path: Option<String>, // Underlying /dev/videoN used for focus controls
}

/// A decoded preview frame, tightly packed RGBA
#[derive(Clone)]
pub struct PreviewFrame {
    pub width: u32,
    pub height: u32,
    pub data: Arc<[u8]>,
    pub captured_at: Instant,
}

impl PreviewFrame {
    pub fn new(width: u32, height: u32, data: Arc<[u8]>) -> Self {
        Self {
            width,
            height,
            data,
            captured_at: Instant::now(),
        }
    }

    /// Whether the buffer holds exactly `width * height` RGBA pixels
    pub fn is_complete(&self) -> bool {
        self.data.len() == self.width as usize * self.height as usize * 4
    }
}

impl std::fmt::Debug for PreviewFrame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreviewFrame")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.data.len())
            .finish()
    }
}

/// Declarative description of what the screen wants from the camera
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceBinding {
    pub device: CameraDevice,
    pub facing: CameraFacing,
    /// Stream frames (false while the screen is hidden)
    pub active: bool,
    /// Still photo mode
    pub photo: bool,
    pub torch: TorchState,
    /// Centre-crop factor, 1.0 = full frame
    pub zoom: f32,
}

/// Photo written by a successful capture
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedPhoto {
    pub path: PathBuf,
}

impl CapturedPhoto {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `file://` URI of the photo
    pub fn uri(&self) -> String {
        crate::storage::photo_uri(&self.path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
