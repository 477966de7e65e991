// SPDX-License-Identifier: MPL-2.0

//! Camera backend abstraction
//!
//! The screen never talks to PipeWire directly. It holds an
//! `Arc<dyn CameraProvider>` and hands it a [`DeviceBinding`] describing
//! which camera, torch and zoom level it wants.
//!
//! ```text
//! ┌─────────────────────┐
//! │   UI Layer (App)    │
//! └──────────┬──────────┘
//!            │  DeviceBinding
//!            ▼
//! ┌─────────────────────┐
//! │ CameraProvider Trait│  ← Common interface, fakes in tests
//! └──────────┬──────────┘
//!            │
//!            ▼
//!       ┌────────┐
//!       │PipeWire│  ← Concrete implementation
//!       └────────┘
//! ```

pub mod frame_transform;
pub mod pipewire;
pub mod types;
pub mod v4l2_controls;

pub use pipewire::PipeWireCamera;
pub use types::*;

use crate::constants::PhotoQuality;
use crate::errors::{CameraError, CaptureError};
use futures::future::BoxFuture;
use futures::stream::BoxStream;
use std::path::PathBuf;
use std::sync::Arc;

/// Settings the provider needs to write photos
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureSettings {
    pub photo_directory: PathBuf,
    pub quality: PhotoQuality,
    pub mirror_front_preview: bool,
}

/// Camera capability injected into the screen
///
/// Every call is cheap to issue from the UI thread. Slow work happens
/// inside the returned futures and streams.
pub trait CameraProvider: Send + Sync {
    /// List the cameras currently available
    fn enumerate_devices(&self) -> BoxFuture<'static, Vec<CameraDevice>>;

    /// Apply the declarative binding (torch, zoom, active device)
    ///
    /// Torch requests on hardware without a torch are ignored.
    fn bind(&self, binding: &DeviceBinding);

    /// Live preview frames for a device
    ///
    /// The device is held open for as long as the stream is alive.
    fn preview(&self, device: &CameraDevice) -> BoxStream<'static, Arc<PreviewFrame>>;

    /// Capture a still photo from the bound device
    fn capture(&self, binding: &DeviceBinding)
    -> BoxFuture<'static, Result<CapturedPhoto, CaptureError>>;

    /// Ask the device to focus toward a preview-local point
    fn focus(&self, device: &CameraDevice, x: i32, y: i32)
    -> BoxFuture<'static, Result<(), CameraError>>;

    /// Update photo directory, quality and mirroring
    fn configure(&self, _settings: &CaptureSettings) {}
}

/// Pick the device the screen should bind for a facing
///
/// Back prefers a back camera, then an external one. Front prefers a
/// front camera and otherwise behaves like Back. With no devices the
/// result is `None` and the screen renders nothing.
pub fn resolve_device(devices: &[CameraDevice], facing: CameraFacing) -> Option<&CameraDevice> {
    let first_at = |position: CameraPosition| devices.iter().find(|d| d.position == position);

    match facing {
        CameraFacing::Front => first_at(CameraPosition::Front)
            .or_else(|| resolve_device(devices, CameraFacing::Back)),
        CameraFacing::Back => {
            first_at(CameraPosition::Back).or_else(|| first_at(CameraPosition::External))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn device(name: &str, position: CameraPosition) -> CameraDevice {
        CameraDevice {
            name: name.to_string(),
            path: format!("pipewire-{}", name),
            position,
            v4l2_path: None,
        }
    }

    #[test]
    fn test_resolve_empty_is_unresolved() {
        assert!(resolve_device(&[], CameraFacing::Back).is_none());
        assert!(resolve_device(&[], CameraFacing::Front).is_none());
    }

    #[test]
    fn test_resolve_phone_layout() {
        let devices = vec![
            device("selfie", CameraPosition::Front),
            device("main", CameraPosition::Back),
        ];
        assert_eq!(resolve_device(&devices, CameraFacing::Back).unwrap().name, "main");
        assert_eq!(resolve_device(&devices, CameraFacing::Front).unwrap().name, "selfie");
    }

    #[test]
    fn test_resolve_laptop_webcam() {
        let devices = vec![device("webcam", CameraPosition::External)];
        assert_eq!(resolve_device(&devices, CameraFacing::Back).unwrap().name, "webcam");
        // Front falls back to the back resolution
        assert_eq!(resolve_device(&devices, CameraFacing::Front).unwrap().name, "webcam");
    }

    #[test]
    fn test_resolve_prefers_back_over_external() {
        let devices = vec![
            device("usb", CameraPosition::External),
            device("main", CameraPosition::Back),
        ];
        assert_eq!(resolve_device(&devices, CameraFacing::Back).unwrap().name, "main");
    }
}
