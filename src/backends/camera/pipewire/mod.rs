// SPDX-License-Identifier: MPL-2.0

//! PipeWire camera backend
//!
//! Enumeration goes through `pw-cli`, preview through a GStreamer
//! `pipewiresrc` pipeline, focus through the V4L2 node behind the PipeWire
//! node and the torch through sysfs flash LEDs.

mod enumeration;
mod pipeline;

pub use enumeration::{PwNode, enumerate_pipewire_cameras, parse_location, parse_video_sources};
pub use pipeline::{PreviewPipeline, pipeline_description};

use super::types::*;
use super::{CameraProvider, CaptureSettings, frame_transform, v4l2_controls};
use crate::constants::pipeline as pipeline_consts;
use crate::errors::{CameraError, CaptureError};
use crate::flash::Torch;
use crate::pipelines::photo::PhotoPipeline;
use futures::StreamExt;
use futures::channel::mpsc;
use futures::future::BoxFuture;
use futures::stream::BoxStream;
use std::sync::{Arc, RwLock};
use tracing::{debug, error, info};

/// State shared between the provider and its running preview streams
#[derive(Debug)]
struct Shared {
    settings: CaptureSettings,
    binding: Option<DeviceBinding>,
}

/// PipeWire camera provider
pub struct PipeWireCamera {
    shared: Arc<RwLock<Shared>>,
    latest: pipeline::LatestFrame,
    torch: Arc<Torch>,
}

impl PipeWireCamera {
    pub fn new(settings: CaptureSettings) -> Self {
        Self::with_torch(settings, Torch::detect())
    }

    pub fn with_torch(settings: CaptureSettings, torch: Torch) -> Self {
        info!(dir = %settings.photo_directory.display(), torch = torch.is_available(), "Creating PipeWire camera provider");
        Self {
            shared: Arc::new(RwLock::new(Shared {
                settings,
                binding: None,
            })),
            latest: Arc::new(RwLock::new(None)),
            torch: Arc::new(torch),
        }
    }

    /// Whether a flash LED can be driven
    pub fn has_torch(&self) -> bool {
        self.torch.is_available()
    }

    fn settings(&self) -> Option<CaptureSettings> {
        self.shared.read().ok().map(|s| s.settings.clone())
    }
}

/// Zoom and mirroring for frames of `device` under the current binding
fn view_params(shared: &RwLock<Shared>, device: &CameraDevice) -> (f32, bool) {
    let Ok(shared) = shared.read() else {
        return (1.0, false);
    };
    let zoom = shared
        .binding
        .as_ref()
        .filter(|b| b.device.path == device.path)
        .map(|b| b.zoom)
        .unwrap_or(1.0);
    let mirror = shared.settings.mirror_front_preview && device.position == CameraPosition::Front;
    (zoom, mirror)
}

impl CameraProvider for PipeWireCamera {
    fn enumerate_devices(&self) -> BoxFuture<'static, Vec<CameraDevice>> {
        Box::pin(async {
            match tokio::task::spawn_blocking(enumerate_pipewire_cameras).await {
                Ok(devices) => devices,
                Err(e) => {
                    error!(error = %e, "Camera enumeration task failed");
                    Vec::new()
                }
            }
        })
    }

    fn bind(&self, binding: &DeviceBinding) {
        debug!(
            device = %binding.device.name,
            facing = ?binding.facing,
            active = binding.active,
            torch = ?binding.torch,
            zoom = binding.zoom,
            "Applying device binding"
        );

        let torch = if binding.active {
            binding.torch
        } else {
            TorchState::Off
        };
        self.torch.set(torch);

        if let Ok(mut shared) = self.shared.write() {
            shared.binding = Some(binding.clone());
        }
    }

    fn preview(&self, device: &CameraDevice) -> BoxStream<'static, Arc<PreviewFrame>> {
        let device = device.clone();
        let shared = Arc::clone(&self.shared);
        let latest = Arc::clone(&self.latest);

        Box::pin(async_stream::stream! {
            // Never capture a frame from the previously bound camera
            if let Ok(mut guard) = latest.write() {
                *guard = None;
            }

            let (sender, mut receiver) = mpsc::channel(pipeline_consts::FRAME_CHANNEL_CAPACITY);
            match PreviewPipeline::new(&device, sender, Arc::clone(&latest)) {
                Ok(_pipeline) => {
                    while let Some(frame) = receiver.next().await {
                        let (zoom, mirror) = view_params(&shared, &device);
                        yield frame_transform::transform_frame(&frame, zoom, mirror);
                    }
                    info!(device = %device.name, "Preview stream ended");
                }
                Err(e) => {
                    error!(device = %device.name, error = %e, "Failed to start preview");
                }
            }
        })
    }

    fn capture(
        &self,
        binding: &DeviceBinding,
    ) -> BoxFuture<'static, Result<CapturedPhoto, CaptureError>> {
        let frame = self.latest.read().ok().and_then(|guard| guard.clone());
        let settings = self.settings();
        let zoom = frame_transform::clamp_zoom(binding.zoom);
        let device = binding.device.name.clone();

        Box::pin(async move {
            let frame = frame.ok_or(CaptureError::NoFrameAvailable)?;
            let settings = settings
                .ok_or_else(|| CaptureError::Backend("capture settings unavailable".to_string()))?;

            info!(device = %device, zoom, "Capturing photo");
            let path = PhotoPipeline::new(settings.quality)
                .capture_and_save(frame, zoom, settings.photo_directory)
                .await?;

            Ok(CapturedPhoto::new(path))
        })
    }

    fn focus(
        &self,
        device: &CameraDevice,
        x: i32,
        y: i32,
    ) -> BoxFuture<'static, Result<(), CameraError>> {
        let v4l2_path = device.v4l2_path.clone();
        let name = device.name.clone();

        Box::pin(async move {
            let path = v4l2_path.ok_or_else(|| {
                CameraError::ControlFailed(format!("{} has no V4L2 node", name))
            })?;

            debug!(device = %name, x, y, "Focus requested");
            let method =
                tokio::task::spawn_blocking(move || v4l2_controls::trigger_autofocus(&path))
                    .await
                    .map_err(|e| CameraError::BackendError(e.to_string()))?
                    .map_err(CameraError::ControlFailed)?;
            debug!(device = %name, ?method, "Focus triggered");
            Ok(())
        })
    }

    fn configure(&self, settings: &CaptureSettings) {
        if let Ok(mut shared) = self.shared.write()
            && shared.settings != *settings
        {
            info!(dir = %settings.photo_directory.display(), quality = ?settings.quality, "Capture settings updated");
            shared.settings = settings.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::PhotoQuality;
    use std::path::PathBuf;

    fn settings() -> CaptureSettings {
        CaptureSettings {
            photo_directory: std::env::temp_dir().join("snapcam-provider-tests"),
            quality: PhotoQuality::High,
            mirror_front_preview: true,
        }
    }

    fn device(position: CameraPosition) -> CameraDevice {
        CameraDevice {
            name: "cam".to_string(),
            path: "pipewire-serial-1".to_string(),
            position,
            v4l2_path: None,
        }
    }

    fn binding(zoom: f32) -> DeviceBinding {
        DeviceBinding {
            device: device(CameraPosition::Back),
            facing: CameraFacing::Back,
            active: true,
            photo: true,
            torch: TorchState::Off,
            zoom,
        }
    }

    #[test]
    fn test_view_params_follow_binding() {
        let camera = PipeWireCamera::with_torch(settings(), Torch::with_leds(Vec::new()));
        assert_eq!(view_params(&camera.shared, &device(CameraPosition::Back)), (1.0, false));

        camera.bind(&binding(3.0));
        assert_eq!(view_params(&camera.shared, &device(CameraPosition::Back)), (3.0, false));
        assert!(view_params(&camera.shared, &device(CameraPosition::Front)).1);
    }

    #[test]
    fn test_inactive_binding_turns_torch_off() {
        let camera = PipeWireCamera::with_torch(settings(), Torch::with_leds(Vec::new()));
        let mut lit = binding(1.0);
        lit.torch = TorchState::On;
        camera.bind(&lit);
        assert_eq!(camera.torch.state(), TorchState::On);

        lit.active = false;
        camera.bind(&lit);
        assert_eq!(camera.torch.state(), TorchState::Off);
    }

    #[tokio::test]
    async fn test_capture_without_frame_fails() {
        let camera = PipeWireCamera::with_torch(settings(), Torch::with_leds(Vec::new()));
        let result = camera.capture(&binding(1.0)).await;
        assert_eq!(result, Err(CaptureError::NoFrameAvailable));
    }

    #[tokio::test]
    async fn test_capture_writes_latest_frame() {
        let dir = std::env::temp_dir().join(format!("snapcam-capture-{}", std::process::id()));
        let camera = PipeWireCamera::with_torch(
            CaptureSettings {
                photo_directory: dir.clone(),
                ..settings()
            },
            Torch::with_leds(Vec::new()),
        );
        let frame = PreviewFrame::new(8, 8, Arc::from(vec![200u8; 8 * 8 * 4]));
        *camera.latest.write().unwrap() = Some(Arc::new(frame));

        let photo = camera.capture(&binding(1.0)).await.unwrap();
        assert!(photo.path.starts_with(&dir));
        assert!(photo.uri().starts_with("file://"));
        std::fs::remove_dir_all(dir).ok();
    }

    #[tokio::test]
    async fn test_focus_without_v4l2_node_fails() {
        let camera = PipeWireCamera::with_torch(settings(), Torch::with_leds(Vec::new()));
        let result = camera.focus(&device(CameraPosition::Back), 10, 20).await;
        assert!(matches!(result, Err(CameraError::ControlFailed(_))));
    }

    #[test]
    fn test_configure_replaces_settings() {
        let camera = PipeWireCamera::with_torch(settings(), Torch::with_leds(Vec::new()));
        let updated = CaptureSettings {
            photo_directory: PathBuf::from("/tmp/elsewhere"),
            ..settings()
        };
        camera.configure(&updated);
        assert_eq!(camera.settings(), Some(updated));
    }
}
