// SPDX-License-Identifier: GPL-3.0-only

//! CLI commands for camera operations
//!
//! Both commands go through the same provider as the GUI.

use futures::StreamExt;
use snapcam::backends::camera::{
    CameraFacing, CameraProvider, DeviceBinding, PipeWireCamera, TorchState, resolve_device,
};
use snapcam::config::Config;
use snapcam::constants::timing;
use snapcam::errors::{AppResult, CameraError};
use std::path::PathBuf;

/// List all available cameras
pub fn list_cameras() -> AppResult<()> {
    gstreamer::init()?;

    let rt = tokio::runtime::Runtime::new()?;
    let (_, config) = Config::load();
    let provider = PipeWireCamera::new(config.capture_settings());
    let cameras = rt.block_on(provider.enumerate_devices());

    if cameras.is_empty() {
        println!("No cameras found.");
        return Ok(());
    }

    println!("Available cameras:");
    println!();
    for (index, camera) in cameras.iter().enumerate() {
        println!("  [{}] {} ({})", index, camera.name, camera.position);
        if let Some(v4l2) = &camera.v4l2_path {
            println!("      Device: {}", v4l2);
        }
    }
    println!();
    println!(
        "Torch: {}",
        if provider.has_torch() {
            "available"
        } else {
            "not available"
        }
    );

    Ok(())
}

/// Take a photo with the camera selected for `facing`
pub fn take_photo(
    facing: CameraFacing,
    output: Option<PathBuf>,
) -> AppResult<()> {
    gstreamer::init()?;

    let (_, mut config) = Config::load();
    if let Some(dir) = output {
        config.photo_directory = Some(dir.to_string_lossy().into_owned());
    }

    let rt = tokio::runtime::Runtime::new()?;
    let provider = PipeWireCamera::new(config.capture_settings());

    let path = rt.block_on(async {
        let cameras = provider.enumerate_devices().await;
        let device = resolve_device(&cameras, facing)
            .cloned()
            .ok_or(CameraError::NoCameraFound)?;
        println!("Using camera: {}", device.name);

        let binding = DeviceBinding {
            device: device.clone(),
            facing,
            active: true,
            photo: true,
            torch: TorchState::Off,
            zoom: 1.0,
        };
        provider.bind(&binding);

        // Keep the preview alive until the first frame lands
        println!("Capturing...");
        let mut preview = provider.preview(&device);
        tokio::time::timeout(timing::CLI_FIRST_FRAME_TIMEOUT, preview.next())
            .await
            .map_err(|_| {
                CameraError::InitializationFailed("timed out waiting for the camera".to_string())
            })?
            .ok_or_else(|| {
                CameraError::InitializationFailed(
                    "camera stream ended before producing a frame".to_string(),
                )
            })?;

        let photo = provider.capture(&binding).await?;
        drop(preview);
        AppResult::Ok(photo.path)
    })?;

    println!("Photo saved: {}", path.display());
    Ok(())
}
