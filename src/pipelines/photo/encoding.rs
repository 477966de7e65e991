// SPDX-License-Identifier: GPL-3.0-only

//! Async JPEG encoding
//!
//! Encoding and disk writes run on the blocking pool.

use crate::backends::camera::PreviewFrame;
use crate::backends::camera::frame_transform;
use crate::constants::PhotoQuality;
use crate::errors::CaptureError;
use image::RgbImage;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

/// Encoded image data ready for saving
pub struct EncodedImage {
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// Photo encoder
#[derive(Debug, Clone, Copy, Default)]
pub struct PhotoEncoder {
    quality: PhotoQuality,
}

impl PhotoEncoder {
    pub fn new(quality: PhotoQuality) -> Self {
        Self { quality }
    }

    pub fn quality(&self) -> PhotoQuality {
        self.quality
    }

    /// Crop a frame to the zoom level and encode it
    pub async fn encode(
        &self,
        frame: Arc<PreviewFrame>,
        zoom: f32,
    ) -> Result<EncodedImage, CaptureError> {
        if !frame.is_complete() {
            return Err(CaptureError::EncodingFailed(format!(
                "frame buffer holds {} bytes for {}x{}",
                frame.data.len(),
                frame.width,
                frame.height
            )));
        }

        info!(
            width = frame.width,
            height = frame.height,
            zoom,
            quality = ?self.quality,
            "Starting encoding"
        );

        let quality = self.quality;
        tokio::task::spawn_blocking(move || {
            let (rgba, width, height) =
                frame_transform::crop_rgba(&frame.data, frame.width, frame.height, zoom);
            let image = rgba_to_rgb(&rgba, width, height)?;
            let data = Self::encode_jpeg(&image, quality)?;

            debug!(size = data.len(), width, height, "Encoding complete");
            Ok(EncodedImage {
                data,
                width,
                height,
            })
        })
        .await
        .map_err(|e| CaptureError::EncodingFailed(format!("Encoding task error: {}", e)))?
    }

    /// Save encoded image to a new file in `dir` asynchronously
    pub async fn save(
        encoded: EncodedImage,
        dir: PathBuf,
        timestamp: chrono::DateTime<chrono::Local>,
    ) -> Result<PathBuf, CaptureError> {
        info!(dir = %dir.display(), "Saving photo");

        let path = tokio::task::spawn_blocking(move || {
            crate::storage::write_new_photo(&dir, timestamp, &encoded.data)
        })
        .await
        .map_err(|e| CaptureError::SaveFailed(format!("Save task error: {}", e)))??;

        info!(path = %path.display(), "Photo saved successfully");
        Ok(path)
    }

    fn encode_jpeg(image: &RgbImage, quality: PhotoQuality) -> Result<Vec<u8>, CaptureError> {
        let mut buffer = Vec::new();
        let mut cursor = std::io::Cursor::new(&mut buffer);

        let mut encoder =
            image::codecs::jpeg::JpegEncoder::new_with_quality(&mut cursor, quality.jpeg_quality());
        encoder.encode(
            image.as_raw(),
            image.width(),
            image.height(),
            image::ExtendedColorType::Rgb8,
        )?;

        Ok(buffer)
    }
}

/// Drop the alpha channel
fn rgba_to_rgb(rgba: &[u8], width: u32, height: u32) -> Result<RgbImage, CaptureError> {
    let rgb: Vec<u8> = rgba
        .chunks_exact(4)
        .flat_map(|px| [px[0], px[1], px[2]])
        .collect();
    RgbImage::from_raw(width, height, rgb)
        .ok_or_else(|| CaptureError::EncodingFailed("RGB buffer size mismatch".to_string()))
}
