// SPDX-License-Identifier: MPL-2.0

//! Async photo capture pipeline
//!
//! ```text
//! Latest preview frame → Zoom crop → JPEG encoding → Disk I/O
//!       ↓
//! Preview continues uninterrupted
//! ```

pub mod encoding;

pub use encoding::{EncodedImage, PhotoEncoder};

use crate::backends::camera::PreviewFrame;
use crate::constants::PhotoQuality;
use crate::errors::CaptureError;
use std::path::PathBuf;
use std::sync::Arc;

/// Complete photo capture pipeline
#[derive(Debug, Clone, Copy, Default)]
pub struct PhotoPipeline {
    encoder: PhotoEncoder,
}

impl PhotoPipeline {
    pub fn new(quality: PhotoQuality) -> Self {
        Self {
            encoder: PhotoEncoder::new(quality),
        }
    }

    /// Encode a frame and write it to a fresh file in `output_dir`
    pub async fn capture_and_save(
        &self,
        frame: Arc<PreviewFrame>,
        zoom: f32,
        output_dir: PathBuf,
    ) -> Result<PathBuf, CaptureError> {
        let encoded = self.encoder.encode(frame, zoom).await?;
        PhotoEncoder::save(encoded, output_dir, chrono::Local::now()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_concurrent_captures_get_distinct_files() {
        let dir = std::env::temp_dir().join(format!("snapcam-concurrent-{}", std::process::id()));
        let frame = Arc::new(PreviewFrame::new(8, 8, Arc::from(vec![200u8; 8 * 8 * 4])));
        let pipeline = PhotoPipeline::new(PhotoQuality::Low);

        let (first, second) = tokio::join!(
            pipeline.capture_and_save(frame.clone(), 1.0, dir.clone()),
            pipeline.capture_and_save(frame, 1.0, dir.clone()),
        );
        let (first, second) = (first.unwrap(), second.unwrap());

        assert_ne!(first, second);
        assert!(first.exists() && second.exists());
        assert_eq!(std::fs::read_dir(&dir).unwrap().count(), 2);
        std::fs::remove_dir_all(dir).ok();
    }
}
