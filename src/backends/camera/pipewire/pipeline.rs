// SPDX-License-Identifier: MPL-2.0

//! PipeWire GStreamer pipeline for the live preview

use super::super::types::{CameraDevice, PreviewFrame};
use crate::constants::{pipeline, timing};
use crate::errors::CameraError;
use futures::channel::mpsc;
use gstreamer::prelude::*;
use gstreamer_app::AppSink;
use gstreamer_video::VideoInfo;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};
use tracing::{debug, error, info, warn};

static FRAME_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Sender half used by the appsink callback
pub type FrameSender = mpsc::Sender<Arc<PreviewFrame>>;

/// Latest decoded frame, shared with the capture path
pub type LatestFrame = Arc<RwLock<Option<Arc<PreviewFrame>>>>;

/// PipeWire camera pipeline
///
/// Decodes whatever the camera produces to RGBA and pushes frames into a
/// bounded channel. The device stays open until the pipeline is dropped.
pub struct PreviewPipeline {
    pipeline: gstreamer::Pipeline,
    appsink: AppSink,
}

/// Map a device path to the `pipewiresrc` property selecting it
pub fn pipewire_target(device_path: &str) -> String {
    if device_path.is_empty() {
        // PipeWire picks its default camera
        String::new()
    } else if let Some(serial) = device_path.strip_prefix("pipewire-serial-") {
        format!("target-object={} ", serial)
    } else if let Some(node_id) = device_path.strip_prefix("pipewire-") {
        format!("target-object={} ", node_id)
    } else if device_path.starts_with("/dev/video") {
        format!("path=v4l2:{} ", device_path)
    } else {
        warn!(device_path, "Unknown device path format, using path property");
        format!("path={} ", device_path)
    }
}

/// Build the gst-launch description for a device
pub fn pipeline_description(device_path: &str) -> String {
    format!(
        "pipewiresrc {}do-timestamp=true ! \
         queue max-size-buffers={max} leaky=downstream ! \
         decodebin ! videoconvert ! \
         video/x-raw,format={format} ! \
         appsink name=sink",
        pipewire_target(device_path),
        max = pipeline::MAX_BUFFERS,
        format = pipeline::OUTPUT_FORMAT,
    )
}

/// Copy a possibly padded RGBA plane into a tightly packed buffer
pub fn pack_rgba(data: &[u8], width: u32, height: u32, stride: usize) -> Option<Vec<u8>> {
    let row_bytes = width as usize * 4;
    if stride == row_bytes {
        return data.get(..row_bytes * height as usize).map(<[u8]>::to_vec);
    }

    let mut packed = Vec::with_capacity(row_bytes * height as usize);
    for row in 0..height as usize {
        let start = row * stride;
        packed.extend_from_slice(data.get(start..start + row_bytes)?);
    }
    Some(packed)
}

impl PreviewPipeline {
    /// Create and start a preview pipeline
    pub fn new(
        device: &CameraDevice,
        frame_sender: FrameSender,
        latest: LatestFrame,
    ) -> Result<Self, CameraError> {
        info!(device = %device.name, path = %device.path, "Creating PipeWire preview pipeline");

        gstreamer::init()?;
        gstreamer::ElementFactory::find("pipewiresrc").ok_or_else(|| {
            CameraError::InitializationFailed("pipewiresrc not available".to_string())
        })?;

        let description = pipeline_description(&device.path);
        debug!(pipeline = %description, "Launching pipeline");

        let pipeline = gstreamer::parse::launch(&description)?
            .dynamic_cast::<gstreamer::Pipeline>()
            .map_err(|_| {
                CameraError::InitializationFailed("Launch result is not a pipeline".to_string())
            })?;

        let appsink = pipeline
            .by_name("sink")
            .ok_or_else(|| CameraError::InitializationFailed("Failed to get appsink".to_string()))?
            .dynamic_cast::<AppSink>()
            .map_err(|_| CameraError::InitializationFailed("Failed to cast appsink".to_string()))?;

        appsink.set_property("sync", false);
        appsink.set_property("max-buffers", pipeline::MAX_BUFFERS);
        appsink.set_property("drop", true);
        appsink.set_property("enable-last-sample", false);

        appsink.set_callbacks(
            gstreamer_app::AppSinkCallbacks::builder()
                .new_sample(move |appsink| {
                    let frame_num = FRAME_COUNTER.fetch_add(1, Ordering::Relaxed);

                    let sample = appsink.pull_sample().map_err(|e| {
                        if frame_num % timing::FRAME_LOG_INTERVAL == 0 {
                            error!(frame = frame_num, error = ?e, "Failed to pull sample");
                        }
                        gstreamer::FlowError::Eos
                    })?;

                    let buffer = sample.buffer().ok_or(gstreamer::FlowError::Error)?;
                    if buffer.flags().contains(gstreamer::BufferFlags::CORRUPTED) {
                        // Skip the frame, keep streaming
                        return Ok(gstreamer::FlowSuccess::Ok);
                    }

                    let caps = sample.caps().ok_or(gstreamer::FlowError::Error)?;
                    let video_info =
                        VideoInfo::from_caps(caps).map_err(|_| gstreamer::FlowError::Error)?;
                    let map = buffer
                        .map_readable()
                        .map_err(|_| gstreamer::FlowError::Error)?;

                    let (width, height) = (video_info.width(), video_info.height());
                    let stride = video_info.stride()[0] as usize;
                    let Some(packed) = pack_rgba(map.as_slice(), width, height, stride) else {
                        warn!(frame = frame_num, width, height, stride, "Short RGBA buffer");
                        return Ok(gstreamer::FlowSuccess::Ok);
                    };

                    let frame = Arc::new(PreviewFrame::new(width, height, Arc::from(packed)));

                    if let Ok(mut guard) = latest.write() {
                        *guard = Some(Arc::clone(&frame));
                    }

                    let mut sender = frame_sender.clone();
                    if let Err(e) = sender.try_send(frame) {
                        if e.is_disconnected() {
                            return Err(gstreamer::FlowError::Eos);
                        }
                        if frame_num % timing::FRAME_LOG_INTERVAL == 0 {
                            debug!(frame = frame_num, "Frame dropped (channel full)");
                        }
                    }

                    if frame_num % timing::FRAME_LOG_INTERVAL == 0 {
                        debug!(frame = frame_num, width, height, "Preview frame");
                    }

                    Ok(gstreamer::FlowSuccess::Ok)
                })
                .build(),
        );

        pipeline.set_state(gstreamer::State::Playing).map_err(|e| {
            CameraError::InitializationFailed(format!("Failed to start pipeline: {}", e))
        })?;

        info!(device = %device.name, "Preview pipeline started");

        Ok(Self { pipeline, appsink })
    }
}

impl Drop for PreviewPipeline {
    fn drop(&mut self) {
        info!("Dropping preview pipeline - releasing camera");
        self.appsink
            .set_callbacks(gstreamer_app::AppSinkCallbacks::builder().build());
        if let Err(e) = self.pipeline.set_state(gstreamer::State::Null) {
            debug!(error = ?e, "Pipeline state change had issues");
        }
        let (result, state, _) = self.pipeline.state(gstreamer::ClockTime::from_seconds(
            timing::STOP_TIMEOUT_SECS,
        ));
        debug!(result = ?result, state = ?state, "Preview pipeline stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pipewire_target() {
        assert_eq!(pipewire_target(""), "");
        assert_eq!(pipewire_target("pipewire-serial-2146"), "target-object=2146 ");
        assert_eq!(pipewire_target("pipewire-76"), "target-object=76 ");
        assert_eq!(pipewire_target("/dev/video0"), "path=v4l2:/dev/video0 ");
    }

    #[test]
    fn test_pipeline_description_ends_in_rgba_appsink() {
        let desc = pipeline_description("pipewire-serial-7");
        assert!(desc.starts_with("pipewiresrc target-object=7 "));
        assert!(desc.contains("video/x-raw,format=RGBA"));
        assert!(desc.ends_with("appsink name=sink"));
    }

    #[test]
    fn test_pack_rgba_strips_padding() {
        // 1x2 image, stride 8 (4 bytes of padding per row)
        let data = [1, 2, 3, 4, 0, 0, 0, 0, 5, 6, 7, 8, 0, 0, 0, 0];
        assert_eq!(pack_rgba(&data, 1, 2, 8), Some(vec![1, 2, 3, 4, 5, 6, 7, 8]));
        assert_eq!(pack_rgba(&data[..10], 1, 2, 8), None);
    }
}
