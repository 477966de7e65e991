// SPDX-License-Identifier: GPL-3.0-only
//! CPU transforms applied to RGBA frames before display and capture
//!
//! Zoom is a digital centre crop: the output keeps the aspect ratio of the
//! input and covers `1 / zoom` of each dimension. The widget scales it back
//! up to fill the preview.

use super::types::PreviewFrame;
use crate::constants::zoom::{MAX_ZOOM, MIN_ZOOM};
use std::sync::Arc;

/// Clamp a zoom factor into the supported range
pub fn clamp_zoom(zoom: f32) -> f32 {
    if zoom.is_nan() {
        return MIN_ZOOM;
    }
    zoom.clamp(MIN_ZOOM, MAX_ZOOM)
}

/// Size and origin of the centre crop for a zoom factor
///
/// Returns `(x, y, width, height)`. Width and height are at least 1.
pub fn crop_rect(width: u32, height: u32, zoom: f32) -> (u32, u32, u32, u32) {
    let zoom = clamp_zoom(zoom);
    let crop_w = ((width as f32 / zoom).round() as u32).clamp(1, width.max(1));
    let crop_h = ((height as f32 / zoom).round() as u32).clamp(1, height.max(1));
    let x = (width - crop_w.min(width)) / 2;
    let y = (height - crop_h.min(height)) / 2;
    (x, y, crop_w, crop_h)
}

/// Centre-crop tightly packed RGBA data
pub fn crop_rgba(data: &[u8], width: u32, height: u32, zoom: f32) -> (Vec<u8>, u32, u32) {
    let (x, y, crop_w, crop_h) = crop_rect(width, height, zoom);
    let stride = width as usize * 4;
    let row_bytes = crop_w as usize * 4;
    let mut out = Vec::with_capacity(row_bytes * crop_h as usize);

    for row in y as usize..(y + crop_h) as usize {
        let start = row * stride + x as usize * 4;
        match data.get(start..start + row_bytes) {
            Some(pixels) => out.extend_from_slice(pixels),
            None => break,
        }
    }

    (out, crop_w, crop_h)
}

/// Mirror tightly packed RGBA data horizontally, in place
pub fn mirror_rgba(data: &mut [u8], width: u32) {
    let stride = width as usize * 4;
    if stride == 0 {
        return;
    }
    for row in data.chunks_exact_mut(stride) {
        let pixels = row.len() / 4;
        for i in 0..pixels / 2 {
            let (a, b) = (i * 4, (pixels - 1 - i) * 4);
            for c in 0..4 {
                row.swap(a + c, b + c);
            }
        }
    }
}

/// Apply zoom and optional mirroring to a frame
///
/// Frames that need neither are passed through without copying.
pub fn transform_frame(frame: &Arc<PreviewFrame>, zoom: f32, mirror: bool) -> Arc<PreviewFrame> {
    let zoom = clamp_zoom(zoom);
    if zoom <= MIN_ZOOM && !mirror {
        return Arc::clone(frame);
    }

    let (mut data, width, height) = if zoom > MIN_ZOOM {
        crop_rgba(&frame.data, frame.width, frame.height, zoom)
    } else {
        (frame.data.to_vec(), frame.width, frame.height)
    };

    if mirror {
        mirror_rgba(&mut data, width);
    }

    Arc::new(PreviewFrame {
        width,
        height,
        data: Arc::from(data),
        captured_at: frame.captured_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 4x2 frame where every pixel's red channel holds its index
    fn indexed_frame() -> Vec<u8> {
        (0..8u8).flat_map(|i| [i, 0, 0, 255]).collect()
    }

    #[test]
    fn test_clamp_zoom() {
        assert_eq!(clamp_zoom(0.5), MIN_ZOOM);
        assert_eq!(clamp_zoom(100.0), MAX_ZOOM);
        assert_eq!(clamp_zoom(f32::NAN), MIN_ZOOM);
        assert_eq!(clamp_zoom(2.0), 2.0);
    }

    #[test]
    fn test_crop_rect_centres() {
        assert_eq!(crop_rect(1920, 1080, 1.0), (0, 0, 1920, 1080));
        assert_eq!(crop_rect(1920, 1080, 2.0), (480, 270, 960, 540));
    }

    #[test]
    fn test_crop_rgba_takes_middle_pixels() {
        let (data, w, h) = crop_rgba(&indexed_frame(), 4, 2, 2.0);
        assert_eq!((w, h), (2, 1));
        // Row 0, pixels 1 and 2
        assert_eq!(data[0], 1);
        assert_eq!(data[4], 2);
    }

    #[test]
    fn test_mirror_reverses_rows() {
        let mut data = indexed_frame();
        mirror_rgba(&mut data, 4);
        let reds: Vec<u8> = data.chunks_exact(4).map(|p| p[0]).collect();
        assert_eq!(reds, vec![3, 2, 1, 0, 7, 6, 5, 4]);
    }

    #[test]
    fn test_identity_transform_shares_buffer() {
        let frame = Arc::new(PreviewFrame::new(4, 2, Arc::from(indexed_frame())));
        let out = transform_frame(&frame, 1.0, false);
        assert!(Arc::ptr_eq(&frame, &out));
    }
}
