// SPDX-License-Identifier: GPL-3.0-only

//! Camera screen state
//!
//! Everything the screen shows is derived from [`CameraScreen`]. It holds
//! no widgets and no providers, so every transition can be driven directly
//! from tests. `AppModel` owns one and turns its decisions into tasks.

use crate::backends::camera::{
    CameraDevice, CameraFacing, CapturedPhoto, DeviceBinding, PreviewFrame, TorchState,
    frame_transform, resolve_device,
};
use crate::backends::permission::PermissionState;
use crate::errors::{CaptureError, PermissionError};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Last tap location in preview-local coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FocusPoint {
    pub x: f32,
    pub y: f32,
}

/// Integer focus request handed to the camera
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusRequest {
    pub x: i32,
    pub y: i32,
    /// Identifies the tap so only its own expiry hides the ring
    pub generation: u64,
}

/// Full-screen viewer state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewerState {
    pub visible: bool,
    /// Index the viewer was opened at
    pub start_index: usize,
    /// Index currently shown
    pub current_index: usize,
}

/// Blocking alerts the screen can raise
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenAlert {
    PermissionRequired,
}

/// Why the screen renders nothing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderGate<'a> {
    /// Enumeration has not finished or found no matching camera
    NoDevice,
    /// Permission is anything but granted
    NotPermitted,
    /// Render the preview of this device
    Open(&'a CameraDevice),
}

#[derive(Debug, Default)]
pub struct CameraScreen {
    /// `None` until enumeration finishes
    devices: Option<Vec<CameraDevice>>,
    photos: Vec<CapturedPhoto>,
    focus_point: Option<FocusPoint>,
    focus_generation: u64,
    focus_ring_visible: bool,
    facing: CameraFacing,
    torch: TorchState,
    permission: PermissionState,
    permission_requested: bool,
    viewer: ViewerState,
    zoom: Zoom,
    alert: Option<ScreenAlert>,
    alerts_raised: u32,
    frame: Option<Arc<PreviewFrame>>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Zoom(f32);

impl Default for Zoom {
    fn default() -> Self {
        Zoom(crate::constants::zoom::MIN_ZOOM)
    }
}

impl CameraScreen {
    pub fn new() -> Self {
        Self::default()
    }

    // ===== Permission =====

    /// Claim the single permission request of this session
    ///
    /// Returns `false` if the request was already issued.
    pub fn begin_permission_request(&mut self) -> bool {
        if self.permission_requested {
            return false;
        }
        self.permission_requested = true;
        true
    }

    /// Store the permission answer
    ///
    /// Anything short of a grant, including a failed request, raises the
    /// permission alert.
    pub fn apply_permission_result(&mut self, result: Result<PermissionState, PermissionError>) {
        match result {
            Ok(state) => {
                info!(?state, "Camera permission resolved");
                self.permission = state;
                if !state.is_granted() {
                    self.raise_alert(ScreenAlert::PermissionRequired);
                }
            }
            Err(e) => {
                error!(error = %e, "Camera permission request failed");
                self.permission = PermissionState::Denied;
                self.raise_alert(ScreenAlert::PermissionRequired);
            }
        }
    }

    pub fn permission(&self) -> PermissionState {
        self.permission
    }

    fn raise_alert(&mut self, alert: ScreenAlert) {
        self.alert = Some(alert);
        self.alerts_raised += 1;
    }

    /// Alert currently shown, if any
    pub fn alert(&self) -> Option<ScreenAlert> {
        self.alert
    }

    /// Number of alerts raised this session
    pub fn alerts_raised(&self) -> u32 {
        self.alerts_raised
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }

    // ===== Devices =====

    pub fn set_devices(&mut self, devices: Vec<CameraDevice>) {
        info!(count = devices.len(), "Cameras enumerated");
        let previous = self.bound_device().map(|d| d.path.clone());
        self.devices = Some(devices);
        if self.bound_device().map(|d| d.path.clone()) != previous {
            self.frame = None;
        }
    }

    pub fn devices(&self) -> Option<&[CameraDevice]> {
        self.devices.as_deref()
    }

    /// Device bound for the current facing
    pub fn bound_device(&self) -> Option<&CameraDevice> {
        resolve_device(self.devices.as_deref()?, self.facing)
    }

    /// Declarative binding for the provider, `None` while unresolved
    pub fn binding(&self) -> Option<DeviceBinding> {
        let device = self.bound_device()?;
        Some(DeviceBinding {
            device: device.clone(),
            facing: self.facing,
            active: self.permission.is_granted(),
            photo: true,
            torch: self.torch,
            zoom: self.zoom.0,
        })
    }

    /// Evaluate the two render guards
    pub fn render_gate(&self) -> RenderGate<'_> {
        match self.bound_device() {
            None => RenderGate::NoDevice,
            Some(_) if !self.permission.is_granted() => RenderGate::NotPermitted,
            Some(device) => RenderGate::Open(device),
        }
    }

    // ===== Preview =====

    pub fn set_frame(&mut self, frame: Arc<PreviewFrame>) {
        self.frame = Some(frame);
    }

    pub fn frame(&self) -> Option<&Arc<PreviewFrame>> {
        self.frame.as_ref()
    }

    // ===== Capture =====

    /// Apply a finished capture
    ///
    /// Failures are logged and otherwise ignored.
    pub fn record_capture(&mut self, result: Result<CapturedPhoto, CaptureError>) {
        match result {
            Ok(photo) => {
                info!(path = %photo.path.display(), count = self.photos.len() + 1, "Photo captured");
                self.photos.push(photo);
            }
            Err(e) => error!(error = %e, "Photo capture failed"),
        }
    }

    pub fn photos(&self) -> &[CapturedPhoto] {
        &self.photos
    }

    pub fn latest_photo(&self) -> Option<&CapturedPhoto> {
        self.photos.last()
    }

    pub fn photo_uris(&self) -> Vec<String> {
        self.photos.iter().map(CapturedPhoto::uri).collect()
    }

    // ===== Toggles =====

    pub fn toggle_facing(&mut self) -> CameraFacing {
        self.facing = self.facing.toggled();
        self.frame = None;
        debug!(facing = ?self.facing, "Facing toggled");
        self.facing
    }

    pub fn facing(&self) -> CameraFacing {
        self.facing
    }

    pub fn toggle_torch(&mut self) -> TorchState {
        self.torch = self.torch.toggled();
        debug!(torch = ?self.torch, "Torch toggled");
        self.torch
    }

    pub fn torch(&self) -> TorchState {
        self.torch
    }

    // ===== Focus =====

    /// Record a tap and show the ring there
    ///
    /// The stored point keeps the exact input; the request carries the
    /// floored integer coordinates.
    pub fn focus_at(&mut self, x: f32, y: f32) -> FocusRequest {
        self.focus_point = Some(FocusPoint { x, y });
        self.focus_generation += 1;
        self.focus_ring_visible = true;
        FocusRequest {
            x: x.floor() as i32,
            y: y.floor() as i32,
            generation: self.focus_generation,
        }
    }

    /// Hide the ring if `generation` is still the latest tap
    pub fn expire_focus_ring(&mut self, generation: u64) -> bool {
        if generation != self.focus_generation {
            return false;
        }
        self.focus_ring_visible = false;
        true
    }

    pub fn focus_point(&self) -> Option<FocusPoint> {
        self.focus_point
    }

    /// Point the ring is drawn at, while it is visible
    pub fn focus_ring(&self) -> Option<FocusPoint> {
        self.focus_point.filter(|_| self.focus_ring_visible)
    }

    // ===== Zoom =====

    /// Adjust zoom by `delta`, clamped to the supported range
    pub fn zoom_by(&mut self, delta: f32) -> f32 {
        if delta.is_nan() {
            return self.zoom.0;
        }
        self.zoom = Zoom(frame_transform::clamp_zoom(self.zoom.0 + delta));
        self.zoom.0
    }

    pub fn zoom(&self) -> f32 {
        self.zoom.0
    }

    // ===== Viewer =====

    /// Open the viewer at the most recent photo
    ///
    /// No-op with an empty photo sequence.
    pub fn open_viewer(&mut self) -> bool {
        let Some(last) = self.photos.len().checked_sub(1) else {
            warn!("No photos to view");
            return false;
        };
        self.viewer = ViewerState {
            visible: true,
            start_index: last,
            current_index: last,
        };
        true
    }

    pub fn close_viewer(&mut self) {
        self.viewer.visible = false;
    }

    pub fn viewer_next(&mut self) {
        if self.viewer.visible && self.viewer.current_index + 1 < self.photos.len() {
            self.viewer.current_index += 1;
        }
    }

    pub fn viewer_previous(&mut self) {
        if self.viewer.visible {
            self.viewer.current_index = self.viewer.current_index.saturating_sub(1);
        }
    }

    pub fn viewer(&self) -> ViewerState {
        self.viewer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::camera::CameraPosition;
    use crate::constants::zoom::{MAX_ZOOM, MIN_ZOOM};

    fn ready_screen() -> CameraScreen {
        let mut screen = CameraScreen::new();
        screen.set_devices(vec![CameraDevice {
            name: "main".to_string(),
            path: "pipewire-1".to_string(),
            position: CameraPosition::Back,
            v4l2_path: None,
        }]);
        screen.apply_permission_result(Ok(PermissionState::Granted));
        screen
    }

    #[test]
    fn test_permission_requested_once() {
        let mut screen = CameraScreen::new();
        assert!(screen.begin_permission_request());
        assert!(!screen.begin_permission_request());
    }

    #[test]
    fn test_defaults() {
        let screen = CameraScreen::new();
        assert_eq!(screen.permission(), PermissionState::Denied);
        assert_eq!(screen.facing(), CameraFacing::Back);
        assert_eq!(screen.torch(), TorchState::Off);
        assert_eq!(screen.zoom(), MIN_ZOOM);
        assert_eq!(screen.render_gate(), RenderGate::NoDevice);
    }

    #[test]
    fn test_zoom_clamps() {
        let mut screen = CameraScreen::new();
        assert_eq!(screen.zoom_by(-5.0), MIN_ZOOM);
        assert_eq!(screen.zoom_by(100.0), MAX_ZOOM);
        assert_eq!(screen.zoom_by(f32::NAN), MAX_ZOOM);
    }

    #[test]
    fn test_focus_ring_expiry_only_for_latest_tap() {
        let mut screen = ready_screen();
        let first = screen.focus_at(10.0, 10.0);
        let second = screen.focus_at(20.0, 20.0);
        assert!(!screen.expire_focus_ring(first.generation));
        assert!(screen.focus_ring().is_some());
        assert!(screen.expire_focus_ring(second.generation));
        assert!(screen.focus_ring().is_none());
        // The point itself is kept
        assert_eq!(screen.focus_point(), Some(FocusPoint { x: 20.0, y: 20.0 }));
    }

    #[test]
    fn test_binding_inactive_until_granted() {
        let mut screen = CameraScreen::new();
        screen.set_devices(ready_screen().devices().unwrap().to_vec());
        assert!(!screen.binding().unwrap().active);
        screen.apply_permission_result(Ok(PermissionState::Granted));
        assert!(screen.binding().unwrap().active);
    }

    #[test]
    fn test_toggle_facing_drops_stale_frame() {
        let mut screen = ready_screen();
        screen.set_frame(Arc::new(PreviewFrame::new(1, 1, Arc::from(vec![0u8; 4]))));
        screen.toggle_facing();
        assert!(screen.frame().is_none());
    }
}
