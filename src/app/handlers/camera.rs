// SPDX-License-Identifier: GPL-3.0-only

//! Camera control handlers
//!
//! Handles the startup permission request, device enumeration, preview
//! frames, facing and torch toggles, and zoom.

use crate::app::state::{AppModel, Message};
use crate::backends::camera::{CameraDevice, PreviewFrame};
use crate::backends::permission::PermissionState;
use crate::constants::timing;
use crate::errors::PermissionError;
use cosmic::Task;
use cosmic::widget::image::Handle;
use std::sync::Arc;
use tracing::{debug, info};

impl AppModel {
    // =========================================================================
    // Startup
    // =========================================================================

    /// Tasks issued once when the screen is mounted
    ///
    /// Enumeration and the permission request run concurrently. The
    /// permission request is only ever issued once per session.
    pub(crate) fn mount(&mut self) -> Task<cosmic::Action<Message>> {
        let enumerate = Task::perform(self.camera.enumerate_devices(), |devices| {
            cosmic::Action::App(Message::DevicesEnumerated(devices))
        });

        let permission = if self.screen.begin_permission_request() {
            info!("Requesting camera permission");
            Task::perform(self.permission.request_camera_permission(), |result| {
                cosmic::Action::App(Message::PermissionResolved(result))
            })
        } else {
            Task::none()
        };

        Task::batch([enumerate, permission])
    }

    pub(crate) fn handle_permission_resolved(
        &mut self,
        result: Result<PermissionState, PermissionError>,
    ) -> Task<cosmic::Action<Message>> {
        self.screen.apply_permission_result(result);
        Task::none()
    }

    // =========================================================================
    // Camera Control Handlers
    // =========================================================================

    pub(crate) fn handle_devices_enumerated(
        &mut self,
        devices: Vec<CameraDevice>,
    ) -> Task<cosmic::Action<Message>> {
        for device in &devices {
            debug!(name = %device.name, path = %device.path, position = %device.position, "Camera");
        }
        self.screen.set_devices(devices);
        if self.screen.frame().is_none() {
            self.preview_handle = None;
        }
        match self.screen.bound_device() {
            Some(device) => info!(name = %device.name, facing = ?self.screen.facing(), "Camera bound"),
            None => info!(facing = ?self.screen.facing(), "No camera matches the current facing"),
        }
        Task::none()
    }

    pub(crate) fn handle_preview_frame(
        &mut self,
        frame: Arc<PreviewFrame>,
    ) -> Task<cosmic::Action<Message>> {
        let latency_ms = frame.captured_at.elapsed().as_secs_f64() * 1000.0;
        if latency_ms > timing::PREVIEW_LATENCY_WARN_MS {
            debug!(latency_ms, "Late preview frame");
        }

        self.preview_handle = Some(Handle::from_rgba(
            frame.width,
            frame.height,
            frame.data.to_vec(),
        ));
        self.screen.set_frame(frame);
        Task::none()
    }

    pub(crate) fn handle_toggle_facing(&mut self) -> Task<cosmic::Action<Message>> {
        let facing = self.screen.toggle_facing();
        self.preview_handle = None;
        match self.screen.bound_device() {
            Some(device) => info!(?facing, camera = %device.name, "Switching camera"),
            None => info!(?facing, "Switching camera, none available"),
        }
        Task::none()
    }

    pub(crate) fn handle_toggle_torch(&mut self) -> Task<cosmic::Action<Message>> {
        let torch = self.screen.toggle_torch();
        info!(?torch, "Torch toggled");
        Task::none()
    }

    pub(crate) fn handle_zoom(&mut self, delta: f32) -> Task<cosmic::Action<Message>> {
        let zoom = self.screen.zoom_by(delta);
        debug!(zoom, "Zoom changed");
        Task::none()
    }

    /// Push the screen's binding to the provider when it changed
    pub(crate) fn sync_binding(&mut self) {
        let binding = self.screen.binding();
        if binding == self.last_binding {
            return;
        }
        if let Some(binding) = &binding {
            debug!(
                device = %binding.device.path,
                active = binding.active,
                torch = ?binding.torch,
                zoom = binding.zoom,
                "Binding camera"
            );
            self.camera.bind(binding);
        }
        self.last_binding = binding;
    }
}
