// SPDX-License-Identifier: GPL-3.0-only

//! Capture and focus handlers

use crate::app::camera_preview::TapEvent;
use crate::app::focus_ring::FocusRing;
use crate::app::state::{AppModel, Message};
use crate::backends::camera::CapturedPhoto;
use crate::errors::{CameraError, CaptureError};
use cosmic::Task;
use std::time::Duration;
use tracing::{debug, info, warn};

impl AppModel {
    /// Create a delayed task that sends a message after the specified duration
    pub(crate) fn delay_task(delay: Duration, message: Message) -> Task<cosmic::Action<Message>> {
        Task::perform(
            async move {
                tokio::time::sleep(delay).await;
                message
            },
            cosmic::Action::App,
        )
    }

    // =========================================================================
    // Capture Handlers
    // =========================================================================

    pub(crate) fn handle_capture(&mut self) -> Task<cosmic::Action<Message>> {
        let Some(binding) = self.screen.binding() else {
            warn!("Capture requested without a bound camera");
            return self.handle_capture_complete(Err(CaptureError::NoDevice));
        };

        info!(camera = %binding.device.name, zoom = binding.zoom, "Capturing photo");
        Task::perform(self.camera.capture(&binding), |result| {
            cosmic::Action::App(Message::CaptureComplete(result))
        })
    }

    pub(crate) fn handle_capture_complete(
        &mut self,
        result: Result<CapturedPhoto, CaptureError>,
    ) -> Task<cosmic::Action<Message>> {
        self.screen.record_capture(result);
        Task::none()
    }

    // =========================================================================
    // Focus Handlers
    // =========================================================================

    pub(crate) fn handle_tap(&mut self, event: TapEvent) -> Task<cosmic::Action<Message>> {
        match self.tap.handle(event) {
            Some(point) => self.handle_focus_at(point.x, point.y),
            None => Task::none(),
        }
    }

    /// Move the focus ring to (x, y) and ask the camera to focus there
    pub(crate) fn handle_focus_at(&mut self, x: f32, y: f32) -> Task<cosmic::Action<Message>> {
        let request = self.screen.focus_at(x, y);
        debug!(x, y, generation = request.generation, "Tap to focus");

        let expire = Self::delay_task(
            FocusRing::DURATION,
            Message::FocusRingExpired(request.generation),
        );

        let focus = match self.screen.bound_device() {
            Some(device) => Task::perform(self.camera.focus(device, request.x, request.y), |result| {
                cosmic::Action::App(Message::FocusComplete(result))
            }),
            None => Task::none(),
        };

        Task::batch([focus, expire])
    }

    pub(crate) fn handle_focus_complete(
        &mut self,
        result: Result<(), CameraError>,
    ) -> Task<cosmic::Action<Message>> {
        if let Err(e) = result {
            debug!(error = %e, "Focus request failed");
        }
        Task::none()
    }

    pub(crate) fn handle_focus_ring_expired(
        &mut self,
        generation: u64,
    ) -> Task<cosmic::Action<Message>> {
        if !self.screen.expire_focus_ring(generation) {
            debug!(generation, "Stale focus ring expiry");
        }
        Task::none()
    }
}
