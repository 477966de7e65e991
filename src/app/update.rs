// SPDX-License-Identifier: GPL-3.0-only

//! Message update handling
//!
//! The main `update()` function acts as a dispatcher, while specific handlers
//! are implemented in the `handlers` submodules organized by functional domain.
//!
//! # Handler Modules
//!
//! - `handlers::ui`: Context drawer, URLs, alerts, settings
//! - `handlers::camera`: Permission, enumeration, frames, facing, torch, zoom
//! - `handlers::capture`: Photo capture, tap to focus, focus ring
//! - `handlers::viewer`: Full-screen viewer navigation

use crate::app::state::{AppModel, Message};
use cosmic::Task;

impl AppModel {
    /// Main message handler - routes messages to appropriate handler methods.
    ///
    /// After every message the device binding is re-derived and pushed to
    /// the provider if it changed.
    pub fn update(&mut self, message: Message) -> Task<cosmic::Action<Message>> {
        let task = match message {
            // ===== UI Navigation =====
            Message::LaunchUrl(url) => self.handle_launch_url(url),
            Message::ToggleContextPage(page) => self.handle_toggle_context_page(page),
            Message::DismissAlert => self.handle_dismiss_alert(),

            // ===== Permission =====
            Message::PermissionResolved(result) => self.handle_permission_resolved(result),

            // ===== Camera Control =====
            Message::DevicesEnumerated(devices) => self.handle_devices_enumerated(devices),
            Message::PreviewFrame(frame) => self.handle_preview_frame(frame),
            Message::ToggleFacing => self.handle_toggle_facing(),
            Message::ToggleTorch => self.handle_toggle_torch(),
            Message::Zoom(delta) => self.handle_zoom(delta),

            // ===== Focus =====
            Message::Tap(event) => self.handle_tap(event),
            Message::FocusAt(x, y) => self.handle_focus_at(x, y),
            Message::FocusComplete(result) => self.handle_focus_complete(result),
            Message::FocusRingExpired(generation) => self.handle_focus_ring_expired(generation),

            // ===== Capture =====
            Message::Capture => self.handle_capture(),
            Message::CaptureComplete(result) => self.handle_capture_complete(result),

            // ===== Viewer =====
            Message::OpenViewer => self.handle_open_viewer(),
            Message::CloseViewer => self.handle_close_viewer(),
            Message::ViewerNext => self.handle_viewer_next(),
            Message::ViewerPrevious => self.handle_viewer_previous(),

            // ===== Settings =====
            Message::SelectPhotoQuality(index) => self.handle_select_photo_quality(index),
            Message::ToggleMirrorFrontPreview => self.handle_toggle_mirror_front_preview(),

            // ===== System =====
            Message::UpdateConfig(config) => self.handle_update_config(config),
        };

        self.sync_binding();
        task
    }
}
