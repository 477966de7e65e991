// SPDX-License-Identifier: GPL-3.0-only

//! Application state management

use crate::app::camera_preview::{TapEvent, TapGesture};
use crate::app::screen::CameraScreen;
use crate::backends::camera::{
    CameraDevice, CameraProvider, CapturedPhoto, DeviceBinding, PreviewFrame,
};
use crate::backends::permission::{PermissionProvider, PermissionState};
use crate::config::Config;
use crate::constants::PhotoQuality;
use crate::errors::{CameraError, CaptureError, PermissionError};
use cosmic::cosmic_config;
use cosmic::widget::about::About;
use std::sync::Arc;

/// The application model stores app-specific state used to describe its interface and
/// drive its logic.
pub struct AppModel {
    /// Application state which is managed by the COSMIC runtime.
    pub core: cosmic::Core,
    /// Display a context drawer with the designated page if defined.
    pub context_page: ContextPage,
    /// The about page for this app.
    pub about: About,
    /// Configuration data that persists between application runs.
    pub config: Config,
    /// Configuration handler for saving settings
    pub config_handler: Option<cosmic_config::Config>,
    /// Everything the camera screen displays
    pub screen: CameraScreen,
    /// Injected camera capability
    pub camera: Arc<dyn CameraProvider>,
    /// Injected permission capability
    pub permission: Arc<dyn PermissionProvider>,
    /// Tap recogniser over the preview
    pub tap: TapGesture,
    /// Image handle for the latest preview frame
    pub preview_handle: Option<cosmic::widget::image::Handle>,
    /// Binding last pushed to the provider
    pub last_binding: Option<DeviceBinding>,
    /// Labels for the photo quality dropdown
    pub quality_dropdown_options: Vec<String>,
}

impl AppModel {
    pub fn new(
        core: cosmic::Core,
        about: About,
        config: Config,
        config_handler: Option<cosmic_config::Config>,
        camera: Arc<dyn CameraProvider>,
        permission: Arc<dyn PermissionProvider>,
    ) -> Self {
        Self {
            core,
            context_page: ContextPage::default(),
            about,
            config,
            config_handler,
            screen: CameraScreen::new(),
            camera,
            permission,
            tap: TapGesture::default(),
            preview_handle: None,
            last_binding: None,
            quality_dropdown_options: PhotoQuality::ALL
                .iter()
                .map(|q| q.display_name().to_string())
                .collect(),
        }
    }
}

/// The context page to display in the context drawer.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum ContextPage {
    #[default]
    About,
    Settings,
}

/// Messages emitted by the application and its widgets.
#[derive(Debug, Clone)]
pub enum Message {
    // ===== UI Navigation =====
    /// Open external URL (repository, etc.)
    LaunchUrl(String),
    /// Toggle context drawer page
    ToggleContextPage(ContextPage),
    /// Close the permission alert
    DismissAlert,

    // ===== Permission =====
    /// Answer to the one permission request issued at startup
    PermissionResolved(Result<PermissionState, PermissionError>),

    // ===== Camera Control =====
    /// Device enumeration finished
    DevicesEnumerated(Vec<CameraDevice>),
    /// New preview frame from the bound device
    PreviewFrame(Arc<PreviewFrame>),
    /// Switch between front and back camera
    ToggleFacing,
    /// Switch the torch on or off
    ToggleTorch,
    /// Scroll over the preview, in zoom steps
    Zoom(f32),

    // ===== Focus =====
    /// Pointer event over the preview
    Tap(TapEvent),
    /// Focus at a preview-local point
    FocusAt(f32, f32),
    /// Focus request finished
    FocusComplete(Result<(), CameraError>),
    /// Focus ring display time elapsed for the given tap
    FocusRingExpired(u64),

    // ===== Capture =====
    /// Capture button pressed
    Capture,
    /// Capture finished
    CaptureComplete(Result<CapturedPhoto, CaptureError>),

    // ===== Viewer =====
    OpenViewer,
    CloseViewer,
    ViewerNext,
    ViewerPrevious,

    // ===== Settings =====
    /// Select photo quality by dropdown index
    SelectPhotoQuality(usize),
    /// Toggle mirroring of the front camera preview
    ToggleMirrorFrontPreview,

    // ===== System =====
    /// Configuration changed on disk
    UpdateConfig(Config),
}
