// SPDX-License-Identifier: MPL-2.0

//! Main application module for SnapCam
//!
//! This module contains the application shell around the camera screen:
//! state, message handling, UI rendering and subscriptions.
//!
//! # Architecture
//!
//! - `screen`: Camera screen state machine, free of UI types
//! - `state`: Application state types (AppModel, Message, ContextPage)
//! - `camera_preview`: Preview display and tap recognition
//! - `focus_ring`: Transient tap marker
//! - `controls`: Capture button and torch toggle
//! - `bottom_bar`: Thumbnail, capture button, camera switcher
//! - `photo_thumbnail`: Small photo rendering
//! - `image_viewer`: Full-screen photo viewer
//! - `settings`: Settings drawer UI
//! - `subscription`: Preview stream and viewer keyboard input
//! - `view`: Main view rendering
//! - `update`: Message handling

mod bottom_bar;
pub mod camera_preview;
mod controls;
pub mod focus_ring;
mod handlers;
pub mod image_viewer;
pub mod photo_thumbnail;
pub mod screen;
mod settings;
mod state;
pub mod subscription;
mod update;
mod view;

use crate::backends::camera::{CameraProvider, PipeWireCamera};
use crate::backends::permission::{PermissionProvider, PortalPermission};
use crate::config::{APP_ID, Config};
use crate::fl;
use cosmic::app::context_drawer;
use cosmic::iced::Subscription;
use cosmic::widget::{self, about::About};
use cosmic::{Element, Task};
pub use screen::{CameraScreen, FocusPoint, RenderGate, ScreenAlert, ViewerState};
pub use state::{AppModel, ContextPage, Message};
use std::sync::Arc;
use tracing::{error, info};

const REPOSITORY: &str = "https://github.com/snapcam/snapcam";

impl cosmic::Application for AppModel {
    /// The async executor that will be used to run your application's commands.
    type Executor = cosmic::executor::Default;

    /// Data that your application receives to its init method.
    type Flags = ();

    /// Messages which the application and its widgets will emit.
    type Message = Message;

    /// Unique identifier in RDNN (reverse domain name notation) format.
    const APP_ID: &'static str = APP_ID;

    fn core(&self) -> &cosmic::Core {
        &self.core
    }

    fn core_mut(&mut self) -> &mut cosmic::Core {
        &mut self.core
    }

    /// Initializes the application with any given flags and startup commands.
    fn init(
        core: cosmic::Core,
        _flags: Self::Flags,
    ) -> (Self, Task<cosmic::Action<Self::Message>>) {
        let about = About::default()
            .name(fl!("app-title"))
            .icon(widget::icon::from_name(APP_ID).handle())
            .version(env!("GIT_VERSION"))
            .links([(fl!("repository"), REPOSITORY)])
            .license(env!("CARGO_PKG_LICENSE"));

        let (config_handler, config) = Config::load();

        // Required before any GStreamer call
        if let Err(e) = gstreamer::init() {
            error!(error = %e, "Failed to initialize GStreamer");
        }

        let camera: Arc<dyn CameraProvider> =
            Arc::new(PipeWireCamera::new(config.capture_settings()));
        let permission: Arc<dyn PermissionProvider> = Arc::new(PortalPermission::detect());
        info!(
            photo_directory = %config.capture_settings().photo_directory.display(),
            "Camera screen starting"
        );

        let mut app = AppModel::new(core, about, config, config_handler, camera, permission);
        let mount = app.mount();

        (app, mount)
    }

    /// Elements to pack at the end of the header bar.
    fn header_end(&self) -> Vec<Element<'_, Self::Message>> {
        let settings_button =
            widget::button::icon(widget::icon::from_name("preferences-system-symbolic"))
                .on_press(Message::ToggleContextPage(ContextPage::Settings))
                .into();

        if matches!(self.screen.render_gate(), RenderGate::Open(_)) {
            vec![self.build_torch_button(), settings_button]
        } else {
            vec![settings_button]
        }
    }

    /// Display a context drawer if the context page is requested.
    fn context_drawer(&self) -> Option<context_drawer::ContextDrawer<'_, Self::Message>> {
        if !self.core.window.show_context {
            return None;
        }

        Some(match self.context_page {
            ContextPage::About => context_drawer::about(
                &self.about,
                |url| Message::LaunchUrl(url.to_string()),
                Message::ToggleContextPage(ContextPage::About),
            ),
            ContextPage::Settings => self.settings_view(),
        })
    }

    /// Modal dialog shown over the window
    fn dialog(&self) -> Option<Element<'_, Self::Message>> {
        self.alert_dialog()
    }

    /// Describes the interface based on the current state of the application model.
    fn view(&self) -> Element<'_, Self::Message> {
        self.view()
    }

    /// Register subscriptions for this application.
    fn subscription(&self) -> Subscription<Self::Message> {
        let config_sub = self
            .core()
            .watch_config::<Config>(Self::APP_ID)
            .map(|update| Message::UpdateConfig(update.config));

        Subscription::batch([
            config_sub,
            self.preview_subscription(),
            self.viewer_keyboard_subscription(),
        ])
    }

    /// Handles messages emitted by the application and its widgets.
    fn update(&mut self, message: Self::Message) -> Task<cosmic::Action<Self::Message>> {
        self.update(message)
    }
}
