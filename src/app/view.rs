// SPDX-License-Identifier: GPL-3.0-only

//! Main application view
//!
//! This module composes the camera screen from its components:
//! - Camera preview with tap to focus and the focus ring (camera_preview)
//! - Bottom bar with thumbnail, capture button and flip button (bottom_bar)
//! - Full-screen viewer, replacing the preview while open (image_viewer)
//! - Permission alert dialog

use crate::app::image_viewer::{ViewerActions, fullscreen_image_viewer};
use crate::app::screen::{RenderGate, ScreenAlert};
use crate::app::state::{AppModel, Message};
use crate::fl;
use cosmic::Element;
use cosmic::iced::{Background, Color, Length};
use cosmic::widget;

impl AppModel {
    /// Build the main application view
    ///
    /// Nothing is rendered until a camera is resolved and access is granted.
    pub fn view(&self) -> Element<'_, Message> {
        if !matches!(self.screen.render_gate(), RenderGate::Open(_)) {
            return widget::Space::new(Length::Fill, Length::Fill).into();
        }

        let viewer = self.screen.viewer();
        if let Some(viewer) = fullscreen_image_viewer(
            &self.screen.photo_uris(),
            viewer.visible,
            viewer.current_index,
            ViewerActions {
                close: Message::CloseViewer,
                previous: Message::ViewerPrevious,
                next: Message::ViewerNext,
            },
        ) {
            return viewer;
        }

        let content = widget::column()
            .push(self.build_camera_preview())
            .push(self.build_bottom_bar());

        widget::container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .style(|_theme| widget::container::Style {
                background: Some(Background::Color(Color::BLACK)),
                ..Default::default()
            })
            .into()
    }

    /// Blocking alert shown over the window
    pub fn alert_dialog(&self) -> Option<Element<'_, Message>> {
        match self.screen.alert()? {
            ScreenAlert::PermissionRequired => Some(
                widget::dialog()
                    .title(fl!("permission-title"))
                    .body(fl!("permission-body"))
                    .icon(
                        widget::icon::from_name("camera-disabled-symbolic")
                            .size(64)
                            .icon(),
                    )
                    .primary_action(
                        widget::button::suggested(fl!("permission-dismiss"))
                            .on_press(Message::DismissAlert),
                    )
                    .into(),
            ),
        }
    }
}
