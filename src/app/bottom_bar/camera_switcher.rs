// SPDX-License-Identifier: GPL-3.0-only

//! Camera switcher button widget implementation

use crate::app::bottom_bar::overlay_container_style;
use crate::app::state::{AppModel, Message};
use crate::backends::camera::CameraFacing;
use crate::constants::ui;
use crate::fl;
use cosmic::Element;
use cosmic::iced::Length;
use cosmic::widget;

/// Icon name for the camera a flip would switch to
pub fn flip_target_icon(current: CameraFacing) -> &'static str {
    match current.toggled() {
        CameraFacing::Front => "camera-web-symbolic",
        CameraFacing::Back => "camera-photo-symbolic",
    }
}

impl AppModel {
    /// Build the camera switcher button widget
    ///
    /// The icon shows the camera the button switches to.
    pub fn build_camera_switcher(&self) -> Element<'_, Message> {
        let facing = self.screen.facing();
        let label = match facing.toggled() {
            CameraFacing::Front => fl!("switch-to-front"),
            CameraFacing::Back => fl!("switch-to-back"),
        };

        let icon_content = widget::container(
            widget::icon(widget::icon::from_name(flip_target_icon(facing)).handle()).size(24),
        )
        .width(Length::Fixed(ui::ICON_BUTTON_WIDTH))
        .height(Length::Fixed(ui::ICON_BUTTON_WIDTH))
        .center(Length::Fixed(ui::ICON_BUTTON_WIDTH));

        let button = widget::button::custom(icon_content)
            .padding(0)
            .class(cosmic::theme::Button::Text)
            .on_press(Message::ToggleFacing);

        widget::tooltip(
            widget::container(button).style(overlay_container_style),
            widget::text(label),
            widget::tooltip::Position::Top,
        )
        .into()
    }
}
