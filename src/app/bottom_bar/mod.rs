// SPDX-License-Identifier: GPL-3.0-only

//! Bottom bar module
//!
//! This module handles the bottom control bar UI components:
//! - Gallery button (with thumbnail)
//! - Capture button (centered)
//! - Camera switcher (flip cameras)

pub mod camera_switcher;
pub mod gallery_button;

use crate::app::state::{AppModel, Message};
use crate::constants::ui;
use cosmic::Element;
use cosmic::iced::{Alignment, Background, Color, Length};
use cosmic::widget;

/// Fixed height for the bottom bar
const BOTTOM_BAR_HEIGHT: f32 = 88.0;

/// Semi-transparent themed background for controls over the preview
pub fn overlay_container_style(theme: &cosmic::Theme) -> widget::container::Style {
    let mut background: Color = theme.cosmic().bg_color().into();
    background.a = ui::OVERLAY_BACKGROUND_ALPHA;
    widget::container::Style {
        background: Some(Background::Color(background)),
        text_color: Some(theme.cosmic().on_bg_color().into()),
        border: cosmic::iced::Border {
            radius: theme.cosmic().corner_radii.radius_m.into(),
            ..Default::default()
        },
        ..Default::default()
    }
}

impl AppModel {
    /// Build the complete bottom bar widget
    ///
    /// Three columns keep the capture button centered regardless of the
    /// widths of the thumbnail and the flip button:
    /// [Fill + thumbnail] [capture] [flip + Fill]
    pub fn build_bottom_bar(&self) -> Element<'_, Message> {
        let spacing = cosmic::theme::spacing();

        let left_section = widget::row()
            .push(widget::Space::new(Length::Fill, Length::Shrink))
            .push(self.build_gallery_button())
            .push(widget::horizontal_space().width(spacing.space_l))
            .align_y(Alignment::Center);

        let right_section = widget::row()
            .push(widget::horizontal_space().width(spacing.space_l))
            .push(self.build_camera_switcher())
            .push(widget::Space::new(Length::Fill, Length::Shrink))
            .align_y(Alignment::Center);

        let bottom_row = widget::row()
            .push(left_section)
            .push(self.build_capture_button())
            .push(right_section)
            .padding(spacing.space_xs)
            .align_y(Alignment::Center);

        widget::container(bottom_row)
            .width(Length::Fill)
            .height(Length::Fixed(BOTTOM_BAR_HEIGHT))
            .center_y(BOTTOM_BAR_HEIGHT)
            .style(|_theme| widget::container::Style {
                background: Some(Background::Color(Color::BLACK)),
                ..Default::default()
            })
            .into()
    }
}
