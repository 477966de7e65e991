// SPDX-License-Identifier: MPL-2.0

//! Capture button widget implementation

use crate::app::state::{AppModel, Message};
use crate::constants::ui;
use crate::fl;
use cosmic::Element;
use cosmic::iced::{Background, Color, Length};
use cosmic::widget;

impl AppModel {
    /// Build the capture button widget
    ///
    /// A white disc inside a ring. It stays enabled while captures are in
    /// flight; each press starts its own capture.
    pub fn build_capture_button(&self) -> Element<'_, Message> {
        let button_inner = widget::container(widget::Space::new(
            Length::Fixed(ui::CAPTURE_BUTTON_INNER),
            Length::Fixed(ui::CAPTURE_BUTTON_INNER),
        ))
        .style(|_theme| widget::container::Style {
            background: Some(Background::Color(Color::WHITE)),
            border: cosmic::iced::Border {
                radius: [ui::CAPTURE_BUTTON_RADIUS; 4].into(),
                ..Default::default()
            },
            ..Default::default()
        });

        let ring = widget::container(button_inner)
            .width(Length::Fixed(ui::CAPTURE_BUTTON_OUTER))
            .height(Length::Fixed(ui::CAPTURE_BUTTON_OUTER))
            .center(Length::Fixed(ui::CAPTURE_BUTTON_OUTER))
            .style(|_theme| widget::container::Style {
                border: cosmic::iced::Border {
                    color: Color::WHITE,
                    width: 3.0,
                    radius: [ui::CAPTURE_BUTTON_OUTER / 2.0; 4].into(),
                },
                ..Default::default()
            });

        let button = widget::button::custom(ring)
            .on_press(Message::Capture)
            .padding(0)
            .class(cosmic::theme::Button::Image);

        widget::tooltip(
            button,
            widget::text(fl!("capture")),
            widget::tooltip::Position::Top,
        )
        .into()
    }
}
