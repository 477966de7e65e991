// SPDX-License-Identifier: GPL-3.0-only

//! Camera preview widget implementation

use crate::app::camera_preview::TapEvent;
use crate::app::focus_ring::FocusRing;
use crate::app::state::{AppModel, Message};
use crate::constants::zoom;
use crate::fl;
use cosmic::Element;
use cosmic::iced::mouse::ScrollDelta;
use cosmic::iced::{Background, Color, ContentFit, Length};
use cosmic::widget;

/// Zoom change for one scroll event
pub fn scroll_zoom_delta(delta: ScrollDelta) -> f32 {
    let lines = match delta {
        ScrollDelta::Lines { y, .. } => y,
        ScrollDelta::Pixels { y, .. } => y / zoom::PIXELS_PER_LINE,
    };
    lines * zoom::SCROLL_STEP
}

impl AppModel {
    /// Build the camera preview widget
    ///
    /// The latest frame fills the area (cover fit). Taps focus, scrolling
    /// zooms. The focus ring is layered on top while it is visible.
    pub fn build_camera_preview(&self) -> Element<'_, Message> {
        let content: Element<'_, Message> = match &self.preview_handle {
            Some(handle) => widget::image(handle.clone())
                .content_fit(ContentFit::Cover)
                .width(Length::Fill)
                .height(Length::Fill)
                .into(),
            None => widget::container(widget::text(fl!("waiting-for-camera")).size(16))
                .width(Length::Fill)
                .height(Length::Fill)
                .center(Length::Fill)
                .into(),
        };

        let preview = widget::mouse_area(
            widget::container(content)
                .width(Length::Fill)
                .height(Length::Fill)
                .style(|_theme| widget::container::Style {
                    background: Some(Background::Color(Color::BLACK)),
                    text_color: Some(Color::WHITE),
                    ..Default::default()
                }),
        )
        .on_press(Message::Tap(TapEvent::Pressed))
        .on_move(|point: cosmic::iced::Point| Message::Tap(TapEvent::Moved(point)))
        .on_release(Message::Tap(TapEvent::Released))
        .on_scroll(|delta: ScrollDelta| Message::Zoom(scroll_zoom_delta(delta)));

        // Keep the stack shape stable so the preview's widget state survives
        let ring: Element<'_, Message> = match self.screen.focus_ring() {
            Some(point) => FocusRing::view(point),
            None => widget::Space::new(Length::Fill, Length::Fill).into(),
        };

        cosmic::iced::widget::stack![preview, ring]
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scroll_lines_zoom_by_step() {
        let delta = ScrollDelta::Lines { x: 0.0, y: 2.0 };
        assert_eq!(scroll_zoom_delta(delta), 2.0 * zoom::SCROLL_STEP);
    }

    #[test]
    fn test_scroll_pixels_converted_to_lines() {
        let delta = ScrollDelta::Pixels {
            x: 0.0,
            y: -zoom::PIXELS_PER_LINE,
        };
        assert_eq!(scroll_zoom_delta(delta), -zoom::SCROLL_STEP);
    }
}
