// SPDX-License-Identifier: MPL-2.0

//! Focus ring drawn where the preview was tapped

use crate::app::screen::FocusPoint;
use crate::constants::{timing, ui};
use cosmic::Element;
use cosmic::iced::{Border, Length, Padding};
use cosmic::widget;
use std::time::Duration;

/// Transient ring centred on a tap
///
/// The layer fills the preview and has no interactive content, so pointer
/// events pass through to the preview below it in a stack.
pub struct FocusRing;

impl FocusRing {
    /// How long one ring stays visible
    pub const DURATION: Duration = timing::FOCUS_RING_DURATION;

    /// Top-left corner of the ring's bounding box, kept inside the preview
    pub fn origin(point: FocusPoint) -> (f32, f32) {
        (
            (point.x - ui::FOCUS_RING_RADIUS).max(0.0),
            (point.y - ui::FOCUS_RING_RADIUS).max(0.0),
        )
    }

    pub fn view<'a, M: 'a>(point: FocusPoint) -> Element<'a, M> {
        let diameter = ui::FOCUS_RING_RADIUS * 2.0;
        let (left, top) = Self::origin(point);

        let ring = widget::container(widget::Space::new(
            Length::Fixed(diameter),
            Length::Fixed(diameter),
        ))
        .style(|theme: &cosmic::Theme| widget::container::Style {
            border: Border {
                color: theme.cosmic().accent_color().into(),
                width: ui::FOCUS_RING_BORDER,
                radius: ui::FOCUS_RING_RADIUS.into(),
            },
            ..Default::default()
        });

        widget::container(ring)
            .padding(Padding {
                top,
                left,
                right: 0.0,
                bottom: 0.0,
            })
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }
}
