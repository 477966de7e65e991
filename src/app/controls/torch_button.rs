// SPDX-License-Identifier: GPL-3.0-only

//! Torch toggle button

use crate::app::state::{AppModel, Message};
use crate::fl;
use cosmic::Element;
use cosmic::widget;

impl AppModel {
    /// Build the torch toggle for the header bar
    ///
    /// Always shown; cameras without a torch ignore the request.
    pub fn build_torch_button(&self) -> Element<'_, Message> {
        let (icon, label) = if self.screen.torch().is_on() {
            ("display-brightness-symbolic", fl!("torch-on"))
        } else {
            ("display-brightness-off-symbolic", fl!("torch-off"))
        };

        widget::tooltip(
            widget::button::icon(widget::icon::from_name(icon)).on_press(Message::ToggleTorch),
            widget::text(label),
            widget::tooltip::Position::Bottom,
        )
        .into()
    }
}
