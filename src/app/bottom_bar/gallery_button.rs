// SPDX-License-Identifier: MPL-2.0

//! Gallery button widget implementation

use crate::app::photo_thumbnail::{photo_thumbnail, placeholder};
use crate::app::state::{AppModel, Message};
use crate::constants::ui;
use crate::fl;
use cosmic::Element;
use cosmic::iced::Length;
use cosmic::widget;

impl AppModel {
    /// Build the gallery button widget
    ///
    /// Shows the most recent photo, or a placeholder icon before the first
    /// capture. Pressing it opens the full-screen viewer.
    pub fn build_gallery_button(&self) -> Element<'_, Message> {
        let content = match self.screen.latest_photo() {
            Some(photo) => photo_thumbnail(&photo.uri()),
            None => placeholder(),
        };

        let button = widget::button::custom(content)
            .padding(0)
            .width(Length::Fixed(ui::THUMBNAIL_SIZE))
            .height(Length::Fixed(ui::THUMBNAIL_SIZE))
            .class(cosmic::theme::Button::Image)
            .on_press_maybe(self.screen.latest_photo().map(|_| Message::OpenViewer));

        if self.screen.latest_photo().is_some() {
            button.into()
        } else {
            widget::tooltip(
                button,
                widget::text(fl!("no-photo")),
                widget::tooltip::Position::Top,
            )
            .into()
        }
    }
}
