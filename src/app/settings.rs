// SPDX-License-Identifier: MPL-2.0

//! Settings drawer view

use crate::app::state::{AppModel, ContextPage, Message};
use crate::constants::PhotoQuality;
use crate::fl;
use crate::storage;
use cosmic::Element;
use cosmic::app::context_drawer;
use cosmic::widget;

impl AppModel {
    /// Create the settings view for the context drawer
    pub fn settings_view(&self) -> context_drawer::ContextDrawer<'_, Message> {
        let spacing = cosmic::theme::spacing();

        let quality_index = PhotoQuality::ALL
            .iter()
            .position(|q| *q == self.config.photo_quality);

        let quality_dropdown = widget::dropdown(
            &self.quality_dropdown_options,
            quality_index,
            Message::SelectPhotoQuality,
        );

        let mirror_toggle = widget::toggler(self.config.mirror_front_preview)
            .on_toggle(|_| Message::ToggleMirrorFrontPreview);

        let directory = storage::photo_directory(&self.config);

        let settings_column: Element<'_, Message> = widget::column()
            .push(
                widget::text(fl!("photo-quality"))
                    .size(16)
                    .font(cosmic::font::bold()),
            )
            .push(widget::vertical_space().height(spacing.space_xxs))
            .push(quality_dropdown)
            .push(widget::vertical_space().height(spacing.space_s))
            .push(
                widget::row()
                    .push(widget::text(fl!("mirror-front-preview")))
                    .push(widget::horizontal_space())
                    .push(mirror_toggle),
            )
            .push(widget::vertical_space().height(spacing.space_s))
            .push(
                widget::text(fl!(
                    "photo-directory",
                    path = directory.display().to_string()
                ))
                .size(12),
            )
            .push(widget::vertical_space().height(spacing.space_m))
            .push(
                widget::button::standard(fl!("about"))
                    .on_press(Message::ToggleContextPage(ContextPage::About)),
            )
            .into();

        context_drawer::context_drawer(
            settings_column,
            Message::ToggleContextPage(ContextPage::Settings),
        )
        .title(fl!("settings"))
    }
}
