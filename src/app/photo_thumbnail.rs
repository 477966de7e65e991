// SPDX-License-Identifier: MPL-2.0

//! Small fixed-size rendering of a photo

use crate::constants::ui;
use crate::storage;
use cosmic::Element;
use cosmic::iced::{ContentFit, Length};
use cosmic::widget;

/// Thumbnail of the photo at `uri`, cover-fit into a square
///
/// Unreadable files are left to the image renderer.
pub fn photo_thumbnail<'a, M: 'a>(uri: &str) -> Element<'a, M> {
    let handle = widget::image::Handle::from_path(storage::uri_to_path(uri));
    let image = widget::image(handle)
        .content_fit(ContentFit::Cover)
        .width(Length::Fixed(ui::THUMBNAIL_SIZE))
        .height(Length::Fixed(ui::THUMBNAIL_SIZE));

    widget::container(image)
        .width(Length::Fixed(ui::THUMBNAIL_SIZE))
        .height(Length::Fixed(ui::THUMBNAIL_SIZE))
        .into()
}

/// "No image available" placeholder of thumbnail size
pub fn placeholder<'a, M: 'a>() -> Element<'a, M> {
    widget::container(widget::icon::from_name("image-missing-symbolic").size(24))
        .width(Length::Fixed(ui::THUMBNAIL_SIZE))
        .height(Length::Fixed(ui::THUMBNAIL_SIZE))
        .center(Length::Fixed(ui::THUMBNAIL_SIZE))
        .into()
}
