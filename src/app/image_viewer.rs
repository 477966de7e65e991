// SPDX-License-Identifier: MPL-2.0

//! Full-screen viewer for the photos taken this session

use crate::constants::ui;
use crate::fl;
use crate::storage;
use cosmic::Element;
use cosmic::iced::{Alignment, Background, Color, ContentFit, Length};
use cosmic::widget;

/// Messages the viewer emits
#[derive(Debug, Clone)]
pub struct ViewerActions<M> {
    pub close: M,
    pub previous: M,
    pub next: M,
}

/// Index actually shown for a requested `index` into `len` photos
pub fn clamp_index(len: usize, index: usize) -> Option<usize> {
    len.checked_sub(1).map(|last| index.min(last))
}

/// Modal gallery over `uris`, starting at `index`
///
/// Renders nothing while `visible` is false. An empty list shows a label
/// and can still be closed.
pub fn fullscreen_image_viewer<'a, M: Clone + 'a>(
    uris: &[String],
    visible: bool,
    index: usize,
    actions: ViewerActions<M>,
) -> Option<Element<'a, M>> {
    if !visible {
        return None;
    }

    let close_button = widget::tooltip(
        widget::button::icon(widget::icon::from_name("window-close-symbolic"))
            .on_press(actions.close)
            .class(cosmic::theme::Button::Icon),
        widget::text(fl!("viewer-close")),
        widget::tooltip::Position::Bottom,
    );

    let Some(current) = clamp_index(uris.len(), index) else {
        let body = widget::container(widget::text(fl!("viewer-empty")))
            .width(Length::Fill)
            .height(Length::Fill)
            .center(Length::Fill);
        let content = widget::column()
            .push(
                widget::row()
                    .push(widget::Space::new(Length::Fill, Length::Shrink))
                    .push(close_button),
            )
            .push(body);
        return Some(backdrop(content.into()));
    };

    let spacing = cosmic::theme::spacing();
    let counter = widget::text(fl!(
        "viewer-counter",
        current = (current + 1),
        total = uris.len()
    ))
    .size(ui::VIEWER_COUNTER_TEXT_SIZE);

    let top_row = widget::row()
        .push(counter)
        .push(widget::Space::new(Length::Fill, Length::Shrink))
        .push(close_button)
        .padding(spacing.space_xs)
        .align_y(Alignment::Center);

    let previous = widget::tooltip(
        widget::button::icon(
            widget::icon::from_name("go-previous-symbolic").size(ui::VIEWER_ICON_SIZE),
        )
        .on_press_maybe((current > 0).then(|| actions.previous.clone()))
        .class(cosmic::theme::Button::Icon),
        widget::text(fl!("viewer-previous")),
        widget::tooltip::Position::Right,
    );

    let next = widget::tooltip(
        widget::button::icon(
            widget::icon::from_name("go-next-symbolic").size(ui::VIEWER_ICON_SIZE),
        )
        .on_press_maybe((current + 1 < uris.len()).then(|| actions.next.clone()))
        .class(cosmic::theme::Button::Icon),
        widget::text(fl!("viewer-next")),
        widget::tooltip::Position::Left,
    );

    let image = widget::image(widget::image::Handle::from_path(storage::uri_to_path(
        &uris[current],
    )))
    .content_fit(ContentFit::Contain)
    .width(Length::Fill)
    .height(Length::Fill);

    let middle_row = widget::row()
        .push(previous)
        .push(image)
        .push(next)
        .spacing(spacing.space_xs)
        .padding(spacing.space_xs)
        .align_y(Alignment::Center)
        .height(Length::Fill);

    let content = widget::column().push(top_row).push(middle_row);
    Some(backdrop(content.into()))
}

fn backdrop<'a, M: 'a>(content: Element<'a, M>) -> Element<'a, M> {
    widget::container(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .style(|_theme| widget::container::Style {
            background: Some(Background::Color(Color::BLACK)),
            text_color: Some(Color::WHITE),
            ..Default::default()
        })
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_index() {
        assert_eq!(clamp_index(0, 0), None);
        assert_eq!(clamp_index(3, 1), Some(1));
        assert_eq!(clamp_index(3, 10), Some(2));
    }

    #[test]
    fn test_button_tooltips_are_localized() {
        assert_eq!(fl!("viewer-close"), "Close");
        assert_eq!(fl!("viewer-previous"), "Previous photo");
        assert_eq!(fl!("viewer-next"), "Next photo");
    }

    #[test]
    fn test_visibility() {
        let actions = ViewerActions {
            close: 0u8,
            previous: 1,
            next: 2,
        };
        let uris = vec!["file:///tmp/a.jpg".to_string()];
        assert!(fullscreen_image_viewer(&uris, false, 0, actions.clone()).is_none());
        assert!(fullscreen_image_viewer(&uris, true, 0, actions.clone()).is_some());
        assert!(fullscreen_image_viewer(&[], true, 0, actions).is_some());
    }
}
