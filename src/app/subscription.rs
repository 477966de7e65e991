// SPDX-License-Identifier: MPL-2.0

//! Event subscriptions
//!
//! - Preview frames for the bound device, keyed by device path so the
//!   stream restarts whenever the bound device changes
//! - Keyboard navigation while the full-screen viewer is open

use crate::app::screen::RenderGate;
use crate::app::state::{AppModel, Message};
use cosmic::iced::keyboard::{self, Key, key::Named};
use cosmic::iced::{Subscription, event};
use futures::StreamExt;

/// Viewer action for a pressed key
///
/// Escape acts as the hardware back button.
pub fn viewer_key_message(key: &Key) -> Option<Message> {
    match key {
        Key::Named(Named::Escape) => Some(Message::CloseViewer),
        Key::Named(Named::ArrowLeft) => Some(Message::ViewerPrevious),
        Key::Named(Named::ArrowRight) => Some(Message::ViewerNext),
        _ => None,
    }
}

impl AppModel {
    /// Live preview of the bound device, only while the render gate is open
    pub(crate) fn preview_subscription(&self) -> Subscription<Message> {
        let RenderGate::Open(device) = self.screen.render_gate() else {
            return Subscription::none();
        };

        let frames = self.camera.preview(device).map(Message::PreviewFrame);
        Subscription::run_with_id(("preview", device.path.clone()), frames)
    }

    /// Arrow keys and Escape for the viewer
    pub(crate) fn viewer_keyboard_subscription(&self) -> Subscription<Message> {
        if !self.screen.viewer().visible {
            return Subscription::none();
        }

        event::listen_with(|event, status, _window_id| match (event, status) {
            (
                event::Event::Keyboard(keyboard::Event::KeyPressed { key, .. }),
                event::Status::Ignored,
            ) => viewer_key_message(&key),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewer_keys() {
        assert!(matches!(
            viewer_key_message(&Key::Named(Named::Escape)),
            Some(Message::CloseViewer)
        ));
        assert!(matches!(
            viewer_key_message(&Key::Named(Named::ArrowLeft)),
            Some(Message::ViewerPrevious)
        ));
        assert!(matches!(
            viewer_key_message(&Key::Named(Named::ArrowRight)),
            Some(Message::ViewerNext)
        ));
        assert!(viewer_key_message(&Key::Named(Named::Enter)).is_none());
    }
}
