// SPDX-License-Identifier: MPL-2.0

//! Camera preview module
//!
//! The preview image itself lives in `widget`. This file holds the tap
//! recogniser that turns raw pointer events from the preview's
//! `mouse_area` into a single focus point.

pub mod widget;

use crate::constants::ui;
use cosmic::iced::Point;

/// Raw pointer events reported by the preview area
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TapEvent {
    Pressed,
    /// Cursor position relative to the preview
    Moved(Point),
    Released,
}

/// Press/release tap recogniser
///
/// `mouse_area` reports presses without a position, so the last cursor
/// position seen through `on_move` is used as the press location.
#[derive(Debug, Clone, Default)]
pub struct TapGesture {
    pressed: bool,
    press_position: Option<Point>,
    last_position: Option<Point>,
}

impl TapGesture {
    /// Feed one pointer event
    ///
    /// Returns the tap point once a press ends within [`ui::TAP_SLOP`] of
    /// where it started.
    pub fn handle(&mut self, event: TapEvent) -> Option<Point> {
        match event {
            TapEvent::Pressed => {
                self.pressed = true;
                self.press_position = self.last_position;
                None
            }
            TapEvent::Moved(position) => {
                self.last_position = Some(position);
                if self.pressed && self.press_position.is_none() {
                    self.press_position = Some(position);
                }
                None
            }
            TapEvent::Released => {
                if !std::mem::take(&mut self.pressed) {
                    return None;
                }
                let start = self.press_position.take()?;
                let end = self.last_position?;
                (start.distance(end) <= ui::TAP_SLOP).then_some(end)
            }
        }
    }

    /// Whether a press is in progress
    pub fn is_pressed(&self) -> bool {
        self.pressed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tap_at_hover_position() {
        let mut gesture = TapGesture::default();
        assert_eq!(gesture.handle(TapEvent::Moved(Point::new(40.5, 80.25))), None);
        assert_eq!(gesture.handle(TapEvent::Pressed), None);
        assert!(gesture.is_pressed());
        assert_eq!(
            gesture.handle(TapEvent::Released),
            Some(Point::new(40.5, 80.25))
        );
        assert!(!gesture.is_pressed());
    }

    #[test]
    fn test_press_without_prior_move_uses_first_move() {
        let mut gesture = TapGesture::default();
        gesture.handle(TapEvent::Pressed);
        gesture.handle(TapEvent::Moved(Point::new(10.0, 10.0)));
        gesture.handle(TapEvent::Moved(Point::new(12.0, 11.0)));
        assert_eq!(
            gesture.handle(TapEvent::Released),
            Some(Point::new(12.0, 11.0))
        );
    }

    #[test]
    fn test_drag_is_not_a_tap() {
        let mut gesture = TapGesture::default();
        gesture.handle(TapEvent::Moved(Point::new(0.0, 0.0)));
        gesture.handle(TapEvent::Pressed);
        gesture.handle(TapEvent::Moved(Point::new(100.0, 0.0)));
        assert_eq!(gesture.handle(TapEvent::Released), None);
    }

    #[test]
    fn test_release_without_press_is_ignored() {
        let mut gesture = TapGesture::default();
        gesture.handle(TapEvent::Moved(Point::new(5.0, 5.0)));
        assert_eq!(gesture.handle(TapEvent::Released), None);
    }

    #[test]
    fn test_press_with_no_position_yields_nothing() {
        let mut gesture = TapGesture::default();
        gesture.handle(TapEvent::Pressed);
        assert_eq!(gesture.handle(TapEvent::Released), None);
    }
}
