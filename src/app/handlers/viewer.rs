// SPDX-License-Identifier: GPL-3.0-only

//! Full-screen viewer handlers

use crate::app::state::{AppModel, Message};
use cosmic::Task;
use tracing::debug;

impl AppModel {
    pub(crate) fn handle_open_viewer(&mut self) -> Task<cosmic::Action<Message>> {
        if self.screen.open_viewer() {
            debug!(index = self.screen.viewer().start_index, "Viewer opened");
        }
        Task::none()
    }

    pub(crate) fn handle_close_viewer(&mut self) -> Task<cosmic::Action<Message>> {
        self.screen.close_viewer();
        Task::none()
    }

    pub(crate) fn handle_viewer_next(&mut self) -> Task<cosmic::Action<Message>> {
        self.screen.viewer_next();
        Task::none()
    }

    pub(crate) fn handle_viewer_previous(&mut self) -> Task<cosmic::Action<Message>> {
        self.screen.viewer_previous();
        Task::none()
    }
}
