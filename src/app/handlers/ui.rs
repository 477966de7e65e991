// SPDX-License-Identifier: GPL-3.0-only

//! UI navigation and settings handlers

use crate::app::state::{AppModel, ContextPage, Message};
use crate::config::Config;
use crate::constants::PhotoQuality;
use cosmic::Task;
use cosmic::cosmic_config::CosmicConfigEntry;
use tracing::{error, info};

impl AppModel {
    pub(crate) fn handle_launch_url(&self, url: String) -> Task<cosmic::Action<Message>> {
        if let Err(err) = open::that_detached(&url) {
            error!(url = %url, error = %err, "Failed to open URL");
        }
        Task::none()
    }

    pub(crate) fn handle_toggle_context_page(
        &mut self,
        context_page: ContextPage,
    ) -> Task<cosmic::Action<Message>> {
        if self.context_page == context_page {
            self.core.window.show_context = !self.core.window.show_context;
        } else {
            self.context_page = context_page;
            self.core.window.show_context = true;
        }
        Task::none()
    }

    pub(crate) fn handle_dismiss_alert(&mut self) -> Task<cosmic::Action<Message>> {
        self.screen.dismiss_alert();
        Task::none()
    }

    // =========================================================================
    // Settings
    // =========================================================================

    pub(crate) fn handle_select_photo_quality(
        &mut self,
        index: usize,
    ) -> Task<cosmic::Action<Message>> {
        let Some(&quality) = PhotoQuality::ALL.get(index) else {
            return Task::none();
        };
        info!(?quality, "Photo quality selected");
        self.config.photo_quality = quality;
        self.save_config();
        Task::none()
    }

    pub(crate) fn handle_toggle_mirror_front_preview(&mut self) -> Task<cosmic::Action<Message>> {
        self.config.mirror_front_preview = !self.config.mirror_front_preview;
        info!(
            mirror_front_preview = self.config.mirror_front_preview,
            "Front preview mirroring toggled"
        );
        self.save_config();
        Task::none()
    }

    pub(crate) fn handle_update_config(&mut self, config: Config) -> Task<cosmic::Action<Message>> {
        info!("UpdateConfig received");
        self.config = config;
        self.camera.configure(&self.config.capture_settings());
        Task::none()
    }

    /// Apply the current config to the provider and persist it
    fn save_config(&self) {
        self.camera.configure(&self.config.capture_settings());
        if let Some(handler) = self.config_handler.as_ref()
            && let Err(err) = self.config.write_entry(handler)
        {
            error!(?err, "Failed to save config");
        }
    }
}
