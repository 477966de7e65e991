// SPDX-License-Identifier: GPL-3.0-only

//! Torch control via Linux sysfs flash LEDs
//!
//! Flash LEDs are exposed at `/sys/class/leds/*:flash`. Torch mode only
//! writes the `brightness` file, which is group-writable by `feedbackd`.
//! Machines without such LEDs (most laptops) get an empty [`Torch`] that
//! accepts every request and does nothing.

use crate::backends::camera::TorchState;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, info, warn};

const LEDS_DIR: &str = "/sys/class/leds";

/// A flash LED device discovered via sysfs
#[derive(Debug, Clone)]
pub struct FlashLed {
    /// Sysfs path, e.g. `/sys/class/leds/white:flash`
    path: PathBuf,
    /// Maximum brightness value (from `max_brightness` file)
    max_brightness: u32,
    /// Directory basename, e.g. "white:flash"
    name: String,
}

impl FlashLed {
    /// Read one `*:flash` entry, `None` if it is unusable
    fn from_sysfs(led_path: PathBuf, name: &str) -> Option<FlashLed> {
        let max_brightness_path = led_path.join("max_brightness");
        let max_brightness = match std::fs::read_to_string(&max_brightness_path) {
            Ok(s) => match s.trim().parse::<u32>() {
                Ok(v) if v > 0 => v,
                _ => {
                    warn!(path = %max_brightness_path.display(), "Invalid max_brightness value");
                    return None;
                }
            },
            Err(e) => {
                warn!(path = %max_brightness_path.display(), error = %e, "Cannot read max_brightness");
                return None;
            }
        };

        let brightness_path = led_path.join("brightness");
        if let Err(e) = std::fs::OpenOptions::new()
            .write(true)
            .open(&brightness_path)
        {
            warn!(
                path = %brightness_path.display(),
                error = %e,
                "Cannot write brightness - user may need to be in 'feedbackd' group"
            );
            return None;
        }

        info!(name, max_brightness, "Discovered flash LED");
        Some(FlashLed {
            path: led_path,
            max_brightness,
            name: name.to_string(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set raw brightness value (0 = off, max_brightness = full)
    pub fn set_brightness(&self, value: u32) -> io::Result<()> {
        let clamped = value.min(self.max_brightness);
        std::fs::write(self.path.join("brightness"), clamped.to_string())
    }
}

/// Scan a leds directory for writable `*:flash` entries
pub fn discover_in(leds_dir: &Path) -> Vec<FlashLed> {
    let Ok(entries) = std::fs::read_dir(leds_dir) else {
        debug!(dir = %leds_dir.display(), "Cannot read leds directory, no torch");
        return Vec::new();
    };

    let mut leds: Vec<FlashLed> = entries
        .flatten()
        .filter_map(|entry| {
            let name = entry.file_name();
            let name = name.to_str()?;
            if !name.ends_with(":flash") {
                return None;
            }
            FlashLed::from_sysfs(entry.path(), name)
        })
        .collect();

    // Deterministic ordering (white before yellow)
    leds.sort_by(|a, b| a.name.cmp(&b.name));
    leds
}

/// The machine's torch, made of every controllable flash LED
#[derive(Debug, Default)]
pub struct Torch {
    leds: Vec<FlashLed>,
    state: Mutex<TorchState>,
}

impl Torch {
    /// Discover flash LEDs under `/sys/class/leds`
    pub fn detect() -> Self {
        Self::with_leds(discover_in(Path::new(LEDS_DIR)))
    }

    pub fn with_leds(leds: Vec<FlashLed>) -> Self {
        Self {
            leds,
            state: Mutex::new(TorchState::Off),
        }
    }

    pub fn is_available(&self) -> bool {
        !self.leds.is_empty()
    }

    /// Last state successfully requested
    pub fn state(&self) -> TorchState {
        self.state.lock().map(|s| *s).unwrap_or_default()
    }

    /// Drive every LED to the requested state
    ///
    /// Repeated requests for the current state are skipped. Without LEDs
    /// this only records the state.
    pub fn set(&self, requested: TorchState) {
        let Ok(mut state) = self.state.lock() else {
            return;
        };
        if *state == requested {
            return;
        }
        *state = requested;

        for led in &self.leds {
            let value = if requested.is_on() {
                led.max_brightness
            } else {
                0
            };
            if let Err(e) = led.set_brightness(value) {
                warn!(device = %led.name, error = %e, ?requested, "Failed to set flash LED");
            }
        }
        debug!(?requested, leds = self.leds.len(), "Torch updated");
    }
}

impl Drop for Torch {
    fn drop(&mut self) {
        // Never leave the LED burning after the app exits
        if self.state().is_on() {
            self.set(TorchState::Off);
        }
    }
}
