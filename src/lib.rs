// SPDX-License-Identifier: MPL-2.0

//! SnapCam - a single-screen camera for the COSMIC desktop
//!
//! Live preview with tap to focus, torch and front/back switching, photo
//! capture and a full-screen viewer for the photos taken this session.
//!
//! # Architecture
//!
//! - [`app`]: The camera screen, its state machine and its widgets
//! - [`backends`]: Camera and permission providers (PipeWire, XDG portal)
//! - [`pipelines`]: Photo encoding
//! - [`config`]: User configuration handling
//! - [`storage`]: Photo paths and URIs
//! - [`flash`]: Torch LEDs
//!
//! # Example
//!
//! ```ignore
//! // This is a GUI application, typically run via:
//! // snapcam
//! ```

pub mod app;
pub mod backends;
pub mod config;
pub mod constants;
pub mod errors;
pub mod flash;
pub mod i18n;
pub mod pipelines;
pub mod storage;

// Re-export commonly used types
pub use app::{AppModel, CameraScreen, Message};
pub use config::Config;
pub use constants::PhotoQuality;
pub use errors::{AppError, AppResult};
