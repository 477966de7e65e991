// SPDX-License-Identifier: MPL-2.0

//! Processing pipelines for photo capture
//!
//! Capture never touches the camera: it takes the latest preview frame
//! and runs the heavy work in background tasks so the preview keeps
//! streaming.
//!
//! ```text
//! ┌──────────────┐     ┌───────────────────┐     ┌──────────────┐
//! │ Latest Frame │ ──▶ │  Photo Pipeline   │ ──▶ │  JPEG File   │
//! │   (RGBA)     │     │  - Zoom crop      │     │              │
//! │              │     │  - Encoding       │     │              │
//! └──────────────┘     └───────────────────┘     └──────────────┘
//! ```

pub mod photo;
