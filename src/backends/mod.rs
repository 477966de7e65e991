// SPDX-License-Identifier: MPL-2.0

//! Backend abstraction layer for camera access
//!
//! The screen depends on two capabilities, both injected as trait objects
//! so tests can swap in fakes:
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │                  App Layer                   │
//! └────────────────────┬────────────────────────┘
//!                      │
//! ┌────────────────────┴────────────────────────┐
//! │              Backend Layer                   │
//! │  ┌──────────────────┐  ┌─────────────────┐  │
//! │  │      Camera      │  │   Permission    │  │
//! │  │    (PipeWire)    │  │  (XDG portal)   │  │
//! │  └──────────────────┘  └─────────────────┘  │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`camera`]: Device enumeration, preview, capture, focus and torch
//! - [`permission`]: Camera access permission through the desktop portal

pub mod camera;
pub mod permission;
