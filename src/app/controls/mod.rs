// SPDX-License-Identifier: GPL-3.0-only

//! Capture controls
//!
//! - Capture button
//! - Torch toggle

pub mod capture_button;
pub mod torch_button;
