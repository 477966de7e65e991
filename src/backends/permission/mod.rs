// SPDX-License-Identifier: MPL-2.0

//! Camera access permission

pub mod portal;

pub use portal::PortalPermission;

use crate::errors::PermissionError;
use futures::future::BoxFuture;

/// Outcome of a permission request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PermissionState {
    Granted,
    /// Also the state before any answer has arrived
    #[default]
    Denied,
    /// Blocked by policy, the user cannot grant it
    Restricted,
    NotDetermined,
}

impl PermissionState {
    pub fn is_granted(self) -> bool {
        self == PermissionState::Granted
    }
}

/// Permission capability injected into the screen
pub trait PermissionProvider: Send + Sync {
    /// Ask the platform whether the camera may be used
    ///
    /// May prompt the user. An `Err` means the question could not be asked.
    fn request_camera_permission(
        &self,
    ) -> BoxFuture<'static, Result<PermissionState, PermissionError>>;
}
