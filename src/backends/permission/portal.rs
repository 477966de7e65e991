// SPDX-License-Identifier: GPL-3.0-only

//! XDG desktop portal camera permission
//!
//! Inside a Flatpak sandbox PipeWire only exposes cameras after
//! `org.freedesktop.portal.Camera.AccessCamera` succeeds. The portal answers
//! asynchronously with a `Response` signal on a request object whose path
//! is derived from our bus name and a handle token. Outside a sandbox
//! nothing mediates camera access.

use super::{PermissionProvider, PermissionState};
use crate::constants::timing;
use crate::errors::PermissionError;
use futures::StreamExt;
use futures::future::BoxFuture;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info, warn};
use zbus::zvariant::{OwnedObjectPath, OwnedValue, Value};

const PORTAL_DESTINATION: &str = "org.freedesktop.portal.Desktop";
const PORTAL_PATH: &str = "/org/freedesktop/portal/desktop";
const CAMERA_INTERFACE: &str = "org.freedesktop.portal.Camera";
const REQUEST_INTERFACE: &str = "org.freedesktop.portal.Request";
const FLATPAK_INFO: &str = "/.flatpak-info";

/// Portal-backed permission provider
#[derive(Debug, Clone, Copy)]
pub struct PortalPermission {
    sandboxed: bool,
}

impl PortalPermission {
    /// Detect whether we run inside a Flatpak sandbox
    pub fn detect() -> Self {
        Self::new(Path::new(FLATPAK_INFO).exists())
    }

    pub fn new(sandboxed: bool) -> Self {
        Self { sandboxed }
    }

    pub fn is_sandboxed(&self) -> bool {
        self.sandboxed
    }
}

impl Default for PortalPermission {
    fn default() -> Self {
        Self::detect()
    }
}

/// Map a portal `Response` code to a permission state
///
/// 0 = success, 1 = cancelled by the user, 2 = ended some other way.
pub fn state_from_response(code: u32) -> PermissionState {
    match code {
        0 => PermissionState::Granted,
        1 => PermissionState::Denied,
        _ => PermissionState::Restricted,
    }
}

/// Object path the portal uses for a request
///
/// The unique name loses its leading ':' and has '.' replaced by '_'.
pub fn request_path(unique_name: &str, token: &str) -> String {
    let sender = unique_name.trim_start_matches(':').replace('.', "_");
    format!("{}/request/{}/{}", PORTAL_PATH, sender, token)
}

/// Request path to resubscribe on when the portal picked its own
///
/// Older portals ignore `handle_token` and return another path.
pub fn resubscribe_path<'a>(predicted: &str, returned: &'a str) -> Option<&'a str> {
    (returned != predicted).then_some(returned)
}

async fn access_camera() -> Result<PermissionState, PermissionError> {
    let connection = zbus::Connection::session()
        .await
        .map_err(|e| PermissionError::PortalUnavailable(e.to_string()))?;

    let unique_name = connection
        .unique_name()
        .map(|name| name.to_string())
        .ok_or_else(|| PermissionError::RequestFailed("no unique bus name".to_string()))?;
    let token = format!("snapcam_{}", uuid::Uuid::new_v4().simple());
    let path = request_path(&unique_name, &token);
    debug!(path = %path, "Requesting camera access");

    // Subscribe before calling so a fast answer is not missed
    let request =
        zbus::Proxy::new(&connection, PORTAL_DESTINATION, path.as_str(), REQUEST_INTERFACE).await?;
    let responses = request.receive_signal("Response").await?;

    let camera = zbus::Proxy::new(
        &connection,
        PORTAL_DESTINATION,
        PORTAL_PATH,
        CAMERA_INTERFACE,
    )
    .await
    .map_err(|e| PermissionError::PortalUnavailable(e.to_string()))?;

    let mut options: HashMap<&str, Value> = HashMap::new();
    options.insert("handle_token", Value::new(token.as_str()));
    let handle: OwnedObjectPath = camera.call("AccessCamera", &(options,)).await?;
    let mut responses = match resubscribe_path(&path, handle.as_str()) {
        Some(actual) => {
            warn!(expected = %path, actual, "Portal returned a different request handle");
            let request =
                zbus::Proxy::new(&connection, PORTAL_DESTINATION, actual, REQUEST_INTERFACE)
                    .await?;
            request.receive_signal("Response").await?
        }
        None => responses,
    };

    let message = tokio::time::timeout(timing::PORTAL_RESPONSE_TIMEOUT, responses.next())
        .await
        .map_err(|_| PermissionError::RequestFailed("portal did not answer".to_string()))?
        .ok_or_else(|| PermissionError::RequestFailed("portal closed the request".to_string()))?;
    let (code, _results): (u32, HashMap<String, OwnedValue>) = message.body().deserialize()?;

    let state = state_from_response(code);
    info!(code, ?state, "Camera portal answered");
    Ok(state)
}

impl PermissionProvider for PortalPermission {
    fn request_camera_permission(
        &self,
    ) -> BoxFuture<'static, Result<PermissionState, PermissionError>> {
        let sandboxed = self.sandboxed;
        Box::pin(async move {
            if !sandboxed {
                debug!("Not sandboxed, camera access is not mediated");
                return Ok(PermissionState::Granted);
            }
            access_camera().await
        })
    }
}
