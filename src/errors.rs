// SPDX-License-Identifier: MPL-2.0

//! Error types for the camera application

use std::fmt;

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;

/// Main application error type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    /// Camera device errors
    Camera(CameraError),
    /// Photo capture errors
    Capture(CaptureError),
    /// Camera permission errors
    Permission(PermissionError),
    /// Storage/filesystem errors
    Storage(String),
}

/// Camera device errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CameraError {
    /// No camera devices found
    NoCameraFound,
    /// Preview pipeline could not be created
    InitializationFailed(String),
    /// Device control (focus, torch) was rejected
    ControlFailed(String),
    /// Backend error (e.g., PipeWire, GStreamer)
    BackendError(String),
}

/// Photo capture errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureError {
    /// No device is bound to the screen
    NoDevice,
    /// Preview has not produced a frame yet
    NoFrameAvailable,
    /// Encoding failed
    EncodingFailed(String),
    /// Writing the file failed
    SaveFailed(String),
    /// Backend rejected the capture
    Backend(String),
}

/// Camera permission errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PermissionError {
    /// No portal answered on the session bus
    PortalUnavailable(String),
    /// The portal request failed or returned a malformed response
    RequestFailed(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Camera(e) => write!(f, "Camera error: {}", e),
            AppError::Capture(e) => write!(f, "Capture error: {}", e),
            AppError::Permission(e) => write!(f, "Permission error: {}", e),
            AppError::Storage(msg) => write!(f, "Storage error: {}", msg),
        }
    }
}

impl fmt::Display for CameraError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CameraError::NoCameraFound => write!(f, "No camera devices found"),
            CameraError::InitializationFailed(msg) => write!(f, "Initialization failed: {}", msg),
            CameraError::ControlFailed(msg) => write!(f, "Control failed: {}", msg),
            CameraError::BackendError(msg) => write!(f, "Backend error: {}", msg),
        }
    }
}

impl fmt::Display for CaptureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaptureError::NoDevice => write!(f, "No camera bound"),
            CaptureError::NoFrameAvailable => write!(f, "No frame available for capture"),
            CaptureError::EncodingFailed(msg) => write!(f, "Encoding failed: {}", msg),
            CaptureError::SaveFailed(msg) => write!(f, "Save failed: {}", msg),
            CaptureError::Backend(msg) => write!(f, "Backend error: {}", msg),
        }
    }
}

impl fmt::Display for PermissionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PermissionError::PortalUnavailable(msg) => {
                write!(f, "Camera portal unavailable: {}", msg)
            }
            PermissionError::RequestFailed(msg) => write!(f, "Permission request failed: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}
impl std::error::Error for CameraError {}
impl std::error::Error for CaptureError {}
impl std::error::Error for PermissionError {}

impl From<CameraError> for AppError {
    fn from(err: CameraError) -> Self {
        AppError::Camera(err)
    }
}

impl From<CaptureError> for AppError {
    fn from(err: CaptureError) -> Self {
        AppError::Capture(err)
    }
}

impl From<PermissionError> for AppError {
    fn from(err: PermissionError) -> Self {
        AppError::Permission(err)
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Storage(err.to_string())
    }
}

impl From<std::io::Error> for CaptureError {
    fn from(err: std::io::Error) -> Self {
        CaptureError::SaveFailed(err.to_string())
    }
}

impl From<image::ImageError> for CaptureError {
    fn from(err: image::ImageError) -> Self {
        CaptureError::EncodingFailed(err.to_string())
    }
}

impl From<zbus::Error> for PermissionError {
    fn from(err: zbus::Error) -> Self {
        PermissionError::RequestFailed(err.to_string())
    }
}

impl From<gstreamer::glib::Error> for CameraError {
    fn from(err: gstreamer::glib::Error) -> Self {
        CameraError::BackendError(err.to_string())
    }
}

impl From<gstreamer::glib::Error> for AppError {
    fn from(err: gstreamer::glib::Error) -> Self {
        AppError::Camera(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_error_wraps_into_app_error() {
        let err: AppError = CaptureError::NoFrameAvailable.into();
        assert_eq!(err.to_string(), "Capture error: No frame available for capture");
    }

    #[test]
    fn test_missing_camera_message() {
        let err: AppError = CameraError::NoCameraFound.into();
        assert_eq!(err.to_string(), "Camera error: No camera devices found");
    }

    #[test]
    fn test_io_error_becomes_save_failure() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
        let err: CaptureError = io.into();
        assert!(matches!(err, CaptureError::SaveFailed(msg) if msg.contains("read-only")));
    }
}
