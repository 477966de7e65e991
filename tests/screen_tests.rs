// SPDX-License-Identifier: MPL-2.0

//! Integration tests for the camera screen state machine
//!
//! The providers are fakes; results are fed back into the screen the same
//! way the application does with `Task::perform`.

use futures::future::BoxFuture;
use futures::stream::{self, BoxStream};
use snapcam::app::{CameraScreen, FocusPoint, RenderGate, ScreenAlert};
use snapcam::backends::camera::{
    CameraDevice, CameraFacing, CameraPosition, CameraProvider, CapturedPhoto, DeviceBinding,
    PreviewFrame, TorchState,
};
use snapcam::backends::permission::{PermissionProvider, PermissionState};
use snapcam::errors::{CameraError, CaptureError, PermissionError};
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[derive(Default)]
struct FakeCamera {
    devices: Vec<CameraDevice>,
    fail_capture: bool,
    captures: AtomicUsize,
}

impl CameraProvider for FakeCamera {
    fn enumerate_devices(&self) -> BoxFuture<'static, Vec<CameraDevice>> {
        let devices = self.devices.clone();
        Box::pin(async move { devices })
    }

    fn bind(&self, _binding: &DeviceBinding) {}

    fn preview(&self, _device: &CameraDevice) -> BoxStream<'static, Arc<PreviewFrame>> {
        Box::pin(stream::empty())
    }

    fn capture(
        &self,
        _binding: &DeviceBinding,
    ) -> BoxFuture<'static, Result<CapturedPhoto, CaptureError>> {
        let n = self.captures.fetch_add(1, Ordering::SeqCst);
        let fail = self.fail_capture;
        Box::pin(async move {
            if fail {
                Err(CaptureError::NoFrameAvailable)
            } else {
                Ok(CapturedPhoto::new(PathBuf::from(format!(
                    "/tmp/snapcam/IMG_{n}.jpg"
                ))))
            }
        })
    }

    fn focus(
        &self,
        _device: &CameraDevice,
        _x: i32,
        _y: i32,
    ) -> BoxFuture<'static, Result<(), CameraError>> {
        Box::pin(async { Ok(()) })
    }
}

struct FakePermission(Result<PermissionState, PermissionError>);

impl PermissionProvider for FakePermission {
    fn request_camera_permission(
        &self,
    ) -> BoxFuture<'static, Result<PermissionState, PermissionError>> {
        let result = self.0.clone();
        Box::pin(async move { result })
    }
}

fn device(name: &str, position: CameraPosition) -> CameraDevice {
    CameraDevice {
        name: name.to_string(),
        path: format!("pipewire-serial-{name}"),
        position,
        v4l2_path: None,
    }
}

fn phone_cameras() -> Vec<CameraDevice> {
    vec![
        device("rear", CameraPosition::Back),
        device("selfie", CameraPosition::Front),
    ]
}

/// Mount a screen the way the application does
async fn mount(camera: &FakeCamera, permission: &FakePermission) -> CameraScreen {
    let mut screen = CameraScreen::new();
    screen.set_devices(camera.enumerate_devices().await);
    if screen.begin_permission_request() {
        screen.apply_permission_result(permission.request_camera_permission().await);
    }
    screen
}

async fn capture(screen: &mut CameraScreen, camera: &FakeCamera) {
    let binding = screen.binding().expect("bound device");
    screen.record_capture(camera.capture(&binding).await);
}

#[tokio::test]
async fn test_granted_with_device_renders_preview() {
    let camera = FakeCamera {
        devices: phone_cameras(),
        ..Default::default()
    };
    let screen = mount(&camera, &FakePermission(Ok(PermissionState::Granted))).await;

    match screen.render_gate() {
        RenderGate::Open(device) => assert_eq!(device.name, "rear"),
        other => panic!("expected open gate, got {other:?}"),
    }
    assert_eq!(screen.alert(), None);
    assert!(screen.binding().unwrap().active);
}

#[tokio::test]
async fn test_denied_renders_nothing_and_alerts_once() {
    let camera = FakeCamera {
        devices: phone_cameras(),
        ..Default::default()
    };
    let mut screen = mount(&camera, &FakePermission(Ok(PermissionState::Denied))).await;

    assert_eq!(screen.render_gate(), RenderGate::NotPermitted);
    assert_eq!(screen.alert(), Some(ScreenAlert::PermissionRequired));
    assert_eq!(screen.alerts_raised(), 1);

    // No second request in the same session
    assert!(!screen.begin_permission_request());
    screen.dismiss_alert();
    assert_eq!(screen.alert(), None);
    assert_eq!(screen.alerts_raised(), 1);
    assert_eq!(screen.render_gate(), RenderGate::NotPermitted);
}

#[tokio::test]
async fn test_failed_permission_request_keeps_denied() {
    let camera = FakeCamera {
        devices: phone_cameras(),
        ..Default::default()
    };
    let error = PermissionError::PortalUnavailable("no session bus".to_string());
    let screen = mount(&camera, &FakePermission(Err(error))).await;

    assert_eq!(screen.permission(), PermissionState::Denied);
    assert_eq!(screen.alerts_raised(), 1);
    assert_eq!(screen.render_gate(), RenderGate::NotPermitted);
}

#[tokio::test]
async fn test_no_devices_renders_nothing() {
    let camera = FakeCamera::default();
    let screen = mount(&camera, &FakePermission(Ok(PermissionState::Granted))).await;
    assert_eq!(screen.render_gate(), RenderGate::NoDevice);
    assert!(screen.binding().is_none());
}

#[test]
fn test_unresolved_before_enumeration() {
    let mut screen = CameraScreen::new();
    screen.apply_permission_result(Ok(PermissionState::Granted));
    assert_eq!(screen.render_gate(), RenderGate::NoDevice);
}

#[tokio::test]
async fn test_captures_append_in_order() {
    let camera = FakeCamera {
        devices: phone_cameras(),
        ..Default::default()
    };
    let mut screen = mount(&camera, &FakePermission(Ok(PermissionState::Granted))).await;

    for _ in 0..5 {
        capture(&mut screen, &camera).await;
    }

    let paths: Vec<_> = screen.photos().iter().map(|p| p.path.clone()).collect();
    let expected: Vec<_> = (0..5)
        .map(|n| PathBuf::from(format!("/tmp/snapcam/IMG_{n}.jpg")))
        .collect();
    assert_eq!(paths, expected);
}

#[tokio::test]
async fn test_failed_capture_changes_nothing() {
    let camera = FakeCamera {
        devices: phone_cameras(),
        fail_capture: true,
        ..Default::default()
    };
    let mut screen = mount(&camera, &FakePermission(Ok(PermissionState::Granted))).await;

    capture(&mut screen, &camera).await;

    assert!(screen.photos().is_empty());
    assert_eq!(screen.alert(), None);
    // Capture stays available
    assert!(screen.binding().is_some());
    capture(&mut screen, &camera).await;
    assert_eq!(camera.captures.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_three_captures_then_open_viewer() {
    let camera = FakeCamera {
        devices: phone_cameras(),
        ..Default::default()
    };
    let mut screen = mount(&camera, &FakePermission(Ok(PermissionState::Granted))).await;

    for _ in 0..3 {
        capture(&mut screen, &camera).await;
    }
    assert!(screen.open_viewer());

    let viewer = screen.viewer();
    assert!(viewer.visible);
    assert_eq!(viewer.start_index, 2);
    assert_eq!(viewer.current_index, 2);
    assert_eq!(
        screen.photo_uris(),
        vec![
            "file:///tmp/snapcam/IMG_0.jpg".to_string(),
            "file:///tmp/snapcam/IMG_1.jpg".to_string(),
            "file:///tmp/snapcam/IMG_2.jpg".to_string(),
        ]
    );
}

#[test]
fn test_open_viewer_without_photos_is_noop() {
    let mut screen = CameraScreen::new();
    assert!(!screen.open_viewer());
    assert!(!screen.viewer().visible);
}

#[tokio::test]
async fn test_viewer_navigation_is_clamped() {
    let camera = FakeCamera {
        devices: phone_cameras(),
        ..Default::default()
    };
    let mut screen = mount(&camera, &FakePermission(Ok(PermissionState::Granted))).await;
    for _ in 0..2 {
        capture(&mut screen, &camera).await;
    }

    screen.open_viewer();
    screen.viewer_next();
    assert_eq!(screen.viewer().current_index, 1);
    screen.viewer_previous();
    screen.viewer_previous();
    screen.viewer_previous();
    assert_eq!(screen.viewer().current_index, 0);
    assert_eq!(screen.viewer().start_index, 1);

    screen.close_viewer();
    assert!(!screen.viewer().visible);
    assert_eq!(screen.photos().len(), 2);

    // Reopening starts at the latest photo again
    screen.open_viewer();
    assert_eq!(screen.viewer().current_index, 1);
}

#[tokio::test]
async fn test_toggles_flip_only_their_own_state() {
    let camera = FakeCamera {
        devices: phone_cameras(),
        ..Default::default()
    };
    let mut screen = mount(&camera, &FakePermission(Ok(PermissionState::Granted))).await;
    capture(&mut screen, &camera).await;
    screen.zoom_by(1.0);

    assert_eq!(screen.toggle_torch(), TorchState::On);
    assert_eq!(screen.facing(), CameraFacing::Back);

    assert_eq!(screen.toggle_facing(), CameraFacing::Front);
    assert_eq!(screen.torch(), TorchState::On);
    assert_eq!(screen.photos().len(), 1);
    assert_eq!(screen.zoom(), 2.0);
    assert_eq!(screen.bound_device().unwrap().name, "selfie");

    assert_eq!(screen.toggle_torch(), TorchState::Off);
    assert_eq!(screen.facing(), CameraFacing::Front);
}

#[tokio::test]
async fn test_front_facing_falls_back_to_rear() {
    let camera = FakeCamera {
        devices: vec![device("usb", CameraPosition::External)],
        ..Default::default()
    };
    let mut screen = mount(&camera, &FakePermission(Ok(PermissionState::Granted))).await;

    assert_eq!(screen.bound_device().unwrap().name, "usb");
    screen.toggle_facing();
    assert_eq!(screen.bound_device().unwrap().name, "usb");
    assert_eq!(screen.binding().unwrap().facing, CameraFacing::Front);
}

#[tokio::test]
async fn test_focus_request_floors_coordinates() {
    let camera = FakeCamera {
        devices: phone_cameras(),
        ..Default::default()
    };
    let mut screen = mount(&camera, &FakePermission(Ok(PermissionState::Granted))).await;

    let requests: Vec<_> = [(12.7, 40.2), (0.0, 0.99), (300.5, 199.999)]
        .into_iter()
        .map(|(x, y)| {
            let request = screen.focus_at(x, y);
            assert_eq!(screen.focus_point(), Some(FocusPoint { x, y }));
            assert_eq!(screen.focus_ring(), Some(FocusPoint { x, y }));
            (request.x, request.y)
        })
        .collect();

    assert_eq!(requests, vec![(12, 40), (0, 0), (300, 199)]);
}

#[tokio::test]
async fn test_binding_tracks_torch_and_zoom() {
    let camera = FakeCamera {
        devices: phone_cameras(),
        ..Default::default()
    };
    let mut screen = mount(&camera, &FakePermission(Ok(PermissionState::Granted))).await;

    screen.toggle_torch();
    screen.zoom_by(0.5);
    let binding = screen.binding().unwrap();
    assert_eq!(binding.torch, TorchState::On);
    assert_eq!(binding.zoom, 1.5);
    assert!(binding.photo);
}
