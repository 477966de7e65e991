// SPDX-License-Identifier: GPL-3.0-only

//! V4L2 focus controls
//!
//! Tap-to-focus maps to a one-shot autofocus run on the V4L2 node behind
//! the PipeWire camera. Drivers without a one-shot trigger get continuous
//! autofocus re-enabled instead, which restarts their search.

use std::fs::File;
use std::os::unix::io::AsRawFd;
use tracing::{debug, warn};

const V4L2_CTRL_CLASS_CAMERA: u32 = 0x009a0000;
const V4L2_CID_CAMERA_CLASS_BASE: u32 = V4L2_CTRL_CLASS_CAMERA | 0x900;

/// Continuous autofocus enable
pub const V4L2_CID_FOCUS_AUTO: u32 = V4L2_CID_CAMERA_CLASS_BASE + 12;
/// Start a single autofocus run (button control)
pub const V4L2_CID_AUTO_FOCUS_START: u32 = V4L2_CID_CAMERA_CLASS_BASE + 28;

const V4L2_CTRL_FLAG_DISABLED: u32 = 0x0001;

/// Set control value (v4l2_control: 8 bytes)
const VIDIOC_S_CTRL: libc::c_ulong = 0xC008561C;
/// Query control info (v4l2_queryctrl: 68 bytes)
const VIDIOC_QUERYCTRL: libc::c_ulong = 0xC0445624;

#[repr(C)]
struct V4l2Control {
    id: u32,
    value: i32,
}

#[repr(C)]
struct V4l2Queryctrl {
    id: u32,
    ctrl_type: u32,
    name: [u8; 32],
    minimum: i32,
    maximum: i32,
    step: i32,
    default_value: i32,
    flags: u32,
    reserved: [u32; 2],
}

/// How a device can be asked to refocus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusMethod {
    /// `V4L2_CID_AUTO_FOCUS_START`
    OneShot,
    /// Toggle `V4L2_CID_FOCUS_AUTO` back on
    Continuous,
}

/// Query control flags, `None` if the control does not exist
fn query_control_flags(device_path: &str, control_id: u32) -> Option<u32> {
    let file = File::open(device_path).ok()?;
    let fd = file.as_raw_fd();

    let mut qctrl = V4l2Queryctrl {
        id: control_id,
        ctrl_type: 0,
        name: [0; 32],
        minimum: 0,
        maximum: 0,
        step: 0,
        default_value: 0,
        flags: 0,
        reserved: [0; 2],
    };

    let result = unsafe { libc::ioctl(fd, VIDIOC_QUERYCTRL, &mut qctrl as *mut V4l2Queryctrl) };

    if result < 0 {
        return None;
    }

    Some(qctrl.flags)
}

/// Check if a control is available on the device
pub fn has_control(device_path: &str, control_id: u32) -> bool {
    query_control_flags(device_path, control_id)
        .map(|flags| flags & V4L2_CTRL_FLAG_DISABLED == 0)
        .unwrap_or(false)
}

/// Set value of a control
pub fn set_control(device_path: &str, control_id: u32, value: i32) -> Result<(), String> {
    let file = File::open(device_path).map_err(|e| format!("Failed to open device: {}", e))?;
    let fd = file.as_raw_fd();

    let mut ctrl = V4l2Control {
        id: control_id,
        value,
    };

    let result = unsafe { libc::ioctl(fd, VIDIOC_S_CTRL, &mut ctrl as *mut V4l2Control) };

    if result < 0 {
        let errno = std::io::Error::last_os_error();
        warn!(
            device_path,
            control_id,
            value,
            ?errno,
            "Failed to set V4L2 control"
        );
        return Err(format!("Failed to set control: {}", errno));
    }

    Ok(())
}

/// Pick the focus method from the controls the device exposes
pub fn select_focus_method(one_shot: bool, continuous: bool) -> Option<FocusMethod> {
    if one_shot {
        Some(FocusMethod::OneShot)
    } else if continuous {
        Some(FocusMethod::Continuous)
    } else {
        None
    }
}

/// Trigger an autofocus run on a V4L2 node
pub fn trigger_autofocus(device_path: &str) -> Result<FocusMethod, String> {
    let method = select_focus_method(
        has_control(device_path, V4L2_CID_AUTO_FOCUS_START),
        has_control(device_path, V4L2_CID_FOCUS_AUTO),
    )
    .ok_or_else(|| format!("{} has no autofocus controls", device_path))?;

    match method {
        FocusMethod::OneShot => set_control(device_path, V4L2_CID_AUTO_FOCUS_START, 1)?,
        FocusMethod::Continuous => {
            // Off then on restarts the search on UVC drivers
            set_control(device_path, V4L2_CID_FOCUS_AUTO, 0)?;
            set_control(device_path, V4L2_CID_FOCUS_AUTO, 1)?;
        }
    }

    debug!(device_path, ?method, "Autofocus triggered");
    Ok(method)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_control_id_values() {
        assert_eq!(V4L2_CID_FOCUS_AUTO, 0x009a090c);
        assert_eq!(V4L2_CID_AUTO_FOCUS_START, 0x009a091c);
    }

    #[test]
    fn test_focus_method_preference() {
        assert_eq!(select_focus_method(true, true), Some(FocusMethod::OneShot));
        assert_eq!(select_focus_method(false, true), Some(FocusMethod::Continuous));
        assert_eq!(select_focus_method(false, false), None);
    }

    #[test]
    fn test_missing_device_has_no_controls() {
        assert!(!has_control("/nonexistent/video99", V4L2_CID_FOCUS_AUTO));
        assert!(trigger_autofocus("/nonexistent/video99").is_err());
    }
}
