// SPDX-License-Identifier: GPL-3.0-only

//! PipeWire camera enumeration
//!
//! Cameras are discovered through `pw-cli`, which lists every PipeWire node
//! with its properties. Nodes whose `media.class` is `Video/Source` are
//! cameras. libcamera nodes also report where the sensor sits, which is
//! what front/back selection is based on.

use super::super::types::{CameraDevice, CameraPosition};
use tracing::{debug, info, warn};

/// A `Video/Source` node as printed by `pw-cli ls Node`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PwNode {
    pub id: String,
    pub serial: Option<String>,
    pub description: Option<String>,
    pub nick: Option<String>,
    pub object_path: Option<String>,
    pub location: Option<String>,
}

impl PwNode {
    /// Device path understood by the preview pipeline
    pub fn device_path(&self) -> String {
        match self.serial.as_ref() {
            Some(serial) => format!("pipewire-serial-{}", serial),
            None => format!("pipewire-{}", self.id),
        }
    }

    /// V4L2 node behind the PipeWire node, from `object.path = "v4l2:/dev/videoN"`
    pub fn v4l2_path(&self) -> Option<String> {
        self.object_path
            .as_deref()
            .and_then(|p| p.strip_prefix("v4l2:"))
            .map(str::to_string)
    }

    pub fn into_device(self, location: Option<String>) -> CameraDevice {
        let position = location
            .or_else(|| self.location.clone())
            .map(|l| CameraPosition::from_location(&l))
            .unwrap_or_default();
        let name = self
            .description
            .clone()
            .or_else(|| self.nick.clone())
            .unwrap_or_else(|| format!("Camera {}", self.id));

        CameraDevice {
            path: self.device_path(),
            v4l2_path: self.v4l2_path(),
            name,
            position,
        }
    }
}

/// Enumerate cameras using PipeWire
///
/// Returns an empty list when `pw-cli` is missing or lists no cameras.
pub fn enumerate_pipewire_cameras() -> Vec<CameraDevice> {
    debug!("Enumerating cameras via pw-cli");

    let Some(stdout) = run_pw_cli(&["ls", "Node"]) else {
        warn!("pw-cli not available, no cameras enumerated");
        return Vec::new();
    };

    let cameras: Vec<CameraDevice> = parse_video_sources(&stdout)
        .into_iter()
        .map(|node| {
            let location = if node.location.is_some() {
                None
            } else {
                query_node_location(&node.id)
            };
            node.into_device(location)
        })
        .collect();

    for camera in &cameras {
        debug!(name = %camera.name, path = %camera.path, position = %camera.position, v4l2 = ?camera.v4l2_path, "Found video camera");
    }
    info!(count = cameras.len(), "Enumerated cameras via pw-cli");

    cameras
}

fn run_pw_cli(args: &[&str]) -> Option<String> {
    let output = std::process::Command::new("pw-cli")
        .args(args)
        .output()
        .ok()?;

    if !output.status.success() {
        debug!(?args, "pw-cli command failed");
        return None;
    }

    Some(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Parse `pw-cli ls Node` output into its `Video/Source` nodes
pub fn parse_video_sources(stdout: &str) -> Vec<PwNode> {
    let mut nodes = Vec::new();
    let mut current: Option<PwNode> = None;
    let mut is_video_source = false;

    for line in stdout.lines() {
        let trimmed = line.trim();

        // Format: "id 76, type PipeWire:Interface:Node/3"
        if trimmed.starts_with("id ") && trimmed.contains("type PipeWire:Interface:Node") {
            if is_video_source && let Some(node) = current.take() {
                nodes.push(node);
            }

            current = trimmed
                .strip_prefix("id ")
                .and_then(|rest| rest.split(',').next())
                .map(|id| PwNode {
                    id: id.trim().to_string(),
                    ..PwNode::default()
                });
            is_video_source = false;
            continue;
        }

        let Some(node) = current.as_mut() else {
            continue;
        };

        if trimmed.contains("media.class") && trimmed.contains("\"Video/Source\"") {
            is_video_source = true;
        } else if trimmed.contains("object.serial") {
            node.serial = extract_quoted_value(trimmed);
        } else if trimmed.contains("object.path") {
            node.object_path = extract_quoted_value(trimmed);
        } else if trimmed.contains("node.nick") {
            node.nick = extract_quoted_value(trimmed);
        } else if trimmed.contains("node.description") {
            node.description = extract_quoted_value(trimmed);
        } else if trimmed.contains("api.libcamera.location") {
            node.location = extract_quoted_value(trimmed);
        }
    }

    // Don't forget the last node
    if is_video_source && let Some(node) = current {
        nodes.push(node);
    }

    nodes
}

/// Extract quoted value from a property line (e.g., 'property = "value"' -> "value")
fn extract_quoted_value(line: &str) -> Option<String> {
    let start = line.find('"')?;
    let end = line[start + 1..].find('"')?;
    Some(line[start + 1..start + 1 + end].to_string())
}

/// Query the sensor location for a node using `pw-cli info`
///
/// `pw-cli ls Node` omits most `api.libcamera.*` properties.
fn query_node_location(node_id: &str) -> Option<String> {
    let stdout = run_pw_cli(&["info", node_id])?;
    let location = parse_location(&stdout);
    debug!(node_id, ?location, "Queried camera location");
    location
}

/// Find `api.libcamera.location` in `pw-cli info` output
pub fn parse_location(stdout: &str) -> Option<String> {
    stdout
        .lines()
        .map(str::trim)
        .find(|line| line.contains("api.libcamera.location"))
        .and_then(extract_quoted_value)
}

#[cfg(test)]
mod tests {
    use super::*;

    const LS_NODE: &str = r#"
	id 31, type PipeWire:Interface:Node/3
 		object.serial = "31"
 		factory.id = "10"
 		node.description = "Dummy-Driver"
 		node.name = "Dummy-Driver"
 		media.class = "Audio/Sink"
	id 76, type PipeWire:Interface:Node/3
 		object.serial = "2146"
 		object.path = "v4l2:/dev/video0"
 		factory.id = "11"
 		node.description = "Laptop Webcam Module (2nd Gen) (V4L2)"
 		node.name = "v4l2_input.pci-0000_00_14.0-usb-0_1_1.0"
 		node.nick = "Laptop Webcam Module (2nd Gen)"
 		media.class = "Video/Source"
	id 88, type PipeWire:Interface:Node/3
 		object.serial = "2201"
 		node.description = "Front Camera"
 		api.libcamera.location = "front"
 		media.class = "Video/Source"
"#;

    #[test]
    fn test_parse_keeps_only_video_sources() {
        let nodes = parse_video_sources(LS_NODE);
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0].id, "76");
        assert_eq!(nodes[1].id, "88");
    }

    #[test]
    fn test_parse_node_properties() {
        let nodes = parse_video_sources(LS_NODE);
        let webcam = &nodes[0];
        assert_eq!(webcam.serial.as_deref(), Some("2146"));
        assert_eq!(webcam.nick.as_deref(), Some("Laptop Webcam Module (2nd Gen)"));
        assert_eq!(webcam.v4l2_path().as_deref(), Some("/dev/video0"));
        assert_eq!(webcam.device_path(), "pipewire-serial-2146");
    }

    #[test]
    fn test_into_device_position() {
        let mut nodes = parse_video_sources(LS_NODE).into_iter();
        let webcam = nodes.next().unwrap().into_device(None);
        assert_eq!(webcam.position, CameraPosition::External);
        assert_eq!(webcam.name, "Laptop Webcam Module (2nd Gen) (V4L2)");

        let front = nodes.next().unwrap().into_device(None);
        assert_eq!(front.position, CameraPosition::Front);
        assert_eq!(front.v4l2_path, None);
    }

    #[test]
    fn test_queried_location_wins() {
        let node = PwNode {
            id: "5".to_string(),
            ..PwNode::default()
        };
        let device = node.into_device(Some("back".to_string()));
        assert_eq!(device.position, CameraPosition::Back);
        assert_eq!(device.path, "pipewire-5");
        assert_eq!(device.name, "Camera 5");
    }

    #[test]
    fn test_parse_location_from_info() {
        let info = "id: 88\n\tproperties:\n\t\t  api.libcamera.location = \"back\"\n";
        assert_eq!(parse_location(info).as_deref(), Some("back"));
        assert_eq!(parse_location("id: 1\n"), None);
    }
}
