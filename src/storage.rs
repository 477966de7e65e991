// SPDX-License-Identifier: MPL-2.0

//! Storage utilities for captured photos

use crate::config::Config;
use crate::constants::files;
use std::ffi::OsString;
use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::os::unix::ffi::{OsStrExt, OsStringExt};
use std::path::{Path, PathBuf};
use tracing::debug;

const FILE_SCHEME: &str = "file://";

/// Directory photos are written to
///
/// The configured directory wins. Otherwise `~/Pictures/snapcam`, falling
/// back to the home directory and finally the working directory when the
/// XDG pictures dir is unknown.
pub fn photo_directory(config: &Config) -> PathBuf {
    if let Some(dir) = config.photo_directory.as_deref().filter(|d| !d.is_empty()) {
        return expand_home(dir);
    }

    dirs::picture_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
        .join(files::APP_PICTURES_DIR)
}

/// Expand a leading `~/` to the home directory
fn expand_home(dir: &str) -> PathBuf {
    match (dir.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(dir),
    }
}

/// File name for a photo taken at `timestamp`
pub fn photo_file_name(timestamp: chrono::DateTime<chrono::Local>) -> String {
    format!(
        "{}.{}",
        timestamp.format(files::PHOTO_NAME_FORMAT),
        files::PHOTO_EXTENSION
    )
}

/// Candidate paths for a photo taken at `timestamp`, in order of preference
///
/// Two captures within the same second get `_1`, `_2`, ... suffixes.
fn photo_path_candidates(
    dir: &Path,
    timestamp: chrono::DateTime<chrono::Local>,
) -> impl Iterator<Item = PathBuf> + '_ {
    let stem = timestamp.format(files::PHOTO_NAME_FORMAT).to_string();
    std::iter::once(dir.join(photo_file_name(timestamp))).chain(
        (1u32..).map(move |n| dir.join(format!("{}_{}.{}", stem, n, files::PHOTO_EXTENSION))),
    )
}

/// Write `data` to a new file in `dir` and return its path
///
/// The name is claimed with `create_new`, so concurrent writers never
/// share a file.
pub fn write_new_photo(
    dir: &Path,
    timestamp: chrono::DateTime<chrono::Local>,
    data: &[u8],
) -> std::io::Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    for path in photo_path_candidates(dir, timestamp) {
        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(mut file) => {
                file.write_all(data)?;
                return Ok(path);
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                debug!(path = %path.display(), "Photo name taken");
            }
            Err(e) => return Err(e),
        }
    }
    Err(std::io::Error::new(
        ErrorKind::AlreadyExists,
        "no free photo name",
    ))
}

/// `file://` URI for a photo path
///
/// Bytes outside the RFC 3986 unreserved set (and `/`) are percent-encoded,
/// so spaces and non-UTF-8 names survive the trip back through
/// [`uri_to_path`].
pub fn photo_uri(path: &Path) -> String {
    let mut uri = String::from(FILE_SCHEME);
    for &byte in path.as_os_str().as_bytes() {
        if byte.is_ascii_alphanumeric() || b"/-._~".contains(&byte) {
            uri.push(char::from(byte));
        } else {
            uri.push_str(&format!("%{:02X}", byte));
        }
    }
    uri
}

/// Filesystem path for a photo URI
///
/// Plain paths are accepted as-is.
pub fn uri_to_path(uri: &str) -> PathBuf {
    let Some(encoded) = uri.strip_prefix(FILE_SCHEME) else {
        return PathBuf::from(uri);
    };
    let path = PathBuf::from(OsString::from_vec(percent_decode(encoded.as_bytes())));
    debug!(uri, path = %path.display(), "Resolved photo URI");
    path
}

fn percent_decode(input: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(input.len());
    let mut i = 0;
    while i < input.len() {
        let escaped = (input[i] == b'%')
            .then(|| input.get(i + 1..i + 3))
            .flatten()
            .and_then(|hex| std::str::from_utf8(hex).ok())
            .and_then(|hex| u8::from_str_radix(hex, 16).ok());
        match escaped {
            Some(byte) => {
                out.push(byte);
                i += 3;
            }
            None => {
                out.push(input[i]);
                i += 1;
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_configured_directory_wins() {
        let config = Config {
            photo_directory: Some("/tmp/shots".to_string()),
            ..Config::default()
        };
        assert_eq!(photo_directory(&config), PathBuf::from("/tmp/shots"));
    }

    #[test]
    fn test_default_directory_ends_in_app_dir() {
        let dir = photo_directory(&Config::default());
        assert!(dir.ends_with(files::APP_PICTURES_DIR));
    }

    #[test]
    fn test_photo_file_name() {
        let ts = chrono::Local.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
        assert_eq!(photo_file_name(ts), "IMG_20240309_140507.jpg");
    }

    #[test]
    fn test_uri_round_trip() {
        let path = Path::new("/home/me/Pictures/snapcam/IMG_1.jpg");
        let uri = photo_uri(path);
        assert_eq!(uri, "file:///home/me/Pictures/snapcam/IMG_1.jpg");
        assert_eq!(uri_to_path(&uri), path);
        assert_eq!(uri_to_path("/plain/path.jpg"), PathBuf::from("/plain/path.jpg"));
    }

    #[test]
    fn test_uri_escapes_spaces_and_raw_bytes() {
        let path = PathBuf::from(OsString::from_vec(
            b"/home/me/My Photos/caf\xe9 100%.jpg".to_vec(),
        ));
        let uri = photo_uri(&path);
        assert_eq!(uri, "file:///home/me/My%20Photos/caf%E9%20100%25.jpg");
        assert_eq!(uri_to_path(&uri), path);
    }

    #[test]
    fn test_write_new_photo_never_overwrites() {
        let dir = std::env::temp_dir().join(format!("snapcam-unique-{}", std::process::id()));
        let ts = chrono::Local.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();

        let first = write_new_photo(&dir, ts, b"first").unwrap();
        let second = write_new_photo(&dir, ts, b"second").unwrap();
        assert_ne!(first, second);
        assert!(second.to_string_lossy().ends_with("_1.jpg"));
        assert_eq!(std::fs::read(&first).unwrap(), b"first");
        assert_eq!(std::fs::read(&second).unwrap(), b"second");

        std::fs::remove_dir_all(dir).ok();
    }
}
