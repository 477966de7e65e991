// SPDX-License-Identifier: GPL-3.0-only

use std::process::Command;

fn main() {
    println!("cargo::rerun-if-changed=.git/HEAD");
    println!("cargo::rerun-if-changed=.git/refs/tags");
    println!("cargo::rerun-if-env-changed=SNAPCAM_VERSION");

    // Packagers (flatpak, distro builds) pin the version explicitly
    let version = match std::env::var("SNAPCAM_VERSION") {
        Ok(v) => v,
        Err(_) => describe_version(),
    };

    println!("cargo::rustc-env=GIT_VERSION={}", version);
}

/// Turn `git describe` output into `<tag>-<hash>` or `<tag>-dirty-<hash>`.
fn describe_version() -> String {
    let described = git(&["describe", "--tags", "--always", "--match", "v*"])
        .unwrap_or_else(|| env!("CARGO_PKG_VERSION").to_string());
    let described = described.strip_prefix('v').unwrap_or(&described);
    let hash = git(&["rev-parse", "--short", "HEAD"]).unwrap_or_else(|| "unknown".to_string());

    // "0.1.0-5-gabcdef1" means five commits past the 0.1.0 tag
    let parts: Vec<&str> = described.rsplitn(3, '-').collect();
    if parts.len() == 3 {
        format!("{}-dirty-{}", parts[2], parts[0].trim_start_matches('g'))
    } else if described.contains('-') || described == hash {
        described.to_string()
    } else {
        format!("{}-{}", described, hash)
    }
}

fn git(args: &[&str]) -> Option<String> {
    let output = Command::new("git").args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    Some(String::from_utf8_lossy(&output.stdout).trim().to_string())
}
