// SPDX-License-Identifier: GPL-3.0-only

use std::process::Command;

fn main() {
    println!("cargo::rerun-if-changed=.git/HEAD");
    println!("cargo::rerun-if-env-changed=PHOTOBOOTH_VERSION");

    // Packagers can pin the reported version
    let version = std::env::var("PHOTOBOOTH_VERSION").unwrap_or_else(|_| build_version());

    println!("cargo::rustc-env=PHOTOBOOTH_BUILD_VERSION={}", version);
}

/// Crate version, suffixed with the short commit hash when built from a git checkout
fn build_version() -> String {
    let pkg_version = std::env::var("CARGO_PKG_VERSION").unwrap_or_else(|_| "0.0.0".to_string());

    match commit_hash() {
        Some(hash) => format!("{}-{}", pkg_version, hash),
        None => pkg_version,
    }
}

fn commit_hash() -> Option<String> {
    let output = Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()?;

    if output.status.success() {
        let hash = String::from_utf8_lossy(&output.stdout).trim().to_string();
        (!hash.is_empty()).then_some(hash)
    } else {
        None
    }
}
