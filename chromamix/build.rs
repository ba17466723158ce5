//! Build script for chromamix
//!
//! Embeds build identification reported by `/health` and the startup log:
//! `CHROMAMIX_GIT_HASH`, `CHROMAMIX_BUILD_TIMESTAMP`, `CHROMAMIX_BUILD_PROFILE`.

use std::process::Command;

fn main() {
    let git_hash = Command::new("git")
        .args(["rev-parse", "--short=8", "HEAD"])
        .output()
        .ok()
        .filter(|output| output.status.success())
        .and_then(|output| String::from_utf8(output.stdout).ok())
        .map(|hash| hash.trim().to_string())
        .filter(|hash| !hash.is_empty())
        .unwrap_or_else(|| "unknown".to_string());

    let build_timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true);
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "unknown".to_string());

    println!("cargo:rustc-env=CHROMAMIX_GIT_HASH={}", git_hash);
    println!("cargo:rustc-env=CHROMAMIX_BUILD_TIMESTAMP={}", build_timestamp);
    println!("cargo:rustc-env=CHROMAMIX_BUILD_PROFILE={}", profile);
}
