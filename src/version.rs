use crate::error::Result;
use semver::Version;

// Compile-time constants from Cargo.toml and build.rs
pub const VERSION: &str = env!("INIT_AGENT_VERSION");
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");

// GitHub repository info
pub const REPO_OWNER: &str = "leebase";
pub const REPO_NAME: &str = "init-agent";

/// Platform target string, matching the release artifact naming
/// (init-agent-<arch>-<os>.tar.gz)
pub fn current_platform() -> Result<String> {
    match (std::env::consts::OS, std::env::consts::ARCH) {
        ("macos", "aarch64") => Ok("aarch64-macos".to_string()),
        ("macos", "x86_64") => Ok("x86_64-macos".to_string()),
        ("linux", "aarch64") => Ok("aarch64-linux".to_string()),
        ("linux", "x86_64") => Ok("x86_64-linux".to_string()),
        (os, arch) => Err(crate::error::InitAgentError::UpdateError(format!(
            "Unsupported platform: {}-{}",
            arch, os
        ))),
    }
}

pub fn binary_name() -> &'static str {
    PKG_NAME
}

/// Check if another version is newer than the current version
pub fn is_newer_version(other: &str) -> bool {
    match (Version::parse(VERSION), Version::parse(other)) {
        (Ok(current), Ok(latest)) => latest > current,
        _ => false,
    }
}
