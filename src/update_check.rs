//! Cached, rate-limited "a newer release exists" notification, shown
//! after a successful scaffold. Never fails the command it runs after.

use crate::commands::update::get_latest_version;
use crate::version::{is_newer_version, VERSION};
use semver::Version;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

#[derive(Debug, Clone)]
pub struct UpdateCheckConfig {
    pub enabled: bool,
    pub check_interval_hours: u64,
}

/// Cache structure for storing update check results
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateCheckCache {
    pub last_check: u64,
    pub latest_version: Option<String>,
    pub update_available: bool,
}

impl UpdateCheckCache {
    /// Check if the cache is stale based on the interval.
    /// Uses saturating_sub to handle clock skew gracefully.
    pub fn is_stale(&self, interval_hours: u64) -> bool {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();

        let elapsed_seconds = now.saturating_sub(self.last_check);
        elapsed_seconds / 3600 >= interval_hours
    }
}

fn cache_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(PathBuf::from)
        .map(|home| home.join(".init-agent").join("update-check.json"))
}

fn load_cache() -> Option<UpdateCheckCache> {
    let path = cache_path()?;
    let content = fs::read_to_string(path).ok()?;
    serde_json::from_str(&content).ok()
}

/// Save the cache to disk with restricted permissions (0600)
fn save_cache(cache: &UpdateCheckCache) {
    if let Some(path) = cache_path() {
        if let Some(parent) = path.parent() {
            let _ = fs::create_dir_all(parent);
        }

        if let Ok(content) = serde_json::to_string_pretty(cache) {
            if fs::write(&path, content).is_ok() {
                #[cfg(unix)]
                {
                    let _ = fs::set_permissions(&path, fs::Permissions::from_mode(0o600));
                }
            }
        }
    }
}

/// Clear the update check cache. Called after a successful update so a
/// stale "update available" result does not linger.
pub fn clear_cache() {
    if let Some(path) = cache_path() {
        let _ = fs::remove_file(path);
    }
}

fn perform_version_check() -> UpdateCheckCache {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();

    // Only cache strings that parse as semver
    let latest_version = get_latest_version()
        .ok()
        .flatten()
        .filter(|v| Version::parse(v).is_ok());

    let update_available = latest_version
        .as_deref()
        .map(is_newer_version)
        .unwrap_or(false);

    UpdateCheckCache {
        last_check: now,
        latest_version,
        update_available,
    }
}

/// CI environments can't act on the notification, so skip it there
fn is_ci_environment() -> bool {
    std::env::var("CI").is_ok()
        || std::env::var("GITHUB_ACTIONS").is_ok()
        || std::env::var("GITLAB_CI").is_ok()
        || std::env::var("CIRCLECI").is_ok()
        || std::env::var("TRAVIS").is_ok()
        || std::env::var("JENKINS_HOME").is_ok()
        || std::env::var("TEAMCITY_VERSION").is_ok()
        || std::env::var("BUILDKITE").is_ok()
}

/// Sanitize version string to prevent terminal injection attacks.
/// Only allows characters valid in semver: 0-9, a-z, A-Z, ., -, +
fn sanitize_version(version: &str) -> String {
    version
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '.' || *c == '-' || *c == '+')
        .collect()
}

fn display_update_notification(latest_version: &str) {
    let safe_version = sanitize_version(latest_version);

    eprintln!();
    eprintln!("A new version of init-agent is available!");
    eprintln!("  Current: {}", VERSION);
    eprintln!("  Latest:  {}", safe_version);
    eprintln!("Run 'init-agent update' to upgrade");
    eprintln!();
}

/// Main entry point for update checking.
/// This function never returns errors - all failures are silently ignored.
pub fn check_and_notify(config: &UpdateCheckConfig) {
    if !config.enabled {
        return;
    }

    if is_ci_environment() {
        return;
    }

    let cache = load_cache();
    let needs_check = cache
        .as_ref()
        .map(|c| c.is_stale(config.check_interval_hours))
        .unwrap_or(true);

    let final_cache = if needs_check {
        let new_cache = perform_version_check();
        save_cache(&new_cache);
        new_cache
    } else {
        match cache {
            Some(cache) => cache,
            None => return,
        }
    };

    if final_cache.update_available {
        if let Some(ref version) = final_cache.latest_version {
            display_update_notification(version);
        }
    }
}
