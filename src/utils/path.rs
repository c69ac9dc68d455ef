use std::path::{Path, PathBuf};
use uzers::os::unix::UserExt;

/// Expand tilde (~) in paths to actual home directories.
///
/// Supports:
/// - `~` or `~/path` - expands to current user's home directory
/// - `~username/path` - expands to the specified user's home directory
pub fn expand_tilde<P: AsRef<Path>>(path: P) -> Option<PathBuf> {
    let path = path.as_ref();
    let path_str = path.to_str()?;

    if !path_str.starts_with('~') {
        return Some(path.to_path_buf());
    }

    let after_tilde = &path_str[1..];

    // Case 1: Just ~ or ~/...
    if after_tilde.is_empty() || after_tilde.starts_with('/') {
        let home = std::env::var("HOME").ok()?;
        return Some(PathBuf::from(home).join(after_tilde.trim_start_matches('/')));
    }

    // Case 2: ~username/... or ~username
    let username_end = after_tilde.find('/').unwrap_or(after_tilde.len());
    let username = &after_tilde[..username_end];
    let rest = &after_tilde[username_end..].trim_start_matches('/');

    let user = uzers::get_user_by_name(username)?;
    let home_dir = user.home_dir();

    Some(home_dir.join(rest))
}
