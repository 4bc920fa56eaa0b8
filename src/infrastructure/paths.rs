//! Path helpers for locating the client's data on the host.
//!
//! Data lives under the XDG data directory (`$XDG_DATA_HOME/hangouts`,
//! falling back to `~/.local/share/hangouts`). Paths coming from
//! configuration may start with `~`, which is expanded against `$HOME`.

use std::path::PathBuf;

/// Directory name used under the platform data directory.
const APP_DIR: &str = "hangouts";

/// Returns the default data directory for snapshots and traces.
///
/// Resolution order:
/// 1. `$XDG_DATA_HOME/hangouts`
/// 2. `$HOME/.local/share/hangouts`
/// 3. `./.hangouts` when neither variable is set
#[must_use]
pub fn get_data_dir() -> PathBuf {
    if let Some(xdg) = std::env::var_os("XDG_DATA_HOME").filter(|v| !v.is_empty()) {
        return PathBuf::from(xdg).join(APP_DIR);
    }
    home_dir().map_or_else(
        || PathBuf::from(".hangouts"),
        |home| home.join(".local").join("share").join(APP_DIR),
    )
}

/// Expands a leading `~` to the home directory.
///
/// Paths without a leading tilde, and all paths when `$HOME` is unset, are
/// returned unchanged.
///
/// # Examples
///
/// ```
/// use hangouts::infrastructure::expand_tilde;
/// use std::path::PathBuf;
///
/// assert_eq!(expand_tilde("/var/lib/hangouts"), PathBuf::from("/var/lib/hangouts"));
/// if let Some(home) = std::env::var_os("HOME") {
///     assert_eq!(expand_tilde("~/data"), PathBuf::from(home).join("data"));
/// }
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> PathBuf {
    let rest = match path.strip_prefix('~') {
        Some("") => "",
        Some(rest) if rest.starts_with('/') => &rest[1..],
        _ => return PathBuf::from(path),
    };
    match home_dir() {
        Some(home) if rest.is_empty() => home,
        Some(home) => home.join(rest),
        None => PathBuf::from(path),
    }
}

fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}
