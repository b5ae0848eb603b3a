//! Path utilities: data directory resolution and tilde expansion.

use std::path::{Path, PathBuf};

/// Directory name under the platform data directory.
const APP_DIR: &str = "dinedeck";

/// Returns the directory holding the stores and the log file.
///
/// An explicit override wins (with `~` expanded). Otherwise this is the
/// platform's local data directory joined with `dinedeck`, e.g.
/// `~/.local/share/dinedeck` on Linux. Falls back to `./.dinedeck` when the
/// platform directory is unknown.
///
/// # Examples
///
/// ```
/// use dinedeck::infrastructure::get_data_dir;
/// use std::path::{Path, PathBuf};
///
/// assert_eq!(get_data_dir(Some(Path::new("/tmp/dd"))), PathBuf::from("/tmp/dd"));
/// ```
#[must_use]
pub fn get_data_dir(override_dir: Option<&Path>) -> PathBuf {
    if let Some(dir) = override_dir {
        return dir.to_str().map_or_else(|| dir.to_path_buf(), |s| PathBuf::from(expand_tilde(s)));
    }

    dirs::data_local_dir().map_or_else(|| PathBuf::from(".").join(format!(".{APP_DIR}")), |base| base.join(APP_DIR))
}

/// Expands a leading `~` to the home directory.
///
/// Paths without a leading tilde, or when no home directory is known, are
/// returned unchanged.
///
/// # Examples
///
/// ```
/// use dinedeck::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("/absolute/path"), "/absolute/path");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    let Some(home) = dirs::home_dir() else {
        return path.to_string();
    };

    if let Some(rest) = path.strip_prefix("~/") {
        home.join(rest).to_string_lossy().into_owned()
    } else if path == "~" {
        home.to_string_lossy().into_owned()
    } else {
        path.to_string()
    }
}
