use std::path::PathBuf;

/// Per-user folder holding the config file and logs.
pub const APP_FOLDER: &str = ".doclink";

/// `~/.doclink`, or `./.doclink` when there is no home directory.
#[must_use]
pub fn app_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_FOLDER)
}

/// Format a path for display, replacing home directory with ~/
#[must_use]
pub fn format_display_path(path: &str) -> String {
    replace_homedir::replace_homedir(path, "~")
}
