use std::path::{Path, PathBuf};

/// Environment variable that relocates the config directory (tests, sandboxes).
pub const CONFIG_DIR_ENV: &str = "CINEDK_CONFIG_DIR";

/// Get the home directory, with fallback to "/"
pub fn get_home_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("/"))
}

/// Config directory: `$CINEDK_CONFIG_DIR`, else `~/.config/cinedk` on every OS.
pub fn get_config_dir() -> PathBuf {
    match std::env::var_os(CONFIG_DIR_ENV) {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => get_home_dir().join(".config").join("cinedk"),
    }
}

pub fn get_config_path() -> PathBuf {
    get_config_dir().join("config.toml")
}

/// Directory holding `cinedk.log`.
pub fn get_log_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(get_home_dir)
        .join("cinedk")
}

/// Expand a leading `~` in a user-typed path. Other paths are kept as typed
/// and resolve against the working directory.
pub fn expand_path(path_str: &str) -> PathBuf {
    let path_str = path_str.trim();
    if path_str == "~" {
        get_home_dir()
    } else if let Some(rest) = path_str.strip_prefix("~/") {
        get_home_dir().join(rest)
    } else {
        PathBuf::from(path_str)
    }
}

/// Show paths under the home directory as `~/...`.
pub fn format_path_for_display(path: &Path) -> String {
    let home_dir = get_home_dir();

    if let Ok(relative) = path.strip_prefix(&home_dir) {
        if relative.as_os_str().is_empty() {
            "~".to_string()
        } else {
            format!("~/{}", relative.to_string_lossy())
        }
    } else {
        path.to_string_lossy().to_string()
    }
}
