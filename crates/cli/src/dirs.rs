//! Platform-specific directory utilities.

use std::path::PathBuf;

const APP_NAME: &str = "gathering";

/// Log directory for the CLI.
///
/// - macOS: `~/Library/Caches/gathering/logs`
/// - Linux: `~/.cache/gathering/logs` (or `$XDG_CACHE_HOME/gathering/logs`)
/// - Windows: `%LOCALAPPDATA%\gathering\logs`
/// - Fallback: `/tmp/gathering/logs`
pub fn log_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", APP_NAME)
        .map(|dirs| dirs.cache_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("/tmp/gathering"))
        .join("logs")
}

/// Data directory holding the world snapshot and collaborator state.
///
/// - macOS: `~/Library/Application Support/gathering`
/// - Linux: `~/.local/share/gathering` (or `$XDG_DATA_HOME/gathering`)
/// - Windows: `%APPDATA%\gathering`
/// - Fallback: `./save_data`
pub fn data_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", APP_NAME)
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("./save_data"))
}
