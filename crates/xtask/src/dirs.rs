//! Platform-specific directory utilities
//!
//! Provides consistent directory paths across different operating systems,
//! following platform conventions for cache directories. Key store and content
//! locations come from [`runtime::RuntimeConfig`].

use std::path::PathBuf;

/// Get the platform-specific log directory for modkit
///
/// Follows platform conventions:
/// - macOS: `~/Library/Caches/modkit/logs`
/// - Linux: `~/.cache/modkit/logs` (or `$XDG_CACHE_HOME/modkit/logs`)
/// - Windows: `%LOCALAPPDATA%\modkit\logs`
/// - Fallback: `/tmp/modkit/logs`
pub fn log_dir() -> PathBuf {
    let base_dir = directories::ProjectDirs::from("", "", "modkit")
        .map(|dirs| dirs.cache_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("/tmp/modkit"));

    base_dir.join("logs")
}
