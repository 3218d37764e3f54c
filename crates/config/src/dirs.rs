//! XDG directory utilities
//!
//! `XDG_CONFIG_HOME` defaults to ~/.config.

use std::path::PathBuf;
use xdg::BaseDirectories;

/// Get the shimhook config directory
///
/// Returns `$XDG_CONFIG_HOME/shimhook` or `~/.config/shimhook`
#[must_use]
pub fn config_dir() -> Option<PathBuf> {
    BaseDirectories::with_prefix("shimhook").get_config_home()
}

/// Get the default config file path
///
/// Returns `$XDG_CONFIG_HOME/shimhook/config.toml` or `~/.config/shimhook/config.toml`
#[must_use]
pub fn default_config_file() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}
