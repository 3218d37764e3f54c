//! Configuration management for shimhook
//!
//! This crate handles:
//! - Tool configuration loading (log verbosity and log file)
//! - XDG directory management
//! - Reading the hook specification from a bundle's `config.json`
//! - Logging initialization

pub mod bundle;
pub mod config;
pub mod dirs;
pub mod logging;

// Re-export error types from core
pub use shimhook_core::{Error, Result};

// Re-export main types
pub use bundle::load_runtime_spec;
pub use config::{Config, LogConfig};
pub use dirs::{config_dir, default_config_file};
