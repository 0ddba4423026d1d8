//! Where quill keeps its files on disk
//!
//! ```text
//! <config dir>/quill/
//! ├── config.json   EditorConfig (theme, font, auto-save, recent files)
//! ├── themes/       user YAML themes, shadowing built-ins of the same id
//! └── logs/         daily rolling log files
//! ```
//!
//! `<config dir>` is `$XDG_CONFIG_HOME` or `~/.config` on Unix and macOS,
//! and `%APPDATA%` on Windows. `--config` overrides only `config.json`.

use std::{
    env, fs,
    path::{Path, PathBuf},
};

const APP_DIR: &str = "quill";

/// quill's directory, or None when neither the environment nor a home dir is known
pub fn config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        env::var("APPDATA")
            .ok()
            .map(|appdata| PathBuf::from(appdata).join(APP_DIR))
    }

    #[cfg(not(target_os = "windows"))]
    {
        env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| dirs::home_dir().map(|h| h.join(".config")))
            .map(|config| config.join(APP_DIR))
    }
}

/// `<config dir>/quill/themes/`
pub fn themes_dir() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("themes"))
}

/// `<config dir>/quill/config.json`
pub fn config_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.json"))
}

/// `<config dir>/quill/logs/`
pub fn logs_dir() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("logs"))
}

fn ensure_dir(path: &Path) -> Result<(), String> {
    fs::create_dir_all(path)
        .map_err(|e| format!("Failed to create directory {}: {}", path.display(), e))
}

/// Create the logs dir (and quill's dir above it) if missing
pub fn ensure_logs_dir() -> Result<PathBuf, String> {
    let logs = logs_dir().ok_or_else(|| "No config directory available".to_string())?;
    ensure_dir(&logs)?;
    Ok(logs)
}
