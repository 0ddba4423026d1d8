//! Editor configuration persistence
//!
//! Stores user preferences in `~/.config/quill/config.json`:
//!
//! ```json
//! {
//!   "theme": "dark",
//!   "font": ["Consolas", 12],
//!   "autoSaveInterval": 300,
//!   "recentFiles": [],
//!   "codeSnippets": {}
//! }
//! ```
//!
//! Missing keys take their defaults; an unreadable or corrupt file yields the
//! full default config. Failures here are logged, never shown to the user.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::theme::DEFAULT_THEME_ID;

/// Font family and point size, stored as a two-element array
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontSpec(pub String, pub u32);

impl FontSpec {
    pub fn family(&self) -> &str {
        &self.0
    }

    pub fn size(&self) -> u32 {
        self.1
    }
}

impl Default for FontSpec {
    fn default() -> Self {
        FontSpec("Consolas".to_string(), 12)
    }
}

/// Editor configuration that persists across sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorConfig {
    /// Selected theme id ("default", "dark", "light" or a user theme)
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default)]
    pub font: FontSpec,
    /// Seconds between auto-save scans; 0 disables auto-save
    #[serde(default = "default_auto_save_interval")]
    pub auto_save_interval: u64,
    /// Opened files, oldest first, without duplicates
    #[serde(default)]
    pub recent_files: Vec<PathBuf>,
    /// Carried through load/save untouched
    #[serde(default)]
    pub code_snippets: BTreeMap<String, serde_json::Value>,
}

fn default_theme() -> String {
    DEFAULT_THEME_ID.to_string()
}

fn default_auto_save_interval() -> u64 {
    300
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            font: FontSpec::default(),
            auto_save_interval: default_auto_save_interval(),
            recent_files: Vec::new(),
            code_snippets: BTreeMap::new(),
        }
    }
}

impl EditorConfig {
    /// Load config from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };
        Self::load_from(&path)
    }

    /// Load config from a specific file, or return defaults on any failure
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse config at {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save config to disk
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> Result<(), String> {
        let path = crate::config_paths::config_file()
            .ok_or_else(|| "No config directory available".to_string())?;
        self.save_to(&path)
    }

    /// Save config to a specific file
    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        let content = serde_json::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        std::fs::write(path, content)
            .map_err(|e| format!("Failed to write config to {}: {}", path.display(), e))?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Append a path to the recent files list unless it is already there.
    ///
    /// Returns true when the list changed.
    pub fn add_recent_file(&mut self, path: &Path) -> bool {
        if self.recent_files.iter().any(|p| p == path) {
            return false;
        }
        self.recent_files.push(path.to_path_buf());
        true
    }

    /// Auto-save period, or None when auto-save is disabled
    pub fn auto_save_period(&self) -> Option<Duration> {
        (self.auto_save_interval > 0).then(|| Duration::from_secs(self.auto_save_interval))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_font_serializes_as_array() {
        let json = serde_json::to_string(&FontSpec::default()).unwrap();
        assert_eq!(json, r#"["Consolas",12]"#);
    }

    #[test]
    fn test_keys_are_camel_case() {
        let json = serde_json::to_value(EditorConfig::default()).unwrap();
        assert_eq!(json["autoSaveInterval"], 300);
        assert!(json["recentFiles"].as_array().unwrap().is_empty());
        assert!(json["codeSnippets"].as_object().unwrap().is_empty());
    }

    #[test]
    fn test_add_recent_file_dedupes() {
        let mut config = EditorConfig::default();
        assert!(config.add_recent_file(Path::new("/a.py")));
        assert!(config.add_recent_file(Path::new("/b.py")));
        assert!(!config.add_recent_file(Path::new("/a.py")));
        assert_eq!(
            config.recent_files,
            vec![PathBuf::from("/a.py"), PathBuf::from("/b.py")]
        );
    }

    #[test]
    fn test_zero_interval_disables_auto_save() {
        let config = EditorConfig {
            auto_save_interval: 0,
            ..EditorConfig::default()
        };
        assert_eq!(config.auto_save_period(), None);
        assert_eq!(
            EditorConfig::default().auto_save_period(),
            Some(Duration::from_secs(300))
        );
    }
}
