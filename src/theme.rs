//! Theme system for the editor
//!
//! Provides YAML-based theming support with compile-time embedded themes
//! and user-defined themes from config directories.
//!
//! Theme loading priority:
//! 1. User config: `~/.config/quill/themes/{id}.yaml`
//! 2. Embedded: Built-in themes compiled into binary
//!
//! Every theme maps token categories to colors. A category the theme does not
//! mention is drawn with the editor foreground.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::syntax::TokenCategory;

// Embed theme YAML files at compile time
pub const DEFAULT_YAML: &str = include_str!("../themes/default.yaml");
pub const DARK_YAML: &str = include_str!("../themes/dark.yaml");
pub const LIGHT_YAML: &str = include_str!("../themes/light.yaml");

/// Theme id used when nothing else is configured
pub const DEFAULT_THEME_ID: &str = "dark";

/// A built-in theme entry
pub struct BuiltinTheme {
    /// Stable identifier for config (e.g. "dark", "light")
    pub id: &'static str,
    /// Embedded YAML content
    pub yaml: &'static str,
}

/// Registry of all built-in themes
pub const BUILTIN_THEMES: &[BuiltinTheme] = &[
    BuiltinTheme {
        id: "default",
        yaml: DEFAULT_YAML,
    },
    BuiltinTheme {
        id: "dark",
        yaml: DARK_YAML,
    },
    BuiltinTheme {
        id: "light",
        yaml: LIGHT_YAML,
    },
];

/// Where the theme came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeSource {
    /// User-defined theme in ~/.config/quill/themes/
    User,
    /// Built-in theme embedded in binary
    Builtin,
}

/// Information about an available theme
#[derive(Debug, Clone)]
pub struct ThemeInfo {
    /// Stable identifier (e.g., "dark", "my-custom-theme")
    pub id: String,
    /// Display name from YAML (e.g., "Dark")
    pub name: String,
    /// Where this theme is loaded from
    pub source: ThemeSource,
}

/// Load a theme from a YAML file
pub fn from_file(path: &Path) -> Result<Theme, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read theme file {}: {}", path.display(), e))?;
    Theme::from_yaml(&content)
}

/// Load theme by id with priority: user → builtin
pub fn load_theme(id: &str) -> Result<Theme, String> {
    if let Some(user_dir) = crate::config_paths::themes_dir() {
        let user_path = user_dir.join(format!("{}.yaml", id));
        if user_path.exists() {
            tracing::info!("Loading user theme from {}", user_path.display());
            let mut theme = from_file(&user_path)?;
            theme.id = id.to_string();
            return Ok(theme);
        }
    }

    tracing::info!("Loading builtin theme: {}", id);
    Theme::from_builtin(id)
}

/// List all available themes from all sources
///
/// User themes override builtins with the same id.
pub fn list_available_themes() -> Vec<ThemeInfo> {
    let mut themes = Vec::new();
    let mut seen_ids = std::collections::HashSet::new();

    if let Some(user_dir) = crate::config_paths::themes_dir() {
        if let Ok(entries) = std::fs::read_dir(&user_dir) {
            for entry in entries.filter_map(|e| e.ok()) {
                let path = entry.path();
                if !path
                    .extension()
                    .is_some_and(|ext| ext == "yaml" || ext == "yml")
                {
                    continue;
                }
                let Some(id) = path.file_stem().and_then(|s| s.to_str()) else {
                    continue;
                };
                if seen_ids.insert(id.to_string()) {
                    let name = from_file(&path)
                        .map(|t| t.name)
                        .unwrap_or_else(|_| id.to_string());
                    themes.push(ThemeInfo {
                        id: id.to_string(),
                        name,
                        source: ThemeSource::User,
                    });
                }
            }
        }
    }

    for builtin in BUILTIN_THEMES {
        if seen_ids.insert(builtin.id.to_string()) {
            let name = Theme::from_yaml(builtin.yaml)
                .map(|t| t.name)
                .unwrap_or_else(|_| builtin.id.to_string());
            themes.push(ThemeInfo {
                id: builtin.id.to_string(),
                name,
                source: ThemeSource::Builtin,
            });
        }
    }

    themes
}

/// RGBA color (0-255 per channel)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// Create a new color from RGB values (alpha defaults to 255)
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Create a new color from RGBA values
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parse from "#RRGGBB" or "#RRGGBBAA" hex string
    pub fn from_hex(s: &str) -> Result<Self, String> {
        let s = s.trim_start_matches('#');
        let channel = |range: std::ops::Range<usize>| {
            s.get(range)
                .ok_or_else(|| format!("Invalid color format: {}", s))
                .and_then(|hex| u8::from_str_radix(hex, 16).map_err(|e| e.to_string()))
        };
        match s.len() {
            6 => Ok(Color::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?)),
            8 => Ok(Color::rgba(
                channel(0..2)?,
                channel(2..4)?,
                channel(4..6)?,
                channel(6..8)?,
            )),
            _ => Err(format!("Invalid color format: {}", s)),
        }
    }

    /// "#RRGGBB" form (alpha dropped)
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// Raw theme data as parsed from YAML
#[derive(Debug, Clone, Deserialize)]
pub struct ThemeData {
    pub version: u32,
    pub name: String,
    #[serde(default)]
    pub author: Option<String>,
    pub ui: UiThemeData,
    /// Token category name → hex color
    #[serde(default)]
    pub syntax: HashMap<String, String>,
}

/// UI theme colors (raw strings from YAML)
#[derive(Debug, Clone, Deserialize)]
pub struct UiThemeData {
    pub editor: EditorThemeData,
    #[serde(default)]
    pub gutter: Option<GutterThemeData>,
}

/// Editor area colors
#[derive(Debug, Clone, Deserialize)]
pub struct EditorThemeData {
    pub background: String,
    pub foreground: String,
    #[serde(default)]
    pub match_background: Option<String>,
    #[serde(default)]
    pub line_highlight_background: Option<String>,
}

/// Gutter (line numbers) colors
#[derive(Debug, Clone, Deserialize)]
pub struct GutterThemeData {
    pub background: String,
    pub foreground: String,
}

/// Resolved theme with parsed colors
#[derive(Debug, Clone)]
pub struct Theme {
    /// Registry id ("dark", "light", or a user theme's file stem)
    pub id: String,
    pub name: String,
    pub editor: EditorTheme,
    pub gutter: GutterTheme,
    tokens: HashMap<TokenCategory, Color>,
}

/// Editor colors (resolved)
#[derive(Debug, Clone)]
pub struct EditorTheme {
    pub background: Color,
    pub foreground: Color,
    /// Background of the active find match
    pub match_background: Color,
    /// Background of the go-to-line target
    pub line_highlight_background: Color,
}

/// Gutter colors (resolved)
#[derive(Debug, Clone)]
pub struct GutterTheme {
    pub background: Color,
    pub foreground: Color,
}

const YELLOW: Color = Color::rgb(0xFF, 0xFF, 0x00);
const LIGHT_GRAY: Color = Color::rgb(0xD3, 0xD3, 0xD3);

impl Theme {
    /// Load theme from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self, String> {
        let data: ThemeData =
            serde_yaml::from_str(yaml).map_err(|e| format!("YAML parse error: {}", e))?;
        Self::from_data(data)
    }

    /// Load a built-in theme by id
    pub fn from_builtin(id: &str) -> Result<Self, String> {
        let entry = BUILTIN_THEMES
            .iter()
            .find(|t| t.id == id)
            .ok_or_else(|| format!("Unknown theme id: {}", id))?;
        let mut theme = Theme::from_yaml(entry.yaml)?;
        theme.id = entry.id.to_string();
        Ok(theme)
    }

    /// Convert raw theme data to resolved theme
    pub fn from_data(data: ThemeData) -> Result<Self, String> {
        let parse_opt = |value: &Option<String>, fallback: Color| {
            value
                .as_ref()
                .map(|s| Color::from_hex(s))
                .transpose()
                .map(|c| c.unwrap_or(fallback))
        };

        let mut tokens = HashMap::new();
        for (key, value) in &data.syntax {
            match TokenCategory::ALL.iter().find(|c| c.name() == key) {
                Some(category) => {
                    tokens.insert(*category, Color::from_hex(value)?);
                }
                None => tracing::warn!("Theme '{}': unknown token category '{}'", data.name, key),
            }
        }

        let gutter = match &data.ui.gutter {
            Some(g) => GutterTheme {
                background: Color::from_hex(&g.background)?,
                foreground: Color::from_hex(&g.foreground)?,
            },
            None => GutterTheme {
                background: LIGHT_GRAY,
                foreground: Color::rgb(0, 0, 0),
            },
        };

        Ok(Theme {
            id: data.name.to_lowercase().replace(' ', "-"),
            editor: EditorTheme {
                background: Color::from_hex(&data.ui.editor.background)?,
                foreground: Color::from_hex(&data.ui.editor.foreground)?,
                match_background: parse_opt(&data.ui.editor.match_background, YELLOW)?,
                line_highlight_background: parse_opt(
                    &data.ui.editor.line_highlight_background,
                    YELLOW,
                )?,
            },
            gutter,
            tokens,
            name: data.name,
        })
    }

    /// Color for a token category, falling back to the editor foreground
    pub fn token_color(&self, category: TokenCategory) -> Color {
        self.tokens
            .get(&category)
            .copied()
            .unwrap_or(self.editor.foreground)
    }

    /// Default dark theme (YAML-backed with Rust fallback)
    pub fn default_dark() -> Self {
        match Theme::from_builtin(DEFAULT_THEME_ID) {
            Ok(theme) => theme,
            Err(e) => {
                tracing::warn!("Builtin dark theme failed to parse: {}", e);
                Theme {
                    id: DEFAULT_THEME_ID.to_string(),
                    name: "Dark".to_string(),
                    editor: EditorTheme {
                        background: Color::rgb(0x28, 0x2C, 0x34),
                        foreground: Color::rgb(0xAB, 0xB2, 0xBF),
                        match_background: YELLOW,
                        line_highlight_background: YELLOW,
                    },
                    gutter: GutterTheme {
                        background: LIGHT_GRAY,
                        foreground: Color::rgb(0, 0, 0),
                    },
                    tokens: HashMap::new(),
                }
            }
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::default_dark()
    }
}
