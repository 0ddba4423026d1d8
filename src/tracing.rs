//! Debug tracing infrastructure for development diagnostics
//!
//! Provides structured logging with scoped filtering for debugging
//! tab, find/replace and save state transitions.
//!
//! # Usage
//!
//! Configure via RUST_LOG environment variable:
//! - `RUST_LOG=debug` - all debug logs
//! - `RUST_LOG=message=debug,session=debug` - scoped filtering
//! - `RUST_LOG=quill::update=debug` - module-level filtering
//!
//! # Log Files
//!
//! Logs are written to `~/.config/quill/logs/quill.log` with daily rotation.
//! File logging uses debug level by default for more verbose troubleshooting.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::model::EditorSession;

/// Initialize tracing subscriber with console and file logging
///
/// Console output goes to stderr so it never mixes with rendered buffers on
/// stdout, and respects RUST_LOG (default `warn`).
pub fn init() {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    // Console layer - respects RUST_LOG
    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .with_filter(console_filter);

    // File layer - always debug level for troubleshooting
    let file_layer = match crate::config_paths::ensure_logs_dir() {
        Ok(logs_dir) => {
            let file_appender = tracing_appender::rolling::daily(logs_dir, "quill.log");
            Some(
                fmt::layer()
                    .with_writer(file_appender)
                    .with_ansi(false)
                    .with_target(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new("debug")),
            )
        }
        Err(e) => {
            eprintln!("Warning: Could not initialize file logging: {}", e);
            None
        }
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();
}

/// Lightweight snapshot of session state for diffing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub active: usize,
    pub zoom: u32,
    pub theme: String,
    pub tabs: Vec<TabInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabInfo {
    pub title: String,
    pub language: String,
    pub lines: usize,
    pub active_match: Option<(usize, usize)>,
}

impl SessionSnapshot {
    pub fn from_session(session: &EditorSession) -> Self {
        Self {
            active: session.active_index(),
            zoom: session.view.zoom_percent(),
            theme: session.theme.id.clone(),
            tabs: session
                .tabs()
                .iter()
                .map(|tab| TabInfo {
                    title: tab.title(),
                    language: tab.language().to_string(),
                    lines: tab.gutter.line_count,
                    active_match: tab.match_highlight().map(|r| (r.start, r.end)),
                })
                .collect(),
        }
    }

    /// Generate a diff description between two snapshots
    pub fn diff(&self, other: &SessionSnapshot) -> Option<String> {
        let mut changes = Vec::new();

        if self.tabs.len() != other.tabs.len() {
            changes.push(format!("tabs: {} → {}", self.tabs.len(), other.tabs.len()));
        }
        if self.active != other.active {
            changes.push(format!("active: {} → {}", self.active, other.active));
        }
        if self.zoom != other.zoom {
            changes.push(format!("zoom: {}% → {}%", self.zoom, other.zoom));
        }
        if self.theme != other.theme {
            changes.push(format!("theme: {} → {}", self.theme, other.theme));
        }

        for (i, (before, after)) in self.tabs.iter().zip(&other.tabs).enumerate() {
            if before.title != after.title {
                changes.push(format!("#{}: title {} → {}", i, before.title, after.title));
            }
            if before.language != after.language {
                changes.push(format!(
                    "#{}: language {} → {}",
                    i, before.language, after.language
                ));
            }
            if before.lines != after.lines {
                changes.push(format!("#{}: lines {} → {}", i, before.lines, after.lines));
            }
            if before.active_match != after.active_match {
                let status = match after.active_match {
                    Some((start, end)) => format!("match {}..{}", start, end),
                    None => "match cleared".to_string(),
                };
                changes.push(format!("#{}: {}", i, status));
            }
        }

        if changes.is_empty() {
            None
        } else {
            Some(changes.join("; "))
        }
    }
}
