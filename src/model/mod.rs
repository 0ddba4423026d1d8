//! Application model - the complete state of the editor
//!
//! This module contains all the state types following the Elm Architecture pattern.

pub mod document;
pub mod line_index;
pub mod tab;
pub mod ui;
pub mod view;

pub use document::{Document, Position};
pub use line_index::{gutter_width, line_count, render_gutter, Gutter};
pub use tab::{GotoLineError, TabController, TabId};
pub use ui::{
    FindReplaceState, GotoLineState, ModalId, ModalState, Notice, NoticeLevel, UiState,
};
pub use view::{ScrollSource, ViewState, Viewport, MAX_ZOOM, MIN_ZOOM, ZOOM_STEP};

use std::path::PathBuf;

use crate::config::EditorConfig;
use crate::theme::{load_theme, Theme};

/// The complete editor session
///
/// Always holds at least one tab; `active` always indexes a live tab.
#[derive(Debug)]
pub struct EditorSession {
    tabs: Vec<TabController>,
    active: usize,
    next_tab_id: u64,
    /// Session-wide zoom, font and theme selection
    pub view: ViewState,
    /// Theme for colors and styling
    pub theme: Theme,
    /// Persisted editor configuration
    pub config: EditorConfig,
    /// UI state (status bar, dialogs, notices)
    pub ui: UiState,
}

impl EditorSession {
    /// Create a session from config, resolving the configured theme
    pub fn new(config: EditorConfig) -> Self {
        let theme = load_theme(&config.theme).unwrap_or_else(|e| {
            tracing::warn!(
                "Failed to load theme '{}': {}, using default",
                config.theme,
                e
            );
            Theme::default()
        });
        Self::with_theme(config, theme)
    }

    /// Create a session with an already resolved theme
    pub fn with_theme(config: EditorConfig, theme: Theme) -> Self {
        let view = ViewState::new(config.font.clone(), theme.id.clone());
        let mut session = Self {
            tabs: Vec::new(),
            active: 0,
            next_tab_id: 1,
            view,
            theme,
            config,
            ui: UiState::with_status("Ready"),
        };
        session.new_tab();
        session
    }

    fn allocate_tab_id(&mut self) -> TabId {
        let id = TabId(self.next_tab_id);
        self.next_tab_id += 1;
        id
    }

    // =========================================================================
    // Tab access
    // =========================================================================

    pub fn tabs(&self) -> &[TabController] {
        &self.tabs
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn active_tab(&self) -> &TabController {
        &self.tabs[self.active]
    }

    pub fn active_tab_mut(&mut self) -> &mut TabController {
        &mut self.tabs[self.active]
    }

    pub fn tab(&self, id: TabId) -> Option<&TabController> {
        self.tabs.iter().find(|t| t.id == id)
    }

    pub fn tab_mut(&mut self, id: TabId) -> Option<&mut TabController> {
        self.tabs.iter_mut().find(|t| t.id == id)
    }

    // =========================================================================
    // Tab lifecycle
    // =========================================================================

    /// Add an empty `Untitled-N` tab and focus it
    pub fn new_tab(&mut self) -> TabId {
        let id = self.allocate_tab_id();
        let name = format!("Untitled-{}", self.tabs.len() + 1);
        let tab = TabController::untitled(id, name, &self.view);
        self.push_and_focus(tab)
    }

    /// Add a tab for file content and focus it
    pub fn open_tab(&mut self, path: PathBuf, content: &str) -> TabId {
        let id = self.allocate_tab_id();
        let tab = TabController::new(id, Document::from_content(path, content), &self.view);
        self.push_and_focus(tab)
    }

    fn push_and_focus(&mut self, tab: TabController) -> TabId {
        let id = tab.id;
        self.tabs.push(tab);
        self.focus(self.tabs.len() - 1);
        id
    }

    /// Close the focused tab. Refused (returns false) for the only tab.
    pub fn close_active_tab(&mut self) -> bool {
        if self.tabs.len() <= 1 {
            return false;
        }
        let closed = self.tabs.remove(self.active);
        tracing::debug!(tab = %closed.id, "closed tab");
        let next = self.active.min(self.tabs.len() - 1);
        self.focus(next);
        true
    }

    /// Focus a tab by index and bring it up to date with the session view
    pub fn focus(&mut self, index: usize) -> bool {
        if index >= self.tabs.len() {
            return false;
        }
        self.active = index;
        let view = &self.view;
        self.tabs[index].apply_view(view);
        true
    }

    pub fn focus_next(&mut self) -> bool {
        let len = self.tabs.len();
        len > 1 && self.focus((self.active + 1) % len)
    }

    pub fn focus_prev(&mut self) -> bool {
        let len = self.tabs.len();
        len > 1 && self.focus((self.active + len - 1) % len)
    }

    /// Re-apply the session zoom to the focused tab only
    pub fn apply_view_to_active(&mut self) {
        let view = &self.view;
        self.tabs[self.active].apply_view(view);
    }

    /// Switch the session theme and remember it in the config
    pub fn set_theme(&mut self, theme: Theme) {
        self.view.theme_id = theme.id.clone();
        self.config.theme = theme.id.clone();
        self.theme = theme;
    }

    /// Unsaved tabs in tab order, with their display names
    pub fn dirty_tabs(&self) -> Vec<(TabId, String)> {
        self.tabs
            .iter()
            .filter(|t| t.is_dirty())
            .map(|t| (t.id, t.document.display_name()))
            .collect()
    }

    /// Tabs the periodic save should write
    pub fn auto_save_targets(&self) -> Vec<TabId> {
        self.tabs
            .iter()
            .filter(|t| t.needs_auto_save())
            .map(|t| t.id)
            .collect()
    }
}
