//! UI state - status line, dialogs, and user-visible notices

use std::fmt;

// ============================================================================
// Modal System
// ============================================================================

/// Identifies which modal is currently active
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalId {
    /// Go to line dialog (Ctrl+G)
    GotoLine,
    /// Find/Replace dialog (Ctrl+F)
    FindReplace,
}

/// State for the goto line modal
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GotoLineState {
    /// Current input text (line number)
    pub input: String,
}

/// State for the find/replace modal
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FindReplaceState {
    /// Search query
    pub query: String,
    /// Replacement text
    pub replacement: String,
    /// Result of the last "Count" press
    pub occurrences: Option<usize>,
}

/// Union of all modal states
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalState {
    GotoLine(GotoLineState),
    FindReplace(FindReplaceState),
}

impl ModalState {
    /// Get the modal ID for this state
    pub fn id(&self) -> ModalId {
        match self {
            ModalState::GotoLine(_) => ModalId::GotoLine,
            ModalState::FindReplace(_) => ModalId::FindReplace,
        }
    }
}

// ============================================================================
// Notices
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

impl fmt::Display for NoticeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            NoticeLevel::Info => "info",
            NoticeLevel::Warning => "warning",
            NoticeLevel::Error => "error",
        })
    }
}

/// A message box the host must show to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub body: String,
}

impl Notice {
    pub fn info(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Info, title, body)
    }

    pub fn warning(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Warning, title, body)
    }

    pub fn error(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Error, title, body)
    }

    fn new(level: NoticeLevel, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            level,
            title: title.into(),
            body: body.into(),
        }
    }
}

// ============================================================================
// UiState
// ============================================================================

/// UI state - status message, open dialog and pending notices
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// Status bar text
    pub status_message: String,
    /// Active modal (None if no modal is open)
    pub active_modal: Option<ModalState>,
    /// Notices not yet shown by the host
    notices: Vec<Notice>,
}

impl UiState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create UI state with an initial status message
    pub fn with_status(message: impl Into<String>) -> Self {
        Self {
            status_message: message.into(),
            ..Self::default()
        }
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = message.into();
    }

    /// Check if any modal is active
    pub fn has_modal(&self) -> bool {
        self.active_modal.is_some()
    }

    pub fn open_modal(&mut self, state: ModalState) {
        self.active_modal = Some(state);
    }

    pub fn close_modal(&mut self) {
        self.active_modal = None;
    }

    /// The find/replace dialog, if it is the open modal
    pub fn find_replace_mut(&mut self) -> Option<&mut FindReplaceState> {
        match &mut self.active_modal {
            Some(ModalState::FindReplace(state)) => Some(state),
            _ => None,
        }
    }

    pub fn notify(&mut self, notice: Notice) {
        tracing::debug!(level = %notice.level, title = %notice.title, "notice");
        self.notices.push(notice);
    }

    pub fn pending_notices(&self) -> &[Notice] {
        &self.notices
    }

    /// Hand pending notices to the host, oldest first
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }
}
