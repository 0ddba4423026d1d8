//! Message types for the Elm-style architecture
//!
//! All state changes flow through these message types.

use std::path::PathBuf;

use crate::model::{ScrollSource, TabId};
use crate::syntax::LanguageId;

/// Document messages (text editing on the active tab)
#[derive(Debug, Clone)]
pub enum DocumentMsg {
    /// Insert text at a character offset
    InsertText { offset: usize, text: String },
    /// Append text at the end of the buffer
    AppendText(String),
    /// Delete a character range
    DeleteRange { start: usize, end: usize },
    /// Replace the whole buffer content
    SetText(String),
}

/// Find/replace dialog messages
#[derive(Debug, Clone)]
pub enum FindMsg {
    /// Open the find/replace dialog
    Open,
    /// Close the dialog
    Close,
    /// "Find" button: next occurrence after the anchor
    Find(String),
    /// "Replace" button: replace the active match, then find the next
    Replace(String),
    /// "Replace All" button
    ReplaceAll { query: String, replacement: String },
    /// "Count" button
    Count(String),
}

/// View messages (zoom, language, theme, scrolling, navigation)
#[derive(Debug, Clone)]
pub enum ViewMsg {
    ZoomIn,
    ZoomOut,
    ZoomReset,
    /// Ctrl+mouse wheel; positive zooms in
    ZoomWheel(i32),
    /// Change the active tab's highlighting language
    SetLanguage(LanguageId),
    /// Change the session theme by id
    SetTheme(String),
    /// Scroll the active tab from either the text area or the gutter
    Scroll { source: ScrollSource, lines: isize },
    /// Scrollbar drag to a fraction of the document
    ScrollTo(f64),
    /// Viewport height changed
    Resize { visible_lines: usize },
    /// Open the go-to-line prompt
    OpenGotoLine,
    /// Go-to-line prompt submitted with raw input
    GotoLine(String),
}

/// Layout messages (tabs)
#[derive(Debug, Clone)]
pub enum LayoutMsg {
    /// Create a new untitled tab and focus it
    NewTab,
    /// Close the focused tab
    CloseActiveTab,
    /// Focus a tab by index
    SwitchToTab(usize),
    NextTab,
    PrevTab,
}

/// What a save dialog was opened for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SavePurpose {
    /// Save As; the tab takes the chosen path
    Save,
    /// Print to file; plain export, the tab keeps its path
    Print,
}

impl SavePurpose {
    /// Extension appended when the chosen path has none
    pub fn default_extension(&self) -> &'static str {
        match self {
            SavePurpose::Save => "py",
            SavePurpose::Print => "txt",
        }
    }
}

/// Per-tab answer to the unsaved-changes prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveChoice {
    Yes,
    No,
    Cancel,
}

/// Result of writing one tab during auto-save
#[derive(Debug, Clone)]
pub struct SaveOutcome {
    pub tab_id: TabId,
    pub path: PathBuf,
    pub revision: u64,
    pub result: Result<(), String>,
}

/// App messages (file I/O, dialogs, lifecycle)
#[derive(Debug, Clone)]
pub enum AppMsg {
    /// Save the focused tab (prompting for a path if it has none)
    SaveFile,
    /// Save the focused tab under a new path
    SaveFileAs,
    /// Export the focused tab as plain text
    PrintToFile,
    /// Save dialog returned a path (or None if cancelled)
    SaveDialogResult {
        tab_id: TabId,
        purpose: SavePurpose,
        path: Option<PathBuf>,
    },
    /// File save completed
    SaveCompleted {
        tab_id: TabId,
        path: PathBuf,
        revision: u64,
        result: Result<(), String>,
    },
    /// Export completed
    PrintCompleted {
        path: PathBuf,
        result: Result<(), String>,
    },

    /// User requested "Open File..." dialog
    OpenFileDialog,
    /// Open a specific path without a dialog
    OpenPath(PathBuf),
    /// Open File dialog returned a path (None if cancelled)
    OpenFileDialogResult { path: Option<PathBuf> },
    /// File load completed
    FileLoaded {
        path: PathBuf,
        result: Result<String, String>,
    },

    /// Periodic auto-save timer fired
    AutoSaveTick,
    /// Every write started by one auto-save tick has finished
    AutoSaveCompleted(Vec<SaveOutcome>),

    /// Exit requested
    Quit,
    /// Answers to the unsaved-changes prompts, in tab order
    ExitConfirmed(Vec<(TabId, SaveChoice)>),
}

/// Top-level message type
#[derive(Debug, Clone)]
pub enum Msg {
    /// Document messages (text editing)
    Document(DocumentMsg),
    /// Find/replace messages
    Find(FindMsg),
    /// View messages (zoom, language, theme, scroll)
    View(ViewMsg),
    /// Layout messages (tabs)
    Layout(LayoutMsg),
    /// App messages (file I/O, lifecycle)
    App(AppMsg),
}

impl Msg {
    /// Short name for logging
    pub fn name(&self) -> &'static str {
        match self {
            Msg::Document(_) => "Document",
            Msg::Find(_) => "Find",
            Msg::View(_) => "View",
            Msg::Layout(_) => "Layout",
            Msg::App(_) => "App",
        }
    }
}

impl From<DocumentMsg> for Msg {
    fn from(msg: DocumentMsg) -> Self {
        Msg::Document(msg)
    }
}

impl From<FindMsg> for Msg {
    fn from(msg: FindMsg) -> Self {
        Msg::Find(msg)
    }
}

impl From<ViewMsg> for Msg {
    fn from(msg: ViewMsg) -> Self {
        Msg::View(msg)
    }
}

impl From<LayoutMsg> for Msg {
    fn from(msg: LayoutMsg) -> Self {
        Msg::Layout(msg)
    }
}

impl From<AppMsg> for Msg {
    fn from(msg: AppMsg) -> Self {
        Msg::App(msg)
    }
}
