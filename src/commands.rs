//! Command types for the Elm-style architecture
//!
//! Commands represent side effects that should be performed after an update.

use std::path::PathBuf;

use crate::config::EditorConfig;
use crate::messages::{AppMsg, FindMsg, LayoutMsg, Msg, SavePurpose, ViewMsg};
use crate::model::TabId;

// ============================================================================
// Command Registry
// ============================================================================

/// Identifies a menu command that takes no arguments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandId {
    // File operations
    NewFile,
    OpenFile,
    SaveFile,
    SaveFileAs,
    PrintToFile,
    CloseTab,
    Quit,

    // Navigation
    NextTab,
    PrevTab,
    GotoLine,

    // Find/Replace
    Find,

    // View operations
    ZoomIn,
    ZoomOut,
    ZoomReset,
}

/// A command definition for the menu / script surface
#[derive(Debug, Clone)]
pub struct CommandDef {
    pub id: CommandId,
    pub label: &'static str,
    /// Name used by the `:command` script syntax
    pub name: &'static str,
    pub keybinding: Option<&'static str>,
}

/// Static registry of all argument-free commands
pub static COMMANDS: &[CommandDef] = &[
    CommandDef {
        id: CommandId::NewFile,
        label: "New",
        name: "new",
        keybinding: Some("Ctrl+N"),
    },
    CommandDef {
        id: CommandId::OpenFile,
        label: "Open...",
        name: "open-dialog",
        keybinding: Some("Ctrl+O"),
    },
    CommandDef {
        id: CommandId::SaveFile,
        label: "Save",
        name: "save",
        keybinding: Some("Ctrl+S"),
    },
    CommandDef {
        id: CommandId::SaveFileAs,
        label: "Save As...",
        name: "save-as-dialog",
        keybinding: Some("Ctrl+Shift+S"),
    },
    CommandDef {
        id: CommandId::PrintToFile,
        label: "Print to File...",
        name: "print-dialog",
        keybinding: Some("Ctrl+P"),
    },
    CommandDef {
        id: CommandId::CloseTab,
        label: "Close Tab",
        name: "close",
        keybinding: Some("Ctrl+W"),
    },
    CommandDef {
        id: CommandId::Quit,
        label: "Exit",
        name: "quit",
        keybinding: Some("Ctrl+Q"),
    },
    CommandDef {
        id: CommandId::NextTab,
        label: "Next Tab",
        name: "next",
        keybinding: Some("Ctrl+Tab"),
    },
    CommandDef {
        id: CommandId::PrevTab,
        label: "Previous Tab",
        name: "prev",
        keybinding: Some("Ctrl+Shift+Tab"),
    },
    CommandDef {
        id: CommandId::GotoLine,
        label: "Go To Line...",
        name: "goto-dialog",
        keybinding: Some("Ctrl+G"),
    },
    CommandDef {
        id: CommandId::Find,
        label: "Find/Replace...",
        name: "find-dialog",
        keybinding: Some("Ctrl+F"),
    },
    CommandDef {
        id: CommandId::ZoomIn,
        label: "Zoom In",
        name: "zoom-in",
        keybinding: Some("Ctrl++"),
    },
    CommandDef {
        id: CommandId::ZoomOut,
        label: "Zoom Out",
        name: "zoom-out",
        keybinding: Some("Ctrl+-"),
    },
    CommandDef {
        id: CommandId::ZoomReset,
        label: "Reset Zoom",
        name: "zoom-reset",
        keybinding: Some("Ctrl+0"),
    },
];

impl CommandId {
    /// Message dispatched when the command is invoked
    pub fn to_msg(self) -> Msg {
        match self {
            CommandId::NewFile => LayoutMsg::NewTab.into(),
            CommandId::OpenFile => AppMsg::OpenFileDialog.into(),
            CommandId::SaveFile => AppMsg::SaveFile.into(),
            CommandId::SaveFileAs => AppMsg::SaveFileAs.into(),
            CommandId::PrintToFile => AppMsg::PrintToFile.into(),
            CommandId::CloseTab => LayoutMsg::CloseActiveTab.into(),
            CommandId::Quit => AppMsg::Quit.into(),
            CommandId::NextTab => LayoutMsg::NextTab.into(),
            CommandId::PrevTab => LayoutMsg::PrevTab.into(),
            CommandId::GotoLine => ViewMsg::OpenGotoLine.into(),
            CommandId::Find => FindMsg::Open.into(),
            CommandId::ZoomIn => ViewMsg::ZoomIn.into(),
            CommandId::ZoomOut => ViewMsg::ZoomOut.into(),
            CommandId::ZoomReset => ViewMsg::ZoomReset.into(),
        }
    }
}

/// Look up a command by its script name
pub fn command_by_name(name: &str) -> Option<&'static CommandDef> {
    COMMANDS.iter().find(|def| def.name == name)
}

// ============================================================================
// Side Effects
// ============================================================================

/// Commands returned by update functions
#[derive(Debug, Clone, Default)]
pub enum Cmd {
    /// No command - do nothing
    #[default]
    None,
    /// Request a full redraw of the UI
    Redraw,
    /// Write a tab's content; reports back with `AppMsg::SaveCompleted`
    SaveFile {
        tab_id: TabId,
        path: PathBuf,
        content: String,
        /// Document revision the content was taken from
        revision: u64,
    },
    /// Write every job, then report all outcomes at once with
    /// `AppMsg::AutoSaveCompleted`
    AutoSave(Vec<SaveJob>),
    /// Write exported text; reports back with `AppMsg::PrintCompleted`
    WriteExport { path: PathBuf, content: String },
    /// Read a file; reports back with `AppMsg::FileLoaded`
    LoadFile { path: PathBuf },
    /// Persist the editor config
    SaveConfig(EditorConfig),
    /// Execute multiple commands in order
    Batch(Vec<Cmd>),

    // File dialogs
    /// Show an open file dialog
    ShowOpenFileDialog,
    /// Show a save file dialog
    ShowSaveFileDialog {
        tab_id: TabId,
        purpose: SavePurpose,
        /// Suggested file path (for pre-filling name/directory)
        suggested_path: Option<PathBuf>,
    },
    /// Ask Yes/No/Cancel for each unsaved tab, then report `AppMsg::ExitConfirmed`
    ConfirmUnsavedTabs { tabs: Vec<(TabId, String)> },

    /// Request application exit
    Quit,
}

/// A tab's content captured for a background write
#[derive(Debug, Clone)]
pub struct SaveJob {
    pub tab_id: TabId,
    pub path: PathBuf,
    pub content: String,
    pub revision: u64,
}

impl Cmd {
    /// Create a batch of commands
    pub fn batch(cmds: Vec<Cmd>) -> Self {
        Cmd::Batch(cmds)
    }

    /// Check if this command requires a redraw
    pub fn needs_redraw(&self) -> bool {
        match self {
            Cmd::None => false,
            Cmd::Redraw => true,
            Cmd::SaveFile { .. } => true,
            Cmd::AutoSave(_) => true,
            Cmd::LoadFile { .. } => true,
            Cmd::Batch(cmds) => cmds.iter().any(|c| c.needs_redraw()),
            // Dialogs and background writes report back through messages
            Cmd::WriteExport { .. } => false,
            Cmd::SaveConfig(_) => false,
            Cmd::ShowOpenFileDialog => false,
            Cmd::ShowSaveFileDialog { .. } => false,
            Cmd::ConfirmUnsavedTabs { .. } => false,
            // Quit doesn't need redraw - app is exiting
            Cmd::Quit => false,
        }
    }

    /// True if the batch contains a quit request
    pub fn is_quit(&self) -> bool {
        match self {
            Cmd::Quit => true,
            Cmd::Batch(cmds) => cmds.iter().any(Cmd::is_quit),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_names_are_unique() {
        for (i, a) in COMMANDS.iter().enumerate() {
            for b in &COMMANDS[i + 1..] {
                assert_ne!(a.name, b.name);
                assert_ne!(a.id, b.id);
            }
        }
    }

    #[test]
    fn test_command_by_name() {
        let def = command_by_name("zoom-in").unwrap();
        assert_eq!(def.id, CommandId::ZoomIn);
        assert!(matches!(def.id.to_msg(), Msg::View(ViewMsg::ZoomIn)));
        assert!(command_by_name("frobnicate").is_none());
    }

    #[test]
    fn test_batch_redraw_and_quit() {
        let cmd = Cmd::batch(vec![Cmd::None, Cmd::Redraw]);
        assert!(cmd.needs_redraw());
        assert!(!cmd.is_quit());
        assert!(Cmd::batch(vec![Cmd::SaveConfig(EditorConfig::default()), Cmd::Quit]).is_quit());
    }
}
