//! Quill - Elm-style tabbed code editor core
//!
//! This crate provides the state, highlighting, search and side-effect
//! plumbing for a tabbed editor implementing the Elm Architecture pattern.
//! Rendering and dialogs are left to a front end through [`runtime::Host`].

pub mod autosave;
pub mod cli;
pub mod commands;
pub mod config;
pub mod config_paths;
pub mod find_replace;
pub mod messages;
pub mod model;
pub mod runtime;
pub mod script;
pub mod syntax;
pub mod theme;
pub mod tracing;
pub mod update;
pub mod view;

// Re-export commonly used types
pub use commands::Cmd;
pub use config::EditorConfig;
pub use messages::Msg;
pub use model::EditorSession;
pub use theme::Theme;
