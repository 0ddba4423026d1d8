//! Runtime module - executes commands and feeds results back as messages
//!
//! - `app` - the single-threaded message loop and command executor
//! - `host` - dialogs and prompts supplied by the embedding front end

pub mod app;
pub mod host;

pub use app::Runtime;
pub use host::{Host, TerminalHost};
