//! Update functions for the Elm-style architecture
//!
//! All state transformations flow through these functions.

mod app;
mod document;
mod find;
mod layout;
mod view;

use crate::commands::Cmd;
use crate::messages::Msg;
use crate::model::EditorSession;

#[cfg(debug_assertions)]
use crate::tracing::SessionSnapshot;
#[cfg(debug_assertions)]
use tracing::{debug, span, Level};

pub use app::update_app;
pub use document::update_document;
pub use find::update_find;
pub use layout::update_layout;
pub use view::update_view;

/// Main update function - dispatches to sub-handlers
///
/// In debug builds, this wraps with tracing instrumentation.
/// In release builds, it's a direct dispatch with zero overhead.
#[inline]
pub fn update(session: &mut EditorSession, msg: Msg) -> Option<Cmd> {
    #[cfg(debug_assertions)]
    {
        update_traced(session, msg)
    }
    #[cfg(not(debug_assertions))]
    {
        update_inner(session, msg)
    }
}

/// Inner update logic (no tracing)
fn update_inner(session: &mut EditorSession, msg: Msg) -> Option<Cmd> {
    match msg {
        Msg::Document(m) => document::update_document(session, m),
        Msg::Find(m) => find::update_find(session, m),
        Msg::View(m) => view::update_view(session, m),
        Msg::Layout(m) => layout::update_layout(session, m),
        Msg::App(m) => app::update_app(session, m),
    }
}

/// Traced update wrapper (debug builds only)
///
/// Captures before/after session state and logs diffs for debugging.
#[cfg(debug_assertions)]
fn update_traced(session: &mut EditorSession, msg: Msg) -> Option<Cmd> {
    let msg_name = msg_type_name(&msg);
    let _span = span!(Level::DEBUG, "update", msg = %msg_name).entered();

    let before = SessionSnapshot::from_session(session);
    debug!(target: "message", msg = %msg_name, "processing");

    let result = update_inner(session, msg);

    let after = SessionSnapshot::from_session(session);
    if let Some(diff) = before.diff(&after) {
        debug!(target: "session", %diff, "state changed");
    }

    debug_assert!(
        session.active_index() < session.tabs().len(),
        "active tab index out of range after {}",
        msg_name
    );

    result
}

/// Get a display name for a message type
///
/// Uses Debug formatting to include variant names and arguments, truncated
/// so that whole-buffer payloads don't flood the log.
#[cfg(debug_assertions)]
fn msg_type_name(msg: &Msg) -> String {
    let full = match msg {
        Msg::Document(m) => format!("Document::{:?}", m),
        Msg::Find(m) => format!("Find::{:?}", m),
        Msg::View(m) => format!("View::{:?}", m),
        Msg::Layout(m) => format!("Layout::{:?}", m),
        Msg::App(m) => format!("App::{:?}", m),
    };
    if full.chars().count() > 80 {
        let cut: String = full.chars().take(77).collect();
        format!("{}...", cut)
    } else {
        full
    }
}
