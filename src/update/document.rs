//! Document message handlers (edits on the focused tab)

use crate::commands::Cmd;
use crate::messages::DocumentMsg;
use crate::model::EditorSession;

/// Handle document messages (text editing)
pub fn update_document(session: &mut EditorSession, msg: DocumentMsg) -> Option<Cmd> {
    let tab = session.active_tab_mut();
    let changed = match msg {
        DocumentMsg::InsertText { offset, text } => tab.insert(offset, &text),
        DocumentMsg::AppendText(text) => {
            let end = tab.document.len_chars();
            tab.insert(end, &text)
        }
        DocumentMsg::DeleteRange { start, end } => tab.delete(start..end),
        DocumentMsg::SetText(text) => tab.set_text(&text),
    };

    if !changed {
        return None;
    }
    session.ui.set_status("File modified");
    Some(Cmd::Redraw)
}
