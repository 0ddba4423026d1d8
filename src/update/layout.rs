//! Layout message handlers (tabs)

use crate::commands::Cmd;
use crate::messages::LayoutMsg;
use crate::model::{EditorSession, Notice};

/// Handle layout messages (tabs)
pub fn update_layout(session: &mut EditorSession, msg: LayoutMsg) -> Option<Cmd> {
    match msg {
        LayoutMsg::NewTab => {
            session.new_tab();
            session.ui.set_status("New file created");
            Some(Cmd::Redraw)
        }

        LayoutMsg::CloseActiveTab => {
            if session.close_active_tab() {
                session.ui.set_status("Tab closed");
            } else {
                session
                    .ui
                    .notify(Notice::info("Info", "Cannot close the last tab"));
            }
            Some(Cmd::Redraw)
        }

        LayoutMsg::SwitchToTab(index) => session.focus(index).then_some(Cmd::Redraw),

        LayoutMsg::NextTab => session.focus_next().then_some(Cmd::Redraw),

        LayoutMsg::PrevTab => session.focus_prev().then_some(Cmd::Redraw),
    }
}
