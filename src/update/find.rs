//! Find/replace message handlers

use crate::commands::Cmd;
use crate::find_replace::{FindOutcome, ReplaceOutcome};
use crate::messages::FindMsg;
use crate::model::{EditorSession, FindReplaceState, ModalState, Notice};

/// Handle find/replace messages against the focused tab
pub fn update_find(session: &mut EditorSession, msg: FindMsg) -> Option<Cmd> {
    match msg {
        FindMsg::Open => {
            session
                .ui
                .open_modal(ModalState::FindReplace(FindReplaceState::default()));
            Some(Cmd::Redraw)
        }

        FindMsg::Close => {
            session.ui.close_modal();
            Some(Cmd::Redraw)
        }

        FindMsg::Find(query) => {
            if let Some(dialog) = session.ui.find_replace_mut() {
                dialog.query = query.clone();
            }
            let outcome = session.active_tab_mut().find(&query);
            report_find(session, &query, outcome);
            Some(Cmd::Redraw)
        }

        FindMsg::Replace(replacement) => {
            if let Some(dialog) = session.ui.find_replace_mut() {
                dialog.replacement = replacement.clone();
            }
            let tab = session.active_tab_mut();
            let query = tab.finder().active_match().map(|m| m.query.clone());
            match tab.replace(&replacement) {
                ReplaceOutcome::Replaced { next } => {
                    session.ui.set_status("Replaced");
                    if let Some(query) = query {
                        report_find(session, &query, next);
                    }
                    Some(Cmd::Redraw)
                }
                ReplaceOutcome::Stale => {
                    tracing::debug!("replace skipped: match no longer present");
                    None
                }
                ReplaceOutcome::NoMatch => None,
            }
        }

        FindMsg::ReplaceAll { query, replacement } => {
            if let Some(dialog) = session.ui.find_replace_mut() {
                dialog.query = query.clone();
                dialog.replacement = replacement.clone();
            }
            match session.active_tab_mut().replace_all(&query, &replacement) {
                Some(count) => {
                    session
                        .ui
                        .set_status(format!("Replaced {} occurrences", count));
                    session.ui.notify(Notice::info(
                        "Replace All",
                        format!("Replaced {} occurrences", count),
                    ));
                }
                None => session.ui.set_status("Enter text to find"),
            }
            Some(Cmd::Redraw)
        }

        FindMsg::Count(query) => {
            let count = session.active_tab().count_occurrences(&query);
            if let Some(dialog) = session.ui.find_replace_mut() {
                dialog.query = query;
                dialog.occurrences = Some(count);
            }
            session.ui.set_status(format!("Occurrences: {}", count));
            Some(Cmd::Redraw)
        }
    }
}

fn report_find(session: &mut EditorSession, query: &str, outcome: FindOutcome) {
    match outcome {
        FindOutcome::Found { range, wrapped } => {
            let pos = session.active_tab().document.offset_to_position(range.start);
            let status = if wrapped {
                format!("Search wrapped: found at {}", pos)
            } else {
                format!("Found at {}", pos)
            };
            session.ui.set_status(status);
        }
        FindOutcome::NotFound => {
            session
                .ui
                .notify(Notice::info("Find", format!("'{}' not found", query)));
        }
        FindOutcome::Skipped => session.ui.set_status("Enter text to find"),
    }
}
