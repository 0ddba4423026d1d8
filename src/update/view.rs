//! View message handlers (zoom, language, theme, scrolling, go to line)

use crate::commands::Cmd;
use crate::messages::ViewMsg;
use crate::model::{EditorSession, GotoLineState, ModalState, Notice};
use crate::theme::load_theme;

/// Handle view messages
pub fn update_view(session: &mut EditorSession, msg: ViewMsg) -> Option<Cmd> {
    match msg {
        ViewMsg::ZoomIn => {
            let changed = session.view.zoom_in();
            apply_zoom(session, changed)
        }
        ViewMsg::ZoomOut => {
            let changed = session.view.zoom_out();
            apply_zoom(session, changed)
        }
        ViewMsg::ZoomReset => {
            let changed = session.view.reset_zoom();
            apply_zoom(session, changed)
        }
        ViewMsg::ZoomWheel(delta) => {
            let changed = match delta {
                d if d > 0 => session.view.zoom_in(),
                d if d < 0 => session.view.zoom_out(),
                _ => false,
            };
            apply_zoom(session, changed)
        }

        ViewMsg::SetLanguage(language) => {
            session.active_tab_mut().set_language(language);
            session
                .ui
                .set_status(format!("Language changed to {}", language));
            Some(Cmd::Redraw)
        }

        ViewMsg::SetTheme(id) => match load_theme(&id) {
            Ok(theme) => {
                session.set_theme(theme);
                session.ui.set_status(format!("Theme changed to {}", id));
                Some(Cmd::batch(vec![
                    Cmd::SaveConfig(session.config.clone()),
                    Cmd::Redraw,
                ]))
            }
            Err(e) => {
                tracing::warn!("Failed to load theme '{}': {}", id, e);
                session
                    .ui
                    .notify(Notice::warning("Theme", format!("Unknown theme '{}'", id)));
                Some(Cmd::Redraw)
            }
        },

        ViewMsg::Scroll { source, lines } => session
            .active_tab_mut()
            .scroll(source, lines)
            .then_some(Cmd::Redraw),

        ViewMsg::ScrollTo(fraction) => {
            let tab = session.active_tab_mut();
            let line_count = tab.gutter.line_count;
            tab.viewport
                .scroll_to_fraction(fraction, line_count)
                .then_some(Cmd::Redraw)
        }

        ViewMsg::Resize { visible_lines } => {
            let tab = session.active_tab_mut();
            let line_count = tab.gutter.line_count;
            tab.viewport.resize(visible_lines, line_count);
            Some(Cmd::Redraw)
        }

        ViewMsg::OpenGotoLine => {
            session
                .ui
                .open_modal(ModalState::GotoLine(GotoLineState::default()));
            Some(Cmd::Redraw)
        }

        ViewMsg::GotoLine(input) => {
            if matches!(session.ui.active_modal, Some(ModalState::GotoLine(_))) {
                session.ui.close_modal();
            }
            let Ok(line) = input.trim().parse::<usize>() else {
                session.ui.notify(Notice::warning(
                    "Go To Line",
                    "Please enter a valid line number",
                ));
                return Some(Cmd::Redraw);
            };
            match session.active_tab_mut().goto_line(line) {
                Ok(()) => session.ui.set_status(format!("Line {}", line)),
                Err(e) => session.ui.notify(Notice::warning("Go To Line", e.to_string())),
            }
            Some(Cmd::Redraw)
        }
    }
}

/// Propagate a session zoom change to the focused tab only
fn apply_zoom(session: &mut EditorSession, changed: bool) -> Option<Cmd> {
    if !changed {
        return None;
    }
    session.apply_view_to_active();
    session
        .ui
        .set_status(format!("Zoom: {}%", session.view.zoom_percent()));
    Some(Cmd::Redraw)
}
