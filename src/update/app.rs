//! App message handlers (file operations, dialogs, lifecycle)

use std::path::{Path, PathBuf};

use crate::commands::{Cmd, SaveJob};
use crate::messages::{AppMsg, SaveChoice, SavePurpose};
use crate::model::{EditorSession, Notice, TabId};

/// Handle app messages (file operations, dialogs, lifecycle)
pub fn update_app(session: &mut EditorSession, msg: AppMsg) -> Option<Cmd> {
    match msg {
        AppMsg::SaveFile => {
            let tab_id = session.active_tab().id;
            Some(save_tab(session, tab_id))
        }

        AppMsg::SaveFileAs => {
            let tab = session.active_tab();
            Some(Cmd::ShowSaveFileDialog {
                tab_id: tab.id,
                purpose: SavePurpose::Save,
                suggested_path: tab.path().map(Path::to_path_buf),
            })
        }

        AppMsg::PrintToFile => Some(Cmd::ShowSaveFileDialog {
            tab_id: session.active_tab().id,
            purpose: SavePurpose::Print,
            suggested_path: None,
        }),

        AppMsg::SaveDialogResult {
            tab_id,
            purpose,
            path,
        } => {
            let path = path?;
            let path = with_default_extension(path, purpose.default_extension());
            let tab = session.tab(tab_id)?;
            let content = tab.document.text();
            match purpose {
                SavePurpose::Save => Some(Cmd::SaveFile {
                    tab_id,
                    path,
                    content,
                    revision: tab.document.revision,
                }),
                SavePurpose::Print => Some(Cmd::WriteExport { path, content }),
            }
        }

        AppMsg::SaveCompleted {
            tab_id,
            path,
            revision,
            result,
        } => {
            match result {
                Ok(()) => {
                    if !apply_saved(session, tab_id, &path, revision) {
                        return None;
                    }
                    session.ui.set_status(format!("Saved: {}", path.display()));
                }
                Err(e) => {
                    tracing::warn!("Save of {} failed: {}", path.display(), e);
                    session
                        .ui
                        .notify(Notice::error("Save Error", format!("Could not save file: {}", e)));
                }
            }
            Some(Cmd::Redraw)
        }

        AppMsg::AutoSaveCompleted(outcomes) => {
            let mut saved = Vec::new();
            let mut failed = Vec::new();
            for outcome in outcomes {
                match outcome.result {
                    Ok(()) => {
                        if apply_saved(session, outcome.tab_id, &outcome.path, outcome.revision) {
                            saved.push(outcome.path);
                        }
                    }
                    Err(e) => {
                        tracing::warn!("Auto-save of {} failed: {}", outcome.path.display(), e);
                        failed.push((outcome.path, e));
                    }
                }
            }
            let status = auto_save_status(&saved, &failed)?;
            session.ui.set_status(status);
            Some(Cmd::Redraw)
        }

        AppMsg::PrintCompleted { path, result } => {
            match result {
                Ok(()) => {
                    session
                        .ui
                        .set_status(format!("Content printed to: {}", path.display()));
                }
                Err(e) => {
                    tracing::warn!("Print to {} failed: {}", path.display(), e);
                    session
                        .ui
                        .notify(Notice::error("Print Error", format!("Could not print: {}", e)));
                }
            }
            Some(Cmd::Redraw)
        }

        AppMsg::OpenFileDialog => Some(Cmd::ShowOpenFileDialog),

        AppMsg::OpenFileDialogResult { path } => path.map(|path| Cmd::LoadFile { path }),

        AppMsg::OpenPath(path) => Some(Cmd::LoadFile { path }),

        AppMsg::FileLoaded { path, result } => match result {
            Ok(content) => {
                session.open_tab(path.clone(), &content);
                session.ui.set_status(format!("Opened: {}", path.display()));
                let mut cmds = vec![Cmd::Redraw];
                if session.config.add_recent_file(&path) {
                    cmds.push(Cmd::SaveConfig(session.config.clone()));
                }
                Some(Cmd::batch(cmds))
            }
            Err(e) => {
                tracing::warn!("Open of {} failed: {}", path.display(), e);
                session
                    .ui
                    .notify(Notice::error("Open Error", format!("Could not open file: {}", e)));
                Some(Cmd::Redraw)
            }
        },

        AppMsg::AutoSaveTick => {
            let jobs: Vec<SaveJob> = session
                .auto_save_targets()
                .into_iter()
                .filter_map(|tab_id| {
                    let tab = session.tab(tab_id)?;
                    Some(SaveJob {
                        tab_id,
                        path: tab.path()?.to_path_buf(),
                        content: tab.document.text(),
                        revision: tab.document.revision,
                    })
                })
                .collect();
            tracing::debug!(count = jobs.len(), "auto-save scan");
            (!jobs.is_empty()).then(|| Cmd::AutoSave(jobs))
        }

        AppMsg::Quit => {
            let dirty = session.dirty_tabs();
            if dirty.is_empty() {
                Some(exit_cmds(session, Vec::new()))
            } else {
                Some(Cmd::ConfirmUnsavedTabs { tabs: dirty })
            }
        }

        AppMsg::ExitConfirmed(answers) => {
            if answers.iter().any(|(_, choice)| *choice == SaveChoice::Cancel) {
                session.ui.set_status("Exit cancelled");
                return Some(Cmd::Redraw);
            }
            let saves: Vec<Cmd> = answers
                .into_iter()
                .filter(|(_, choice)| *choice == SaveChoice::Yes)
                .filter(|(id, _)| session.tab(*id).is_some())
                .map(|(id, _)| save_tab(session, id))
                .collect();
            Some(exit_cmds(session, saves))
        }
    }
}

/// Save to the tab's path, or ask for one first
fn save_tab(session: &EditorSession, tab_id: TabId) -> Cmd {
    let Some(tab) = session.tab(tab_id) else {
        return Cmd::None;
    };
    match tab.path() {
        Some(path) => Cmd::SaveFile {
            tab_id,
            path: path.to_path_buf(),
            content: tab.document.text(),
            revision: tab.document.revision,
        },
        None => Cmd::ShowSaveFileDialog {
            tab_id,
            purpose: SavePurpose::Save,
            suggested_path: None,
        },
    }
}

/// Record a finished write on its tab. False if the tab was closed meanwhile.
fn apply_saved(session: &mut EditorSession, tab_id: TabId, path: &Path, revision: u64) -> bool {
    let Some(tab) = session.tab_mut(tab_id) else {
        tracing::debug!(tab = %tab_id, "save completed for a closed tab");
        return false;
    };
    if tab.mark_saved(path.to_path_buf(), revision) {
        tracing::debug!(tab = %tab_id, title = %tab.title(), "retitled");
    }
    true
}

/// One status line for a whole auto-save pass; failures take precedence
fn auto_save_status(saved: &[PathBuf], failed: &[(PathBuf, String)]) -> Option<String> {
    if !failed.is_empty() {
        let details: Vec<String> = failed
            .iter()
            .map(|(path, e)| format!("{} ({})", path.display(), e))
            .collect();
        let mut status = format!("Auto-save failed: {}", details.join(", "));
        if !saved.is_empty() {
            status.push_str(&format!("; saved {} other file(s)", saved.len()));
        }
        return Some(status);
    }
    match saved {
        [] => None,
        [path] => Some(format!("Auto-saved: {}", path.display())),
        paths => Some(format!("Auto-saved: {} files", paths.len())),
    }
}

fn exit_cmds(session: &EditorSession, mut cmds: Vec<Cmd>) -> Cmd {
    cmds.push(Cmd::SaveConfig(session.config.clone()));
    cmds.push(Cmd::Quit);
    Cmd::batch(cmds)
}

/// Append `ext` when the chosen file name has no extension
fn with_default_extension(path: PathBuf, ext: &str) -> PathBuf {
    if path.extension().is_some() {
        path
    } else {
        path.with_extension(ext)
    }
}
