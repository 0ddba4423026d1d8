use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::autosave::AutoSaveTimer;
use crate::commands::Cmd;
use crate::messages::{AppMsg, Msg, SaveChoice, SaveOutcome};
use crate::model::EditorSession;
use crate::update::update;

use super::host::Host;

/// Single-threaded scheduler for the editor
///
/// Messages are processed strictly in order. Side effects requested by
/// `update` run synchronously and queue their results, so a save issued by
/// the auto-save timer can never interleave with an edit.
pub struct Runtime<H: Host> {
    session: EditorSession,
    host: H,
    queue: VecDeque<Msg>,
    auto_save: AutoSaveTimer,
    /// Overrides the default config location
    config_path: Option<PathBuf>,
    quit_requested: bool,
    needs_redraw: bool,
}

impl<H: Host> Runtime<H> {
    pub fn new(session: EditorSession, host: H, now: Instant) -> Self {
        let auto_save = AutoSaveTimer::new(session.config.auto_save_period(), now);
        Self {
            session,
            host,
            queue: VecDeque::new(),
            auto_save,
            config_path: None,
            quit_requested: false,
            needs_redraw: true,
        }
    }

    /// Persist config to `path` instead of the user config directory
    pub fn with_config_path(mut self, path: PathBuf) -> Self {
        self.config_path = Some(path);
        self
    }

    pub fn session(&self) -> &EditorSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut EditorSession {
        &mut self.session
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn auto_save(&self) -> &AutoSaveTimer {
        &self.auto_save
    }

    pub fn should_quit(&self) -> bool {
        self.quit_requested
    }

    /// Returns true once after any command asked for a redraw
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.needs_redraw)
    }

    /// Queue a message and process everything it triggers
    pub fn dispatch(&mut self, msg: impl Into<Msg>) {
        self.queue.push_back(msg.into());
        self.run_until_idle();
    }

    /// Drain the queue, including messages produced by commands
    pub fn run_until_idle(&mut self) {
        while let Some(msg) = self.queue.pop_front() {
            if let Some(cmd) = update(&mut self.session, msg) {
                self.process_cmd(cmd);
            }
            for notice in self.session.ui.take_notices() {
                self.host.show_notice(&notice);
            }
        }
    }

    /// Advance timers. Returns true if the auto-save scan ran.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.quit_requested || !self.auto_save.poll(now) {
            return false;
        }
        self.dispatch(AppMsg::AutoSaveTick);
        true
    }

    /// Stop background work
    pub fn shutdown(&mut self) {
        self.auto_save.cancel();
    }

    fn process_cmd(&mut self, cmd: Cmd) {
        match cmd {
            Cmd::None => {}
            Cmd::Redraw => self.needs_redraw = true,
            Cmd::SaveFile {
                tab_id,
                path,
                content,
                revision,
            } => {
                let result = write_file(&path, &content);
                self.queue.push_back(Msg::App(AppMsg::SaveCompleted {
                    tab_id,
                    path,
                    revision,
                    result,
                }));
            }
            Cmd::AutoSave(jobs) => {
                let outcomes = jobs
                    .into_iter()
                    .map(|job| SaveOutcome {
                        result: write_file(&job.path, &job.content),
                        tab_id: job.tab_id,
                        path: job.path,
                        revision: job.revision,
                    })
                    .collect();
                self.queue
                    .push_back(Msg::App(AppMsg::AutoSaveCompleted(outcomes)));
            }
            Cmd::WriteExport { path, content } => {
                let result = std::fs::write(&path, content).map_err(|e| e.to_string());
                self.queue
                    .push_back(Msg::App(AppMsg::PrintCompleted { path, result }));
            }
            Cmd::LoadFile { path } => {
                let result = std::fs::read_to_string(&path).map_err(|e| e.to_string());
                self.queue
                    .push_back(Msg::App(AppMsg::FileLoaded { path, result }));
            }
            Cmd::SaveConfig(config) => {
                let result = match &self.config_path {
                    Some(path) => config.save_to(path),
                    None => config.save(),
                };
                if let Err(e) = result {
                    tracing::warn!("Failed to save config: {}", e);
                }
            }
            Cmd::Batch(cmds) => {
                for cmd in cmds {
                    self.process_cmd(cmd);
                }
            }

            Cmd::ShowOpenFileDialog => {
                let path = self.host.pick_open_path();
                self.queue
                    .push_back(Msg::App(AppMsg::OpenFileDialogResult { path }));
            }
            Cmd::ShowSaveFileDialog {
                tab_id,
                purpose,
                suggested_path,
            } => {
                let path = self.host.pick_save_path(purpose, suggested_path.as_deref());
                self.queue.push_back(Msg::App(AppMsg::SaveDialogResult {
                    tab_id,
                    purpose,
                    path,
                }));
            }
            Cmd::ConfirmUnsavedTabs { tabs } => {
                let mut answers = Vec::with_capacity(tabs.len());
                for (tab_id, name) in tabs {
                    let choice = self.host.confirm_save(&name);
                    answers.push((tab_id, choice));
                    if choice == SaveChoice::Cancel {
                        break;
                    }
                }
                self.queue
                    .push_back(Msg::App(AppMsg::ExitConfirmed(answers)));
            }

            Cmd::Quit => {
                tracing::info!("Quit requested");
                self.quit_requested = true;
                self.auto_save.cancel();
            }
        }
    }
}

fn write_file(path: &Path, content: &str) -> Result<(), String> {
    match std::fs::write(path, content) {
        Ok(()) => {
            tracing::info!("Wrote {}", path.display());
            Ok(())
        }
        Err(e) => Err(e.to_string()),
    }
}
