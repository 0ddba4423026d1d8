//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::time::Instant;

use quill::config::EditorConfig;
use quill::messages::{SaveChoice, SavePurpose};
use quill::model::{EditorSession, Notice};
use quill::runtime::{Host, Runtime};
use quill::theme::Theme;
use quill::update::update;
use quill::Msg;

/// Session with default config and the built-in dark theme.
///
/// Auto-save is disabled so runtime tests only save when asked to.
pub fn test_session() -> EditorSession {
    let config = EditorConfig {
        auto_save_interval: 0,
        ..EditorConfig::default()
    };
    EditorSession::with_theme(config, Theme::default())
}

/// Session whose only tab holds `text`, unmodified
pub fn session_with_text(text: &str) -> EditorSession {
    let mut session = test_session();
    let tab = session.active_tab_mut();
    tab.set_text(text);
    tab.document.is_modified = false;
    session
}

/// Run a sequence of messages through `update`, discarding commands
pub fn apply(session: &mut EditorSession, msgs: impl IntoIterator<Item = Msg>) {
    for msg in msgs {
        let _ = update(session, msg);
    }
}

/// Host with queued answers that records everything it is asked
#[derive(Default)]
pub struct ScriptedHost {
    pub open_paths: VecDeque<Option<PathBuf>>,
    pub save_paths: VecDeque<Option<PathBuf>>,
    pub choices: VecDeque<SaveChoice>,
    pub notices: Vec<Notice>,
    pub save_prompts: Vec<(SavePurpose, Option<PathBuf>)>,
    pub confirm_prompts: Vec<String>,
}

impl ScriptedHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_save_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.save_paths.push_back(Some(path.into()));
        self
    }

    pub fn with_open_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.open_paths.push_back(Some(path.into()));
        self
    }

    pub fn with_choices(mut self, choices: &[SaveChoice]) -> Self {
        self.choices.extend(choices.iter().copied());
        self
    }

    pub fn notice_titles(&self) -> Vec<&str> {
        self.notices.iter().map(|n| n.title.as_str()).collect()
    }
}

impl Host for ScriptedHost {
    fn pick_open_path(&mut self) -> Option<PathBuf> {
        self.open_paths.pop_front().flatten()
    }

    fn pick_save_path(&mut self, purpose: SavePurpose, suggested: Option<&Path>) -> Option<PathBuf> {
        self.save_prompts
            .push((purpose, suggested.map(Path::to_path_buf)));
        self.save_paths.pop_front().flatten()
    }

    fn confirm_save(&mut self, tab_name: &str) -> SaveChoice {
        self.confirm_prompts.push(tab_name.to_string());
        self.choices.pop_front().unwrap_or(SaveChoice::Cancel)
    }

    fn show_notice(&mut self, notice: &Notice) {
        self.notices.push(notice.clone());
    }
}

/// Runtime over `session` whose config file lives in `dir`
pub fn runtime_in(dir: &Path, session: EditorSession, host: ScriptedHost) -> Runtime<ScriptedHost> {
    Runtime::new(session, host, Instant::now()).with_config_path(dir.join("config.json"))
}
