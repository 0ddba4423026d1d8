//! File operations through the runtime: open, save, print, auto-save, exit

mod common;

use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use common::{runtime_in, session_with_text, test_session, ScriptedHost};
use quill::config::EditorConfig;
use quill::messages::{AppMsg, DocumentMsg, SaveChoice, SavePurpose};
use quill::model::EditorSession;
use quill::runtime::Runtime;
use quill::syntax::LanguageId;
use quill::theme::Theme;
use quill::update::update;
use tempfile::TempDir;

fn type_text(text: &str) -> DocumentMsg {
    DocumentMsg::AppendText(text.to_string())
}

// ========================================================================
// Open
// ========================================================================

#[test]
fn test_open_path_adds_tab_and_recent_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("style.css");
    fs::write(&path, "body { color: red; }").unwrap();

    let mut rt = runtime_in(dir.path(), test_session(), ScriptedHost::new());
    rt.dispatch(AppMsg::OpenPath(path.clone()));

    let session = rt.session();
    assert_eq!(session.tabs().len(), 2);
    assert_eq!(session.active_tab().title(), "style.css");
    assert_eq!(session.active_tab().language(), LanguageId::Css);
    assert!(!session.active_tab().is_dirty());
    assert_eq!(
        session.ui.status_message,
        format!("Opened: {}", path.display())
    );

    let saved = EditorConfig::load_from(&dir.path().join("config.json"));
    assert_eq!(saved.recent_files, vec![path]);
}

#[test]
fn test_reopening_does_not_duplicate_recent_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("a.py");
    fs::write(&path, "x").unwrap();

    let mut rt = runtime_in(dir.path(), test_session(), ScriptedHost::new());
    rt.dispatch(AppMsg::OpenPath(path.clone()));
    rt.dispatch(AppMsg::OpenPath(path.clone()));

    assert_eq!(rt.session().tabs().len(), 3);
    assert_eq!(rt.session().config.recent_files, vec![path]);
}

#[test]
fn test_open_dialog_uses_host_answer() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("page.html");
    fs::write(&path, "<p>hi</p>").unwrap();

    let host = ScriptedHost::new().with_open_path(&path);
    let mut rt = runtime_in(dir.path(), test_session(), host);
    rt.dispatch(AppMsg::OpenFileDialog);
    assert_eq!(rt.session().active_tab().document.text(), "<p>hi</p>");

    // No answer queued: the dialog is cancelled
    rt.dispatch(AppMsg::OpenFileDialog);
    assert_eq!(rt.session().tabs().len(), 2);
}

#[test]
fn test_open_missing_file_reports_error() {
    let dir = TempDir::new().unwrap();
    let mut rt = runtime_in(dir.path(), test_session(), ScriptedHost::new());
    rt.dispatch(AppMsg::OpenPath(dir.path().join("missing.py")));

    assert_eq!(rt.session().tabs().len(), 1);
    assert_eq!(rt.host().notice_titles(), vec!["Open Error"]);
    assert!(rt.session().config.recent_files.is_empty());
}

// ========================================================================
// Save / Save As / Print
// ========================================================================

#[test]
fn test_save_writes_to_tab_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("main.py");
    fs::write(&path, "x = 1\n").unwrap();

    let mut rt = runtime_in(dir.path(), test_session(), ScriptedHost::new());
    rt.dispatch(AppMsg::OpenPath(path.clone()));
    rt.dispatch(type_text("y = 2\n"));
    assert_eq!(rt.session().active_tab().title(), "*main.py");

    rt.dispatch(AppMsg::SaveFile);
    assert_eq!(fs::read_to_string(&path).unwrap(), "x = 1\ny = 2\n");
    assert_eq!(rt.session().active_tab().title(), "main.py");
    assert_eq!(
        rt.session().ui.status_message,
        format!("Saved: {}", path.display())
    );
    assert!(rt.host().save_prompts.is_empty());
}

#[test]
fn test_save_untitled_asks_and_adds_py_extension() {
    let dir = TempDir::new().unwrap();
    let host = ScriptedHost::new().with_save_path(dir.path().join("script"));
    let mut rt = runtime_in(dir.path(), session_with_text("print(1)\n"), host);
    rt.dispatch(type_text("print(2)\n"));
    rt.dispatch(AppMsg::SaveFile);

    let expected = dir.path().join("script.py");
    assert_eq!(
        fs::read_to_string(&expected).unwrap(),
        "print(1)\nprint(2)\n"
    );
    let tab = rt.session().active_tab();
    assert_eq!(tab.path(), Some(expected.as_path()));
    assert_eq!(tab.title(), "script.py");
    assert_eq!(rt.host().save_prompts, vec![(SavePurpose::Save, None)]);
}

#[test]
fn test_save_as_keeps_explicit_extension() {
    let dir = TempDir::new().unwrap();
    let original = dir.path().join("a.py");
    fs::write(&original, "a").unwrap();
    let target = dir.path().join("copy.txt");

    let host = ScriptedHost::new().with_save_path(&target);
    let mut rt = runtime_in(dir.path(), test_session(), host);
    rt.dispatch(AppMsg::OpenPath(original.clone()));
    rt.dispatch(AppMsg::SaveFileAs);

    assert_eq!(fs::read_to_string(&target).unwrap(), "a");
    assert_eq!(rt.session().active_tab().title(), "copy.txt");
    assert_eq!(
        rt.host().save_prompts,
        vec![(SavePurpose::Save, Some(original))]
    );
}

#[test]
fn test_cancelled_save_keeps_tab_dirty() {
    let dir = TempDir::new().unwrap();
    let mut rt = runtime_in(dir.path(), test_session(), ScriptedHost::new());
    rt.dispatch(type_text("draft"));
    rt.dispatch(AppMsg::SaveFile);

    assert!(rt.session().active_tab().is_dirty());
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn test_print_exports_txt_without_touching_tab() {
    let dir = TempDir::new().unwrap();
    let host = ScriptedHost::new().with_save_path(dir.path().join("report"));
    let mut rt = runtime_in(dir.path(), test_session(), host);
    rt.dispatch(type_text("hello"));
    rt.dispatch(AppMsg::PrintToFile);

    let expected = dir.path().join("report.txt");
    assert_eq!(fs::read_to_string(&expected).unwrap(), "hello");
    let tab = rt.session().active_tab();
    assert!(tab.is_dirty());
    assert!(tab.path().is_none());
    assert_eq!(
        rt.session().ui.status_message,
        format!("Content printed to: {}", expected.display())
    );
    assert_eq!(rt.host().save_prompts[0].0, SavePurpose::Print);
}

#[test]
fn test_save_error_shows_notice_and_stays_dirty() {
    let dir = TempDir::new().unwrap();
    let bad = dir.path().join("no-such-dir").join("x.py");
    let host = ScriptedHost::new().with_save_path(&bad);
    let mut rt = runtime_in(dir.path(), test_session(), host);
    rt.dispatch(type_text("x"));
    rt.dispatch(AppMsg::SaveFile);

    assert_eq!(rt.host().notice_titles(), vec!["Save Error"]);
    let tab = rt.session().active_tab();
    assert!(tab.is_dirty());
    assert!(tab.path().is_none());
}

#[test]
fn test_stale_save_completion_keeps_dirty() {
    let mut session = session_with_text("a");
    let _ = update(&mut session, type_text("b").into());
    let tab_id = session.active_tab().id;
    let revision = session.active_tab().document.revision;
    let _ = update(&mut session, type_text("c").into());

    let _ = update(
        &mut session,
        AppMsg::SaveCompleted {
            tab_id,
            path: PathBuf::from("/tmp/stale.py"),
            revision,
            result: Ok(()),
        }
        .into(),
    );

    let tab = session.active_tab();
    assert!(tab.is_dirty());
    assert_eq!(tab.title(), "*stale.py");
}

// ========================================================================
// Auto-save
// ========================================================================

fn auto_save_session(seconds: u64) -> EditorSession {
    let config = EditorConfig {
        auto_save_interval: seconds,
        ..EditorConfig::default()
    };
    EditorSession::with_theme(config, Theme::default())
}

#[test]
fn test_auto_save_writes_dirty_tabs_with_paths() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("auto.py");
    fs::write(&path, "").unwrap();

    let start = Instant::now();
    let mut rt = Runtime::new(auto_save_session(1), ScriptedHost::new(), start)
        .with_config_path(dir.path().join("config.json"));
    rt.dispatch(AppMsg::OpenPath(path.clone()));
    rt.dispatch(type_text("saved by timer"));
    rt.dispatch(quill::messages::LayoutMsg::NewTab);
    rt.dispatch(type_text("untitled stays"));

    assert!(!rt.tick(start));
    assert!(rt.tick(start + Duration::from_secs(2)));

    assert_eq!(fs::read_to_string(&path).unwrap(), "saved by timer");
    let session = rt.session();
    assert!(!session.tabs()[1].is_dirty());
    assert!(session.tabs()[2].is_dirty());
    assert!(session.ui.status_message.starts_with("Auto-saved: "));
    assert!(rt.host().save_prompts.is_empty());
}

#[test]
fn test_auto_save_failure_is_per_tab() {
    let dir = TempDir::new().unwrap();
    let gone = dir.path().join("gone");
    fs::create_dir(&gone).unwrap();
    let bad = gone.join("bad.py");
    let good = dir.path().join("good.py");
    fs::write(&bad, "").unwrap();
    fs::write(&good, "").unwrap();

    let start = Instant::now();
    let mut rt = Runtime::new(auto_save_session(1), ScriptedHost::new(), start)
        .with_config_path(dir.path().join("config.json"));
    rt.dispatch(AppMsg::OpenPath(bad.clone()));
    rt.dispatch(type_text("lost"));
    rt.dispatch(AppMsg::OpenPath(good.clone()));
    rt.dispatch(type_text("written"));
    fs::remove_dir_all(&gone).unwrap();

    assert!(rt.tick(start + Duration::from_secs(2)));

    assert_eq!(fs::read_to_string(&good).unwrap(), "written");
    let session = rt.session();
    assert!(session.tabs()[1].is_dirty());
    assert_eq!(session.tabs()[1].title(), "*bad.py");
    assert!(!session.tabs()[2].is_dirty());
    assert_eq!(session.tabs()[2].title(), "good.py");

    // the later success must not hide the failure
    let status = &session.ui.status_message;
    assert!(status.starts_with("Auto-save failed: "), "{}", status);
    assert!(status.contains(&bad.display().to_string()));
    assert!(status.ends_with("saved 1 other file(s)"));
    assert!(rt.host().notices.is_empty());
}

#[test]
fn test_closed_tab_leaves_auto_save_scan() {
    let dir = TempDir::new().unwrap();
    let kept = dir.path().join("kept.py");
    let closed = dir.path().join("closed.py");
    fs::write(&kept, "").unwrap();
    fs::write(&closed, "").unwrap();

    let start = Instant::now();
    let mut rt = Runtime::new(auto_save_session(1), ScriptedHost::new(), start)
        .with_config_path(dir.path().join("config.json"));
    rt.dispatch(AppMsg::OpenPath(kept.clone()));
    rt.dispatch(type_text("kept edit"));
    rt.dispatch(AppMsg::OpenPath(closed.clone()));
    rt.dispatch(type_text("discarded edit"));
    rt.dispatch(quill::messages::LayoutMsg::CloseActiveTab);
    assert_eq!(rt.session().tabs().len(), 2);

    assert!(rt.tick(start + Duration::from_secs(2)));

    assert_eq!(fs::read_to_string(&kept).unwrap(), "kept edit");
    assert_eq!(fs::read_to_string(&closed).unwrap(), "");
    assert_eq!(
        rt.session().ui.status_message,
        format!("Auto-saved: {}", kept.display())
    );
}

#[test]
fn test_auto_save_disabled_by_zero_interval() {
    let dir = TempDir::new().unwrap();
    let start = Instant::now();
    let mut rt = runtime_in(dir.path(), test_session(), ScriptedHost::new());
    assert!(!rt.auto_save().is_active());
    assert!(!rt.tick(start + Duration::from_secs(3600)));
}

// ========================================================================
// Exit
// ========================================================================

#[test]
fn test_quit_when_clean_saves_config() {
    let dir = TempDir::new().unwrap();
    let mut rt = runtime_in(dir.path(), test_session(), ScriptedHost::new());
    rt.dispatch(AppMsg::Quit);

    assert!(rt.should_quit());
    assert!(rt.host().confirm_prompts.is_empty());
    assert!(dir.path().join("config.json").exists());
}

#[test]
fn test_quit_cancel_keeps_running() {
    let dir = TempDir::new().unwrap();
    let host = ScriptedHost::new().with_choices(&[SaveChoice::Cancel]);
    let mut rt = runtime_in(dir.path(), test_session(), host);
    rt.dispatch(type_text("unsaved"));
    rt.dispatch(AppMsg::Quit);

    assert!(!rt.should_quit());
    assert_eq!(rt.session().ui.status_message, "Exit cancelled");
    assert_eq!(rt.host().confirm_prompts, vec!["Untitled-1"]);
}

#[test]
fn test_quit_yes_saves_then_exits() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("keep.py");
    fs::write(&path, "").unwrap();

    let host = ScriptedHost::new().with_choices(&[SaveChoice::Yes]);
    let mut rt = runtime_in(dir.path(), test_session(), host);
    rt.dispatch(AppMsg::OpenPath(path.clone()));
    rt.dispatch(type_text("kept"));
    rt.dispatch(AppMsg::Quit);

    assert!(rt.should_quit());
    assert_eq!(fs::read_to_string(&path).unwrap(), "kept");
    assert_eq!(rt.host().confirm_prompts, vec!["keep.py"]);
}

#[test]
fn test_quit_no_discards_changes() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("discard.py");
    fs::write(&path, "original").unwrap();

    let host = ScriptedHost::new().with_choices(&[SaveChoice::No, SaveChoice::No]);
    let mut rt = runtime_in(dir.path(), test_session(), host);
    rt.dispatch(AppMsg::OpenPath(path.clone()));
    rt.dispatch(type_text(" changed"));
    rt.dispatch(quill::messages::LayoutMsg::SwitchToTab(0));
    rt.dispatch(type_text("scratch"));
    rt.dispatch(AppMsg::Quit);

    assert!(rt.should_quit());
    assert_eq!(fs::read_to_string(&path).unwrap(), "original");
    assert_eq!(rt.host().confirm_prompts, vec!["Untitled-1", "discard.py"]);
}
