use std::io::{self, Write};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;

use quill::cli::CliArgs;
use quill::config::EditorConfig;
use quill::messages::{AppMsg, ViewMsg};
use quill::model::EditorSession;
use quill::runtime::{Runtime, TerminalHost};
use quill::script::{self, ScriptCommand};
use quill::theme::{list_available_themes, load_theme};
use quill::view::render_session;

fn main() -> Result<()> {
    quill::tracing::init();

    let args = CliArgs::parse();

    let mut config = match &args.config {
        Some(path) => EditorConfig::load_from(path),
        None => EditorConfig::load(),
    };
    if let Some(secs) = args.auto_save {
        config.auto_save_interval = secs;
    }

    let mut session = EditorSession::new(config);
    if let Some(id) = &args.theme {
        match load_theme(id) {
            Ok(theme) => {
                session.view.theme_id = theme.id.clone();
                session.theme = theme;
            }
            Err(e) => tracing::warn!("Ignoring --theme {}: {}", id, e),
        }
    }

    let stdin = io::stdin();
    let host = TerminalHost::new(stdin.lock(), io::stdout());
    let mut runtime = Runtime::new(session, host, Instant::now());
    if let Some(path) = args.config.clone() {
        runtime = runtime.with_config_path(path);
    }
    match runtime.auto_save().period() {
        Some(period) => tracing::info!("Auto-save every {}s", period.as_secs()),
        None => tracing::info!("Auto-save disabled"),
    }

    for path in &args.paths {
        runtime.dispatch(AppMsg::OpenPath(path.clone()));
    }
    if let Some(language) = args.language {
        runtime.dispatch(ViewMsg::SetLanguage(language));
    }
    if let Some(line) = args.line {
        runtime.dispatch(ViewMsg::GotoLine(line.to_string()));
    }

    while !runtime.should_quit() {
        runtime.tick(Instant::now());

        let Some(line) = runtime.host_mut().read_line() else {
            // End of input behaves like Exit
            runtime.dispatch(AppMsg::Quit);
            if !runtime.should_quit() {
                break;
            }
            continue;
        };

        match script::parse_line(&line, runtime.session()) {
            Ok(Some(ScriptCommand::Dispatch(msg))) => runtime.dispatch(msg),
            Ok(Some(ScriptCommand::Show)) => {
                let frame = render_session(runtime.session());
                write!(runtime.host_mut().output(), "{}", frame)
                    .context("Failed to write to stdout")?;
            }
            Ok(Some(ScriptCommand::Tabs)) => {
                let session = runtime.session();
                let listing: Vec<String> = session
                    .tabs()
                    .iter()
                    .enumerate()
                    .map(|(i, tab)| {
                        let marker = if i == session.active_index() { '>' } else { ' ' };
                        format!("{} {} {} ({})", marker, i + 1, tab.title(), tab.language())
                    })
                    .collect();
                writeln!(runtime.host_mut().output(), "{}", listing.join("\n"))
                    .context("Failed to write to stdout")?;
            }
            Ok(Some(ScriptCommand::Status)) => {
                let status = runtime.session().ui.status_message.clone();
                writeln!(runtime.host_mut().output(), "{}", status)
                    .context("Failed to write to stdout")?;
            }
            Ok(Some(ScriptCommand::Themes)) => {
                let current = runtime.session().view.theme_id.clone();
                let listing = script::themes_listing(&list_available_themes(), &current);
                writeln!(runtime.host_mut().output(), "{}", listing)
                    .context("Failed to write to stdout")?;
            }
            Ok(Some(ScriptCommand::Help)) => {
                writeln!(runtime.host_mut().output(), "{}", script::help())
                    .context("Failed to write to stdout")?;
            }
            Ok(None) => {}
            Err(e) => {
                writeln!(runtime.host_mut().output(), "error: {}", e)
                    .context("Failed to write to stdout")?;
            }
        }
    }

    runtime.shutdown();
    runtime
        .host_mut()
        .output()
        .flush()
        .context("Failed to flush stdout")?;
    Ok(())
}
