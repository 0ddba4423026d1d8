//! Line command language used by the terminal front end
//!
//! A line starting with `:` is a command; any other line is appended to the
//! focused buffer followed by a newline. Blank lines and `#` comments are
//! ignored. Arguments are taken verbatim after the first space; `\n`, `\t`
//! and `\\` escapes are understood where text is inserted.

use std::path::PathBuf;

use crate::commands::{command_by_name, COMMANDS};
use crate::messages::{AppMsg, DocumentMsg, FindMsg, LayoutMsg, Msg, SavePurpose, ViewMsg};
use crate::model::{EditorSession, ScrollSource};
use crate::syntax::LanguageId;
use crate::theme::{ThemeInfo, ThemeSource};

/// A parsed input line
#[derive(Debug, Clone)]
pub enum ScriptCommand {
    /// Feed a message to the runtime
    Dispatch(Msg),
    /// Render the focused tab
    Show,
    /// List open tabs
    Tabs,
    /// Print the status line
    Status,
    /// List the themes `:theme` accepts
    Themes,
    /// List commands
    Help,
}

/// Parse one line; Ok(None) for lines that do nothing
pub fn parse_line(line: &str, session: &EditorSession) -> Result<Option<ScriptCommand>, String> {
    if line.trim().is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    let Some(command) = line.strip_prefix(':') else {
        return Ok(Some(dispatch(DocumentMsg::AppendText(format!("{}\n", line)))));
    };

    let (name, arg) = command.split_once(' ').unwrap_or((command, ""));
    let tab_id = session.active_tab().id;

    let parsed = match name {
        "show" => ScriptCommand::Show,
        "tabs" => ScriptCommand::Tabs,
        "status" => ScriptCommand::Status,
        "themes" => ScriptCommand::Themes,
        "help" => ScriptCommand::Help,

        "open" => dispatch(AppMsg::OpenPath(required_path(name, arg)?)),
        "save-as" => dispatch(AppMsg::SaveDialogResult {
            tab_id,
            purpose: SavePurpose::Save,
            path: Some(required_path(name, arg)?),
        }),
        "print" => dispatch(AppMsg::SaveDialogResult {
            tab_id,
            purpose: SavePurpose::Print,
            path: Some(required_path(name, arg)?),
        }),
        "tab" => {
            let n: usize = parse_number(name, arg)?;
            dispatch(LayoutMsg::SwitchToTab(n.saturating_sub(1)))
        }

        "find" => dispatch(FindMsg::Find(unescape(arg))),
        "replace" => dispatch(FindMsg::Replace(unescape(arg))),
        "replace-all" => {
            let (query, replacement) = arg
                .split_once(" => ")
                .ok_or_else(|| "usage: :replace-all QUERY => REPLACEMENT".to_string())?;
            dispatch(FindMsg::ReplaceAll {
                query: unescape(query),
                replacement: unescape(replacement),
            })
        }
        "count" => dispatch(FindMsg::Count(unescape(arg))),

        "goto" => dispatch(ViewMsg::GotoLine(arg.to_string())),
        "lang" => {
            let language: LanguageId = arg.parse()?;
            dispatch(ViewMsg::SetLanguage(language))
        }
        "theme" => dispatch(ViewMsg::SetTheme(arg.trim().to_string())),
        "wheel" => dispatch(ViewMsg::ZoomWheel(parse_number(name, arg)?)),
        "scroll" => dispatch(ViewMsg::Scroll {
            source: ScrollSource::Text,
            lines: parse_number(name, arg)?,
        }),
        "gutter-scroll" => dispatch(ViewMsg::Scroll {
            source: ScrollSource::Gutter,
            lines: parse_number(name, arg)?,
        }),
        "resize" => dispatch(ViewMsg::Resize {
            visible_lines: parse_number(name, arg)?,
        }),

        "insert" => {
            let (offset, text) = arg
                .split_once(' ')
                .ok_or_else(|| "usage: :insert OFFSET TEXT".to_string())?;
            dispatch(DocumentMsg::InsertText {
                offset: parse_number(name, offset)?,
                text: unescape(text),
            })
        }
        "delete" => {
            let (start, end) = arg
                .split_once(' ')
                .ok_or_else(|| "usage: :delete START END".to_string())?;
            dispatch(DocumentMsg::DeleteRange {
                start: parse_number(name, start)?,
                end: parse_number(name, end)?,
            })
        }
        "set" => dispatch(DocumentMsg::SetText(unescape(arg))),

        _ => match command_by_name(name) {
            Some(def) => ScriptCommand::Dispatch(def.id.to_msg()),
            None => return Err(format!("Unknown command: :{}", name)),
        },
    };
    Ok(Some(parsed))
}

fn dispatch(msg: impl Into<Msg>) -> ScriptCommand {
    ScriptCommand::Dispatch(msg.into())
}

fn required_path(name: &str, arg: &str) -> Result<PathBuf, String> {
    let arg = arg.trim();
    if arg.is_empty() {
        return Err(format!("usage: :{} PATH", name));
    }
    Ok(PathBuf::from(arg))
}

fn parse_number<T: std::str::FromStr>(name: &str, arg: &str) -> Result<T, String> {
    arg.trim()
        .parse()
        .map_err(|_| format!(":{} expects a number, got '{}'", name, arg.trim()))
}

/// Expand `\n`, `\t` and `\\`; other escapes are kept as written
pub fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

/// Help text listing every command
pub fn help() -> String {
    let mut lines = vec![
        ":open PATH | :save-as PATH | :print PATH | :tab N".to_string(),
        ":find TEXT | :replace TEXT | :replace-all QUERY => REPLACEMENT | :count TEXT".to_string(),
        ":goto N | :lang NAME | :theme ID | :wheel N | :scroll N | :gutter-scroll N | :resize N"
            .to_string(),
        ":insert OFFSET TEXT | :delete START END | :set TEXT".to_string(),
        ":show | :tabs | :status | :themes | :help".to_string(),
    ];
    for def in COMMANDS {
        let keys = def.keybinding.unwrap_or("");
        lines.push(format!(":{:<16} {:<18} {}", def.name, def.label, keys));
    }
    lines.join("\n")
}

/// One line per theme, the current one marked with `>`
pub fn themes_listing(themes: &[ThemeInfo], current: &str) -> String {
    themes
        .iter()
        .map(|info| {
            let marker = if info.id == current { '>' } else { ' ' };
            let source = match info.source {
                ThemeSource::User => "user",
                ThemeSource::Builtin => "builtin",
            };
            format!("{} {:<12} {:<16} {}", marker, info.id, info.name, source)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
