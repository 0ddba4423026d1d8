//! Dialogs and prompts supplied by the front end

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use crate::messages::{SaveChoice, SavePurpose};
use crate::model::Notice;

/// User-facing collaborators the runtime calls synchronously
pub trait Host {
    /// Ask for a file to open; None if cancelled
    fn pick_open_path(&mut self) -> Option<PathBuf>;

    /// Ask for a destination path; None if cancelled
    fn pick_save_path(&mut self, purpose: SavePurpose, suggested: Option<&Path>)
        -> Option<PathBuf>;

    /// "Save changes to {name}?" with Yes / No / Cancel
    fn confirm_save(&mut self, tab_name: &str) -> SaveChoice;

    /// Show a message box
    fn show_notice(&mut self, notice: &Notice);
}

/// Line-oriented host over any reader/writer pair
///
/// Prompts are written to `output` and answered by the next input line.
/// End of input answers every prompt with its cancel/decline option.
pub struct TerminalHost<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> TerminalHost<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    /// Next input line without its line ending; None at end of input
    pub fn read_line(&mut self) -> Option<String> {
        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => Some(line.trim_end_matches(['\r', '\n']).to_string()),
            Err(e) => {
                tracing::warn!("Failed to read input: {}", e);
                None
            }
        }
    }

    fn prompt(&mut self, text: &str) -> Option<String> {
        if let Err(e) = write!(self.output, "{}", text).and_then(|_| self.output.flush()) {
            tracing::warn!("Failed to write prompt: {}", e);
        }
        self.read_line()
    }

    fn prompt_path(&mut self, text: &str) -> Option<PathBuf> {
        self.prompt(text)
            .map(|line| line.trim().to_string())
            .filter(|line| !line.is_empty())
            .map(PathBuf::from)
    }
}

impl<R: BufRead, W: Write> Host for TerminalHost<R, W> {
    fn pick_open_path(&mut self) -> Option<PathBuf> {
        self.prompt_path("Open file: ")
    }

    fn pick_save_path(
        &mut self,
        purpose: SavePurpose,
        suggested: Option<&Path>,
    ) -> Option<PathBuf> {
        let label = match purpose {
            SavePurpose::Save => "Save as",
            SavePurpose::Print => "Print to file",
        };
        let text = match suggested {
            Some(path) => format!("{} [{}]: ", label, path.display()),
            None => format!("{}: ", label),
        };
        let answer = self.prompt(&text)?;
        let answer = answer.trim();
        if answer.is_empty() {
            suggested.map(Path::to_path_buf)
        } else {
            Some(PathBuf::from(answer))
        }
    }

    fn confirm_save(&mut self, tab_name: &str) -> SaveChoice {
        let question = format!("Save changes to {}? [y/n/c]: ", tab_name);
        loop {
            let Some(answer) = self.prompt(&question) else {
                return SaveChoice::No;
            };
            match answer.trim().to_ascii_lowercase().as_str() {
                "y" | "yes" => return SaveChoice::Yes,
                "n" | "no" => return SaveChoice::No,
                "c" | "cancel" => return SaveChoice::Cancel,
                _ => continue,
            }
        }
    }

    fn show_notice(&mut self, notice: &Notice) {
        if let Err(e) = writeln!(
            self.output,
            "[{}] {}: {}",
            notice.level, notice.title, notice.body
        ) {
            tracing::warn!("Failed to write notice: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn host(input: &str) -> TerminalHost<Cursor<Vec<u8>>, Vec<u8>> {
        TerminalHost::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn test_confirm_save_retries_until_valid_answer() {
        let mut host = host("maybe\nY\n");
        assert_eq!(host.confirm_save("a.py"), SaveChoice::Yes);
        let out = String::from_utf8(host.output().clone()).unwrap();
        assert_eq!(out.matches("Save changes to a.py?").count(), 2);
    }

    #[test]
    fn test_confirm_save_at_eof_declines() {
        assert_eq!(host("").confirm_save("a.py"), SaveChoice::No);
    }

    #[test]
    fn test_pick_save_path_uses_suggestion_on_empty_answer() {
        let mut host = host("\n/tmp/new.py\n");
        let suggested = PathBuf::from("/tmp/old.py");
        assert_eq!(
            host.pick_save_path(SavePurpose::Save, Some(&suggested)),
            Some(suggested.clone())
        );
        assert_eq!(
            host.pick_save_path(SavePurpose::Save, Some(&suggested)),
            Some(PathBuf::from("/tmp/new.py"))
        );
        assert_eq!(host.pick_save_path(SavePurpose::Print, None), None);
    }

    #[test]
    fn test_notice_is_written() {
        let mut host = host("");
        host.show_notice(&Notice::warning("Go To Line", "Line number out of range"));
        let out = String::from_utf8(host.output().clone()).unwrap();
        assert_eq!(out, "[warning] Go To Line: Line number out of range\n");
    }
}
