//! User input helpers
//!
//! Reading a message from a file or standard input, and capturing an issue
//! title and message through an external editor.

use crate::{BridgeError, Result};
use dialoguer::Editor;
use std::io::Read;

const CREATE_TEMPLATE_HELP: &str = "\
# Please enter the title and message of the issue.
# The first non-empty line is the title, the rest is the message.
# Lines starting with '#' are ignored; an empty title aborts the creation.
";

/// Read a whole message from `path`, or from standard input when `path` is "-"
pub fn from_file(path: &str) -> Result<String> {
    if path == "-" {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        return Ok(buffer);
    }
    Ok(std::fs::read_to_string(path)?)
}

/// Interactive source of a new issue's title and message
pub trait IssueEditor {
    /// Let the user complete `title` and `message`
    ///
    /// Fails with [`BridgeError::EmptyTitle`] when the user leaves the title empty.
    fn create_input(&self, title: &str, message: &str) -> Result<(String, String)>;
}

/// Opens the user's editor on a template file
///
/// Uses the configured executable, else `$VISUAL`, `$EDITOR`, then a
/// platform default.
#[derive(Debug, Clone, Default)]
pub struct ExternalEditor {
    executable: Option<String>,
}

impl ExternalEditor {
    pub fn new(executable: Option<String>) -> Self {
        Self { executable }
    }
}

impl IssueEditor for ExternalEditor {
    fn create_input(&self, title: &str, message: &str) -> Result<(String, String)> {
        let mut editor = Editor::new();
        editor.extension(".md").require_save(true);
        if let Some(ref executable) = self.executable {
            editor.executable(executable);
        }

        let template = format!("{}\n\n{}\n{}", title, message, CREATE_TEMPLATE_HELP);
        tracing::debug!(executable = ?self.executable, "Opening editor for issue input");

        match editor.edit(&template)? {
            Some(text) => parse_create_input(&text),
            None => Err(BridgeError::EmptyTitle),
        }
    }
}

/// Split edited text into a title and a message
///
/// Comment lines are dropped, the first non-blank line is the title and the
/// remaining text, trimmed, is the message.
pub fn parse_create_input(text: &str) -> Result<(String, String)> {
    let mut lines = text.lines().filter(|line| !line.starts_with('#'));

    let title = lines
        .by_ref()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .ok_or(BridgeError::EmptyTitle)?
        .to_string();

    let message = lines.collect::<Vec<_>>().join("\n").trim().to_string();

    Ok((title, message))
}
