//! Command handlers
//!
//! The CLI parses arguments and opens the repository; everything after that
//! lives here so it can run against any output sink.

use crate::bridge::Bridge;
use crate::cache::RepoCache;
use crate::input::{self, IssueEditor};
use crate::repository::RepoCommon;
use crate::Result;
use std::io::Write;

/// Options of the `add` command
#[derive(Debug, Clone, Default)]
pub struct AddOptions {
    pub title: String,
    pub message: String,
    /// Read the message from this file ("-" for standard input)
    pub message_file: Option<String>,
}

/// Create a new issue, asking the editor for whatever the options leave out
///
/// An empty title from the editor is an abort, not a failure.
pub fn run_add(
    cache: &mut RepoCache,
    options: AddOptions,
    editor: &dyn IssueEditor,
    out: &mut dyn Write,
) -> Result<()> {
    let AddOptions {
        mut title,
        mut message,
        message_file,
    } = options;

    if let Some(path) = message_file {
        if message.is_empty() {
            message = input::from_file(&path)?;
        }
    }

    if title.is_empty() || message.is_empty() {
        match editor.create_input(&title, &message) {
            Ok((edited_title, edited_message)) => {
                title = edited_title;
                message = edited_message;
            }
            Err(e) if e.is_empty_title() => {
                writeln!(out, "Empty title, aborting.")?;
                return Ok(());
            }
            Err(e) => return Err(e),
        }
    }

    let issue = cache.new_issue(&title, &message)?;
    writeln!(out, "{} created", issue.human_id())?;

    Ok(())
}

/// `bridge configure`
pub fn run_bridge_configure(
    repo: &dyn RepoCommon,
    bridge: &mut Bridge,
    out: &mut dyn Write,
) -> Result<()> {
    bridge.configure(repo)?;
    writeln!(
        out,
        "Bridge {} ({}) configured",
        bridge.name,
        bridge.bridge_type()
    )?;
    Ok(())
}

/// `bridge pull`: import one remote item, or everything
pub fn run_bridge_pull(
    cache: &mut RepoCache,
    bridge: &mut Bridge,
    id: Option<&str>,
    out: &mut dyn Write,
) -> Result<()> {
    let before = cache.issues().len();
    match id {
        Some(id) => bridge.import(cache, id)?,
        None => bridge.import_all(cache)?,
    }

    let imported = cache.issues().len().saturating_sub(before);
    writeln!(out, "{} new issue(s) imported from {}", imported, bridge.name)?;
    Ok(())
}

/// `bridge push`: export one local issue, or everything
pub fn run_bridge_push(
    cache: &mut RepoCache,
    bridge: &mut Bridge,
    id: Option<&str>,
    out: &mut dyn Write,
) -> Result<()> {
    match id {
        Some(id) => bridge.export(cache, id)?,
        None => bridge.export_all(cache)?,
    }

    writeln!(out, "Exported to {}", bridge.name)?;
    Ok(())
}

/// `bridge rm`
pub fn run_bridge_rm(repo: &dyn RepoCommon, bridge: &mut Bridge, out: &mut dyn Write) -> Result<()> {
    bridge.remove(repo)?;
    writeln!(out, "Bridge {} ({}) removed", bridge.name, bridge.bridge_type())?;
    Ok(())
}

/// `bridge types`
pub fn run_bridge_types(types: &[&str], out: &mut dyn Write) -> Result<()> {
    for bridge_type in types {
        writeln!(out, "{}", bridge_type)?;
    }
    Ok(())
}
