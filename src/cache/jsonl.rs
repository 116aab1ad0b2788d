//! JSONL (JSON Lines) persistence for issues
//!
//! Each line is one versioned issue record.

use super::issue::Issue;
use crate::{BridgeError, Result};
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

const CURRENT_VERSION: u32 = 1;

/// Versioned wrapper stored on each line
#[derive(Debug, Clone, Serialize, Deserialize)]
struct IssueEntry {
    #[serde(default = "default_version")]
    version: u32,

    #[serde(flatten)]
    issue: Issue,
}

fn default_version() -> u32 {
    CURRENT_VERSION
}

/// Read every issue from a JSONL file; a missing file holds no issues
pub fn read_issues(path: impl AsRef<Path>) -> Result<Vec<Issue>> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(Vec::new());
    }

    let reader = BufReader::new(File::open(path)?);
    let mut issues = Vec::new();

    for (index, line_result) in reader.lines().enumerate() {
        let line = line_result?;
        if line.trim().is_empty() {
            continue;
        }

        let entry: IssueEntry = serde_json::from_str(&line).map_err(|e| {
            BridgeError::Parse(format!("Invalid JSONL at line {}: {}", index + 1, e))
        })?;

        if entry.version != CURRENT_VERSION {
            tracing::warn!(version = entry.version, "Unknown issue version, attempting to parse anyway");
        }
        issues.push(entry.issue);
    }

    Ok(issues)
}

/// Append one issue, creating the file and its directory as needed
pub fn append_issue(path: impl AsRef<Path>, issue: &Issue) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let mut writer = BufWriter::new(file);

    let entry = IssueEntry {
        version: CURRENT_VERSION,
        issue: issue.clone(),
    };
    writeln!(writer, "{}", serde_json::to_string(&entry)?)?;
    writer.flush()?;

    Ok(())
}
