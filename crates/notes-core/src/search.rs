//! Full-text search through an external program.
//!
//! `rg` is preferred; when it cannot be started the search is retried with
//! `grep`. Both run case-insensitively and report file names and line
//! numbers.

use std::ffi::OsString;
use std::io;
use std::path::Path;
use std::process::Command;
use std::str::FromStr;

use crate::{CoreError, CoreResult};

/// A supported search program.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchTool {
    Ripgrep,
    Grep,
}

impl SearchTool {
    /// Program name.
    pub fn program(&self) -> &'static str {
        match self {
            SearchTool::Ripgrep => "rg",
            SearchTool::Grep => "grep",
        }
    }

    /// Command-line arguments for searching `dir` for `query`.
    pub fn args(&self, query: &str, dir: &Path) -> Vec<OsString> {
        let flags: &[&str] = match self {
            SearchTool::Ripgrep => &["-i", "--with-filename", "--line-number"],
            SearchTool::Grep => &["-r", "-i", "-n"],
        };
        flags
            .iter()
            .map(OsString::from)
            .chain([OsString::from(query), dir.as_os_str().to_owned()])
            .collect()
    }
}

impl FromStr for SearchTool {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "rg" | "ripgrep" => Ok(SearchTool::Ripgrep),
            "grep" => Ok(SearchTool::Grep),
            other => Err(CoreError::Search(format!("unsupported search tool '{other}'"))),
        }
    }
}

impl std::fmt::Display for SearchTool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.program())
    }
}

/// Output of a search run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResults {
    /// Program that produced the output
    pub tool: SearchTool,
    /// Raw matches, one `path:line:text` per line
    pub output: String,
}

impl SearchResults {
    /// Returns true when nothing matched.
    pub fn is_empty(&self) -> bool {
        self.output.trim().is_empty()
    }
}

/// Searches `dir` for `query`.
///
/// With `tool` unset, `rg` is tried first and `grep` is used if `rg` is
/// not installed. An explicit tool is never substituted.
pub fn search(dir: &Path, query: &str, tool: Option<SearchTool>) -> CoreResult<SearchResults> {
    match tool {
        Some(tool) => run(tool, dir, query),
        None => match run(SearchTool::Ripgrep, dir, query) {
            Err(CoreError::Io(e)) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!("rg not found, falling back to grep");
                run(SearchTool::Grep, dir, query)
            }
            other => other,
        },
    }
}

fn run(tool: SearchTool, dir: &Path, query: &str) -> CoreResult<SearchResults> {
    tracing::debug!("Searching {} for {:?} with {}", dir.display(), query, tool);
    let output = Command::new(tool.program())
        .args(tool.args(query, dir))
        .output()?;

    // Exit code 1 means "no matches" for both programs
    if !output.status.success() && output.status.code() != Some(1) {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        return Err(CoreError::Search(format!("{tool} failed: {stderr}")));
    }

    Ok(SearchResults {
        tool,
        output: String::from_utf8_lossy(&output.stdout).into_owned(),
    })
}
