//! Listing via the external tree tool, plus the text post-processing
//! applied to its output.

use crate::error::{Result, StoreError};
use crate::store;
use std::path::Path;
use std::process::Command;

const TREE_BIN: &str = "tree";

/// Title replacing the root-path echo in `ls` output.
pub const LIST_TITLE: &str = "Password Store";

/// Render `dir` with the tree tool, optionally filtered by a glob.
pub fn render(dir: &Path, pattern: Option<&str>) -> Result<String> {
    which::which(TREE_BIN).map_err(|_| StoreError::ToolNotFound { tool: TREE_BIN })?;

    let mut cmd = Command::new(TREE_BIN);
    cmd.args(["-C", "-l", "--noreport"]);
    if let Some(pattern) = pattern {
        cmd.args(["-P", pattern]);
    }

    let output = cmd.arg(dir).output()?;
    if !output.status.success() {
        return Err(StoreError::ToolFailed {
            tool: TREE_BIN,
            status: output.status,
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// OR-style multi-glob over the search terms: `*foo*|*bar*`.
pub fn find_pattern(terms: &[String]) -> String {
    format!("*{}*", terms.join("*|*"))
}

/// Drop every occurrence of the encryption suffix from the listing.
pub fn strip_suffix(text: &str) -> String {
    text.replace(store::GPG_SUFFIX, "")
}

/// Replace the first line, the tool's root-path echo, with `title`.
pub fn replace_header(text: &str, title: &str) -> String {
    match text.split_once('\n') {
        Some((_, rest)) => format!("{title}\n{rest}"),
        None => title.to_string(),
    }
}

/// Drop the first line entirely.
pub fn drop_header(text: &str) -> String {
    match text.split_once('\n') {
        Some((_, rest)) => rest.to_string(),
        None => String::new(),
    }
}
