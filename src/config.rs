//! Per-invocation store configuration.

use crate::error::{Result, StoreError};
use crate::store;
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration shared by every command handler.
///
/// Built once at startup and passed by reference; the git binding is
/// carried here as plain fields and applied to each git invocation
/// individually, never exported process-wide.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    root: PathBuf,
    git_dir: PathBuf,
    gpg_id: Option<String>,
}

impl StoreConfig {
    /// Default store location under the user's home directory.
    pub fn default_root() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".password-store")
    }

    /// Resolve the configuration from optional overrides.
    ///
    /// The root falls back to `$HOME/.password-store`, the git directory
    /// to `<root>/.git`. Flag and environment-variable precedence is
    /// handled by the argument parser before the overrides reach here.
    pub fn load(root: Option<PathBuf>, git_dir: Option<PathBuf>) -> Self {
        let root = absolutize(root.unwrap_or_else(Self::default_root));
        let git_dir = git_dir.unwrap_or_else(|| root.join(".git"));
        let gpg_id = read_gpg_id(&root);

        Self {
            root,
            git_dir,
            gpg_id,
        }
    }

    /// Store root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Git metadata directory for the store repository.
    pub fn git_dir(&self) -> &Path {
        &self.git_dir
    }

    /// Recorded encryption identity, if the store has one.
    pub fn gpg_id(&self) -> Option<&str> {
        self.gpg_id.as_deref()
    }

    /// Recorded encryption identity, or a configuration error.
    pub fn require_gpg_id(&self) -> Result<&str> {
        self.gpg_id.as_deref().ok_or(StoreError::MissingGpgId)
    }
}

/// Read the identity marker, treating unreadable files as absent.
///
/// The content is trimmed so a trailing newline in the marker cannot leak
/// into the recipient argument handed to the encryption tool.
fn read_gpg_id(root: &Path) -> Option<String> {
    let marker = root.join(store::GPG_ID_FILE);
    if !marker.is_file() {
        return None;
    }

    let content = fs::read_to_string(&marker).ok()?;
    let id = content.trim();
    if id.is_empty() {
        None
    } else {
        Some(id.to_string())
    }
}

fn absolutize(path: PathBuf) -> PathBuf {
    if let Ok(canonical) = path.canonicalize() {
        return canonical;
    }
    if path.is_absolute() {
        path
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(&path))
            .unwrap_or(path)
    }
}
