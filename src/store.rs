//! Store layout and path resolution.
//!
//! Entries live under the store root either as `<name>.gpg` files or as
//! plain directories of further entries. A logical name resolves to
//! exactly one of the two; the directory interpretation wins.

use crate::error::{Result, StoreError};
use std::fs;
use std::path::{Path, PathBuf};

/// File suffix the encryption tool gives leaf entries.
pub const GPG_SUFFIX: &str = ".gpg";

/// Marker file recording the store's encryption identity.
pub const GPG_ID_FILE: &str = ".gpg-id";

/// Diff-attributes file written while handling `git init`.
pub const GIT_ATTRIBUTES_FILE: &str = ".gitattributes";

/// Maps the encrypted suffix to the gpg diff driver.
pub const GIT_ATTRIBUTES_CONTENT: &str = "*.gpg diff=gpg\n";

/// An entry found on disk, disambiguated.
#[derive(Debug, PartialEq, Eq)]
pub enum ResolvedEntry {
    Directory(PathBuf),
    File(PathBuf),
}

/// Path of the encrypted file for `name`.
///
/// The suffix is appended unconditionally, exactly once, even when the
/// name itself already ends in it.
pub fn passfile_path(root: &Path, name: &str) -> PathBuf {
    let mut path = root.join(name).into_os_string();
    path.push(GPG_SUFFIX);
    PathBuf::from(path)
}

/// Path of the directory interpretation of `name`.
pub fn dir_path(root: &Path, name: &str) -> PathBuf {
    root.join(name)
}

/// Resolve an existing entry, probing the directory shape first.
pub fn resolve_existing(root: &Path, name: &str) -> Option<ResolvedEntry> {
    let dir = dir_path(root, name);
    if dir.is_dir() {
        return Some(ResolvedEntry::Directory(dir));
    }

    let file = passfile_path(root, name);
    if file.is_file() {
        return Some(ResolvedEntry::File(file));
    }

    None
}

/// Create the store root and record the encryption identity.
///
/// Recording is idempotent for an equal identity; a different identity
/// replaces the previous one rather than accumulating alongside it.
pub fn init_store(path: &Path, gpg_id: &str) -> Result<()> {
    fs::create_dir_all(path)?;

    let marker = path.join(GPG_ID_FILE);
    if marker.is_file() {
        let existing = fs::read_to_string(&marker)?;
        if existing.trim() == gpg_id {
            return Ok(());
        }
    }

    fs::write(&marker, gpg_id)?;
    Ok(())
}

/// Remove an entry. Directories are only removed with `recursive`.
pub fn remove_entry(root: &Path, name: &str, recursive: bool) -> Result<()> {
    match resolve_existing(root, name) {
        Some(ResolvedEntry::Directory(dir)) => {
            if !recursive {
                return Err(StoreError::IsDirectory(name.to_string()));
            }
            fs::remove_dir_all(dir)?;
            Ok(())
        }
        Some(ResolvedEntry::File(file)) => {
            fs::remove_file(file)?;
            Ok(())
        }
        None => Err(StoreError::NotInStore(name.to_string())),
    }
}

/// Rename an entry, re-appending the suffix for leaf entries.
///
/// Directories move wholesale with their subtree. Parent directories of
/// the destination are created as needed.
pub fn rename_entry(root: &Path, old: &str, new: &str) -> Result<()> {
    let (from, to) = match resolve_existing(root, old) {
        Some(ResolvedEntry::Directory(dir)) => (dir, dir_path(root, new)),
        Some(ResolvedEntry::File(file)) => (file, passfile_path(root, new)),
        None => return Err(StoreError::NotInStore(old.to_string())),
    };

    if let Some(parent) = to.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::rename(from, to)?;
    Ok(())
}
