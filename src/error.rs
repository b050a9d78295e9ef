//! Error types for passtore.

use std::process::ExitStatus;
use thiserror::Error;

/// Main error type for store operations.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("No gpg id set for this store. Run 'passtore init <gpg-id>' first.")]
    MissingGpgId,

    #[error("{0} is not in the password store")]
    NotInStore(String),

    #[error("{0} is a directory. Use --recursive to remove it.")]
    IsDirectory(String),

    #[error("Entered values do not match")]
    ConfirmationMismatch,

    #[error("{tool} not found on PATH. Please install {tool}.")]
    ToolNotFound { tool: &'static str },

    #[error("{tool} failed with {status}")]
    ToolFailed {
        tool: &'static str,
        status: ExitStatus,
    },

    #[error("git exited with status {0}")]
    GitExit(i32),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

impl StoreError {
    /// Process exit code for this error, one per failure category.
    pub fn exit_code(&self) -> i32 {
        match self {
            StoreError::MissingGpgId => 2,
            StoreError::NotInStore(_) => 3,
            StoreError::ConfirmationMismatch => 4,
            StoreError::ToolNotFound { .. } | StoreError::ToolFailed { .. } => 5,
            StoreError::Io(_) | StoreError::IsDirectory(_) => 6,
            // Passthrough forwards the child's own code.
            StoreError::GitExit(code) => *code,
            StoreError::Other(_) => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;
