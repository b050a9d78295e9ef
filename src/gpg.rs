//! GPG integration: encrypting pass-files, decrypting them to memory.

use crate::error::{Result, StoreError};
use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

/// External encryption tool operations.
pub struct Gpg;

impl Gpg {
    /// Locate the gpg binary, preferring `gpg2`.
    pub fn binary() -> Result<&'static str> {
        for candidate in ["gpg2", "gpg"] {
            if which::which(candidate).is_ok() {
                return Ok(candidate);
            }
        }
        Err(StoreError::ToolNotFound { tool: "gpg2" })
    }

    /// Encrypt `secret` for `recipient` into `out_path`.
    ///
    /// The plaintext travels on the child's stdin, which is closed before
    /// waiting. One invocation, no retry; a nonzero exit gives no
    /// guarantee about partial output at `out_path`.
    pub fn encrypt_to_file(recipient: &str, secret: &[u8], out_path: &Path) -> Result<()> {
        let bin = Self::binary()?;

        let mut child = Command::new(bin)
            .args(["-e", "-r", recipient, "--batch", "--use-agent", "--no-tty", "-o"])
            .arg(out_path)
            .stdin(Stdio::piped())
            .spawn()?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(secret)?;
        }

        let status = child.wait()?;
        if !status.success() {
            return Err(StoreError::ToolFailed { tool: bin, status });
        }
        Ok(())
    }

    /// Decrypt `path`, returning the plaintext only on a zero exit.
    ///
    /// The tool's own stderr stays visible; nothing captured on stdout is
    /// released unless the exit status is exactly zero.
    pub fn decrypt_to_bytes(path: &Path) -> Result<Vec<u8>> {
        let bin = Self::binary()?;

        let output = Command::new(bin)
            .args(["--quiet", "--batch", "--use-agent", "-d"])
            .arg(path)
            .stderr(Stdio::inherit())
            .output()?;

        if !output.status.success() {
            return Err(StoreError::ToolFailed {
                tool: bin,
                status: output.status,
            });
        }
        Ok(output.stdout)
    }
}
