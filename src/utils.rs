//! Shared helpers: status output and secret acquisition.

use crate::error::{Result, StoreError};
use colored::*;

/// Print an error message and exit.
pub fn error_exit(message: &str, code: i32) -> ! {
    eprintln!("{} {}", "Error:".red().bold(), message);
    std::process::exit(code);
}

/// Print a success message.
pub fn success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

/// Print a warning message.
pub fn warning(message: &str) {
    println!("{} {}", "Warning:".yellow(), message);
}

/// Prompt for a secret twice with hidden input.
///
/// The two entries must match; a mismatch aborts before any encryption
/// tool is involved.
pub fn prompt_secret_with_confirmation(prompt: &str) -> Result<String> {
    use dialoguer::Password;

    let secret = Password::new()
        .with_prompt(prompt)
        .interact()
        .map_err(|e| StoreError::Other(e.to_string()))?;

    let confirm = Password::new()
        .with_prompt("Retype to confirm")
        .interact()
        .map_err(|e| StoreError::Other(e.to_string()))?;

    if secret != confirm {
        return Err(StoreError::ConfirmationMismatch);
    }

    Ok(secret)
}

/// Read a secret from piped stdin: first line, no confirmation.
pub fn read_secret_from_stdin() -> Result<String> {
    use std::io::BufRead;

    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    while line.ends_with('\n') || line.ends_with('\r') {
        line.pop();
    }
    Ok(line)
}
