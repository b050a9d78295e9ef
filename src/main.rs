//! Main entry point for passtore.

use clap::Parser;
use passtore::cli::Cli;
use passtore::utils::error_exit;

fn main() {
    // Set up colored output for Windows
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();

    if let Err(e) = cli.execute() {
        error_exit(&e.to_string(), e.exit_code());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing() {
        // Test that CLI can be parsed without panicking
        let cli = Cli::try_parse_from(["passtore", "ls"]);
        assert!(cli.is_ok());

        let cli = Cli::try_parse_from(["passtore", "rm", "--recursive", "email"]);
        assert!(cli.is_ok());
    }
}
