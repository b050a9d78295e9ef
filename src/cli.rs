//! Command-line interface implementation.

use crate::config::StoreConfig;
use crate::error::Result;
use crate::git::GitContext;
use crate::gpg::Gpg;
use crate::store;
use crate::tree;
use crate::utils::{self, success};
use clap::{Parser, Subcommand};
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use zeroize::Zeroize;

/// Password store front-end: gpg for crypto, git for history.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Store root directory
    #[arg(
        long = "dir",
        global = true,
        env = "PASSWORD_STORE_DIR",
        help = "Store root (default: ~/.password-store)"
    )]
    pub dir: Option<PathBuf>,

    /// Git metadata directory
    #[arg(
        long = "git-dir",
        global = true,
        env = "PASSWORD_STORE_GIT",
        help = "Git directory (default: <store>/.git)"
    )]
    pub git_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a new password store
    Init {
        /// Where to create the password store
        #[arg(short, long)]
        path: Option<PathBuf>,

        /// Git url to clone the store from
        #[arg(short, long)]
        clone: Option<String>,

        /// Gpg id authorized to read the store
        gpg_id: String,
    },

    /// Insert a new password
    Insert {
        /// Entry name (e.g. email/work)
        path: String,
    },

    /// Decrypt and print a password
    Show {
        /// Entry name
        path: String,
    },

    /// List entries as a tree
    Ls {
        /// Subfolder to list
        #[arg(default_value = "")]
        subfolder: String,
    },

    /// Find entries matching any of the search terms
    Find {
        /// Search terms
        #[arg(required = true)]
        search_terms: Vec<String>,
    },

    /// Remove an entry
    Rm {
        /// Remove directories and their contents
        #[arg(short, long)]
        recursive: bool,

        /// Entry name
        path: String,
    },

    /// Rename an entry or folder
    Mv {
        /// Current entry name
        old_path: String,

        /// New entry name
        new_path: String,
    },

    /// Run a git command against the store repository
    Git {
        /// Arguments forwarded verbatim to git
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
}

impl Cli {
    /// Execute the parsed command.
    pub fn execute(&self) -> Result<()> {
        let config = StoreConfig::load(self.dir.clone(), self.git_dir.clone());

        match &self.command {
            Some(Commands::Init {
                path,
                clone,
                gpg_id,
            }) => self.init(&config, path.clone(), clone.as_deref(), gpg_id),
            Some(Commands::Insert { path }) => self.insert(&config, path),
            Some(Commands::Show { path }) => self.show(&config, path),
            Some(Commands::Ls { subfolder }) => self.ls(&config, subfolder),
            Some(Commands::Find { search_terms }) => self.find(&config, search_terms),
            Some(Commands::Rm { recursive, path }) => self.rm(&config, path, *recursive),
            Some(Commands::Mv { old_path, new_path }) => self.mv(&config, old_path, new_path),
            Some(Commands::Git { args }) => self.git(&config, args),
            // Listing the whole store is the default command
            None => self.ls(&config, ""),
        }
    }

    /// Initialize the store and record the encryption identity.
    fn init(
        &self,
        config: &StoreConfig,
        path: Option<PathBuf>,
        clone: Option<&str>,
        gpg_id: &str,
    ) -> Result<()> {
        let path = path.unwrap_or_else(|| config.root().to_path_buf());
        fs::create_dir_all(&path)?;

        if let Some(url) = clone {
            let git_dir = self.git_dir.clone().unwrap_or_else(|| path.join(".git"));
            let git = GitContext::new(&path, &git_dir);
            git.clone_into(&path, url)?;
        }

        store::init_store(&path, gpg_id)?;
        success(&format!("Password store initialized for {gpg_id}."));
        Ok(())
    }

    /// Encrypt a new entry from a prompted or piped secret.
    fn insert(&self, config: &StoreConfig, name: &str) -> Result<()> {
        let gpg_id = config.require_gpg_id()?;

        let passfile = store::passfile_path(config.root(), name);
        if let Some(parent) = passfile.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut secret = if atty::is(atty::Stream::Stdin) {
            utils::prompt_secret_with_confirmation(&format!("Enter password for {name}"))?
        } else {
            utils::read_secret_from_stdin()?
        };

        let encrypted = Gpg::encrypt_to_file(gpg_id, secret.as_bytes(), &passfile);
        secret.zeroize();
        encrypted?;

        success(&format!("Stored {name} in the password store"));
        Ok(())
    }

    /// Decrypt an entry and print it.
    fn show(&self, config: &StoreConfig, name: &str) -> Result<()> {
        let passfile = store::passfile_path(config.root(), name);
        let plaintext = Gpg::decrypt_to_bytes(&passfile)?;

        let mut stdout = std::io::stdout();
        stdout.write_all(&plaintext)?;
        if !plaintext.ends_with(b"\n") {
            writeln!(stdout)?;
        }
        Ok(())
    }

    /// List the store, or a subfolder of it, as a retitled tree.
    fn ls(&self, config: &StoreConfig, subfolder: &str) -> Result<()> {
        let dir = config.root().join(subfolder);
        let listing = tree::render(&dir, None)?;
        let listing = tree::replace_header(&tree::strip_suffix(&listing), tree::LIST_TITLE);
        println!("{}", listing.trim());
        Ok(())
    }

    /// List entries matching any search term.
    fn find(&self, config: &StoreConfig, terms: &[String]) -> Result<()> {
        println!("Search Terms: {}", terms.join(","));

        let pattern = tree::find_pattern(terms);
        let listing = tree::render(config.root(), Some(&pattern))?;
        let listing = tree::drop_header(&tree::strip_suffix(&listing));
        println!("{}", listing.trim());
        Ok(())
    }

    /// Remove an entry.
    fn rm(&self, config: &StoreConfig, name: &str, recursive: bool) -> Result<()> {
        store::remove_entry(config.root(), name, recursive)?;
        success(&format!("Removed {name}"));
        Ok(())
    }

    /// Rename an entry or folder.
    fn mv(&self, config: &StoreConfig, old: &str, new: &str) -> Result<()> {
        store::rename_entry(config.root(), old, new)?;
        success(&format!("Moved {old} to {new}"));
        Ok(())
    }

    /// Forward a git command; `git init` also sets up the gpg diff driver.
    fn git(&self, config: &StoreConfig, args: &[String]) -> Result<()> {
        let git = GitContext::new(config.root(), config.git_dir());
        git.passthrough(args)?;

        if args.first().map(String::as_str) == Some("init") {
            git.add_and_commit(".", Some("Add current contents of password store."))?;

            fs::write(
                config.root().join(store::GIT_ATTRIBUTES_FILE),
                store::GIT_ATTRIBUTES_CONTENT,
            )?;
            git.add_and_commit(
                store::GIT_ATTRIBUTES_FILE,
                Some("Configure git repository for gpg file diff."),
            )?;

            git.config_local("diff.gpg.binary", "true")?;
            git.config_local("diff.gpg.textconv", "gpg -d")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_subcommands() {
        assert!(Cli::try_parse_from(["passtore", "init", "alice@example.com"]).is_ok());
        assert!(Cli::try_parse_from(["passtore", "insert", "email/work"]).is_ok());
        assert!(Cli::try_parse_from(["passtore", "show", "email/work"]).is_ok());
        assert!(Cli::try_parse_from(["passtore", "ls"]).is_ok());
        assert!(Cli::try_parse_from(["passtore", "ls", "email"]).is_ok());
        assert!(Cli::try_parse_from(["passtore", "find", "foo", "bar"]).is_ok());
        assert!(Cli::try_parse_from(["passtore", "rm", "-r", "email"]).is_ok());
        assert!(Cli::try_parse_from(["passtore", "mv", "a", "b"]).is_ok());
    }

    #[test]
    fn test_no_subcommand_is_valid() {
        let cli = Cli::try_parse_from(["passtore"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_find_requires_terms() {
        assert!(Cli::try_parse_from(["passtore", "find"]).is_err());
    }

    #[test]
    fn test_git_keeps_hyphenated_args() {
        let cli = Cli::try_parse_from(["passtore", "git", "log", "--oneline", "-n", "3"]).unwrap();
        match cli.command {
            Some(Commands::Git { args }) => {
                assert_eq!(args, vec!["log", "--oneline", "-n", "3"]);
            }
            other => panic!("expected git subcommand, got {other:?}"),
        }
    }

    #[test]
    fn test_init_flags() {
        let cli = Cli::try_parse_from([
            "passtore",
            "init",
            "--path",
            "/tmp/store",
            "--clone",
            "git@example.com:store.git",
            "alice@example.com",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Init {
                path,
                clone,
                gpg_id,
            }) => {
                assert_eq!(path, Some(PathBuf::from("/tmp/store")));
                assert_eq!(clone.as_deref(), Some("git@example.com:store.git"));
                assert_eq!(gpg_id, "alice@example.com");
            }
            other => panic!("expected init subcommand, got {other:?}"),
        }
    }

    #[test]
    fn test_store_dir_flag_is_global() {
        let cli = Cli::try_parse_from(["passtore", "ls", "--dir", "/tmp/store"]).unwrap();
        assert_eq!(cli.dir, Some(PathBuf::from("/tmp/store")));
    }
}
