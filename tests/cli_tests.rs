// End-to-end CLI tests for the flows that need no external collaborator.

use assert_cmd::Command;
use predicates::prelude::*;
use serial_test::serial;
use std::fs;
use tempfile::tempdir;

fn passtore() -> Command {
    let mut cmd = Command::cargo_bin("passtore").unwrap();
    cmd.env_remove("PASSWORD_STORE_DIR")
        .env_remove("PASSWORD_STORE_GIT");
    cmd
}

#[test]
fn test_init_records_identity() {
    let dir = tempdir().unwrap();
    let root = dir.path().join("store");

    passtore()
        .args(["init", "--path"])
        .arg(&root)
        .arg("alice@example.com")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Password store initialized for alice@example.com.",
        ));

    let marker = fs::read_to_string(root.join(".gpg-id")).unwrap();
    assert_eq!(marker, "alice@example.com");
}

#[test]
fn test_init_is_idempotent_for_equal_id() {
    let dir = tempdir().unwrap();

    for _ in 0..2 {
        passtore()
            .args(["init", "--path"])
            .arg(dir.path())
            .arg("alice@example.com")
            .assert()
            .success();
    }

    let marker = fs::read_to_string(dir.path().join(".gpg-id")).unwrap();
    assert_eq!(marker, "alice@example.com");
}

#[test]
fn test_init_overwrites_changed_id() {
    // A new identity replaces the recorded one instead of accumulating
    let dir = tempdir().unwrap();

    passtore()
        .args(["init", "--path"])
        .arg(dir.path())
        .arg("alice@example.com")
        .assert()
        .success();
    passtore()
        .args(["init", "--path"])
        .arg(dir.path())
        .arg("bob@example.com")
        .assert()
        .success();

    let marker = fs::read_to_string(dir.path().join(".gpg-id")).unwrap();
    assert_eq!(marker, "bob@example.com");
}

#[test]
fn test_rm_missing_entry_reports_not_in_store() {
    let dir = tempdir().unwrap();

    passtore()
        .arg("--dir")
        .arg(dir.path())
        .args(["rm", "nothing/here"])
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains(
            "nothing/here is not in the password store",
        ));

    // No filesystem change
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn test_rm_directory_requires_recursive_flag() {
    let dir = tempdir().unwrap();
    fs::create_dir(dir.path().join("email")).unwrap();
    fs::write(dir.path().join("email/work.gpg"), b"ciphertext").unwrap();

    passtore()
        .arg("--dir")
        .arg(dir.path())
        .args(["rm", "email"])
        .assert()
        .failure()
        .code(6)
        .stderr(predicate::str::contains("--recursive"));
    assert!(dir.path().join("email/work.gpg").exists());

    passtore()
        .arg("--dir")
        .arg(dir.path())
        .args(["rm", "--recursive", "email"])
        .assert()
        .success();
    assert!(!dir.path().join("email").exists());
}

#[test]
fn test_rm_leaf_entry() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("site.gpg"), b"ciphertext").unwrap();

    passtore()
        .arg("--dir")
        .arg(dir.path())
        .args(["rm", "site"])
        .assert()
        .success();
    assert!(!dir.path().join("site.gpg").exists());
}

#[test]
fn test_mv_missing_entry_reports_not_in_store() {
    let dir = tempdir().unwrap();

    passtore()
        .arg("--dir")
        .arg(dir.path())
        .args(["mv", "ghost", "dest"])
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("ghost is not in the password store"));
}

#[test]
fn test_mv_renames_leaf_entry() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.gpg"), b"ciphertext").unwrap();

    passtore()
        .arg("--dir")
        .arg(dir.path())
        .args(["mv", "a", "b"])
        .assert()
        .success();

    assert!(!dir.path().join("a.gpg").exists());
    assert!(dir.path().join("b.gpg").is_file());
}

#[test]
fn test_insert_without_identity_fails_fast() {
    let dir = tempdir().unwrap();

    passtore()
        .arg("--dir")
        .arg(dir.path())
        .args(["insert", "email/work"])
        .write_stdin("secret123\n")
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("No gpg id set for this store"));

    // Nothing was encrypted or written
    assert!(!dir.path().join("email/work.gpg").exists());
}

#[test]
#[serial]
fn test_store_dir_env_var_is_honored() {
    let dir = tempdir().unwrap();

    passtore()
        .env("PASSWORD_STORE_DIR", dir.path())
        .args(["init", "carol@example.com"])
        .assert()
        .success();

    let marker = fs::read_to_string(dir.path().join(".gpg-id")).unwrap();
    assert_eq!(marker, "carol@example.com");
}

#[test]
fn test_help_lists_subcommands() {
    passtore()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("insert"))
        .stdout(predicate::str::contains("show"))
        .stdout(predicate::str::contains("find"));
}
