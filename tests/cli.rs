// tests/cli.rs

mod common;

use assert_cmd::prelude::*;
use common::ghparts_cmd;
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn test_help_lists_options() -> Result<(), Box<dyn std::error::Error>> {
    ghparts_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--output"))
        .stdout(predicate::str::contains("--ref"))
        .stdout(predicate::str::contains("--workers"))
        .stdout(predicate::str::contains("--nested"));
    Ok(())
}

#[test]
fn test_missing_repo_argument() -> Result<(), Box<dyn std::error::Error>> {
    ghparts_cmd()
        .assert()
        .failure()
        .stderr(predicate::str::contains("<REPO>"));
    Ok(())
}

#[test]
fn test_invalid_repository_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;

    ghparts_cmd()
        .arg("not-a-repo")
        .current_dir(temp.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid repository 'not-a-repo'"));

    assert!(std::fs::read_dir(temp.path())?.next().is_none());
    Ok(())
}

#[test]
fn test_worker_count_out_of_range() -> Result<(), Box<dyn std::error::Error>> {
    ghparts_cmd()
        .args(["acme/sample", "--workers", "0"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid value for 'workers'"));
    Ok(())
}

#[test]
fn test_parent_segments_in_path_are_rejected_before_any_request() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;

    ghparts_cmd()
        .args(["acme/sample", "docs/../../etc"])
        // An unroutable API host: the command must fail before using it.
        .args(["--api-url", "http://127.0.0.1:9/"])
        .args(["-o", "out"])
        .current_dir(temp.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid path"));

    assert!(!temp.path().join("out").exists());
    Ok(())
}

#[test]
fn test_unreachable_api_fails_with_exit_code_one() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;

    ghparts_cmd()
        .args(["acme/sample", "docs"])
        .args(["--api-url", "http://127.0.0.1:9/"])
        .args(["--timeout", "5", "-o", "out"])
        .current_dir(temp.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Error:"));

    assert!(!temp.path().join("out").exists());
    Ok(())
}
