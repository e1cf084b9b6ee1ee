// tests/download.rs

mod common;

use common::{written_dirs, written_files, FakeGitHub};
use ghparts::errors::Error;
use ghparts::{download_with, plan, CancellationToken, Config, ConfigBuilder, Layout};
use std::fs;
use std::path::Path;
use std::time::Duration;
use tempfile::tempdir;

const ROOT_LISTING: &str = r#"[
    {"name": "README.md", "path": "README.md", "type": "file", "sha": "r1"},
    {"name": "docs", "path": "docs", "type": "dir", "sha": "d1"},
    {"name": "src", "path": "src", "type": "dir", "sha": "s1"}
]"#;

const DOCS_TREE: &str = r#"{
    "sha": "d1",
    "tree": [
        {"path": "readme.md", "mode": "100644", "type": "blob", "sha": "b1"},
        {"path": "img", "mode": "040000", "type": "tree", "sha": "t1"},
        {"path": "img/logo.png", "mode": "100644", "type": "blob", "sha": "b2"}
    ],
    "truncated": false
}"#;

fn docs_repo() -> FakeGitHub {
    FakeGitHub::new()
        .contents("", ROOT_LISTING)
        .tree("d1", DOCS_TREE)
        .file("README.md", "# Sample\n")
        .file("docs/readme.md", "Read me.\n")
        .file("docs/img/logo.png", "\u{89}PNG")
}

fn config(target: &Path, path: &str) -> ghparts::Result<Config> {
    ConfigBuilder::new()
        .repo("acme/sample/main")
        .path(path)
        .target_dir(target)
        .workers(4)
        .retries(3)
        .retry_delay(Duration::ZERO)
        .build()
}

#[test]
fn test_directory_contents_land_in_target() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let github = docs_repo();

    let report = download_with(&github, &config(temp.path(), "docs")?, &CancellationToken::new(), None)?;

    assert!(report.is_success());
    assert_eq!(written_files(temp.path()), vec!["img/logo.png", "readme.md"]);
    assert_eq!(written_dirs(temp.path()), vec!["img"]);
    assert_eq!(fs::read_to_string(temp.path().join("readme.md"))?, "Read me.\n");
    assert_eq!(fs::read_to_string(temp.path().join("img/logo.png"))?, "\u{89}PNG");
    assert_eq!(github.count("/git/trees/"), 1);
    Ok(())
}

#[test]
fn test_nested_layout_keeps_directory_name() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let github = docs_repo();
    let config = Config {
        layout: Layout::Nested,
        ..config(temp.path(), "docs")?
    };

    download_with(&github, &config, &CancellationToken::new(), None)?.into_result()?;

    assert_eq!(
        written_files(temp.path()),
        vec!["docs/img/logo.png", "docs/readme.md"]
    );
    Ok(())
}

#[test]
fn test_single_file_fast_path() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let github = docs_repo();

    let report = download_with(&github, &config(temp.path(), "README.md")?, &CancellationToken::new(), None)?;

    assert_eq!(report.files_written(), 1);
    assert_eq!(written_files(temp.path()), vec!["README.md"]);
    assert!(written_dirs(temp.path()).is_empty());
    assert_eq!(fs::read_to_string(temp.path().join("README.md"))?, "# Sample\n");
    assert_eq!(github.count("/git/trees/"), 0);
    Ok(())
}

#[test]
fn test_missing_listing_fails_without_writes() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    // No routes at all: the listing request answers 404.
    let github = FakeGitHub::new();

    let result = download_with(&github, &config(temp.path(), "docs")?, &CancellationToken::new(), None);

    assert!(matches!(result, Err(Error::NotFound(_))));
    assert_eq!(github.requests().len(), 1);
    assert!(fs::read_dir(temp.path())?.next().is_none());
    Ok(())
}

#[test]
fn test_partial_failure_names_failed_items() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let tree = r#"{"tree": [
        {"path": "a.txt", "type": "blob", "sha": "1"},
        {"path": "b.txt", "type": "blob", "sha": "2"},
        {"path": "c.txt", "type": "blob", "sha": "3"},
        {"path": "d.txt", "type": "blob", "sha": "4"}
    ]}"#;
    let github = FakeGitHub::new()
        .contents("", ROOT_LISTING)
        .tree("d1", tree)
        .file("docs/a.txt", "A")
        .file_status("docs/b.txt", 500)
        .file("docs/c.txt", "C")
        .file_unreachable("docs/d.txt");

    let report = download_with(&github, &config(temp.path(), "docs")?, &CancellationToken::new(), None)?;

    assert_eq!(github.count("docs/b.txt"), 3);
    assert_eq!(github.count("docs/d.txt"), 3);
    assert_eq!(written_files(temp.path()), vec!["a.txt", "c.txt"]);
    assert_eq!(fs::read_to_string(temp.path().join("c.txt"))?, "C");
    match report.into_result() {
        Err(Error::PartialFailure { failed, total }) => {
            assert_eq!(total, 4);
            let mut paths: Vec<String> = failed.into_iter().map(|f| f.remote_path).collect();
            paths.sort();
            assert_eq!(paths, vec!["docs/b.txt", "docs/d.txt"]);
        }
        other => panic!("Expected PartialFailure, got {:?}", other),
    }
    Ok(())
}

#[test]
fn test_flaky_file_succeeds_on_retry() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let tree = r#"{"tree": [{"path": "a.txt", "type": "blob", "sha": "1"}]}"#;
    let github = FakeGitHub::new()
        .contents("", ROOT_LISTING)
        .tree("d1", tree)
        .file_status("docs/a.txt", 502)
        .file("docs/a.txt", "A");

    download_with(&github, &config(temp.path(), "docs")?, &CancellationToken::new(), None)?.into_result()?;

    assert_eq!(github.count("docs/a.txt"), 2);
    assert_eq!(fs::read_to_string(temp.path().join("a.txt"))?, "A");
    Ok(())
}

#[test]
fn test_traversal_entries_are_refused() -> Result<(), Box<dyn std::error::Error>> {
    let outer = tempdir()?;
    let target = outer.path().join("target");
    let tree = r#"{"tree": [
        {"path": "ok.txt", "type": "blob", "sha": "1"},
        {"path": "../escape.txt", "type": "blob", "sha": "2"},
        {"path": "/etc/owned", "type": "blob", "sha": "3"},
        {"path": "deep/../../escape2.txt", "type": "blob", "sha": "4"}
    ]}"#;
    let github = FakeGitHub::new()
        .contents("", ROOT_LISTING)
        .tree("d1", tree)
        .file("docs/ok.txt", "ok")
        .file("escape.txt", "evil")
        .file("escape2.txt", "evil");

    let report = download_with(&github, &config(&target, "docs")?, &CancellationToken::new(), None)?;

    assert_eq!(written_files(outer.path()), vec!["target/ok.txt"]);
    assert_eq!(report.failed.len(), 3);
    assert!(report.failed.iter().all(|f| f.reason.starts_with("refused")));
    assert_eq!(github.count("escape"), 0);
    assert!(matches!(report.into_result(), Err(Error::PartialFailure { .. })));
    Ok(())
}

#[test]
fn test_two_runs_produce_identical_trees() -> Result<(), Box<dyn std::error::Error>> {
    let first = tempdir()?;
    let second = tempdir()?;

    for target in [first.path(), second.path()] {
        download_with(&docs_repo(), &config(target, "docs")?, &CancellationToken::new(), None)?
            .into_result()?;
    }

    let files = written_files(first.path());
    assert_eq!(files, written_files(second.path()));
    for file in files {
        assert_eq!(fs::read(first.path().join(&file))?, fs::read(second.path().join(&file))?);
    }
    Ok(())
}

#[test]
fn test_rerun_into_same_directory_overwrites() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    fs::write(temp.path().join("readme.md"), "stale")?;
    fs::write(temp.path().join("unrelated.txt"), "keep")?;

    download_with(&docs_repo(), &config(temp.path(), "docs")?, &CancellationToken::new(), None)?
        .into_result()?;

    assert_eq!(fs::read_to_string(temp.path().join("readme.md"))?, "Read me.\n");
    assert_eq!(fs::read_to_string(temp.path().join("unrelated.txt"))?, "keep");
    Ok(())
}

#[test]
fn test_whole_repository_through_branch_head() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let tree = r#"{"tree": [
        {"path": "README.md", "type": "blob", "sha": "r1"},
        {"path": "docs", "type": "tree", "sha": "d1"},
        {"path": "docs/readme.md", "type": "blob", "sha": "b1"},
        {"path": "vendor", "type": "commit", "sha": "c1"}
    ]}"#;
    let github = docs_repo().branch("head123").tree("head123", tree);

    let report = download_with(&github, &config(temp.path(), "")?, &CancellationToken::new(), None)?;

    assert!(report.is_success());
    assert_eq!(written_files(temp.path()), vec!["README.md", "docs/readme.md"]);
    assert_eq!(github.count("/contents"), 0);
    Ok(())
}

#[test]
fn test_whole_repository_at_tag_uses_ref_as_tree() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let tree = r#"{"tree": [{"path": "README.md", "type": "blob", "sha": "r1"}]}"#;
    // No branch route: `main` is treated as a tag and listed directly.
    let github = docs_repo().tree("main", tree);

    download_with(&github, &config(temp.path(), "/")?, &CancellationToken::new(), None)?.into_result()?;

    assert_eq!(written_files(temp.path()), vec!["README.md"]);
    Ok(())
}

#[test]
fn test_plan_does_not_touch_disk_or_raw_host() -> Result<(), Box<dyn std::error::Error>> {
    let outer = tempdir()?;
    let target = outer.path().join("not-yet");
    let github = docs_repo();

    let queue = plan(&github, &config(&target, "docs")?, &CancellationToken::new())?;

    assert_eq!(queue.len(), 3);
    assert_eq!(queue.file_count(), 2);
    assert!(!target.exists());
    assert_eq!(github.count("raw.githubusercontent.com"), 0);
    Ok(())
}

#[test]
fn test_upstream_error_is_not_not_found() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let github = FakeGitHub::new();
    let github = {
        let url = ghparts::github::Endpoints::default().contents_url(&common::coordinate(), "");
        github.reply(url, 403, r#"{"message": "API rate limit exceeded"}"#)
    };

    let result = download_with(&github, &config(temp.path(), "docs")?, &CancellationToken::new(), None);

    assert!(matches!(result, Err(Error::UpstreamError { status: 403, .. })));
    assert!(fs::read_dir(temp.path())?.next().is_none());
    Ok(())
}
