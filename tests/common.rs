// tests/common.rs

use ghparts::core_types::RepoCoordinate;
use ghparts::errors::{Error, Result};
use ghparts::github::{Endpoints, HttpResponse, Transport};
use std::collections::{HashMap, VecDeque};
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::Mutex;
use walkdir::WalkDir;

// Helper function to get the binary command
#[allow(dead_code)] // This is used by the CLI tests, but not all.
pub fn ghparts_cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("ghparts"))
}

/// The coordinate every fake repository lives at.
#[allow(dead_code)]
pub fn coordinate() -> RepoCoordinate {
    RepoCoordinate::new("acme", "sample", Some("main"))
}

/// An in-memory GitHub: scripted replies per URL, every request recorded.
///
/// Each URL has a queue of replies and the last one repeats. Unknown URLs answer 404.
#[allow(dead_code)]
#[derive(Debug, Default)]
pub struct FakeGitHub {
    endpoints: Endpoints,
    routes: Mutex<HashMap<String, VecDeque<Option<HttpResponse>>>>,
    requests: Mutex<Vec<String>>,
}

#[allow(dead_code)]
impl FakeGitHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answers `GET contents/<path>` with `json`.
    pub fn contents(self, path: &str, json: &str) -> Self {
        let url = self.endpoints.contents_url(&coordinate(), path);
        self.reply(url, 200, json)
    }

    /// Answers `GET git/trees/<identifier>?recursive=1` with `json`.
    pub fn tree(self, identifier: &str, json: &str) -> Self {
        let url = self.endpoints.tree_url(&coordinate(), identifier);
        self.reply(url, 200, json)
    }

    /// Answers `GET branches/main` with a commit sha.
    pub fn branch(self, sha: &str) -> Self {
        let url = self.endpoints.branch_url(&coordinate());
        let body = format!(r#"{{"name": "main", "commit": {{"sha": "{}"}}}}"#, sha);
        self.reply(url, 200, body)
    }

    /// Serves `body` as the raw content of `path`.
    pub fn file(self, path: &str, body: &str) -> Self {
        let url = self.raw_url(path);
        self.reply(url, 200, body)
    }

    /// Answers the raw content of `path` with `status`.
    pub fn file_status(self, path: &str, status: u16) -> Self {
        let url = self.raw_url(path);
        self.reply(url, status, "")
    }

    /// Fails the raw content request of `path` at the transport level.
    pub fn file_unreachable(self, path: &str) -> Self {
        let url = self.raw_url(path);
        self.routes.lock().unwrap().entry(url).or_default().push_back(None);
        self
    }

    pub fn reply(self, url: String, status: u16, body: impl Into<Vec<u8>>) -> Self {
        self.routes
            .lock()
            .unwrap()
            .entry(url)
            .or_default()
            .push_back(Some(HttpResponse::new(status, body)));
        self
    }

    pub fn raw_url(&self, path: &str) -> String {
        self.endpoints.raw_url(&coordinate(), path)
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    pub fn count(&self, needle: &str) -> usize {
        self.requests().iter().filter(|url| url.contains(needle)).count()
    }
}

impl Transport for FakeGitHub {
    fn get(&self, url: &str) -> Result<HttpResponse> {
        self.requests.lock().unwrap().push(url.to_string());
        let mut routes = self.routes.lock().unwrap();
        let reply = match routes.get_mut(url) {
            Some(queue) if queue.len() > 1 => queue.pop_front(),
            Some(queue) => queue.front().cloned(),
            None => Some(Some(HttpResponse::new(404, r#"{"message": "Not Found"}"#))),
        };
        match reply.flatten() {
            Some(response) => Ok(response),
            None => Err(Error::Transport {
                url: url.to_string(),
                reason: "connection refused".to_string(),
            }),
        }
    }
}

/// Every file below `root`, as sorted `/`-separated relative paths.
#[allow(dead_code)]
pub fn written_files(root: &Path) -> Vec<String> {
    let mut files: Vec<String> = WalkDir::new(root)
        .min_depth(1)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| relative(root, entry.path()))
        .collect();
    files.sort();
    files
}

/// Every directory below `root`, as sorted `/`-separated relative paths.
#[allow(dead_code)]
pub fn written_dirs(root: &Path) -> Vec<String> {
    let mut dirs: Vec<String> = WalkDir::new(root)
        .min_depth(1)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_dir())
        .map(|entry| relative(root, entry.path()))
        .collect();
    dirs.sort();
    dirs
}

#[allow(dead_code)]
fn relative(root: &Path, path: &Path) -> String {
    let relative: PathBuf = path.strip_prefix(root).unwrap_or(path).to_path_buf();
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/")
}
