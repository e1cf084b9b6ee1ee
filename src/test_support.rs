// src/test_support.rs
//! In-memory transport shared by the unit tests.

use crate::errors::{Error, Result};
use crate::github::{HttpResponse, Transport};
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

/// A scripted reply: an HTTP response or a transport failure.
#[derive(Debug, Clone)]
pub(crate) enum Reply {
    Response(HttpResponse),
    TransportError(String),
}

/// Serves scripted replies per URL and records every request.
///
/// Each URL has a queue of replies; the last one repeats once the queue is
/// drained. Unknown URLs answer 404.
#[derive(Debug, Default)]
pub(crate) struct MockTransport {
    routes: Mutex<HashMap<String, VecDeque<Reply>>>,
    requests: Mutex<Vec<String>>,
}

impl MockTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn reply(self, url: impl Into<String>, status: u16, body: impl Into<Vec<u8>>) -> Self {
        self.push(url.into(), Reply::Response(HttpResponse::new(status, body)))
    }

    pub(crate) fn fail(self, url: impl Into<String>, reason: &str) -> Self {
        self.push(url.into(), Reply::TransportError(reason.to_string()))
    }

    fn push(self, url: String, reply: Reply) -> Self {
        self.routes
            .lock()
            .unwrap()
            .entry(url)
            .or_default()
            .push_back(reply);
        self
    }

    pub(crate) fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    pub(crate) fn count(&self, predicate: impl Fn(&str) -> bool) -> usize {
        self.requests().iter().filter(|url| predicate(url)).count()
    }
}

impl Transport for MockTransport {
    fn get(&self, url: &str) -> Result<HttpResponse> {
        self.requests.lock().unwrap().push(url.to_string());
        let mut routes = self.routes.lock().unwrap();
        let reply = match routes.get_mut(url) {
            Some(queue) if queue.len() > 1 => queue.pop_front(),
            Some(queue) => queue.front().cloned(),
            None => None,
        };
        match reply {
            Some(Reply::Response(response)) => Ok(response),
            Some(Reply::TransportError(reason)) => Err(Error::Transport {
                url: url.to_string(),
                reason,
            }),
            None => Ok(HttpResponse::new(404, "{\"message\":\"Not Found\"}")),
        }
    }
}
