// src/github/transport.rs
//! The HTTP capability used by every network stage.
//!
//! The pipeline only needs "GET this URL and give me the status and the body".
//! That is captured by the [`Transport`] trait so that tests (and callers with
//! special networking needs) can plug in their own implementation. The default,
//! [`HttpTransport`], wraps a blocking `reqwest` client.

use crate::errors::{Error, Result};
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use std::time::Duration;

/// Status and body of a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub status: u16,
    /// The full response body.
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Creates a response from a status code and body.
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Returns `true` for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// A capability that performs GET requests.
///
/// Implementations return `Err` only for transport-level failures (connection,
/// TLS, timeout). Any HTTP status, including 4xx/5xx, is an `Ok` response; the
/// caller decides what the status means.
///
/// # Examples
///
/// ```
/// use ghparts::github::{HttpResponse, Transport};
/// use ghparts::errors::Result;
///
/// #[derive(Debug)]
/// struct AlwaysTeapot;
///
/// impl Transport for AlwaysTeapot {
///     fn get(&self, _url: &str) -> Result<HttpResponse> {
///         Ok(HttpResponse::new(418, "short and stout"))
///     }
/// }
///
/// let response = AlwaysTeapot.get("https://example.invalid/").unwrap();
/// assert!(!response.is_success());
/// ```
pub trait Transport: Send + Sync + std::fmt::Debug {
    /// Performs a GET request and returns the complete response.
    fn get(&self, url: &str) -> Result<HttpResponse>;
}

/// The default [`Transport`], backed by `reqwest::blocking`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Builds a client with GitHub API default headers and an optional request timeout.
    pub fn new(timeout: Option<Duration>) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github.v3+json"),
        );
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("ghparts/", env!("CARGO_PKG_VERSION"))),
        );

        let mut builder = Client::builder().default_headers(headers);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| Error::Transport {
            url: String::new(),
            reason: format!("failed to build HTTP client: {}", e),
        })?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn get(&self, url: &str) -> Result<HttpResponse> {
        let to_transport_error = |e: reqwest::Error| Error::Transport {
            url: url.to_string(),
            reason: e.to_string(),
        };
        let response = self.client.get(url).send().map_err(to_transport_error)?;
        let status = response.status().as_u16();
        let body = response.bytes().map_err(to_transport_error)?;
        Ok(HttpResponse {
            status,
            body: body.to_vec(),
        })
    }
}
