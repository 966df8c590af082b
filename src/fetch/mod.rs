//! Outbound HTTP fetch capability.
//!
//! The core only ever sees `fetch(url) -> body-or-error`; the real client is
//! behind the [`Fetch`] trait so handlers can be exercised with doubles. No
//! retries anywhere: a failed fetch is surfaced once.

use std::future::Future;
use std::pin::Pin;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use thiserror::Error;

/// Outbound requests block for at most this long.
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(20);

/// Errors produced by the fetch capability.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("{0}")]
    Unavailable(String),
}

/// Boxed future returned by [`Fetch::fetch`].
pub type FetchFuture<'a> = Pin<Box<dyn Future<Output = Result<String, FetchError>> + Send + 'a>>;

/// The outbound fetch capability handed to handlers.
///
/// Object-safe so it can live behind `Arc<dyn Fetch>` and be replaced with a
/// scripted double in tests.
pub trait Fetch: Send + Sync {
    /// Fetches `url` and returns the response body as text.
    fn fetch<'a>(&'a self, url: &'a str) -> FetchFuture<'a>;
}

/// The production fetcher: a [`reqwest::Client`] with a 20-second timeout.
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Builds the client. The GitHub API rejects requests without a
    /// `User-Agent`, so one is always set.
    pub fn new() -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .user_agent(concat!("minihttpd/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }
}

impl Fetch for HttpFetcher {
    fn fetch<'a>(&'a self, url: &'a str) -> FetchFuture<'a> {
        Box::pin(async move {
            let response = self.client.get(url).send().await?;
            let body = response.text().await?;
            Ok(body)
        })
    }
}

/// A scripted fetch double: returns canned bodies in order and counts calls.
///
/// Once the script runs dry the last body repeats. Used by handler tests and
/// available to integration tests.
#[derive(Debug, Default)]
pub struct ScriptedFetch {
    script: Mutex<Vec<Result<String, String>>>,
    calls: AtomicUsize,
}

impl ScriptedFetch {
    /// A double that always answers with `body`.
    pub fn always(body: impl Into<String>) -> Self {
        Self {
            script: Mutex::new(vec![Ok(body.into())]),
            calls: AtomicUsize::new(0),
        }
    }

    /// A double that always fails with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            script: Mutex::new(vec![Err(message.into())]),
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of fetches issued so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Fetch for ScriptedFetch {
    fn fetch<'a>(&'a self, _url: &'a str) -> FetchFuture<'a> {
        let index = self.calls.fetch_add(1, Ordering::SeqCst);
        let outcome = {
            let script = self.script.lock().expect("script lock poisoned");
            // Past the end of the script, the last body repeats.
            script.get(index).or_else(|| script.last()).cloned()
        };
        Box::pin(async move {
            match outcome {
                Some(Ok(body)) => Ok(body),
                Some(Err(message)) => Err(FetchError::Unavailable(message)),
                None => Err(FetchError::Unavailable("no scripted response".into())),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn scripted_fetch_counts_calls() {
        let fetch = ScriptedFetch::always("body");
        assert_eq!(fetch.calls(), 0);
        assert_eq!(fetch.fetch("http://x").await.unwrap(), "body");
        assert_eq!(fetch.fetch("http://x").await.unwrap(), "body");
        assert_eq!(fetch.calls(), 2);
    }

    #[tokio::test]
    async fn scripted_fetch_failure_carries_message() {
        let fetch = ScriptedFetch::failing("connection refused");
        let err = fetch.fetch("http://x").await.unwrap_err();
        assert_eq!(err.to_string(), "connection refused");
    }

    #[tokio::test]
    async fn empty_script_always_errors() {
        let fetch = ScriptedFetch::default();
        let err = fetch.fetch("http://x").await.unwrap_err();
        assert_eq!(err.to_string(), "no scripted response");
        let err = fetch.fetch("http://x").await.unwrap_err();
        assert_eq!(err.to_string(), "no scripted response");
        assert_eq!(fetch.calls(), 2);
    }
}
