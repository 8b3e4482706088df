use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use anyhow::Context as _;

use crate::foundation::error::{FlyError, FlyResult};

/// Remote scoreboard client contract.
///
/// `Ok(None)` means the endpoint answered with nothing usable. Caching, timeouts
/// and retries are the implementation's concern; the celebration module calls
/// `fetch` at most once per poll and never retries.
pub trait ScoreboardFeed: Send {
    fn fetch(&mut self, url: &str) -> FlyResult<Option<serde_json::Value>>;
}

#[derive(Debug, Default)]
struct StaticFeedInner {
    response: Option<serde_json::Value>,
    fail_with: Option<String>,
    fetches: u64,
    last_url: Option<String>,
}

/// In-memory feed for tests and offline runs.
///
/// Clones share state, so a test can keep a handle and swap the payload while
/// the plugin owns another clone.
#[derive(Clone, Debug, Default)]
pub struct StaticFeed {
    inner: Arc<Mutex<StaticFeedInner>>,
}

impl StaticFeed {
    pub fn new(response: Option<serde_json::Value>) -> Self {
        let feed = Self::default();
        feed.set_response(response);
        feed
    }

    pub fn set_response(&self, response: Option<serde_json::Value>) {
        self.lock().response = response;
    }

    /// Make every following fetch fail until cleared with `None`.
    pub fn set_failure(&self, msg: Option<&str>) {
        self.lock().fail_with = msg.map(str::to_owned);
    }

    pub fn fetch_count(&self) -> u64 {
        self.lock().fetches
    }

    pub fn last_url(&self) -> Option<String> {
        self.lock().last_url.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, StaticFeedInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ScoreboardFeed for StaticFeed {
    fn fetch(&mut self, url: &str) -> FlyResult<Option<serde_json::Value>> {
        let mut inner = self.lock();
        inner.fetches += 1;
        inner.last_url = Some(url.to_owned());
        if let Some(msg) = &inner.fail_with {
            return Err(FlyError::feed(msg.clone()));
        }
        Ok(inner.response.clone())
    }
}

/// Reads a scoreboard document from disk on every fetch; the URL is ignored.
#[derive(Clone, Debug)]
pub struct FileFeed {
    path: PathBuf,
}

impl FileFeed {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ScoreboardFeed for FileFeed {
    fn fetch(&mut self, _url: &str) -> FlyResult<Option<serde_json::Value>> {
        let bytes = std::fs::read(&self.path)
            .with_context(|| format!("read scoreboard '{}'", self.path.display()))?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }
        let v: serde_json::Value = serde_json::from_slice(&bytes)
            .with_context(|| format!("parse scoreboard '{}'", self.path.display()))?;
        Ok(if v.is_null() { None } else { Some(v) })
    }
}
