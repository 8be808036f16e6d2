//! Network access for asset caches

use std::collections::HashMap;
use std::time::Duration;

use reqwest::blocking::Client;

use crate::error::{QuireError, QuireResult};

/// Source of remote asset bodies
pub trait Fetcher: Send + Sync {
    fn fetch_bytes(&self, url: &str) -> QuireResult<Vec<u8>>;

    fn fetch_text(&self, url: &str) -> QuireResult<String> {
        let bytes = self.fetch_bytes(url)?;
        String::from_utf8(bytes).map_err(|e| QuireError::Fetch {
            url: url.to_string(),
            message: e.to_string(),
        })
    }
}

/// Blocking HTTP fetcher with a per-request timeout
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> QuireResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("quire/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| QuireError::Fetch {
                url: String::new(),
                message: format!("cannot build HTTP client: {e}"),
            })?;
        Ok(Self { client })
    }
}

impl Fetcher for HttpFetcher {
    fn fetch_bytes(&self, url: &str) -> QuireResult<Vec<u8>> {
        let fetch_error = |e: reqwest::Error| QuireError::Fetch {
            url: url.to_string(),
            message: e.to_string(),
        };

        tracing::debug!(%url, "fetching asset");
        let response = self
            .client
            .get(url)
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(fetch_error)?;
        let body = response.bytes().map_err(fetch_error)?;
        Ok(body.to_vec())
    }
}

/// Fetcher answering from an in-memory table, for offline builds
#[derive(Debug, Clone, Default)]
pub struct MemoryFetcher {
    bodies: HashMap<String, Vec<u8>>,
}

impl MemoryFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, url: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        self.bodies.insert(url.into(), body.into());
        self
    }
}

impl Fetcher for MemoryFetcher {
    fn fetch_bytes(&self, url: &str) -> QuireResult<Vec<u8>> {
        self.bodies.get(url).cloned().ok_or_else(|| QuireError::Fetch {
            url: url.to_string(),
            message: "404 Not Found".to_string(),
        })
    }
}
