//! Asset cache envelope

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// A cached value plus the metadata used to keep the cache healthy
///
/// `expiry` is advisory; nothing evicts on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStamp<T> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    pub stamped_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry: Option<DateTime<Utc>>,
    /// ISO 639 language code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    pub value: T,
}

impl<T> CacheStamp<T> {
    /// Stamp `value` with the current time
    pub fn new(value: T) -> Self {
        Self {
            hash: None,
            version: None,
            stamped_at: Utc::now(),
            expiry: None,
            language: None,
            value,
        }
    }

    pub fn with_hash(mut self, hash: impl Into<String>) -> Self {
        self.hash = Some(hash.into());
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Set the expiry relative to the stamp time
    pub fn expires_after(mut self, ttl: Duration) -> Self {
        self.expiry = Some(self.stamped_at + ttl);
        self
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expiry.is_some_and(|expiry| expiry <= now)
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }
}
