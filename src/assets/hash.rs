//! Content hash value object
//!
//! SHA-256 digests used both as cache keys (lowercase hex) and as
//! subresource-integrity values (`sha256-<base64>`).

use std::fmt;
use std::fmt::Write as _;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use sha2::{Digest, Sha256};

/// SHA-256 lowercase hex digest of the UTF-8 bytes of `content`
pub fn hash_string(content: &str) -> String {
    ContentHash::of(content.as_bytes()).hex()
}

/// Immutable SHA-256 digest
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContentHash([u8; 32]);

impl ContentHash {
    /// Prefix used in `integrity` attributes
    pub const SRI_PREFIX: &'static str = "sha256-";

    /// Hash arbitrary bytes
    pub fn of(bytes: &[u8]) -> Self {
        Self(Sha256::digest(bytes).into())
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Lowercase hex, 64 characters
    pub fn hex(&self) -> String {
        let mut out = String::with_capacity(64);
        for byte in self.0 {
            let _ = write!(out, "{byte:02x}");
        }
        out
    }

    /// Value for an HTML `integrity` attribute
    pub fn integrity_attr(&self) -> String {
        format!("{}{}", Self::SRI_PREFIX, STANDARD.encode(self.0))
    }

    /// True when `s` is this hash as hex or as an integrity attribute
    pub fn matches_str(&self, s: &str) -> bool {
        if s.starts_with(Self::SRI_PREFIX) {
            self.integrity_attr() == s
        } else {
            self.hex().eq_ignore_ascii_case(s)
        }
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hex())
    }
}

impl fmt::Debug for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContentHash({})", self.hex())
    }
}
