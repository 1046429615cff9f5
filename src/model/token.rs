//! Content identity tokens for rendered slides.

use crate::error::{DeckDiffError, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};
use std::fmt;
use std::io::Read;
use std::str::FromStr;

/// Length of a token in bytes (a SHA-256 digest).
pub const TOKEN_LEN: usize = 32;

/// Opaque content identity of one rendered slide.
///
/// Two slides are considered the same slide exactly when their tokens are
/// equal. Nothing else about a token is ever inspected.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlideToken([u8; TOKEN_LEN]);

impl SlideToken {
    /// Wrap an existing digest.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; TOKEN_LEN]) -> Self {
        Self(bytes)
    }

    /// Digest of an in-memory buffer.
    #[must_use]
    pub fn of_content(data: &[u8]) -> Self {
        let digest = Sha256::digest(data);
        Self(digest.into())
    }

    /// Digest of everything readable from `reader`, consumed in 4 KiB blocks.
    pub fn of_reader<R: Read>(mut reader: R) -> std::io::Result<Self> {
        let mut hasher = Sha256::new();
        let mut buf = [0u8; 4096];
        loop {
            let read = reader.read(&mut buf)?;
            if read == 0 {
                break;
            }
            hasher.update(&buf[..read]);
        }
        Ok(Self(hasher.finalize().into()))
    }

    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; TOKEN_LEN] {
        &self.0
    }

    /// First 12 hex digits, for compact display.
    #[must_use]
    pub fn short(&self) -> String {
        let mut full = self.to_string();
        full.truncate(12);
        full
    }
}

impl fmt::Display for SlideToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for SlideToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SlideToken({})", self.short())
    }
}

impl FromStr for SlideToken {
    type Err = DeckDiffError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.len() != TOKEN_LEN * 2 {
            return Err(DeckDiffError::validation(format!(
                "slide token must be {} hex digits, got {}",
                TOKEN_LEN * 2,
                s.len()
            )));
        }
        let mut bytes = [0u8; TOKEN_LEN];
        for (i, byte) in bytes.iter_mut().enumerate() {
            let pair = s.get(i * 2..i * 2 + 2).ok_or_else(|| {
                DeckDiffError::validation(format!("slide token is not ASCII hex: {s}"))
            })?;
            *byte = u8::from_str_radix(pair, 16).map_err(|_| {
                DeckDiffError::validation(format!("slide token is not hex: {s}"))
            })?;
        }
        Ok(Self(bytes))
    }
}

impl Serialize for SlideToken {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SlideToken {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
