//! Store-assigned document identifiers.
//!
//! Identifiers are 12 bytes, rendered as 24 lowercase hex characters: a
//! 6-byte big-endian millisecond timestamp, a 2-byte process-local counter,
//! then 4 random bytes. The list endpoints rely on lexicographic order
//! tracking insertion order, so ids generated in the same millisecond are
//! ordered by the counter.

use rand::RngCore;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU16, Ordering};

use crate::errors::AppError;

/// Hex length of a rendered identifier
pub const ID_LEN: usize = 24;

/// An opaque 12-byte document identifier
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DocumentId(String);

impl DocumentId {
    /// Generate a fresh identifier
    pub fn generate() -> Self {
        static COUNTER: AtomicU16 = AtomicU16::new(0);

        let mut bytes = [0u8; 12];
        let millis = chrono::Utc::now().timestamp_millis() as u64;
        bytes[..6].copy_from_slice(&millis.to_be_bytes()[2..]);
        let count = COUNTER.fetch_add(1, Ordering::Relaxed);
        bytes[6..8].copy_from_slice(&count.to_be_bytes());
        rand::thread_rng().fill_bytes(&mut bytes[8..]);
        DocumentId(hex::encode(bytes))
    }

    /// Parse and validate an identifier supplied by a client
    pub fn parse(value: &str) -> Result<Self, AppError> {
        if value.len() == ID_LEN && value.bytes().all(|b| b.is_ascii_hexdigit()) {
            Ok(DocumentId(value.to_ascii_lowercase()))
        } else {
            Err(AppError::InvalidId {
                value: value.to_string(),
            })
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for DocumentId {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DocumentId::parse(s)
    }
}

impl Serialize for DocumentId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for DocumentId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DocumentId::parse(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_shape() {
        let id = DocumentId::generate();
        assert_eq!(id.as_str().len(), ID_LEN);
        assert!(id.as_str().bytes().all(|b| b.is_ascii_hexdigit()));
    }

    #[test]
    fn test_generated_ids_are_unique() {
        let a = DocumentId::generate();
        let b = DocumentId::generate();
        assert_ne!(a, b);
    }

    #[test]
    fn test_ids_sort_in_generation_order() {
        // Back-to-back generations land in the same millisecond; the
        // counter must keep them ordered anyway.
        let ids: Vec<DocumentId> = (0..1_000).map(|_| DocumentId::generate()).collect();
        assert!(ids.windows(2).all(|w| w[0].as_str() < w[1].as_str()));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(DocumentId::parse("not-an-id").is_err());
        assert!(DocumentId::parse("abc").is_err());
        assert!(DocumentId::parse(&"g".repeat(24)).is_err());
    }

    #[test]
    fn test_parse_round_trip() {
        let id = DocumentId::generate();
        let parsed = DocumentId::parse(id.as_str()).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_serde_round_trip() {
        let id = DocumentId::generate();
        let json = serde_json::to_string(&id).unwrap();
        let back: DocumentId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, back);
    }
}
