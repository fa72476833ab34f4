//! Document identities.
//!
//! Every stored document, and every child embedded inside one, is named by a
//! 12-byte object identifier rendered as 24 lowercase hex characters:
//!
//! | bytes | content                              |
//! |-------|--------------------------------------|
//! | 0..4  | seconds since the Unix epoch (BE)    |
//! | 4..9  | random value fixed per process       |
//! | 9..12 | counter, seeded randomly per process |
//!
//! Identifiers generated by one process sort in creation order. The stores
//! use them to break ties between equal list timestamps.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicU32, Ordering};

use chrono::Utc;
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use thiserror::Error;

const IDENTIFIER_BYTES: usize = 12;
const IDENTIFIER_HEX_LENGTH: usize = IDENTIFIER_BYTES * 2;
const COUNTER_MASK: u32 = 0x00FF_FFFF;

/// Error returned when a string is not a well-formed identifier.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Malformed document identifier: '{0}'")]
pub struct InvalidIdentifier(pub String);

/// Unique identity of a document or embedded child.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DocumentId([u8; IDENTIFIER_BYTES]);

impl DocumentId {
    /// Generates a fresh identifier.
    ///
    /// **Note**: This is an impure function (reads the clock and a process-wide counter).
    #[must_use]
    pub fn generate() -> Self {
        let seconds = u32::try_from(Utc::now().timestamp()).unwrap_or(u32::MAX);
        let counter = next_counter();

        let mut bytes = [0_u8; IDENTIFIER_BYTES];
        bytes[..4].copy_from_slice(&seconds.to_be_bytes());
        bytes[4..9].copy_from_slice(process_unique());
        bytes[9..].copy_from_slice(&counter.to_be_bytes()[1..]);

        Self(bytes)
    }

    /// Creates an identifier from raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; IDENTIFIER_BYTES]) -> Self {
        Self(bytes)
    }

    /// Returns the raw bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; IDENTIFIER_BYTES] {
        &self.0
    }

    /// Parses the 24-character hex form. Upper and lower case digits are accepted.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidIdentifier`] when the input is not exactly 24 hex digits.
    pub fn parse(value: &str) -> Result<Self, InvalidIdentifier> {
        if !Self::is_valid(value) {
            return Err(InvalidIdentifier(value.to_string()));
        }

        let mut bytes = [0_u8; IDENTIFIER_BYTES];
        hex::decode_to_slice(value, &mut bytes)
            .map_err(|_| InvalidIdentifier(value.to_string()))?;

        Ok(Self(bytes))
    }

    /// Returns true if `value` is a well-formed identifier.
    #[must_use]
    pub fn is_valid(value: &str) -> bool {
        value.len() == IDENTIFIER_HEX_LENGTH && value.bytes().all(|byte| byte.is_ascii_hexdigit())
    }
}

fn process_unique() -> &'static [u8; 5] {
    static PROCESS_UNIQUE: OnceLock<[u8; 5]> = OnceLock::new();
    PROCESS_UNIQUE.get_or_init(rand::random)
}

fn next_counter() -> u32 {
    static COUNTER: OnceLock<AtomicU32> = OnceLock::new();
    COUNTER
        .get_or_init(|| AtomicU32::new(rand::random::<u32>() & COUNTER_MASK))
        .fetch_add(1, Ordering::Relaxed)
        & COUNTER_MASK
}

impl fmt::Display for DocumentId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&hex::encode(self.0))
    }
}

impl FromStr for DocumentId {
    type Err = InvalidIdentifier;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value)
    }
}

impl Serialize for DocumentId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DocumentId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Self::parse(&value).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    #[rstest]
    #[case("507f1f77bcf86cd799439011")]
    #[case("507F1F77BCF86CD799439011")]
    #[case("000000000000000000000000")]
    fn test_parse_accepts_hex_identifiers(#[case] value: &str) {
        let identifier = DocumentId::parse(value).unwrap();
        assert_eq!(identifier.to_string(), value.to_lowercase());
    }

    #[rstest]
    #[case("")]
    #[case("not-an-objectid")]
    #[case("507f1f77bcf86cd79943901")]
    #[case("507f1f77bcf86cd7994390111")]
    #[case("507f1f77bcf86cd79943901g")]
    #[case(" 507f1f77bcf86cd79943901")]
    fn test_parse_rejects_malformed_identifiers(#[case] value: &str) {
        assert_eq!(
            DocumentId::parse(value),
            Err(InvalidIdentifier(value.to_string()))
        );
    }

    #[rstest]
    #[case([0xAB; 12], "abababababababababababab")]
    #[case([0x0F; 12], "0f0f0f0f0f0f0f0f0f0f0f0f")]
    fn test_display_is_lowercase_hex(#[case] bytes: [u8; 12], #[case] expected: &str) {
        assert_eq!(DocumentId::from_bytes(bytes).to_string(), expected);
    }

    #[rstest]
    fn test_generate_is_unique() {
        let first = DocumentId::generate();
        let second = DocumentId::generate();

        assert_ne!(first, second);
        assert_eq!(first.as_bytes()[4..9], second.as_bytes()[4..9]);
        assert!(DocumentId::is_valid(&first.to_string()));
    }

    #[rstest]
    fn test_serde_uses_hex_string() {
        let identifier = DocumentId::parse("507f1f77bcf86cd799439011").unwrap();
        let json = serde_json::to_string(&identifier).unwrap();
        assert_eq!(json, "\"507f1f77bcf86cd799439011\"");

        let back: DocumentId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, identifier);

        let rejected: Result<DocumentId, _> = serde_json::from_str("\"nope\"");
        assert!(rejected.is_err());
    }

    proptest! {
        #[test]
        fn prop_display_parses_back(bytes in proptest::array::uniform12(any::<u8>())) {
            let identifier = DocumentId::from_bytes(bytes);
            prop_assert_eq!(DocumentId::parse(&identifier.to_string()), Ok(identifier));
        }
    }
}
