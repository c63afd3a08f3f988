//! Opaque cursor tokens for keyset pagination.
//!
//! A cursor carries the identifier of the row a page starts after (or
//! before). On the wire it is the identifier's bytes in unpadded, URL-safe
//! base64, so it can be placed in a query string or a path segment without
//! further escaping.

#[cfg(feature = "schema")]
use std::borrow::Cow;
use std::fmt;

use base64::prelude::*;
#[cfg(feature = "schema")]
use schemars::{JsonSchema, Schema, SchemaGenerator};
use serde::{Deserialize, Serialize};

use crate::{DecodeError, TRACING_TARGET_CURSOR};

/// Encodes an identifier into a transport-safe cursor token.
pub fn encode(identifier: &str) -> String {
    BASE64_URL_SAFE_NO_PAD.encode(identifier.as_bytes())
}

/// Decodes a cursor token back into the identifier it was built from.
pub fn decode(token: &str) -> Result<String, DecodeError> {
    let bytes = BASE64_URL_SAFE_NO_PAD.decode(token).map_err(|error| {
        tracing::debug!(
            target: TRACING_TARGET_CURSOR,
            token = %token,
            error = %error,
            "rejected malformed cursor token"
        );
        DecodeError::from(error)
    })?;

    String::from_utf8(bytes).map_err(|_| DecodeError::Utf8)
}

/// A decoded cursor, i.e. the identifier of a page boundary row.
///
/// Serializes as the encoded token and deserializes only from a token that
/// decodes successfully.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Cursor {
    identifier: String,
}

impl Cursor {
    /// Creates a cursor pointing at the given identifier.
    #[inline]
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
        }
    }

    /// Returns the identifier this cursor points at.
    #[inline]
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Encodes the cursor as a URL-safe base64 token.
    #[inline]
    pub fn encode(&self) -> String {
        encode(&self.identifier)
    }

    /// Decodes a cursor from a URL-safe base64 token.
    pub fn decode(token: &str) -> Result<Self, DecodeError> {
        decode(token).map(Self::new)
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl From<Cursor> for String {
    fn from(cursor: Cursor) -> Self {
        cursor.encode()
    }
}

#[cfg(feature = "schema")]
impl JsonSchema for Cursor {
    fn schema_name() -> Cow<'static, str> {
        "Cursor".into()
    }

    fn json_schema(generator: &mut SchemaGenerator) -> Schema {
        String::json_schema(generator)
    }
}

impl TryFrom<String> for Cursor {
    type Error = DecodeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Cursor::decode(&value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_is_unpadded_url_safe() {
        assert_eq!(encode("123"), "MTIz");
        assert_eq!(encode("1"), "MQ");
        assert_eq!(encode(""), "");
        // '?' and '>' land on the URL-safe alphabet's '_' and '-'.
        assert_eq!(encode("??>"), "Pz8-");
        assert_eq!(encode("???"), "Pz8_");
    }

    #[test]
    fn decode_roundtrip() {
        let identifiers = [
            "123",
            "id with spaces",
            "id-with-special-chars!@#$%",
            "id_with_unicode_你好",
            "id/with/slashes",
            "id=with=equals",
            "0195f3e2-7b1c-7c4e-9a52-3d1f0c8b6e21",
        ];

        for identifier in identifiers {
            let token = encode(identifier);
            assert_eq!(decode(&token).as_deref(), Ok(identifier));
        }
    }

    #[test]
    fn decode_invalid() {
        assert!(matches!(decode("invalid-base64!!!"), Err(DecodeError::Base64(_))));
        assert!(matches!(decode("invalid!!!"), Err(DecodeError::Base64(_))));
        // Padded input is rejected by the unpadded alphabet.
        assert!(decode("MQ==").is_err());
        // Standard alphabet characters are rejected.
        assert!(decode("Pz8+").is_err());
        // Valid base64 that is not utf-8.
        assert_eq!(decode("_w"), Err(DecodeError::Utf8));
    }

    #[test]
    fn cursor_serde_uses_token() {
        let cursor = Cursor::new("42");
        let json = serde_json::to_string(&cursor).unwrap();
        assert_eq!(json, "\"NDI\"");

        let decoded: Cursor = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded.identifier(), "42");

        assert!(serde_json::from_str::<Cursor>("\"!!\"").is_err());
    }
}
