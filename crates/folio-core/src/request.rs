//! Framework-agnostic view of an inbound page request.

use std::borrow::Cow;

use percent_encoding::percent_decode_str;
use url::Url;

use crate::{
    BindingError, ClientParams, PaginationResult, TRACING_TARGET_PAGINATION, ValidationError,
};

/// The parts of an inbound request that pagination binding reads.
///
/// Holds the scheme, host and path used to derive the base URL of navigation
/// links, plus the raw query string. The query is decoded at bind time, so a
/// malformed query string surfaces as a [`BindingError`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageRequest {
    scheme: String,
    host: String,
    path: String,
    query: String,
}

impl PageRequest {
    /// Creates a request without query parameters.
    pub fn new(
        scheme: impl Into<String>,
        host: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        Self {
            scheme: scheme.into(),
            host: host.into(),
            path: path.into(),
            query: String::new(),
        }
    }

    /// Parses an absolute request URL.
    pub fn parse(url: &str) -> PaginationResult<Self> {
        let url = Url::parse(url).map_err(|_| ValidationError::InvalidBaseUrl)?;
        Ok(Self::from_url(&url))
    }

    /// Builds a request from an already parsed URL.
    pub fn from_url(url: &Url) -> Self {
        let host = match (url.host_str(), url.port()) {
            (Some(host), Some(port)) => format!("{host}:{port}"),
            (Some(host), None) => host.to_owned(),
            (None, _) => String::new(),
        };

        Self::new(url.scheme(), host, url.path()).with_query(url.query().unwrap_or_default())
    }

    /// Replaces the query with `raw_query`, still percent-encoded.
    pub fn with_query(mut self, raw_query: &str) -> Self {
        raw_query
            .strip_prefix('?')
            .unwrap_or(raw_query)
            .clone_into(&mut self.query);
        self
    }

    /// Returns the request scheme.
    #[inline]
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// Returns the request host, including a non-default port.
    #[inline]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the request path.
    #[inline]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the raw query string, without the leading `?`.
    #[inline]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Decodes the query string into pairs, in request order.
    ///
    /// Fails on an escape that is not `%` followed by two hex digits, and on
    /// an escape sequence that does not decode to UTF-8.
    pub fn query_params(&self) -> Result<ClientParams, BindingError> {
        self.query
            .split('&')
            .filter(|segment| !segment.is_empty())
            .map(|segment| {
                let (key, value) = segment.split_once('=').unwrap_or((segment, ""));
                Ok((decode_component(key)?, decode_component(value)?))
            })
            .collect::<Result<ClientParams, _>>()
            .inspect_err(|error| {
                tracing::debug!(
                    target: TRACING_TARGET_PAGINATION,
                    error = %error,
                    "rejected malformed query string"
                );
            })
    }

    /// Returns the base URL of navigation links: scheme, host and path,
    /// without the query string.
    pub fn base_url(&self) -> String {
        if self.host.is_empty() {
            return String::new();
        }

        format!("{}://{}{}", self.scheme, self.host, self.path)
    }
}

/// Decodes one `application/x-www-form-urlencoded` key or value.
fn decode_component(raw: &str) -> Result<String, BindingError> {
    let bytes = raw.as_bytes();
    let escapes_are_valid = bytes
        .iter()
        .enumerate()
        .filter(|(_, byte)| **byte == b'%')
        .all(|(index, _)| {
            bytes
                .get(index + 1..index + 3)
                .is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit))
        });

    if !escapes_are_valid {
        return Err(BindingError::MalformedQuery(raw.to_owned()));
    }

    let spaced = raw.replace('+', " ");
    percent_decode_str(&spaced)
        .decode_utf8()
        .map(Cow::into_owned)
        .map_err(|_| BindingError::MalformedQuery(raw.to_owned()))
}
