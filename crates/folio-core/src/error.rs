//! Error types for parameter binding, validation and cursor decoding.
//!
//! Every failure produced by this crate is request-scoped and non-retryable:
//! it describes a malformed client request or a misconfigured caller, never a
//! transient condition.

use std::borrow::Cow;

/// Raw query parameters that could not be bound.
///
/// Binding errors are detected before any semantic validation runs: a
/// parameter that is not a number, or a number outside its allowed range.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BindingError {
    /// The parameter value is not an integer.
    #[error("parameter '{field}' must be an integer, got '{value}'")]
    NotANumber {
        /// Name of the query parameter.
        field: Cow<'static, str>,
        /// The raw value as received.
        value: String,
    },

    /// The parameter value is outside its allowed range.
    #[error("parameter '{field}' {message}")]
    OutOfRange {
        /// Name of the query parameter.
        field: Cow<'static, str>,
        /// Human readable description of the allowed range.
        message: Cow<'static, str>,
    },

    /// The query string itself could not be parsed.
    #[error("malformed query string: {0}")]
    MalformedQuery(String),
}

/// Bound parameters that are semantically invalid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// The base URL is empty.
    #[error("base url is required")]
    BaseUrlRequired,

    /// The base URL could not be parsed.
    #[error("invalid base url format")]
    InvalidBaseUrl,

    /// The base URL parsed but carries no host.
    #[error("base url must contain a valid host")]
    MissingHost,

    /// The ordering token is neither `asc` nor `desc`.
    #[error("ordering must be either 'asc' or 'desc', got '{0}'")]
    InvalidOrdering(String),
}

/// A cursor token that could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// The token is not unpadded URL-safe base64.
    #[error("invalid cursor: {0}")]
    Base64(#[from] base64::DecodeError),

    /// The decoded bytes are not a UTF-8 identifier.
    #[error("invalid cursor: payload is not valid utf-8")]
    Utf8,
}

/// Comprehensive error type for all pagination operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[must_use = "pagination errors should be handled appropriately"]
pub enum PaginationError {
    /// Raw parameters were malformed or out of range.
    #[error("invalid pagination parameters: {0}")]
    Binding(#[from] BindingError),

    /// Bound parameters failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The cursor token failed to decode.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// A navigation link could not be built.
    ///
    /// Raised at result-construction time, after the query already ran. With
    /// parameters that passed validation this indicates a caller bug.
    #[error("failed to build pagination link: {0}")]
    Link(ValidationError),
}

impl PaginationError {
    /// Returns whether this error was caused by the client request.
    pub fn is_client_error(&self) -> bool {
        !self.is_server_error()
    }

    /// Returns whether this error indicates a misconfigured caller.
    pub fn is_server_error(&self) -> bool {
        matches!(self, PaginationError::Link(_))
    }
}

/// Specialized [`Result`] type for pagination operations.
///
/// [`Result`]: std::result::Result
pub type PaginationResult<T, E = PaginationError> = Result<T, E>;
