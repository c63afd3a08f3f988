#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

// Tracing target constants for consistent logging.

/// Tracing target for request extraction.
///
/// Use this target for logging rejected pagination requests and the base
/// URL each request resolved to.
pub const TRACING_TARGET_EXTRACT: &str = "folio_server::extract";

/// Tracing target for HTTP error conversion.
pub const TRACING_TARGET_ERROR: &str = "folio_server::error";

mod config;
mod error;

pub mod extract;

pub use crate::config::PaginationConfig;
pub use crate::error::{Error, ErrorKind, ErrorResponse, Result};
pub use crate::extract::Paginated;
