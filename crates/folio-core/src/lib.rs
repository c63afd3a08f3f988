#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

// Tracing target constants for consistent logging.

/// Tracing target for parameter binding and result construction.
///
/// Use this target for logging rejected parameters, windowing decisions and
/// link generation.
pub const TRACING_TARGET_PAGINATION: &str = "folio_core::pagination";

/// Tracing target for cursor token encoding and decoding.
pub const TRACING_TARGET_CURSOR: &str = "folio_core::cursor";

mod error;
mod link;
mod request;

pub mod cursor;
pub mod page;
pub mod paginator;
pub mod params;
pub mod prelude;
pub mod query;

pub use crate::cursor::Cursor;
pub use crate::error::{
    BindingError, DecodeError, PaginationError, PaginationResult, ValidationError,
};
pub use crate::link::validate_base_url;
pub use crate::page::Page;
pub use crate::paginator::{CursorPaginator, OffsetPaginator, PageEntity, Paginator};
pub use crate::params::{
    BindParams, ClientParams, CursorParams, DEFAULT_LIMIT, DEFAULT_PAGE, MAX_LIMIT, OffsetParams,
    SortOrder,
};
pub use crate::query::{KeyComparison, QueryWindow, count_query};
pub use crate::request::PageRequest;
