//! Request extractors that bind pagination parameters.
//!
//! [`Paginated`] binds any [`BindParams`] type from the request line and
//! headers, rejecting invalid parameters with an [`Error`]. The base URL of
//! navigation links is resolved by [`page_request`] according to the
//! [`PaginationConfig`] installed on the router.
//!
//! [`BindParams`]: folio_core::BindParams
//! [`Error`]: crate::Error
//! [`PaginationConfig`]: crate::PaginationConfig

mod page_request;
mod paginated;

pub use page_request::page_request;
pub use paginated::Paginated;
