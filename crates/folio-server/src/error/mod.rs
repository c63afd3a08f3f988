//! [`Error`], [`ErrorKind`], [`ErrorResponse`] and [`Result`].

mod error_response;
mod http_error;
mod pagination_error;

pub use error_response::ErrorResponse;
pub use http_error::{Error, ErrorKind, Result};
