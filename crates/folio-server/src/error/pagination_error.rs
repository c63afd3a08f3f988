//! Conversion of pagination failures into HTTP errors.

use folio_core::{BindingError, PaginationError, ValidationError};

use super::{Error, ErrorKind};
use crate::TRACING_TARGET_ERROR;

impl From<PaginationError> for Error<'static> {
    fn from(error: PaginationError) -> Self {
        match error {
            PaginationError::Binding(ref binding) => {
                let resource = match binding {
                    BindingError::NotANumber { field, .. }
                    | BindingError::OutOfRange { field, .. } => field.to_string(),
                    BindingError::MalformedQuery(_) => "query".to_owned(),
                };

                ErrorKind::InvalidPagination
                    .with_resource(resource)
                    .with_context(error.to_string())
            }
            PaginationError::Validation(ValidationError::InvalidOrdering(_)) => {
                ErrorKind::InvalidPagination
                    .with_resource("ordering")
                    .with_context(error.to_string())
            }
            PaginationError::Validation(validation) => {
                // The base url is derived from the request line and headers.
                ErrorKind::BadRequest
                    .with_resource("host")
                    .with_context(validation.to_string())
            }
            PaginationError::Decode(decode) => ErrorKind::InvalidCursor
                .with_resource("cursor")
                .with_context(decode.to_string()),
            PaginationError::Link(ref link) => {
                tracing::error!(
                    target: TRACING_TARGET_ERROR,
                    error = %link,
                    "failed to build pagination links"
                );
                ErrorKind::InternalServerError.into_error()
            }
        }
    }
}
